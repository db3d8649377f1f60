use sea_orm::prelude::Uuid;
use serde::{Serialize, Deserialize};

use crate::domain::participant::{non_empty, ParticipantProfile};
use crate::domain::session::Session;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfileView {
    pub uuid: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub display_role: String,
    pub grade: Option<String>,
    pub bio: Option<String>,
    pub country: Option<String>,
    pub committee: Option<String>,
    pub past_conferences: Option<i32>,
    pub awards: Option<String>,
    pub is_me: bool,
}

impl PublicProfileView {
    pub fn new(profile: ParticipantProfile, viewer: &Session) -> Self {
        let is_me = viewer.email() == Some(profile.record.email.as_str());
        let display_role = profile.record.role().display_name();
        let record = profile.record;

        PublicProfileView {
            uuid: record.uuid,
            full_name: non_empty(record.full_name.as_deref()).map(str::to_string),
            email: record.email,
            display_role,
            grade: non_empty(profile.grade.as_deref()).map(str::to_string),
            bio: non_empty(profile.bio.as_deref()).map(str::to_string),
            country: non_empty(record.country.as_deref()).map(str::to_string),
            committee: non_empty(record.committee.as_deref()).map(str::to_string),
            past_conferences: profile.past_conferences.filter(|n| *n > 0),
            awards: non_empty(profile.awards.as_deref()).map(str::to_string),
            is_me,
        }
    }
}
