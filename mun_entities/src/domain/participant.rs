use sea_orm::{prelude::*, ActiveValue};
use serde::{Serialize, Deserialize};

use crate::schema;

use super::committee::{resolve_committee, Committee};
use super::role::Role;

pub const GRADES: [&str; 5] = ["≤8", "9", "10", "11", "12"];


/// One conference participant as listed in the directory.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct ParticipantRecord {
    pub uuid: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub role: Option<String>,
    pub committee: Option<String>,
    pub country: Option<String>,
}

impl ParticipantRecord {
    /// Full name if set, email otherwise.
    pub fn display_name(&self) -> &str {
        non_empty(self.full_name.as_deref()).unwrap_or(&self.email)
    }

    pub fn role(&self) -> Role {
        Role::parse(self.role.as_deref())
    }

    pub fn resolved_committee(&self) -> Committee {
        resolve_committee(self.committee.as_deref())
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct ParticipantProfile {
    #[serde(flatten)]
    pub record: ParticipantRecord,
    pub user_id: Option<Uuid>,
    pub grade: Option<String>,
    pub bio: Option<String>,
    pub past_conferences: Option<i32>,
    pub awards: Option<String>,
}

impl From<schema::participant::Model> for ParticipantProfile {
    fn from(model: schema::participant::Model) -> Self {
        ParticipantProfile {
            record: ParticipantRecord {
                uuid: model.uuid,
                full_name: model.full_name,
                email: model.email,
                role: model.role,
                committee: model.committee,
                country: model.country,
            },
            user_id: model.user_id,
            grade: model.grade,
            bio: model.bio,
            past_conferences: model.past_conferences,
            awards: model.awards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    Id(Uuid),
    Email(String),
    UserId(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKey {
    Email,
    UserId,
}

/// A partial profile for upserts.
///
/// `None` leaves a column untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantPatch {
    /// Id for a newly inserted row. Existing rows keep theirs.
    pub uuid: Option<Uuid>,
    pub email: Option<String>,
    pub user_id: Option<Option<Uuid>>,
    pub full_name: Option<Option<String>>,
    pub role: Option<Option<String>>,
    pub committee: Option<Option<String>>,
    pub country: Option<Option<String>>,
    pub grade: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub past_conferences: Option<Option<i32>>,
    pub awards: Option<Option<String>>,
}

impl ParticipantPatch {
    pub fn with_email(email: impl Into<String>) -> Self {
        ParticipantPatch {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Writes every present field onto `model`.
    pub(crate) fn apply_to(&self, model: &mut schema::participant::ActiveModel) {
        if let Some(email) = &self.email {
            model.email = ActiveValue::Set(email.clone());
        }
        if let Some(user_id) = self.user_id {
            model.user_id = ActiveValue::Set(user_id);
        }
        if let Some(full_name) = &self.full_name {
            model.full_name = ActiveValue::Set(full_name.clone());
        }
        if let Some(role) = &self.role {
            model.role = ActiveValue::Set(role.clone());
        }
        if let Some(committee) = &self.committee {
            model.committee = ActiveValue::Set(committee.clone());
        }
        if let Some(country) = &self.country {
            model.country = ActiveValue::Set(country.clone());
        }
        if let Some(grade) = &self.grade {
            model.grade = ActiveValue::Set(grade.clone());
        }
        if let Some(bio) = &self.bio {
            model.bio = ActiveValue::Set(bio.clone());
        }
        if let Some(past_conferences) = self.past_conferences {
            model.past_conferences = ActiveValue::Set(past_conferences);
        }
        if let Some(awards) = &self.awards {
            model.awards = ActiveValue::Set(awards.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    UnknownGrade(String),
    NegativePastConferences(i32),
}

impl std::fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileValidationError::UnknownGrade(_) => write!(f, "Grade must be one of {}", GRADES.join(", ")),
            ProfileValidationError::NegativePastConferences(n) => write!(f, "Past conferences can not be negative (got {})", n),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Fields a participant may edit on their own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub grade: Option<String>,
    pub bio: Option<String>,
    pub past_conferences: Option<i32>,
    pub awards: Option<String>,
}

impl ProfileUpdate {
    /// Trims text, turning blanks into nulls, and checks the grade.
    pub fn into_patch(self, email: String) -> Result<ParticipantPatch, ProfileValidationError> {
        let grade = trimmed(self.grade);
        if let Some(grade) = &grade {
            if !GRADES.contains(&grade.as_str()) {
                return Err(ProfileValidationError::UnknownGrade(grade.clone()));
            }
        }
        if let Some(n) = self.past_conferences {
            if n < 0 {
                return Err(ProfileValidationError::NegativePastConferences(n));
            }
        }

        Ok(ParticipantPatch {
            email: Some(email),
            full_name: Some(trimmed(self.full_name)),
            grade: Some(grade),
            bio: Some(trimmed(self.bio)),
            past_conferences: Some(self.past_conferences),
            awards: Some(trimmed(self.awards)),
            ..Default::default()
        })
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
