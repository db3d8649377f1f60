use itertools::Itertools;
use sea_orm::prelude::*;

use faker_rand::en_us::names::FullName;

use crate::directory::{DirectoryError, DirectoryService};
use crate::domain::committee::Committee;
use crate::domain::participant::{ConflictKey, ParticipantPatch, ParticipantProfile, ParticipantRecord};
use crate::domain::role::Role;


const COUNTRIES: [&str; 12] = [
    "Argentina", "Brazil", "Canada", "Chad", "France", "Germany",
    "India", "Japan", "Kenya", "Mexico", "Norway", "Peru",
];

#[derive(Debug)]
pub struct MockOption {
    pub deterministic_uuids: bool,
    pub num_participants: u32,
    pub num_chairs: u32,
    pub num_executives: u32,
    pub use_random_names: bool,
}

impl Default for MockOption {
    fn default() -> Self {
        Self {
            deterministic_uuids: false,
            num_participants: 30,
            num_chairs: 3,
            num_executives: 1,
            use_random_names: false,
        }
    }
}

pub fn make_mock_directory() -> Vec<ParticipantProfile> {
    make_mock_directory_with_options(Default::default())
}

/*
Deterministic uuids start at 1000.
Chairs come first, then executives, then delegates.
*/
pub fn make_mock_directory_with_options(options: MockOption) -> Vec<ParticipantProfile> {
    (0..options.num_participants).map(|i| {
        let uuid = if options.deterministic_uuids {Uuid::from_u128(1000 + i as u128)} else {Uuid::new_v4()};

        let full_name = if options.use_random_names {
            rand::random::<FullName>().to_string()
        }
        else {
            format!("Participant {}", i)
        };

        let role = if i < options.num_chairs {
            Role::Chair
        }
        else if i < options.num_chairs + options.num_executives {
            Role::Executive
        }
        else {
            Role::Delegate
        };

        let committee = Committee::ALL[i as usize % Committee::ALL.len()];

        ParticipantProfile {
            record: ParticipantRecord {
                uuid,
                full_name: Some(full_name),
                email: format!("participant{}@mun.test", i),
                role: Some(role.to_string()),
                committee: Some(committee.slug().to_string()),
                country: Some(COUNTRIES[i as usize % COUNTRIES.len()].to_string()),
            },
            user_id: None,
            grade: None,
            bio: None,
            past_conferences: None,
            awards: None,
        }
    }).collect_vec()
}

/// Upserts the given profiles by email. New rows keep the mock ids.
pub async fn save_mock_directory<D>(directory: &D, profiles: Vec<ParticipantProfile>) -> Result<Vec<ParticipantProfile>, DirectoryError> where D: DirectoryService + ?Sized {
    let mut out = vec![];
    for profile in profiles {
        let record = profile.record;
        let patch = ParticipantPatch {
            uuid: Some(record.uuid),
            email: Some(record.email),
            full_name: Some(record.full_name),
            role: Some(record.role),
            committee: Some(record.committee),
            country: Some(record.country),
            ..Default::default()
        };
        out.push(directory.upsert(patch, ConflictKey::Email).await?);
    }
    Ok(out)
}
