use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};
use itertools::Itertools;
use sea_orm::prelude::Uuid;
use serde::{Serialize, Deserialize};

use crate::domain::participant::{non_empty, ParticipantRecord};
use crate::domain::role::{Capability, CapabilityTable, Role};


/// Locale-aware, case-insensitive ordering of directory entries.
///
/// Accents are significant only after base letters, so `Ägypten` sorts
/// next to `Algeria` rather than after `Zambia`.
pub struct ParticipantOrder {
    collator: Option<Collator>,
}

impl ParticipantOrder {
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        // Secondary strength ignores case but keeps accents
        options.strength = Some(Strength::Secondary);
        ParticipantOrder {
            collator: Collator::try_new(&Default::default(), options).ok(),
        }
    }

    fn compare_text(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }

    /// Absent or blank values sort after everything else.
    fn compare_nulls_last(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        match (non_empty(a), non_empty(b)) {
            (Some(a), Some(b)) => self.compare_text(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    pub fn compare(&self, a: &ParticipantRecord, b: &ParticipantRecord) -> Ordering {
        self.compare_nulls_last(a.committee.as_deref(), b.committee.as_deref())
            .then_with(|| self.compare_nulls_last(a.country.as_deref(), b.country.as_deref()))
            .then_with(|| self.compare_text(a.display_name(), b.display_name()))
    }
}

impl Default for ParticipantOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Orders participants by committee, then delegation, then name.
///
/// Returns a sorted copy. The sort is stable, so records with equal keys
/// keep their input order.
pub fn sort_participants(records: &[ParticipantRecord]) -> Vec<ParticipantRecord> {
    let order = ParticipantOrder::new();
    records.iter().cloned().sorted_by(|a, b| order.compare(a, b)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantListEntry {
    pub uuid: Uuid,
    pub name: String,
    pub committee: Option<String>,
    pub country: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantListView {
    pub participants: Vec<ParticipantListEntry>,
    pub can_delete: bool,
}

impl ParticipantListView {
    pub fn new(records: &[ParticipantRecord], viewer_role: &Role, capabilities: &CapabilityTable) -> Self {
        let participants = sort_participants(records).into_iter().map(|record| {
            ParticipantListEntry {
                uuid: record.uuid,
                name: record.display_name().to_string(),
                role: record.role(),
                committee: non_empty(record.committee.as_deref()).map(|s| s.to_string()),
                country: non_empty(record.country.as_deref()).map(|s| s.to_string()),
            }
        }).collect_vec();

        ParticipantListView {
            participants,
            can_delete: capabilities.allows(viewer_role, Capability::DeleteUser),
        }
    }
}
