use serde::Serialize;

use crate::domain::committee::{Committee, CommitteeDescriptor};
use crate::domain::participant::{non_empty, ParticipantProfile};
use crate::domain::role::{Capability, CapabilityTable, Role};


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitteeListView {
    pub committees: Vec<&'static CommitteeDescriptor>,
}

impl CommitteeListView {
    pub fn new() -> Self {
        CommitteeListView {
            committees: Committee::ALL.iter().map(|c| c.descriptor()).collect()
        }
    }
}

impl Default for CommitteeListView {
    fn default() -> Self {
        Self::new()
    }
}

/// What a participant sees when they enter their committee session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitteeSessionView {
    pub committee: &'static CommitteeDescriptor,
    pub full_name: Option<String>,
    pub role: Role,
    pub delegation: Option<String>,
    pub can_moderate: bool,
}

impl CommitteeSessionView {
    /// A missing profile gives the default committee and a delegate role.
    pub fn new(profile: Option<&ParticipantProfile>, capabilities: &CapabilityTable) -> Self {
        let record = profile.map(|p| &p.record);
        let role = Role::parse(record.and_then(|r| r.role.as_deref()));
        let committee = record.map(|r| r.resolved_committee()).unwrap_or_default();

        CommitteeSessionView {
            committee: committee.descriptor(),
            full_name: record.and_then(|r| non_empty(r.full_name.as_deref())).map(str::to_string),
            delegation: record.and_then(|r| non_empty(r.country.as_deref())).map(str::to_string),
            can_moderate: capabilities.allows(&role, Capability::ModerateSession),
            role,
        }
    }
}
