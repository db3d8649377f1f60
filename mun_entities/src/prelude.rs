pub use crate::domain::committee::{resolve_committee, committee_slug_for_entry, Committee, CommitteeDescriptor, CommitteeLevel};
pub use crate::domain::participant::{ParticipantRecord, ParticipantProfile, ParticipantPatch, ProfileUpdate, RecordFilter, ConflictKey};
pub use crate::domain::role::{is_elevated_role, Capability, CapabilityTable, Role};
pub use crate::domain::session::Session;
pub use crate::derived_models::sort_participants;
