use serde::Serialize;

use crate::domain::participant::ParticipantProfile;
use crate::domain::role::{Capability, CapabilityTable, Role};
use crate::domain::session::Session;


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminDashboardView {
    pub name: String,
    pub role: Role,
    pub capabilities: Vec<Capability>,
}

impl AdminDashboardView {
    /// `None` when the viewer may not enter the admin area.
    pub fn new(session: &Session, profile: Option<&ParticipantProfile>, capabilities: &CapabilityTable) -> Option<Self> {
        let email = session.email()?;
        let role = Role::parse(profile.and_then(|p| p.record.role.as_deref()));
        if !capabilities.allows(&role, Capability::ViewAdminArea) {
            return None;
        }

        let name = profile.map(|p| p.record.display_name().to_string()).unwrap_or_else(|| email.to_string());
        Some(AdminDashboardView {
            name,
            capabilities: capabilities.capabilities_of(&role),
            role,
        })
    }
}
