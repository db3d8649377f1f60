mod participant_list;
mod public_profile;
mod committee_session;
mod admin_dashboard;

pub use participant_list::*;
pub use public_profile::*;
pub use committee_session::*;
pub use admin_dashboard::*;
