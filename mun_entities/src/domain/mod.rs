pub mod committee;
pub mod participant;
pub mod role;
pub mod session;
