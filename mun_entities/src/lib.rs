pub mod schema;
pub mod domain;
pub mod derived_models;
pub mod directory;
pub mod prelude;
pub mod mock;

pub use directory::{DirectoryError, DirectoryService, SqlDirectory};
