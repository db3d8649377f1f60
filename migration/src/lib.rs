use sea_orm_migration::prelude::*;
pub use sea_orm_migration::prelude::{MigrationTrait, MigratorTrait};

mod m20250912_101500_add_users;
mod m20250912_104211_add_participants;
mod m20250930_181022_add_key_expiry;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250912_101500_add_users::Migration),
            Box::new(m20250912_104211_add_participants::Migration),
            Box::new(m20250930_181022_add_key_expiry::Migration),
        ]
    }
}
