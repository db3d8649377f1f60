use migration::MigratorTrait;
use mun_entities::{mock, SqlDirectory};
use sea_orm::{prelude::*, Database, Statement};

pub async fn set_up_db(with_mock_env: bool) -> Result<DatabaseConnection, anyhow::Error> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    let _r = db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON;",
        vec![])
    ).await?;

    if with_mock_env {
        let directory = SqlDirectory::new(db.clone());
        mock::save_mock_directory(
            &directory,
            mock::make_mock_directory_with_options(mock::MockOption { deterministic_uuids: true, ..Default::default() })
        ).await?;
    }
    Ok(db)
}
