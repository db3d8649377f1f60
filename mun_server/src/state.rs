use std::sync::Arc;
use axum::extract::FromRef;
use db::DatabaseConfig;
use mun_entities::SqlDirectory;

use crate::{config::Config, db};
use sea_orm::prelude::*;


#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<AppState, DbErr> {
        let db = db::set_up_db(
            DatabaseConfig::new(config.db_url.clone())
        ).await?;
        Ok(AppState {
            db,
            config: Arc::new(config),
        })
    }

    pub async fn new_test_app() -> Result<AppState, DbErr> {
        Self::new_test_app_with_config(Config::default()).await
    }

    pub async fn new_test_app_with_config(config: Config) -> Result<AppState, DbErr> {
        Self::new(Config {
            db_url: "sqlite::memory:".into(),
            ..config
        }).await
    }

    pub fn directory(&self) -> SqlDirectory {
        SqlDirectory::new(self.db.clone())
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(app_state: &AppState) -> DatabaseConnection {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Arc<Config> {
        app_state.config.clone()
    }
}
