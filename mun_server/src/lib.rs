use axum::{extract::MatchedPath, http::Request, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info_span;

use crate::state::AppState;

pub mod auth;
pub mod admin;
pub mod commands;
pub mod committees;
pub mod config;
pub mod db;
pub mod participants;
pub mod profile;
pub mod response;
pub mod state;
pub mod users;


pub async fn app_with_state(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(profile::router())
        .merge(participants::router())
        .merge(committees::router())
        .merge(admin::router());

    Router::new()
        .nest("/api", api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str);

                    info_span!(
                        "http_request",
                        method = ?request.method(),
                        matched_path,
                    )
                })
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn app() -> anyhow::Result<Router> {
    let state = AppState::new(config::read_config()).await?;
    Ok(app_with_state(state).await)
}
