use axum::{extract::{Path, State}, routing::get, Json, Router};
use axum::http::StatusCode;
use mun_entities::derived_models::{CommitteeListView, CommitteeSessionView};
use mun_entities::prelude::{Committee, CommitteeDescriptor};

use crate::{auth::ExtractAuthenticatedUser, response::APIError, state::AppState};


pub async fn get_committees() -> Json<CommitteeListView> {
    Json(CommitteeListView::new())
}

pub async fn get_committee(
    Path(slug): Path<String>,
) -> Result<Json<&'static CommitteeDescriptor>, APIError> {
    let committee = Committee::from_slug(&slug).ok_or((StatusCode::NOT_FOUND, "Committee not found"))?;
    Ok(Json(committee.descriptor()))
}

/// The committee the current user is seated in.
pub async fn get_committee_session(
    State(state): State<AppState>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<CommitteeSessionView>, APIError> {
    let profile = user.profile(&state.directory()).await?;
    Ok(Json(CommitteeSessionView::new(profile.as_ref(), &state.config.capabilities)))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/committees", get(get_committees))
        .route("/committees/:slug", get(get_committee))
        .route("/session", get(get_committee_session))
}
