use axum::{extract::{Path, State}, routing::get, Json, Router};
use axum::http::StatusCode;
use itertools::Itertools;
use mun_entities::derived_models::{ParticipantListView, PublicProfileView};
use mun_entities::prelude::{Capability, RecordFilter};
use mun_entities::DirectoryService;
use sea_orm::prelude::Uuid;
use tracing::info;

use crate::{auth::{ExtractAuthenticatedUser, ExtractSession}, response::APIError, state::AppState};


pub async fn get_participant_list(
    State(state): State<AppState>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<ParticipantListView>, APIError> {
    let directory = state.directory();
    let role = user.role(&directory).await?;
    let records = directory.list_all().await?.into_iter().map(|p| p.record).collect_vec();

    Ok(Json(ParticipantListView::new(&records, &role, &state.config.capabilities)))
}

pub async fn get_participant_profile(
    State(state): State<AppState>,
    ExtractSession(session): ExtractSession,
    Path(participant_id): Path<Uuid>,
) -> Result<Json<PublicProfileView>, APIError> {
    if !session.is_authenticated() {
        return Err((StatusCode::UNAUTHORIZED, "Sign in to view profiles").into());
    }
    let profile = state.directory().find_one(RecordFilter::Id(participant_id)).await?
        .ok_or((StatusCode::NOT_FOUND, "Participant not found"))?;

    Ok(Json(PublicProfileView::new(profile, &session)))
}

pub async fn delete_participant(
    State(state): State<AppState>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(participant_id): Path<Uuid>,
) -> Result<StatusCode, APIError> {
    user.check_capability(&state, Capability::DeleteUser).await?;
    state.directory().delete(participant_id).await?;
    info!("User {} deleted participant {}", user.uuid, participant_id);
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/participants", get(get_participant_list))
        .route("/participants/:participant_id", get(get_participant_profile).delete(delete_participant))
}
