use axum::{extract::{Path, State}, routing::{get, put}, Json, Router};
use axum::http::StatusCode;
use mun_entities::derived_models::AdminDashboardView;
use mun_entities::prelude::{committee_slug_for_entry, Capability, ConflictKey, ParticipantPatch, ParticipantProfile, RecordFilter};
use mun_entities::DirectoryService;
use mun_entities::domain::participant::trimmed;
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{auth::ExtractAuthenticatedUser, profile::ensure_profile, response::APIError, state::AppState};


pub async fn get_admin_dashboard(
    State(state): State<AppState>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<AdminDashboardView>, APIError> {
    let profile = ensure_profile(&state.directory(), &user).await?;
    let view = AdminDashboardView::new(&user.session(), Some(&profile), &state.config.capabilities)
        .ok_or((StatusCode::FORBIDDEN, "You are not allowed to view the admin area"))?;
    Ok(Json(view))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub committee: Option<String>,
    pub country: Option<String>,
}

/// Seats a participant. Free-text committee names are stored as slugs.
pub async fn update_assignment(
    State(state): State<AppState>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(participant_id): Path<Uuid>,
    Json(request): Json<AssignmentRequest>,
) -> Result<Json<ParticipantProfile>, APIError> {
    user.check_capability(&state, Capability::ViewAdminArea).await?;

    let directory = state.directory();
    let participant = directory.find_one(RecordFilter::Id(participant_id)).await?
        .ok_or((StatusCode::NOT_FOUND, "Participant not found"))?;

    let patch = ParticipantPatch {
        committee: Some(committee_slug_for_entry(request.committee.as_deref())),
        country: Some(trimmed(request.country)),
        ..ParticipantPatch::with_email(participant.record.email)
    };
    let profile = directory.upsert(patch, ConflictKey::Email).await?;
    info!("User {} assigned participant {} to {:?}", user.uuid, participant_id, profile.record.committee);

    Ok(Json(profile))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(get_admin_dashboard))
        .route("/admin/participants/:participant_id/assignment", put(update_assignment))
}
