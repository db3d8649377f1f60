use axum::{extract::State, routing::get, Json, Router};
use mun_entities::prelude::{ConflictKey, ParticipantPatch, ParticipantProfile, ProfileUpdate};
use mun_entities::DirectoryService;

use crate::{auth::{AuthenticatedUser, ExtractAuthenticatedUser}, response::APIError, state::AppState};


/// Finds the user's profile, creating or linking it by email when needed.
pub(crate) async fn ensure_profile<D>(directory: &D, user: &AuthenticatedUser) -> Result<ParticipantProfile, APIError> where D: DirectoryService + ?Sized {
    if let Some(profile) = user.profile(directory).await? {
        if profile.user_id == Some(user.uuid) {
            return Ok(profile);
        }
    }

    let patch = ParticipantPatch {
        user_id: Some(Some(user.uuid)),
        ..ParticipantPatch::with_email(user.email.clone())
    };
    Ok(directory.upsert(patch, ConflictKey::Email).await?)
}

pub async fn get_own_profile(
    State(state): State<AppState>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<ParticipantProfile>, APIError> {
    let profile = ensure_profile(&state.directory(), &user).await?;
    Ok(Json(profile))
}

pub async fn update_own_profile(
    State(state): State<AppState>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ParticipantProfile>, APIError> {
    let directory = state.directory();
    let profile = ensure_profile(&directory, &user).await?;

    let patch = update.into_patch(profile.record.email)?;
    let profile = directory.upsert(patch, ConflictKey::Email).await?;
    Ok(Json(profile))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_own_profile).put(update_own_profile))
}
