use axum::{extract::State, routing::get, Json, Router};
use mun_entities::prelude::{Capability, Role};
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};

use crate::{auth::ExtractAuthenticatedUser, response::APIError, state::AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    /// Short greeting such as `Chair Ada`.
    pub label: String,
    pub capabilities: Vec<Capability>,
}

fn user_label(role: &Role, full_name: Option<&str>) -> String {
    let first_name = full_name.and_then(|n| n.split_whitespace().next());
    match first_name {
        Some(first_name) => format!("{} {}", role.display_name(), first_name),
        None => role.display_name(),
    }
}

pub async fn get_user_info(
    State(state): State<AppState>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<UserInfo>, APIError> {
    let profile = user.profile(&state.directory()).await?;
    let role = profile.as_ref().map(|p| p.record.role()).unwrap_or_default();
    let label = user_label(&role, profile.as_ref().and_then(|p| p.record.full_name.as_deref()));

    Ok(Json(UserInfo {
        user_id: user.uuid,
        email: user.email,
        capabilities: state.config.capabilities.capabilities_of(&role),
        role,
        label,
    }))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/user", get(get_user_info))
}
