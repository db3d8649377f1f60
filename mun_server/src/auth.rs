use argon2::Argon2;
use axum::{
    routing::post,
    Router, extract::State, Json, headers::authorization::Bearer,
};
use base64::Engine;
use mun_entities::{
    schema::{user, user_access_key},
    prelude::{is_elevated_role, Capability, ConflictKey, ParticipantPatch, ParticipantProfile, Role, Session},
    DirectoryService,
};
use rand::{thread_rng, Rng};
use sea_orm::{prelude::*, DatabaseConnection, ActiveValue, IntoActiveModel};
use serde::{Serialize, Deserialize};
use axum::TypedHeader;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::headers::Authorization;
use axum::headers::authorization::Basic;
use axum::http::StatusCode;
use axum::http::request::Parts;
use tracing::info;

use crate::{response::{APIError, handle_error}, state::AppState};

use password_hash::{PasswordHash, PasswordVerifier, PasswordHasher, SaltString};

const KEY_SALT: &str = "bXlzYWx0bXlzYWx0";
const MIN_PASSWORD_LENGTH: usize = 6;


#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub uuid: Uuid,
    pub email: String,
    /// Set when the request was authorized with a bearer token.
    pub access_key_hash: Option<String>,
}

impl AuthenticatedUser {
    pub fn session(&self) -> Session {
        Session::Authenticated { user_id: self.uuid, email: self.email.clone() }
    }

    pub async fn profile<D>(&self, directory: &D) -> Result<Option<ParticipantProfile>, APIError> where D: DirectoryService + ?Sized {
        Ok(directory.find_for_session(&self.session()).await?)
    }

    /// The role on the user's profile. Users without a profile are delegates.
    pub async fn role<D>(&self, directory: &D) -> Result<Role, APIError> where D: DirectoryService + ?Sized {
        Ok(self.profile(directory).await?.map(|p| p.record.role()).unwrap_or_default())
    }

    /// Gates on the role label stored on the profile, 403 when it lacks `capability`.
    pub async fn check_capability(&self, state: &AppState, capability: Capability) -> Result<Role, APIError> {
        let raw_role = self.profile(&state.directory()).await?.and_then(|p| p.record.role);
        if !is_elevated_role(raw_role.as_deref(), capability, &state.config.capabilities) {
            info!("User {} with role {:?} denied {:?}", self.uuid, raw_role, capability);
            return Err((StatusCode::FORBIDDEN, "You are not allowed to do this").into());
        }
        Ok(Role::parse(raw_role.as_deref()))
    }
}


pub struct ExtractAuthenticatedUser(pub AuthenticatedUser);


#[async_trait]
impl FromRequestParts<AppState> for ExtractAuthenticatedUser
{
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let basic_header = TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
            .await;

        if let Ok(basic_header) = basic_header {
            let decoded = basic_header.0;
            let email = normalize_email(decoded.username());
            let password = decoded.password();

            let user = user::Entity::find().filter(
                user::Column::Email.eq(email)
            ).one(&state.db).await.map_err(handle_error)?;

            let user = user.ok_or((StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;

            let password_hash = PasswordHash::new(&user.password_hash).map_err(|_| (StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;
            let algs: &[&dyn PasswordVerifier] = &[&Argon2::default()];

            password_hash.verify_password(algs, password).map_err(|_| (StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;

            Ok(ExtractAuthenticatedUser(AuthenticatedUser {
                uuid: user.uuid,
                email: user.email,
                access_key_hash: None,
            }))
        }
        else {
            let TypedHeader(bearer_header) = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await.map_err(|_| {
                (StatusCode::UNAUTHORIZED, "No valid authorization header found")
            })?;
            let key = base64::engine::general_purpose::STANDARD_NO_PAD.decode(bearer_header.0.token()).map_err(
                |_| (StatusCode::UNAUTHORIZED, "Bearer token invalid")
            )?;
            let hashed_key = hash_key(&key).map_err(
                |_| (StatusCode::UNAUTHORIZED, "No valid authorization header found")
            )?;

            let key = user_access_key::Entity::find_by_id(
                hashed_key
            ).one(&state.db).await.map_err(handle_error)?;

            let key = key.ok_or((StatusCode::UNAUTHORIZED, "Bearer token invalid"))?;

            if let Some(expiry_date) = key.expiry_date {
                if expiry_date < chrono::Utc::now().naive_utc() {
                    return Err((StatusCode::UNAUTHORIZED, "Bearer token expired").into());
                }
            }

            let user = user::Entity::find_by_id(key.user_id).one(&state.db).await.map_err(handle_error)?
                .ok_or((StatusCode::UNAUTHORIZED, "Bearer token invalid"))?;

            Ok(ExtractAuthenticatedUser(AuthenticatedUser {
                uuid: user.uuid,
                email: user.email,
                access_key_hash: Some(key.key_hash),
            }))
        }
    }
}


/// Resolves the session of a request. Missing or invalid credentials give an anonymous session.
pub struct ExtractSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for ExtractSession
{
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match ExtractAuthenticatedUser::from_request_parts(parts, state).await {
            Ok(ExtractAuthenticatedUser(user)) => Ok(ExtractSession(user.session())),
            Err(e) if e.code == StatusCode::UNAUTHORIZED => Ok(ExtractSession(Session::Anonymous)),
            Err(e) => Err(e),
        }
    }
}


#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub passcode: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub uuid: Uuid,
    pub participant_id: Uuid,
}


#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetTokenResponse {
    pub token: String
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn hash_password(pwd: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let pwd = Argon2::default().hash_password(
        pwd.as_bytes(),
        &salt
    )?;

    Ok(pwd.to_string())
}

fn hash_key(key: &[u8]) -> Result<String, password_hash::Error> {
    let salt = SaltString::from_b64(KEY_SALT)?;
    Ok(Argon2::default().hash_password(key, &salt)?.to_string())
}

fn validate_signup(request: &CreateUserRequest, expected_passcode: Option<&str>) -> Result<(), APIError> {
    if request.full_name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Full name is required").into());
    }
    if request.email.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Email is required").into());
    }
    if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err((StatusCode::BAD_REQUEST, format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH)).into());
    }
    if let Some(expected_passcode) = expected_passcode {
        if request.passcode.as_deref().map(|p| p.trim()) != Some(expected_passcode) {
            return Err((StatusCode::BAD_REQUEST, "Invalid conference passcode").into());
        }
    }
    Ok(())
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>
) -> Result<Json<CreateUserResponse>, APIError> {
    validate_signup(&request, state.config.conference_passcode.as_deref())?;

    let email = normalize_email(&request.email);
    let existing = user::Entity::find().filter(user::Column::Email.eq(email.clone())).one(&state.db).await.map_err(handle_error)?;
    if existing.is_some() {
        return Err((StatusCode::CONFLICT, "An account with this email already exists").into());
    }

    let new_user_uuid = Uuid::new_v4();
    let pwd = hash_password(&request.password).map_err(handle_error)?;

    let model = user::Model {
        uuid: new_user_uuid,
        email: email.clone(),
        password_hash: pwd,
    };

    model.into_active_model().insert(&state.db).await.map_err(
        handle_error
    )?;

    let directory = state.directory();
    let existing_profile = directory.find_one(mun_entities::prelude::RecordFilter::Email(email.clone())).await?;
    let mut patch = ParticipantPatch {
        user_id: Some(Some(new_user_uuid)),
        full_name: Some(Some(request.full_name.trim().to_string())),
        ..ParticipantPatch::with_email(email)
    };
    // Pre-imported rosters keep their role
    if existing_profile.and_then(|p| p.record.role).is_none() {
        patch.role = Some(Some(Role::Delegate.to_string()));
    }
    let profile = directory.upsert(patch, ConflictKey::Email).await?;

    info!("Created user {}", new_user_uuid);

    Ok(CreateUserResponse {
        uuid: new_user_uuid,
        participant_id: profile.record.uuid,
    }.into())
}


pub fn create_key(key: &[u8], user_id: Uuid, expiry_date: Option<chrono::NaiveDateTime>) -> Result<user_access_key::Model, password_hash::Error> {
    Ok(user_access_key::Model {
        key_hash: hash_key(key)?,
        user_id,
        expiry_date,
    })
}

pub async fn create_token_handler(
    State(state): State<AppState>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<GetTokenResponse>, APIError> {
    let key: [u8; 32] = thread_rng().gen::<[u8; 32]>();

    let expiry_date = chrono::Utc::now().naive_utc() + chrono::Duration::hours(state.config.token_lifetime_hours);
    let token = create_key(&key, user.uuid, Some(expiry_date)).map_err(handle_error)?;
    token.into_active_model().insert(&state.db).await.map_err(handle_error)?;

    Ok(
        GetTokenResponse {
            token: base64::engine::general_purpose::STANDARD_NO_PAD.encode(key)
        }.into()
    )
}

/// Signs out by revoking the bearer token of the request.
pub async fn delete_token_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<StatusCode, APIError> {
    let key_hash = user.access_key_hash.ok_or(
        (StatusCode::BAD_REQUEST, "Only bearer tokens can be revoked")
    )?;
    let key = user_access_key::ActiveModel {
        key_hash: ActiveValue::Unchanged(key_hash),
        ..Default::default()
    };
    key.delete(&db).await.map_err(handle_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user_handler))
        .route("/tokens", post(create_token_handler).delete(delete_token_handler))
}
