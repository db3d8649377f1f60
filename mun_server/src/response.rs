use hyper::StatusCode;
use axum::response::{IntoResponse, Response};
use mun_entities::DirectoryError;
use mun_entities::domain::participant::ProfileValidationError;
use serde::{Serialize, Deserialize};
use tracing::error;


#[derive(Debug, Clone)]
pub struct APIError {
    pub message: String,
    pub code: StatusCode
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct APIErrorResponse {
    pub message: String
}

impl APIError {
    pub fn new(message: String) -> Self {
        APIError {
            message,
            code: StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<anyhow::Error> for APIError {
    fn from(err: anyhow::Error) -> Self {
        error!("Error while handling request {}", err.to_string());
        APIError { message: err.to_string(), code: StatusCode::INTERNAL_SERVER_ERROR }
    }
}

impl From<DirectoryError> for APIError {
    fn from(err: DirectoryError) -> Self {
        let code = match &err {
            DirectoryError::NotFound => StatusCode::NOT_FOUND,
            DirectoryError::MissingConflictKey(_) | DirectoryError::MissingEmail => StatusCode::BAD_REQUEST,
            DirectoryError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("Directory error while handling request {}", err);
        APIError { message: err.to_string(), code }
    }
}

impl From<ProfileValidationError> for APIError {
    fn from(err: ProfileValidationError) -> Self {
        APIError { message: err.to_string(), code: StatusCode::BAD_REQUEST }
    }
}

impl IntoResponse for APIError
{
    fn into_response(self) -> Response {
        let mut res = axum::Json(APIErrorResponse {message: self.message}).into_response();
        *res.status_mut() = self.code;
        res
    }
}


impl From<(StatusCode, &str)> for APIError {
    fn from((code, message): (StatusCode, &str)) -> Self {
        error!("Error while handling request {}", message);
        APIError { message: message.to_string(), code }
    }
}

impl From<(StatusCode, String)> for APIError {
    fn from((code, message): (StatusCode, String)) -> Self {
        error!("Error while handling request {}", message);
        APIError { message, code }
    }
}

pub fn handle_error<E>(err: E) -> APIError
where
    E: std::error::Error
{
    error!("Error while handling request {}", err);
    APIError::new(err.to_string())
}
