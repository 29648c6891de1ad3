use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::{RaceError, StorageError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Race(RaceError),
    Validation(ValidationErrors),
    BadRequest(String),
    NotFound,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Race(e) => write!(f, "Race error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::NotFound => write!(f, "Resource not found"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Race(e) => race_status(e),
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound)
            | Self::Race(RaceError::Storage(StorageError::NotFound))
            | Self::NotFound => {
                json!({
                    "message": "Resource not found"
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "message": "An internal error occurred"
                })
            }
            Self::Race(RaceError::Storage(e)) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "message": "An internal error occurred"
                })
            }
            Self::Race(e) => {
                json!({
                    "message": e.to_string()
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "message": "Validation failed",
                    "errors": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "message": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

/// Engine failures split three ways: missing references are 404, state
/// conflicts are 409, rejected input is 400.
fn race_status(error: &RaceError) -> StatusCode {
    match error {
        RaceError::MissingReference { .. } => StatusCode::NOT_FOUND,
        RaceError::InvalidTransition { .. }
        | RaceError::AlreadyLocked
        | RaceError::ClockNotRunning
        | RaceError::LapOutOfOrder { .. } => StatusCode::CONFLICT,
        RaceError::EmptyRace
        | RaceError::PendingDistance
        | RaceError::PairNotApproved { .. }
        | RaceError::DuplicatePair { .. }
        | RaceError::InvalidOrderIndex { .. } => StatusCode::BAD_REQUEST,
        RaceError::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
        RaceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<RaceError> for WebError {
    fn from(error: RaceError) -> Self {
        Self::Race(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;
