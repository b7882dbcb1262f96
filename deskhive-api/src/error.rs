use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use deskhive_booking::BookingError;
use deskhive_domain::repository::StoreError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidDate
            | BookingError::DateInPast
            | BookingError::DeskDisabled
            | BookingError::NoSchedule
            | BookingError::DayClosed => AppError::ValidationError(err.to_string()),
            // A lost commit race reads the same as a straight conflict
            BookingError::AlreadyBooked | BookingError::PersistenceConflict => {
                AppError::ConflictError(BookingError::AlreadyBooked.to_string())
            }
            BookingError::InvalidTransition(_) => AppError::ConflictError(err.to_string()),
            BookingError::AuthDenied => AppError::AuthorizationError(err.to_string()),
            BookingError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            BookingError::Storage(fault) => AppError::InternalServerError(fault.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AppError::ConflictError(err.to_string()),
            StoreError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            StoreError::Storage(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}
