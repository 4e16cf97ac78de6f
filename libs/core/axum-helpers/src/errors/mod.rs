pub mod handlers;
pub mod messages;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every JSON response the API sends.
///
/// ```json
/// { "msg": "Email ja utilizado" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome, shown to end users as-is
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// The carried string is the client-facing `msg`. Diagnostic detail belongs
/// in the logs of whoever builds the error, never in the variant.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Unprocessable Entity: {0}")]
    UnprocessableEntity(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                msg
            }
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                msg
            }
            AppError::UnprocessableEntity(msg) => {
                tracing::info!("Unprocessable entity: {}", msg);
                msg
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                msg
            }
        };

        (status, Json(MessageResponse { msg })).into_response()
    }
}
