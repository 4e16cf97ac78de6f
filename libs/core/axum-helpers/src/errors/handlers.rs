use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{MessageResponse, messages};

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new(messages::ROUTE_NOT_FOUND)),
    )
        .into_response()
}

/// Fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MessageResponse::new(messages::METHOD_NOT_ALLOWED)),
    )
        .into_response()
}
