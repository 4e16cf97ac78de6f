//! JSON body extractor that tolerates missing bodies.

use crate::errors::{AppError, messages};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Request body parsed as JSON, or `T::default()` when there is nothing to parse.
///
/// A request without a JSON `Content-Type`, or with an empty body, yields
/// `T::default()` so handlers can report which required field is missing
/// instead of failing on the transport. Only a JSON object supplies fields;
/// arrays and scalars carry no named keys and also yield `T::default()`.
/// A JSON body that does not parse is rejected with
/// `400 { "msg": "JSON inválido" }`.
///
/// # Example
/// ```ignore
/// #[derive(Default, Deserialize)]
/// struct LoginRequest {
///     username: Option<String>,
///     password: Option<String>,
/// }
///
/// async fn login(JsonBody(input): JsonBody<LoginRequest>) -> String {
///     input.username.unwrap_or_default()
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(malformed)?;
        if !value.is_object() {
            return Ok(JsonBody(T::default()));
        }

        serde_json::from_value(value).map(JsonBody).map_err(malformed)
    }
}

fn malformed(e: serde_json::Error) -> AppError {
    tracing::debug!(error = %e, "Rejected malformed JSON body");
    AppError::BadRequest(messages::INVALID_JSON.to_string())
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || essence.ends_with("+json")
}
