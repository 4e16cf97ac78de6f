use axum::http::{HeaderValue, Method};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// CORS layer restricted to `allowed_origins`.
///
/// Allows the methods the API exposes (GET, POST, PATCH, DELETE, OPTIONS),
/// `Content-Type`/`Accept` headers, and caches preflights for an hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// Allows any origin, method and header.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// CORS layer driven by `CORS_ALLOWED_ORIGIN`.
///
/// The variable holds comma-separated origins, e.g.
/// `CORS_ALLOWED_ORIGIN=http://localhost:3000,https://app.example.com`.
/// When it is unset every origin is allowed.
///
/// # Errors
/// Returns `InvalidInput` when the variable is set but empty or holds a value
/// that is not a valid header value.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let Ok(origins_str) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(create_permissive_cors_layer());
    };

    let allowed_origins: Vec<HeaderValue> = origins_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<HeaderValue>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    info!("CORS configured with allowed origins: {}", origins_str);
    Ok(create_cors_layer(allowed_origins))
}
