//! Readiness endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use serde_json::Value;

use crate::state::AppState;

/// 200 when MongoDB answers a ping, 503 otherwise
async fn ready(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async {
            let status = database::mongodb::check_health_detailed(&state.mongo_client).await;
            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_default())
            }
        }),
    )];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
