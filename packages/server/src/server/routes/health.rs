use std::time::{Duration, Instant};

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

const PING_DEADLINE: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store: StoreHealth,
}

#[derive(Serialize)]
pub struct StoreHealth {
    status: String,
    latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint.
///
/// Round-trips the backing collection under a deadline; the route answers
/// 200 only while the store answers.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let outcome = match tokio::time::timeout(PING_DEADLINE, state.store.ping()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(format!("ping failed: {e}")),
        Err(_) => Err(format!("ping exceeded {}s", PING_DEADLINE.as_secs())),
    };
    let latency_ms = started.elapsed().as_millis() as u64;

    let (status_code, overall, store) = match outcome {
        Ok(()) => (
            StatusCode::OK,
            "healthy",
            StoreHealth {
                status: "ok".to_string(),
                latency_ms,
                error: None,
            },
        ),
        Err(reason) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "unhealthy",
            StoreHealth {
                status: "error".to_string(),
                latency_ms,
                error: Some(reason),
            },
        ),
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall.to_string(),
            store,
        }),
    )
}
