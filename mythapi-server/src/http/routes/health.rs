//! Liveness plus a store round-trip

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    /// Mythologies in the store; absent when the store did not answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mythologies: Option<i64>,
}

/// GET /health - 200 when the store answers, 503 otherwise
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthReport>) {
    match state.mythologies.count().await {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthReport {
                status: "ok",
                version: env!("CARGO_PKG_VERSION"),
                mythologies: Some(count),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not reach the store");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthReport {
                    status: "unavailable",
                    version: env!("CARGO_PKG_VERSION"),
                    mythologies: None,
                }),
            )
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
