//! Mythology endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::Mythology;

/// GET /mythologies - every mythology with its gods
async fn list_mythologies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Mythology>>, ApiError> {
    Ok(Json(state.mythologies.get_all().await?))
}

/// GET /mythologies/{id}
async fn get_mythology(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Mythology>, ApiError> {
    Ok(Json(state.mythologies.get_by_id(id).await?))
}

/// Mythology routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/mythologies", get(list_mythologies))
        .route("/mythologies/{id}", get(get_mythology))
}
