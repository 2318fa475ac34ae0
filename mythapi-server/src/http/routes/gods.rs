//! God endpoints
//!
//! Input is validated here before any repository call:
//! non-positive ids, blank search names and empty batches never reach the store.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, ValidId};
use crate::http::server::AppState;
use crate::models::{God, GodInput, GodName, ValidationError};

/// Query parameters for name search
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub include_aliases: bool,
}

/// GET /gods
async fn list_gods(State(state): State<Arc<AppState>>) -> Result<Json<Vec<God>>, ApiError> {
    Ok(Json(state.gods.get_all().await?))
}

/// GET /gods/{id}
async fn get_god(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<God>, ApiError> {
    Ok(Json(state.gods.get_by_id(id).await?))
}

/// GET /gods/search/{name}?includeAliases=bool
async fn search_gods(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<Vec<God>>, ApiError> {
    let name = GodName::new(&name)?;
    let gods = state.gods.get_by_name(&name, params.include_aliases).await?;

    tracing::debug!(name = name.as_str(), matches = gods.len(), "god search");
    Ok(Json(gods))
}

/// POST /gods - add or update a batch
async fn add_or_update_gods(
    State(state): State<Arc<AppState>>,
    ApiJson(inputs): ApiJson<Vec<GodInput>>,
) -> Result<Json<Vec<God>>, ApiError> {
    if inputs.is_empty() {
        return Err(ValidationError::Empty { field: "gods" }.into());
    }
    Ok(Json(state.gods.add_or_update(inputs).await?))
}

/// DELETE /gods/{id}
async fn delete_god(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.gods.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /gods - remove every god
async fn delete_all_gods(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    state.gods.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// God routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/gods",
            get(list_gods).post(add_or_update_gods).delete(delete_all_gods),
        )
        .route("/gods/{id}", get(get_god).delete(delete_god))
        .route("/gods/search/{name}", get(search_gods))
}
