//! Health check endpoint

use crate::db;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// GET /health - Service and database health
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    db::health_check(state.db()).await?;
    Ok(Json(json!({"status": "ok"})))
}
