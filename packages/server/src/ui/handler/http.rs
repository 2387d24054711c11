//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::websocket::OnlineStats, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current presence snapshot (same shape as `online-stats`)
pub async fn get_presence(State(state): State<Arc<AppState>>) -> Json<OnlineStats> {
    let snapshot = state.get_presence_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(OnlineStats::from(snapshot))
}
