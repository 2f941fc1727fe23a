use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
    pub uptime_seconds: u64,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let database = match state.store().ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            "unavailable"
        }
    };

    Json(HealthStatus {
        status: "ok",
        database,
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
