use axum::{extract::State, routing::get, Json, Router};
use tracing::warn;

use crate::db::StoreBackend;
use crate::models::{AppState, HealthResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match (state.records.backend(), state.records.ping().await) {
        (_, Err(e)) => {
            warn!("Record store health check failed: {}", e);
            "unavailable"
        }
        (StoreBackend::Memory, Ok(())) => "in-memory",
        (StoreBackend::Postgres, Ok(())) => "connected",
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database: database.to_string(),
    })
}
