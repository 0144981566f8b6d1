use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::agents::InsightAgent;
use crate::models::{AppState, InsightResponse};
use crate::types::AppResult;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/insight/{file_id}", get(get_insight))
        .with_state(state)
}

async fn get_insight(
    State(state): State<AppState>,
    Path(file_id): Path<i64>,
) -> AppResult<Json<InsightResponse>> {
    info!(file_id, "Insight request received");

    let insight = InsightAgent::generate(&state, file_id).await?;
    Ok(Json(InsightResponse { insight }))
}
