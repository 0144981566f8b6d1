//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/upload/` - Spreadsheet upload and ingest
//! - `/files/{file_id}` - Stored upload metadata
//! - `/insight/{file_id}` - Generated summary of a stored upload
//! - `/api/health` - Health checks

pub mod files;
pub mod health;
pub mod insight;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let max_upload_bytes = state.config.storage.max_upload_bytes;
    let allowed_origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(files::router(state.clone()))
        .merge(insight::router(state.clone()))
        .merge(health::router(state))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &allowed_origins)
}
