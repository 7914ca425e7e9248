// Route table for the dashboard API
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    backend_health, health_check, history_chart, map_chart, refresh, regions,
};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/dashboard/regions", get(regions))
        .route("/api/dashboard/map", get(map_chart))
        .route("/api/dashboard/history", get(history_chart))
        .route("/api/dashboard/refresh", get(refresh))
        .route("/api/dashboard/backend-health", get(backend_health))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
