// HTTP request handlers
use crate::application::power_data_source::TransportError;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

/// Backend failures reach the browser as 502 with the original message.
pub struct BackendError(TransportError);

impl From<TransportError> for BackendError {
    fn from(e: TransportError) -> Self {
        Self(e)
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.0.to_string() }));
        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Region views and grid totals from the latest snapshot
pub async fn regions(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, BackendError> {
    let dashboard = state.dashboard_service.regions().await?;
    Ok(Json(dashboard))
}

/// Map chart option from the latest snapshot
pub async fn map_chart(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, BackendError> {
    let option = state.dashboard_service.map_chart().await?;
    Ok(Json(option))
}

/// Active power history chart option
pub async fn history_chart(
    Query(query): Query<HistoryQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, BackendError> {
    let option = state.dashboard_service.history_chart(query.limit).await?;
    Ok(Json(option))
}

/// Force a backend fetch and return the refreshed region views
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, BackendError> {
    let dashboard = state.dashboard_service.refresh().await?;
    Ok(Json(dashboard))
}

pub async fn backend_health(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, BackendError> {
    let health = state.dashboard_service.backend_health().await?;
    Ok(Json(health))
}
