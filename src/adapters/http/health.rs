//! Liveness endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
    pub version: &'static str,
    pub store: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct HealthState {
    store: &'static str,
}

impl HealthState {
    pub fn new(store: &'static str) -> Self {
        Self { store }
    }
}

/// GET /health
pub async fn health(State(state): State<HealthState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            timestamp: Timestamp::now(),
            version: env!("CARGO_PKG_VERSION"),
            store: state.store,
        }),
    )
}

pub fn health_routes(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}
