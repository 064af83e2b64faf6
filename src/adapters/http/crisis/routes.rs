//! HTTP routes for crisis endpoints.

use axum::{routing::post, Router};

use super::handlers::{assess_crisis, CrisisHandlers};

/// Creates the crisis router, mounted under `/api/crisis`.
pub fn crisis_routes(handlers: CrisisHandlers) -> Router {
    Router::new()
        .route("/assess", post(assess_crisis))
        .with_state(handlers)
}
