//! HTTP adapters - REST API implementations.
//!
//! Each endpoint group has its own adapter; [`app_router`] mounts them all
//! behind the shared tracing, CORS and timeout layers.

pub mod chat;
pub mod crisis;
mod error;
mod health;

use std::time::Duration;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::ConversationEngine;

pub use chat::{chat_routes, ChatHandlers};
pub use crisis::{crisis_routes, CrisisHandlers};
pub use error::ErrorResponse;
pub use health::{health_routes, HealthResponse, HealthState};

/// Transport-level settings for the router.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    /// Allowed origins; empty or `*` allows any.
    pub cors_origins: Vec<String>,
    pub verbose_errors: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
            verbose_errors: false,
        }
    }
}

/// Builds the full application router over `engine`.
pub fn app_router(engine: &ConversationEngine, settings: &HttpSettings) -> Router {
    let chat = ChatHandlers::new(
        engine.start_session.clone(),
        engine.send_message.clone(),
        engine.get_history.clone(),
        engine.delete_history.clone(),
    )
    .with_verbose_errors(settings.verbose_errors);
    let crisis = CrisisHandlers::new(engine.assess_crisis.clone());

    Router::new()
        .nest("/api/chat", chat_routes(chat))
        .nest("/api/crisis", crisis_routes(crisis))
        .merge(health_routes(HealthState::new(engine.store_backend())))
        .fallback(route_not_found)
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
}

async fn route_not_found() -> Response {
    (StatusCode::NOT_FOUND, axum::Json(ErrorResponse::not_found("Route"))).into_response()
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}
