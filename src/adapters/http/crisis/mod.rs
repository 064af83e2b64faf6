//! HTTP adapter for crisis endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AssessCrisisRequest, AssessCrisisResponse};
pub use handlers::CrisisHandlers;
pub use routes::crisis_routes;
