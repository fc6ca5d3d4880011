//! TriageCare Server - patient triage API and ER dashboard backend
//!
//! This library provides the HTTP surface of the TriageCare platform:
//! the patient intake flow (transcribe, questions, assess, hospitals,
//! submit) and the staff dashboard queue API.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;

// Re-export commonly used types
pub use error::*;
pub use server::{ServerConfig, TriageCareServer};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router with all routes and middleware
pub fn create_app(server: TriageCareServer) -> Router {
    routes::create_routes()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(server)
}
