//! Route assembly and path constants
//!
//! Path constants keep runtime route definitions and the OpenAPI paths in
//! sync; utoipa attributes still need string literals, so the literals in
//! handler annotations must match these constants.

use axum::{
    response::Html,
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{admin, dashboard, health, hospitals, intake};
use crate::server::TriageCareServer;

pub mod paths {
    /// Health endpoints
    pub mod health {
        pub const HEALTH: &str = "/health";
        pub const VERSION: &str = "/version";
    }

    /// Patient intake endpoints
    pub mod intake {
        pub const TRANSCRIBE: &str = "/api/v1/intake/transcribe";
        pub const QUESTIONS: &str = "/api/v1/intake/questions";
        pub const ASSESS: &str = "/api/v1/intake/assess";
        pub const SUBMIT: &str = "/api/v1/intake/submit";
    }

    /// Hospital lookup endpoints
    pub mod hospitals {
        pub const HOSPITALS: &str = "/api/v1/hospitals";
    }

    /// Dashboard endpoints
    pub mod dashboard {
        pub const STATS: &str = "/api/v1/queue/stats";
        pub const PATIENTS: &str = "/api/v1/queue/patients";
        pub const PATIENT_BY_ID: &str = "/api/v1/queue/patients/:patient_id";
        pub const PATIENT_STATUS: &str = "/api/v1/queue/patients/:patient_id/status";
        pub const TRACKING: &str = "/api/v1/queue/tracking";
        pub const HEALTH_RECORD: &str = "/api/v1/records/:health_number";
    }

    /// Admin endpoints
    pub mod admin {
        pub const CLEAR: &str = "/api/v1/admin/clear";
        pub const SEED: &str = "/api/v1/admin/seed";
    }
}

/// Embedded staff dashboard page
const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

pub fn health_routes() -> Router<TriageCareServer> {
    Router::new()
        .route(paths::health::HEALTH, get(health::health_check))
        .route(paths::health::VERSION, get(health::version_info))
}

pub fn intake_routes() -> Router<TriageCareServer> {
    Router::new()
        .route(paths::intake::TRANSCRIBE, post(intake::transcribe))
        .route(paths::intake::QUESTIONS, post(intake::questions))
        .route(paths::intake::ASSESS, post(intake::assess))
        .route(paths::intake::SUBMIT, post(intake::submit))
}

pub fn hospital_routes() -> Router<TriageCareServer> {
    Router::new().route(paths::hospitals::HOSPITALS, get(hospitals::nearby_hospitals))
}

pub fn dashboard_routes() -> Router<TriageCareServer> {
    Router::new()
        .route(paths::dashboard::STATS, get(dashboard::queue_stats))
        .route(paths::dashboard::PATIENTS, get(dashboard::list_patients))
        .route(paths::dashboard::PATIENT_BY_ID, get(dashboard::patient_detail))
        .route(paths::dashboard::PATIENT_STATUS, patch(dashboard::update_status))
        .route(paths::dashboard::TRACKING, get(dashboard::tracking))
        .route(paths::dashboard::HEALTH_RECORD, get(dashboard::health_record))
}

pub fn admin_routes() -> Router<TriageCareServer> {
    Router::new()
        .route(paths::admin::CLEAR, post(admin::clear_queue))
        .route(paths::admin::SEED, post(admin::seed_queue))
}

/// All application routes (dashboard page at the root)
pub fn create_routes() -> Router<TriageCareServer> {
    Router::new()
        .route("/", get(serve_dashboard))
        .merge(health_routes())
        .merge(intake_routes())
        .merge(hospital_routes())
        .merge(dashboard_routes())
        .merge(admin_routes())
}
