use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::error::{api_success, ApiResponse, ApiResult};
use crate::server::TriageCareServer;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    pub timestamp: String,
    /// API version
    pub version: String,
    /// Individual subsystem availability
    pub checks: HashMap<String, String>,
}

/// Version information response
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    /// Application name
    #[schema(example = "TriageCare")]
    pub name: String,
    /// Application version
    pub version: String,
    /// Enabled capabilities
    pub features: Vec<String>,
}

fn availability(available: bool) -> String {
    if available { "available" } else { "fallback" }.to_string()
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<TriageCareServer>,
) -> ApiResult<Json<ApiResponse<HealthResponse>>> {
    let mut checks = HashMap::new();
    checks.insert("queue".to_string(), "healthy".to_string());
    checks.insert(
        "triage_model".to_string(),
        availability(server.engine.is_model_configured()),
    );
    checks.insert(
        "speech".to_string(),
        availability(server.speech.is_available()),
    );
    checks.insert(
        "translator".to_string(),
        availability(server.translator.is_configured()),
    );
    checks.insert(
        "routing".to_string(),
        availability(server.maps.is_routing_configured()),
    );

    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    Ok(Json(api_success(response)))
}

/// Version information handler
#[utoipa::path(
    get,
    path = "/version",
    tag = "health",
    responses(
        (status = 200, description = "Version information", body = VersionResponse)
    )
)]
pub async fn version_info(
    State(server): State<TriageCareServer>,
) -> ApiResult<Json<ApiResponse<VersionResponse>>> {
    let response = VersionResponse {
        name: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: vec![
            "guideline-grounded-triage".to_string(),
            "multilingual-intake".to_string(),
            "hospital-ranking".to_string(),
            "er-dashboard".to_string(),
        ],
    };
    Ok(Json(api_success(response)))
}
