//! Nearby hospital lookup for the patient app

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use maps_service::{RankedHospital, DEFAULT_RESULT_COUNT};

use crate::error::{api_success, ApiResponse, ApiResult};
use crate::handlers::intake::validate_coordinates;
use crate::server::TriageCareServer;

#[derive(Debug, Deserialize, IntoParams)]
pub struct HospitalsQuery {
    /// Patient latitude
    pub lat: f64,
    /// Patient longitude
    pub lon: f64,
    /// Number of hospitals to return (default 3, max 10)
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HospitalsResponse {
    #[schema(value_type = Vec<Object>)]
    pub hospitals: Vec<RankedHospital>,
}

/// Ranked nearby emergency hospitals
///
/// Candidates within 150 km are scored by travel time plus an occupancy
/// penalty; the fastest effective arrivals come first.
#[utoipa::path(
    get,
    path = "/api/v1/hospitals",
    tag = "hospitals",
    params(HospitalsQuery),
    responses(
        (status = 200, description = "Ranked hospitals", body = HospitalsResponse),
        (status = 400, description = "Coordinates out of range")
    )
)]
pub async fn nearby_hospitals(
    State(server): State<TriageCareServer>,
    Query(query): Query<HospitalsQuery>,
) -> ApiResult<Json<ApiResponse<HospitalsResponse>>> {
    validate_coordinates(query.lat, query.lon)?;
    let count = query.count.unwrap_or(DEFAULT_RESULT_COUNT).clamp(1, 10);

    let hospitals = server
        .maps
        .nearest_hospitals(query.lat, query.lon, count)
        .await;

    Ok(Json(api_success(HospitalsResponse { hospitals })))
}
