//! Staff dashboard API: queue statistics, the incoming patient list and
//! per-patient detail, enriched with health-record demographics

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use health_records::{age_from_dob, FullRecord};
use queue_store::{QueueStatus, QueuedPatient};

use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::server::TriageCareServer;

/// KPI bar data for the dashboard header
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total: i64,
    pub incoming: i64,
    pub emergencies: i64,
    pub urgents: i64,
    pub routines: i64,
    /// Incoming patients with an ETA or arrival time
    pub en_route: i64,
    pub in_treatment: i64,
    pub treated: i64,
}

/// Queue statistics
#[utoipa::path(
    get,
    path = "/api/v1/queue/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Queue statistics", body = StatsResponse)
    )
)]
pub async fn queue_stats(
    State(server): State<TriageCareServer>,
) -> ApiResult<Json<ApiResponse<StatsResponse>>> {
    let stats = server.queue.stats().await?;
    let en_route = server
        .queue
        .incoming(200)
        .await?
        .iter()
        .filter(|p| p.eta_minutes.is_some() || p.arrival_time.is_some())
        .count() as i64;

    let by_status = |status: &str| stats.by_status.get(status).copied().unwrap_or(0);
    let by_level = |level: &str| stats.by_level.get(level).copied().unwrap_or(0);

    let response = StatsResponse {
        total: stats.by_status.values().sum(),
        incoming: by_status("incoming"),
        emergencies: by_level("EMERGENCY"),
        urgents: by_level("URGENT"),
        routines: by_level("ROUTINE"),
        en_route,
        in_treatment: by_status("in_treatment"),
        treated: by_status("discharged"),
    };
    Ok(Json(api_success(response)))
}

/// A queue entry merged with health-record demographics
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardPatient {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub patient: QueuedPatient,
    pub full_name: String,
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub blood_type: Option<String>,
    pub nationality: Option<String>,
    pub insurance_id: Option<String>,
    pub gp_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub emergency_name: Option<String>,
    pub emergency_phone: Option<String>,
    /// "12 min", "ARRIVED" or "—"
    pub eta_display: String,
}

async fn enrich(server: &TriageCareServer, patient: QueuedPatient) -> ApiResult<DashboardPatient> {
    let demographics = match &patient.health_number {
        Some(hn) => server.records.patient(hn).await?,
        None => None,
    };

    let eta_display = match (patient.eta_minutes, &patient.arrival_time) {
        (Some(eta), _) => format!("{} min", eta),
        (None, Some(_)) => "ARRIVED".to_string(),
        (None, None) => "—".to_string(),
    };

    Ok(match demographics {
        Some(db) => DashboardPatient {
            full_name: db.full_name(),
            age: age_from_dob(&db.date_of_birth),
            sex: Some(db.sex),
            blood_type: db.blood_type,
            nationality: Some(db.nationality),
            insurance_id: db.insurance_id,
            gp_name: db.gp_name,
            phone: db.phone,
            address: db.address,
            notes: db.notes,
            emergency_name: db.emergency_name,
            emergency_phone: db.emergency_phone,
            eta_display,
            patient,
        },
        None => DashboardPatient {
            full_name: patient.patient_id.clone(),
            age: None,
            sex: None,
            blood_type: None,
            nationality: None,
            insurance_id: None,
            gp_name: None,
            phone: None,
            address: None,
            notes: None,
            emergency_name: None,
            emergency_phone: None,
            eta_display,
            patient,
        },
    })
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PatientListQuery {
    /// Sort order: triage (default), eta, newest, oldest
    pub sort: Option<String>,
    /// Maximum number of patients (default 50)
    pub limit: Option<i64>,
}

/// Incoming patient list, enriched with health-record data
#[utoipa::path(
    get,
    path = "/api/v1/queue/patients",
    tag = "dashboard",
    params(PatientListQuery),
    responses(
        (status = 200, description = "Incoming patients")
    )
)]
pub async fn list_patients(
    State(server): State<TriageCareServer>,
    Query(query): Query<PatientListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<DashboardPatient>>>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let patients = server.queue.incoming(limit).await?;

    let mut enriched = Vec::with_capacity(patients.len());
    for patient in patients {
        enriched.push(enrich(&server, patient).await?);
    }

    match query.sort.as_deref() {
        Some("eta") => {
            enriched.sort_by_key(|p| p.patient.eta_minutes.unwrap_or(u32::MAX));
        }
        Some("newest") => {
            enriched.sort_by(|a, b| b.patient.timestamp.cmp(&a.patient.timestamp));
        }
        Some("oldest") => {
            enriched.sort_by(|a, b| a.patient.timestamp.cmp(&b.patient.timestamp));
        }
        // Default: triage priority, already ordered by the queue query.
        _ => {}
    }

    Ok(Json(api_success(enriched)))
}

/// Single patient full detail
#[utoipa::path(
    get,
    path = "/api/v1/queue/patients/{patient_id}",
    tag = "dashboard",
    params(("patient_id" = String, Path, description = "Queue patient id")),
    responses(
        (status = 200, description = "Patient detail"),
        (status = 404, description = "Patient not found")
    )
)]
pub async fn patient_detail(
    State(server): State<TriageCareServer>,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<ApiResponse<DashboardPatient>>> {
    let patient = server
        .queue
        .find(&patient_id)
        .await?
        .ok_or_else(|| ApiError::not_found("patient"))?;
    Ok(Json(api_success(enrich(&server, patient).await?)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    /// One of: incoming, arrived, in_treatment, discharged
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusUpdateResponse {
    pub ok: bool,
    pub patient_id: String,
    pub status: String,
}

/// Update a patient's status (incoming -> arrived -> in_treatment -> discharged)
#[utoipa::path(
    patch,
    path = "/api/v1/queue/patients/{patient_id}/status",
    tag = "dashboard",
    params(("patient_id" = String, Path, description = "Queue patient id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = StatusUpdateResponse),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Patient not found")
    )
)]
pub async fn update_status(
    State(server): State<TriageCareServer>,
    Path(patient_id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> ApiResult<Json<ApiResponse<StatusUpdateResponse>>> {
    let status = QueueStatus::parse(&request.status).ok_or_else(|| {
        ApiError::bad_request(format!(
            "Invalid status '{}'. Must be one of: incoming, arrived, in_treatment, discharged",
            request.status
        ))
    })?;

    let found = server.queue.update_status(&patient_id, status).await?;
    if !found {
        return Err(ApiError::not_found("patient"));
    }

    Ok(Json(api_success(StatusUpdateResponse {
        ok: true,
        patient_id,
        status: status.as_str().to_string(),
    })))
}

/// Incoming patients that carry GPS coordinates, for the live map
#[utoipa::path(
    get,
    path = "/api/v1/queue/tracking",
    tag = "dashboard",
    responses(
        (status = 200, description = "Patients with location data")
    )
)]
pub async fn tracking(
    State(server): State<TriageCareServer>,
) -> ApiResult<Json<ApiResponse<Vec<DashboardPatient>>>> {
    let patients = server.queue.incoming(200).await?;

    let mut located = Vec::new();
    for patient in patients {
        if patient.location_lat.is_some() {
            located.push(enrich(&server, patient).await?);
        }
    }
    Ok(Json(api_success(located)))
}

/// Full health record from the health database
#[utoipa::path(
    get,
    path = "/api/v1/records/{health_number}",
    tag = "dashboard",
    params(("health_number" = String, Path, description = "National health number")),
    responses(
        (status = 200, description = "Full health record"),
        (status = 404, description = "Health record not found")
    )
)]
pub async fn health_record(
    State(server): State<TriageCareServer>,
    Path(health_number): Path<String>,
) -> ApiResult<Json<ApiResponse<FullRecord>>> {
    let record = server
        .records
        .full_record(&health_number)
        .await?
        .ok_or_else(|| ApiError::not_found("health record"))?;
    Ok(Json(api_success(record)))
}
