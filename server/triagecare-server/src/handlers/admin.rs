//! Demo/test helpers: reset the queue and seed realistic patients

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use triage_engine::{Assessment, GeoPoint, PatientRecord, TriageLevel};

use crate::error::{api_success, ApiResponse, ApiResult};
use crate::server::TriageCareServer;

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearResponse {
    pub ok: bool,
}

/// Clear all patients from the queue (testing only)
#[utoipa::path(
    post,
    path = "/api/v1/admin/clear",
    tag = "admin",
    responses((status = 200, description = "Queue cleared", body = ClearResponse))
)]
pub async fn clear_queue(
    State(server): State<TriageCareServer>,
) -> ApiResult<Json<ApiResponse<ClearResponse>>> {
    server.queue.clear().await?;
    Ok(Json(api_success(ClearResponse { ok: true })))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeedResponse {
    pub ok: bool,
    pub seeded: usize,
}

struct SeedPatient {
    patient_id: &'static str,
    triage_level: TriageLevel,
    chief_complaint: &'static str,
    assessment: &'static str,
    red_flags: &'static [&'static str],
    risk_score: u8,
    suspected_conditions: &'static [&'static str],
    recommended_action: &'static str,
    time_sensitivity: &'static str,
    eta_minutes: u32,
    health_number: &'static str,
    location: GeoPoint,
    language: &'static str,
}

const SEED_PATIENTS: [SeedPatient; 5] = [
    SeedPatient {
        patient_id: "ER-2026-AA01",
        triage_level: TriageLevel::Emergency,
        chief_complaint: "Crushing chest pain radiating to left arm",
        assessment: "Suspected STEMI. Immediate cath lab activation required. Patient diaphoretic, BP 85/50.",
        red_flags: &["chest_pain_radiation", "diaphoresis", "hypotension"],
        risk_score: 10,
        suspected_conditions: &["STEMI", "ACS"],
        recommended_action: "Activate cath lab. 12-lead ECG. Aspirin 300mg. IV access x2.",
        time_sensitivity: "Within 5 minutes",
        eta_minutes: 4,
        health_number: "DE-1985-447291",
        location: GeoPoint { lat: 48.77, lon: 9.18 },
        language: "de-DE",
    },
    SeedPatient {
        patient_id: "ER-2026-BB02",
        triage_level: TriageLevel::Emergency,
        chief_complaint: "Thunderclap headache, worst of life, sudden onset",
        assessment: "Possible subarachnoid hemorrhage. Immediate CT head required. GCS 14.",
        red_flags: &["sudden_severe_headache", "vomiting", "photophobia", "neck_stiffness"],
        risk_score: 9,
        suspected_conditions: &["Subarachnoid Hemorrhage", "Meningitis"],
        recommended_action: "Immediate CT head non-contrast. Lumbar puncture if CT negative.",
        time_sensitivity: "Within 10 minutes",
        eta_minutes: 7,
        health_number: "TR-1972-881043",
        location: GeoPoint { lat: 48.79, lon: 9.20 },
        language: "tr-TR",
    },
    SeedPatient {
        patient_id: "ER-2026-CC03",
        triage_level: TriageLevel::Urgent,
        chief_complaint: "Severe abdominal pain after blunt trauma",
        assessment: "Blunt abdominal trauma. Possible splenic laceration. Rigid board-like abdomen.",
        red_flags: &["rigid_abdomen", "post_trauma", "tachycardia"],
        risk_score: 8,
        suspected_conditions: &["Splenic Laceration", "Internal Bleeding"],
        recommended_action: "FAST ultrasound. Trauma surgery consult. 2x large bore IV. Cross-match.",
        time_sensitivity: "Within 30 minutes",
        eta_minutes: 12,
        health_number: "UK-1990-334872",
        location: GeoPoint { lat: 48.81, lon: 9.15 },
        language: "en-GB",
    },
    SeedPatient {
        patient_id: "ER-2026-DD04",
        triage_level: TriageLevel::Urgent,
        chief_complaint: "Acute asthma exacerbation, difficulty breathing",
        assessment: "Moderate asthma exacerbation. SpO2 91% on air. Audible wheeze bilateral.",
        red_flags: &["low_spo2", "respiratory_distress"],
        risk_score: 7,
        suspected_conditions: &["Asthma Exacerbation", "COPD"],
        recommended_action: "Nebulised salbutamol 5mg. Oral prednisolone 40mg. O2 titrate to 94-98%.",
        time_sensitivity: "Within 20 minutes",
        eta_minutes: 15,
        health_number: "TR-1972-881043",
        location: GeoPoint { lat: 48.76, lon: 9.22 },
        language: "tr-TR",
    },
    SeedPatient {
        patient_id: "ER-2026-EE05",
        triage_level: TriageLevel::Routine,
        chief_complaint: "Mild headache and dizziness since this morning",
        assessment: "Likely tension headache with mild dehydration. No neurological signs. BP normal.",
        red_flags: &[],
        risk_score: 2,
        suspected_conditions: &["Tension Headache", "Dehydration"],
        recommended_action: "Oral hydration. Paracetamol 1g. Reassess in 1 hour.",
        time_sensitivity: "Within 2 hours",
        eta_minutes: 28,
        health_number: "DE-1978-992817",
        location: GeoPoint { lat: 48.74, lon: 9.16 },
        language: "de-DE",
    },
];

/// Seed realistic test patients into the queue
#[utoipa::path(
    post,
    path = "/api/v1/admin/seed",
    tag = "admin",
    responses((status = 200, description = "Demo patients seeded", body = SeedResponse))
)]
pub async fn seed_queue(
    State(server): State<TriageCareServer>,
) -> ApiResult<Json<ApiResponse<SeedResponse>>> {
    for seed in &SEED_PATIENTS {
        let assessment = Assessment {
            triage_level: seed.triage_level,
            assessment: seed.assessment.to_string(),
            red_flags: seed.red_flags.iter().map(|s| s.to_string()).collect(),
            recommended_action: seed.recommended_action.to_string(),
            risk_score: seed.risk_score,
            source_guidelines: vec!["demo_seed".to_string()],
            suspected_conditions: seed
                .suspected_conditions
                .iter()
                .map(|s| s.to_string())
                .collect(),
            time_sensitivity: seed.time_sensitivity.to_string(),
        };

        let mut record = PatientRecord::from_assessment(
            seed.chief_complaint,
            &assessment,
            seed.language,
            Some(seed.eta_minutes),
            Some(seed.location),
        );
        record.patient_id = seed.patient_id.to_string();
        record.destination_hospital = "Klinikum Stuttgart - Katharinenhospital".to_string();
        record.health_number = Some(seed.health_number.to_string());

        server.queue.add(&record).await?;
    }

    Ok(Json(api_success(SeedResponse {
        ok: true,
        seeded: SEED_PATIENTS.len(),
    })))
}
