//! End-to-end API tests in demo mode (no cloud credentials configured)

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use triagecare_server::{create_app, ServerConfig, TriageCareServer};

async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let guidelines = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/medical_guidelines");

    let config = ServerConfig {
        name: "TriageCare".to_string(),
        queue_db: dir.path().join("queue.db"),
        records_db: dir.path().join("records.db"),
        guidelines_dir: guidelines,
    };
    let server = TriageCareServer::new(config).await.unwrap();
    (create_app(server), dir)
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let (app, _dir) = test_app().await;
    let (status, body) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
    // Without cloud credentials everything runs on local fallbacks.
    assert_eq!(body["data"]["checks"]["triage_model"], "fallback");
}

#[tokio::test]
async fn root_serves_the_dashboard_page() {
    let (app, _dir) = test_app().await;
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("ER Command Center"));
}

#[tokio::test]
async fn questions_endpoint_returns_cardiac_bank_for_chest_pain() {
    let (app, _dir) = test_app().await;
    let (status, body) = request(
        &app,
        "POST",
        "/api/v1/intake/questions",
        Some(json!({ "complaint": "severe chest pain", "language": "en-US" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let questions = body["data"]["questions"].as_array().unwrap();
    assert!(!questions.is_empty());
    assert!(questions.len() <= 5);
    assert!(questions[0]["question"].as_str().unwrap().contains("radiate"));
}

#[tokio::test]
async fn empty_complaint_is_rejected() {
    let (app, _dir) = test_app().await;
    let (status, _) = request(
        &app,
        "POST",
        "/api/v1/intake/questions",
        Some(json!({ "complaint": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transcribe_without_speech_credentials_is_unavailable() {
    let (app, _dir) = test_app().await;
    let (status, body) = request(
        &app,
        "POST",
        "/api/v1/intake/transcribe",
        Some(json!({ "audio_base64": "AAAA" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error_type"], "service_unavailable");
}

#[tokio::test]
async fn assess_endpoint_classifies_cardiac_red_flags_as_emergency() {
    let (app, _dir) = test_app().await;
    let (status, body) = request(
        &app,
        "POST",
        "/api/v1/intake/assess",
        Some(json!({
            "complaint": "severe chest pain radiating to left arm",
            "language": "en-US",
            "answers": [
                { "question": "Does pain radiate to arm?", "answer": "Yes" },
                { "question": "Pain severity 1-10?", "answer": "9" },
                { "question": "Symptoms?", "answer": "Sweating, Shortness of breath" }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["assessment"]["triage_level"], "EMERGENCY");
    assert!(body["data"]["assessment"]["risk_score"].as_u64().unwrap() >= 7);
}

#[tokio::test]
async fn hospitals_endpoint_returns_three_ranked_hospitals() {
    let (app, _dir) = test_app().await;
    let (status, body) = request(
        &app,
        "GET",
        "/api/v1/hospitals?lat=48.78&lon=9.18",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let hospitals = body["data"]["hospitals"].as_array().unwrap();
    assert_eq!(hospitals.len(), 3);
    let etas: Vec<u64> = hospitals
        .iter()
        .map(|h| h["effective_eta_minutes"].as_u64().unwrap())
        .collect();
    let mut sorted = etas.clone();
    sorted.sort_unstable();
    assert_eq!(etas, sorted);
}

#[tokio::test]
async fn hospitals_endpoint_rejects_bad_coordinates() {
    let (app, _dir) = test_app().await;
    let (status, _) = request(&app, "GET", "/api/v1/hospitals?lat=123.0&lon=9.18", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submit_and_dashboard_flow() {
    let (app, _dir) = test_app().await;

    // Assess, then submit the patient to the queue.
    let (_, assess_body) = request(
        &app,
        "POST",
        "/api/v1/intake/assess",
        Some(json!({
            "complaint": "severe chest pain",
            "language": "de-DE",
            "answers": [
                { "question": "Does pain radiate to arm?", "answer": "Ja" },
                { "question": "Pain severity 1-10?", "answer": "8" }
            ]
        })),
    )
    .await;
    let assessment = assess_body["data"]["assessment"].clone();

    let (status, submit_body) = request(
        &app,
        "POST",
        "/api/v1/intake/submit",
        Some(json!({
            "complaint": "severe chest pain",
            "language": "de-DE",
            "assessment": assessment,
            "eta_minutes": 15,
            "location": { "lat": 48.775812, "lon": 9.182934 },
            "destination_hospital": "Klinikum Stuttgart - Katharinenhospital",
            "health_number": "DE-1985-447291"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let patient_id = submit_body["data"]["patient_id"].as_str().unwrap().to_string();
    assert!(patient_id.starts_with("ER-"));
    assert!(submit_body["data"]["arrival_time"].is_string());

    // The dashboard sees the patient, enriched from the health DB.
    let (status, list_body) = request(&app, "GET", "/api/v1/queue/patients", None).await;
    assert_eq!(status, StatusCode::OK);
    let patients = list_body["data"].as_array().unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0]["patient_id"], patient_id.as_str());
    assert_eq!(patients[0]["full_name"], "Klaus Müller");
    assert_eq!(patients[0]["eta_display"], "15 min");
    // Coordinates were rounded before persistence.
    assert_eq!(patients[0]["location_lat"], 48.776);

    // Stats reflect the single incoming patient.
    let (_, stats_body) = request(&app, "GET", "/api/v1/queue/stats", None).await;
    assert_eq!(stats_body["data"]["incoming"], 1);
    assert_eq!(stats_body["data"]["en_route"], 1);

    // Patient detail and status transition.
    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/v1/queue/patients/{}", patient_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &app,
        "PATCH",
        &format!("/api/v1/queue/patients/{}/status", patient_id),
        Some(json!({ "status": "arrived" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list_after) = request(&app, "GET", "/api/v1/queue/patients", None).await;
    assert!(list_after["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_status_value_is_rejected() {
    let (app, _dir) = test_app().await;
    let (status, _) = request(
        &app,
        "PATCH",
        "/api/v1/queue/patients/ER-2026-XXXX/status",
        Some(json!({ "status": "treating" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_patient_detail_is_404() {
    let (app, _dir) = test_app().await;
    let (status, _) = request(&app, "GET", "/api/v1/queue/patients/ER-0000-NONE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_health_record_is_404() {
    let (app, _dir) = test_app().await;
    let (status, _) = request(&app, "GET", "/api/v1/records/XX-0000-000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_record_lookup_returns_full_sections() {
    let (app, _dir) = test_app().await;
    let (status, body) = request(&app, "GET", "/api/v1/records/UK-1990-334872", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["patient"]["first_name"], "Emily");
    assert!(!body["data"]["allergies"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn seed_then_tracking_returns_located_patients() {
    let (app, _dir) = test_app().await;

    let (status, seed_body) = request(&app, "POST", "/api/v1/admin/seed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seed_body["data"]["seeded"], 5);

    let (_, tracking_body) = request(&app, "GET", "/api/v1/queue/tracking", None).await;
    let located = tracking_body["data"].as_array().unwrap();
    assert_eq!(located.len(), 5);

    // Emergencies sort ahead of routine patients.
    let (_, list_body) = request(&app, "GET", "/api/v1/queue/patients", None).await;
    let patients = list_body["data"].as_array().unwrap();
    assert_eq!(patients[0]["triage_level"], "EMERGENCY");
    assert_eq!(patients.last().unwrap()["triage_level"], "ROUTINE");

    let (status, _) = request(&app, "POST", "/api/v1/admin/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, stats_body) = request(&app, "GET", "/api/v1/queue/stats", None).await;
    assert_eq!(stats_body["data"]["incoming"], 0);
}

#[tokio::test]
async fn patients_sorted_by_eta_when_requested() {
    let (app, _dir) = test_app().await;
    let (_, _) = request(&app, "POST", "/api/v1/admin/seed", None).await;

    let (_, body) = request(&app, "GET", "/api/v1/queue/patients?sort=eta", None).await;
    let etas: Vec<u64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["eta_minutes"].as_u64().unwrap())
        .collect();
    let mut sorted = etas.clone();
    sorted.sort_unstable();
    assert_eq!(etas, sorted);
}
