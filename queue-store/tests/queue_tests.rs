//! Queue operations against a throwaway SQLite database

use queue_store::{PatientQueue, QueueStatus};
use triage_engine::{Assessment, GeoPoint, PatientRecord, TriageLevel};

async fn test_queue() -> (PatientQueue, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let queue = PatientQueue::connect(&dir.path().join("queue.db"))
        .await
        .unwrap();
    (queue, dir)
}

fn record(patient_id: &str, level: TriageLevel, eta_minutes: Option<u32>) -> PatientRecord {
    let assessment = Assessment {
        triage_level: level,
        assessment: "Suspected ACS".to_string(),
        red_flags: vec!["radiation".to_string(), "diaphoresis".to_string()],
        recommended_action: "ER immediately".to_string(),
        risk_score: 9,
        source_guidelines: vec!["chest_pain_protocol.txt".to_string()],
        suspected_conditions: vec!["ACS".to_string()],
        time_sensitivity: "Within 10 minutes".to_string(),
    };
    let mut record = PatientRecord::from_assessment(
        "chest pain",
        &assessment,
        "de-DE",
        eta_minutes,
        Some(GeoPoint { lat: 48.78, lon: 9.18 }),
    );
    record.patient_id = patient_id.to_string();
    record
}

#[tokio::test]
async fn add_and_retrieve_patient() {
    let (queue, _dir) = test_queue().await;
    queue
        .add(&record("TEST-001", TriageLevel::Emergency, Some(15)))
        .await
        .unwrap();

    let patients = queue.incoming(20).await.unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].patient_id, "TEST-001");
    assert_eq!(patients[0].triage_level, TriageLevel::Emergency);
    assert_eq!(patients[0].red_flags.len(), 2);
    assert_eq!(patients[0].eta_minutes, Some(15));
    assert_eq!(patients[0].status, QueueStatus::Incoming);
}

#[tokio::test]
async fn coordinates_are_rounded_on_write() {
    let (queue, _dir) = test_queue().await;
    let mut rec = record("TEST-GPS", TriageLevel::Urgent, Some(10));
    rec.location = Some(GeoPoint {
        lat: 48.775812,
        lon: 9.182934,
    });
    queue.add(&rec).await.unwrap();

    let patients = queue.incoming(20).await.unwrap();
    assert_eq!(patients[0].location_lat, Some(48.776));
    assert_eq!(patients[0].location_lon, Some(9.183));
}

#[tokio::test]
async fn status_update_removes_from_incoming() {
    let (queue, _dir) = test_queue().await;
    queue
        .add(&record("TEST-002", TriageLevel::Urgent, Some(30)))
        .await
        .unwrap();

    assert!(queue
        .update_status("TEST-002", QueueStatus::Arrived)
        .await
        .unwrap());
    assert!(queue.incoming(20).await.unwrap().is_empty());

    let found = queue.find("TEST-002").await.unwrap().unwrap();
    assert_eq!(found.status, QueueStatus::Arrived);
}

#[tokio::test]
async fn status_update_of_unknown_patient_reports_missing() {
    let (queue, _dir) = test_queue().await;
    assert!(!queue
        .update_status("NOPE", QueueStatus::Arrived)
        .await
        .unwrap());
}

#[tokio::test]
async fn emergency_patients_come_first() {
    let (queue, _dir) = test_queue().await;
    queue
        .add(&record("TEST-R", TriageLevel::Routine, Some(10)))
        .await
        .unwrap();
    queue
        .add(&record("TEST-E", TriageLevel::Emergency, Some(20)))
        .await
        .unwrap();

    let patients = queue.incoming(20).await.unwrap();
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0].patient_id, "TEST-E");
    assert_eq!(patients[1].patient_id, "TEST-R");
}

#[tokio::test]
async fn same_level_orders_by_eta() {
    let (queue, _dir) = test_queue().await;
    queue
        .add(&record("TEST-SLOW", TriageLevel::Urgent, Some(40)))
        .await
        .unwrap();
    queue
        .add(&record("TEST-FAST", TriageLevel::Urgent, Some(5)))
        .await
        .unwrap();

    let patients = queue.incoming(20).await.unwrap();
    assert_eq!(patients[0].patient_id, "TEST-FAST");
}

#[tokio::test]
async fn stats_reflect_queue_state() {
    let (queue, _dir) = test_queue().await;
    queue
        .add(&record("TEST-S1", TriageLevel::Emergency, Some(10)))
        .await
        .unwrap();
    queue
        .add(&record("TEST-S2", TriageLevel::Routine, Some(20)))
        .await
        .unwrap();

    let stats = queue.stats().await.unwrap();
    assert_eq!(stats.total_incoming, 2);
    assert_eq!(stats.by_level.get("EMERGENCY"), Some(&1));
    assert_eq!(stats.by_level.get("ROUTINE"), Some(&1));
    assert_eq!(stats.by_status.get("incoming"), Some(&2));
}

#[tokio::test]
async fn resubmission_replaces_the_row() {
    let (queue, _dir) = test_queue().await;
    queue
        .add(&record("TEST-DUP", TriageLevel::Routine, Some(10)))
        .await
        .unwrap();
    queue
        .add(&record("TEST-DUP", TriageLevel::Emergency, Some(5)))
        .await
        .unwrap();

    let patients = queue.incoming(20).await.unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].triage_level, TriageLevel::Emergency);
}

#[tokio::test]
async fn clear_empties_the_queue() {
    let (queue, _dir) = test_queue().await;
    queue
        .add(&record("TEST-C", TriageLevel::Urgent, Some(10)))
        .await
        .unwrap();
    queue.clear().await.unwrap();
    assert!(queue.all(50).await.unwrap().is_empty());
}
