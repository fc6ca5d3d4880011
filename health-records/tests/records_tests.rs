//! Health-record lookups against a freshly seeded database

use health_records::{age_from_dob, HealthRecords};

async fn test_records() -> (HealthRecords, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let records = HealthRecords::connect(&dir.path().join("records.db"))
        .await
        .unwrap();
    (records, dir)
}

#[tokio::test]
async fn database_seeds_demo_patients() {
    let (records, _dir) = test_records().await;
    let numbers = records.demo_health_numbers().await.unwrap();
    assert_eq!(numbers.len(), 4);
    assert!(numbers.contains(&"DE-1985-447291".to_string()));
}

#[tokio::test]
async fn patient_lookup_returns_demographics() {
    let (records, _dir) = test_records().await;
    let patient = records.patient("DE-1985-447291").await.unwrap().unwrap();
    assert_eq!(patient.first_name, "Klaus");
    assert_eq!(patient.full_name(), "Klaus Müller");
    assert_eq!(patient.blood_type.as_deref(), Some("A+"));
    assert!(age_from_dob(&patient.date_of_birth).is_some());
}

#[tokio::test]
async fn unknown_health_number_returns_none() {
    let (records, _dir) = test_records().await;
    assert!(records.patient("XX-0000-000000").await.unwrap().is_none());
    assert!(records.full_record("XX-0000-000000").await.unwrap().is_none());
}

#[tokio::test]
async fn full_record_contains_every_section() {
    let (records, _dir) = test_records().await;
    let record = records.full_record("TR-1972-881043").await.unwrap().unwrap();

    assert_eq!(record.patient.nationality, "TR");
    assert!(!record.diagnoses.is_empty());
    assert!(!record.medications.is_empty());
    assert!(!record.lab_results.is_empty());
    assert!(!record.vitals.is_empty());
    assert!(!record.visits.is_empty());
    assert!(record.diagnoses.iter().any(|d| d.icd_code.as_deref() == Some("E11.9")));
}

#[tokio::test]
async fn vitals_come_most_recent_first() {
    let (records, _dir) = test_records().await;
    let record = records.full_record("DE-1985-447291").await.unwrap().unwrap();
    for pair in record.vitals.windows(2) {
        assert!(pair[0].recorded_at >= pair[1].recorded_at);
    }
}

#[tokio::test]
async fn reconnecting_does_not_duplicate_seed_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");

    let first = HealthRecords::connect(&path).await.unwrap();
    drop(first);
    let second = HealthRecords::connect(&path).await.unwrap();

    assert_eq!(second.demo_health_numbers().await.unwrap().len(), 4);
}
