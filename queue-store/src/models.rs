use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_engine::TriageLevel;

/// Patient status lifecycle: incoming -> arrived -> in_treatment -> discharged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Incoming,
    Arrived,
    InTreatment,
    Discharged,
}

impl QueueStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QueueStatus::Incoming => "incoming",
            QueueStatus::Arrived => "arrived",
            QueueStatus::InTreatment => "in_treatment",
            QueueStatus::Discharged => "discharged",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "incoming" => Some(QueueStatus::Incoming),
            "arrived" => Some(QueueStatus::Arrived),
            "in_treatment" => Some(QueueStatus::InTreatment),
            "discharged" => Some(QueueStatus::Discharged),
            _ => None,
        }
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A patient row read back from the queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedPatient {
    pub patient_id: String,
    pub timestamp: DateTime<Utc>,
    pub triage_level: TriageLevel,
    pub chief_complaint: String,
    pub red_flags: Vec<String>,
    pub assessment: String,
    pub suspected_conditions: Vec<String>,
    pub risk_score: u8,
    pub recommended_action: String,
    pub time_sensitivity: String,
    pub source_guidelines: Vec<String>,
    pub eta_minutes: Option<u32>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub location_lat: Option<f64>,
    pub location_lon: Option<f64>,
    pub language: String,
    pub destination_hospital: String,
    pub health_number: Option<String>,
    pub status: QueueStatus,
    pub updated_at: DateTime<Utc>,
}

/// Summary statistics for the current queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueStats {
    pub total_incoming: i64,
    /// Incoming patients per triage level
    pub by_level: HashMap<String, i64>,
    /// All patients per status
    pub by_status: HashMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            QueueStatus::Incoming,
            QueueStatus::Arrived,
            QueueStatus::InTreatment,
            QueueStatus::Discharged,
        ] {
            assert_eq!(QueueStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(QueueStatus::parse("treating"), None);
    }
}
