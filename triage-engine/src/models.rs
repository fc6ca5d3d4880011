use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coarse triage classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TriageLevel {
    Emergency,
    Urgent,
    Routine,
}

impl TriageLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            TriageLevel::Emergency => "EMERGENCY",
            TriageLevel::Urgent => "URGENT",
            TriageLevel::Routine => "ROUTINE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TriageLevel::Emergency => "Immediate medical attention required",
            TriageLevel::Urgent => "Needs medical attention soon",
            TriageLevel::Routine => "Non-urgent, can wait or self-care",
        }
    }

    /// Queue ordering priority, lower is more urgent.
    pub fn priority(self) -> u8 {
        match self {
            TriageLevel::Emergency => 1,
            TriageLevel::Urgent => 2,
            TriageLevel::Routine => 3,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "EMERGENCY" => Some(TriageLevel::Emergency),
            "URGENT" => Some(TriageLevel::Urgent),
            "ROUTINE" => Some(TriageLevel::Routine),
            _ => None,
        }
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer input style for a follow-up question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    YesNo,
    Scale,
    MultipleChoice,
    FreeText,
}

/// One AI-generated follow-up question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(rename = "type")]
    pub answer_type: AnswerType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub clinical_rationale: String,
}

/// A question with the patient's answer (already in English) and the
/// original-language answer kept for the staff dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_answer: Option<String>,
}

/// Final triage assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub triage_level: TriageLevel,
    pub assessment: String,
    pub red_flags: Vec<String>,
    pub recommended_action: String,
    pub risk_score: u8,
    #[serde(default)]
    pub source_guidelines: Vec<String>,
    #[serde(default)]
    pub suspected_conditions: Vec<String>,
    #[serde(default)]
    pub time_sensitivity: String,
}

/// Rounded patient GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Complete patient record submitted to the hospital queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
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
    pub location: Option<GeoPoint>,
    pub language: String,
    #[serde(default)]
    pub destination_hospital: String,
    #[serde(default)]
    pub health_number: Option<String>,
}

impl PatientRecord {
    /// Build the hospital notification record from a completed assessment.
    pub fn from_assessment(
        chief_complaint: &str,
        assessment: &Assessment,
        language: &str,
        eta_minutes: Option<u32>,
        location: Option<GeoPoint>,
    ) -> Self {
        let now = Utc::now();
        let patient_id = format!(
            "ER-{}-{}",
            now.format("%Y"),
            &Uuid::new_v4().simple().to_string()[..4].to_uppercase()
        );
        let arrival_time =
            eta_minutes.map(|eta| now + Duration::minutes(i64::from(eta)));

        Self {
            patient_id,
            timestamp: now,
            triage_level: assessment.triage_level,
            chief_complaint: chief_complaint.to_string(),
            red_flags: assessment.red_flags.clone(),
            assessment: assessment.assessment.clone(),
            suspected_conditions: assessment.suspected_conditions.clone(),
            risk_score: assessment.risk_score,
            recommended_action: assessment.recommended_action.clone(),
            time_sensitivity: assessment.time_sensitivity.clone(),
            source_guidelines: assessment.source_guidelines.clone(),
            eta_minutes,
            arrival_time,
            location,
            language: language.to_string(),
            destination_hospital: String::new(),
            health_number: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triage_level_wire_format_is_uppercase() {
        assert_eq!(
            serde_json::to_string(&TriageLevel::Emergency).unwrap(),
            "\"EMERGENCY\""
        );
        assert_eq!(TriageLevel::parse("URGENT"), Some(TriageLevel::Urgent));
        assert_eq!(TriageLevel::parse("urgent"), None);
    }

    #[test]
    fn priority_orders_emergency_first() {
        assert!(TriageLevel::Emergency.priority() < TriageLevel::Urgent.priority());
        assert!(TriageLevel::Urgent.priority() < TriageLevel::Routine.priority());
    }

    #[test]
    fn record_carries_assessment_fields_and_arrival_time() {
        let assessment = Assessment {
            triage_level: TriageLevel::Emergency,
            assessment: "Suspected ACS".to_string(),
            red_flags: vec!["chest_pain".to_string(), "radiation".to_string()],
            recommended_action: "ER immediately".to_string(),
            risk_score: 9,
            source_guidelines: vec!["chest_pain_protocol.txt".to_string()],
            suspected_conditions: vec!["ACS".to_string()],
            time_sensitivity: "Within 10 minutes".to_string(),
        };
        let record = PatientRecord::from_assessment(
            "chest pain",
            &assessment,
            "de-DE",
            Some(15),
            Some(GeoPoint { lat: 48.78, lon: 9.18 }),
        );

        assert!(record.patient_id.starts_with("ER-"));
        assert_eq!(record.patient_id.len(), "ER-2026-ABCD".len());
        assert_eq!(record.triage_level, TriageLevel::Emergency);
        assert_eq!(record.language, "de-DE");
        assert_eq!(record.eta_minutes, Some(15));
        assert!(record.arrival_time.is_some());
    }

    #[test]
    fn record_without_eta_has_no_arrival_time() {
        let assessment = Assessment {
            triage_level: TriageLevel::Routine,
            assessment: String::new(),
            red_flags: vec![],
            recommended_action: String::new(),
            risk_score: 2,
            source_guidelines: vec![],
            suspected_conditions: vec![],
            time_sensitivity: String::new(),
        };
        let record =
            PatientRecord::from_assessment("headache", &assessment, "en-US", None, None);
        assert!(record.arrival_time.is_none());
    }
}
