use serde::{Deserialize, Serialize};

/// Patient demographics keyed by national health number
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Patient {
    pub health_number: String,
    pub first_name: String,
    pub last_name: String,
    /// ISO date, e.g. `1985-03-14`
    pub date_of_birth: String,
    pub sex: String,
    pub blood_type: Option<String>,
    pub nationality: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_name: Option<String>,
    pub emergency_phone: Option<String>,
    pub insurance_id: Option<String>,
    pub gp_name: Option<String>,
    pub notes: Option<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Diagnosis {
    pub id: i64,
    pub health_number: String,
    pub icd_code: Option<String>,
    pub description: String,
    pub status: String,
    pub diagnosed_date: Option<String>,
    pub diagnosing_doctor: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Medication {
    pub id: i64,
    pub health_number: String,
    pub name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub prescribing_doctor: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LabResult {
    pub id: i64,
    pub health_number: String,
    pub test_name: String,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub reference_range: Option<String>,
    pub status: String,
    pub test_date: Option<String>,
    pub lab_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VitalSigns {
    pub id: i64,
    pub health_number: String,
    pub recorded_at: String,
    pub bp_systolic: Option<i64>,
    pub bp_diastolic: Option<i64>,
    pub heart_rate: Option<i64>,
    pub spo2: Option<f64>,
    pub temperature: Option<f64>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub bmi: Option<f64>,
    pub glucose: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Visit {
    pub id: i64,
    pub health_number: String,
    pub visit_date: String,
    pub visit_type: Option<String>,
    pub hospital: Option<String>,
    pub department: Option<String>,
    pub chief_complaint: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub discharge_notes: Option<String>,
    pub attending_doctor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Allergy {
    pub id: i64,
    pub health_number: String,
    pub allergen: String,
    pub reaction: Option<String>,
    pub severity: String,
    pub confirmed_date: Option<String>,
}

/// Complete health record for one patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullRecord {
    pub patient: Patient,
    pub diagnoses: Vec<Diagnosis>,
    pub medications: Vec<Medication>,
    pub lab_results: Vec<LabResult>,
    pub vitals: Vec<VitalSigns>,
    pub visits: Vec<Visit>,
    pub allergies: Vec<Allergy>,
}
