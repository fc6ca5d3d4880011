use std::path::Path;

use chrono::{Datelike, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::RecordsResult;
use crate::models::{
    Allergy, Diagnosis, FullRecord, LabResult, Medication, Patient, VitalSigns, Visit,
};
use crate::seed;

/// Repository over the health-record database
#[derive(Debug, Clone)]
pub struct HealthRecords {
    pool: SqlitePool,
}

impl HealthRecords {
    /// Open (creating and seeding if necessary) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns a database error when the file cannot be opened or the
    /// schema cannot be created.
    pub async fn connect(path: &Path) -> RecordsResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let records = Self { pool };
        records.create_tables().await?;
        records.seed_if_empty().await?;
        info!(path = %path.display(), "Health record database ready");
        Ok(records)
    }

    async fn create_tables(&self) -> RecordsResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS patients (
                health_number  TEXT PRIMARY KEY,
                first_name     TEXT NOT NULL,
                last_name      TEXT NOT NULL,
                date_of_birth  TEXT NOT NULL,
                sex            TEXT NOT NULL,
                blood_type     TEXT,
                nationality    TEXT DEFAULT 'DE',
                email          TEXT,
                phone          TEXT,
                address        TEXT,
                emergency_name TEXT,
                emergency_phone TEXT,
                insurance_id   TEXT,
                gp_name        TEXT,
                notes          TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS diagnoses (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                health_number TEXT NOT NULL,
                icd_code    TEXT,
                description TEXT NOT NULL,
                status      TEXT DEFAULT 'active',
                diagnosed_date TEXT,
                diagnosing_doctor TEXT,
                notes       TEXT,
                FOREIGN KEY (health_number) REFERENCES patients(health_number)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS medications (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                health_number TEXT NOT NULL,
                name        TEXT NOT NULL,
                dosage      TEXT,
                frequency   TEXT,
                start_date  TEXT,
                end_date    TEXT,
                prescribing_doctor TEXT,
                status      TEXT DEFAULT 'active',
                FOREIGN KEY (health_number) REFERENCES patients(health_number)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS lab_results (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                health_number TEXT NOT NULL,
                test_name   TEXT NOT NULL,
                value       TEXT,
                unit        TEXT,
                reference_range TEXT,
                status      TEXT DEFAULT 'normal',
                test_date   TEXT,
                lab_name    TEXT,
                FOREIGN KEY (health_number) REFERENCES patients(health_number)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vitals (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                health_number TEXT NOT NULL,
                recorded_at TEXT NOT NULL,
                bp_systolic INTEGER,
                bp_diastolic INTEGER,
                heart_rate  INTEGER,
                spo2        REAL,
                temperature REAL,
                weight_kg   REAL,
                height_cm   REAL,
                bmi         REAL,
                glucose     REAL,
                FOREIGN KEY (health_number) REFERENCES patients(health_number)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS visits (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                health_number TEXT NOT NULL,
                visit_date  TEXT NOT NULL,
                visit_type  TEXT,
                hospital    TEXT,
                department  TEXT,
                chief_complaint TEXT,
                diagnosis   TEXT,
                treatment   TEXT,
                discharge_notes TEXT,
                attending_doctor TEXT,
                FOREIGN KEY (health_number) REFERENCES patients(health_number)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS allergies (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                health_number TEXT NOT NULL,
                allergen    TEXT NOT NULL,
                reaction    TEXT,
                severity    TEXT DEFAULT 'moderate',
                confirmed_date TEXT,
                FOREIGN KEY (health_number) REFERENCES patients(health_number)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn seed_if_empty(&self) -> RecordsResult<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patients")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }
        seed::seed_demo_patients(&self.pool).await?;
        info!("Seeded demo patients with full health history");
        Ok(())
    }

    /// Fetch patient demographics.
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn patient(&self, health_number: &str) -> RecordsResult<Option<Patient>> {
        let patient = sqlx::query_as::<_, Patient>(
            "SELECT * FROM patients WHERE health_number = ?",
        )
        .bind(health_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(patient)
    }

    /// Fetch the complete health record for a patient.
    ///
    /// # Errors
    ///
    /// Returns a database error when any section query fails.
    pub async fn full_record(&self, health_number: &str) -> RecordsResult<Option<FullRecord>> {
        let Some(patient) = self.patient(health_number).await? else {
            return Ok(None);
        };

        let diagnoses = sqlx::query_as::<_, Diagnosis>(
            "SELECT * FROM diagnoses WHERE health_number = ? ORDER BY diagnosed_date DESC",
        )
        .bind(health_number)
        .fetch_all(&self.pool)
        .await?;

        let medications = sqlx::query_as::<_, Medication>(
            "SELECT * FROM medications WHERE health_number = ? ORDER BY status, start_date DESC",
        )
        .bind(health_number)
        .fetch_all(&self.pool)
        .await?;

        let lab_results = sqlx::query_as::<_, LabResult>(
            "SELECT * FROM lab_results WHERE health_number = ? ORDER BY test_date DESC",
        )
        .bind(health_number)
        .fetch_all(&self.pool)
        .await?;

        let vitals = sqlx::query_as::<_, VitalSigns>(
            "SELECT * FROM vitals WHERE health_number = ? ORDER BY recorded_at DESC LIMIT 10",
        )
        .bind(health_number)
        .fetch_all(&self.pool)
        .await?;

        let visits = sqlx::query_as::<_, Visit>(
            "SELECT * FROM visits WHERE health_number = ? ORDER BY visit_date DESC LIMIT 10",
        )
        .bind(health_number)
        .fetch_all(&self.pool)
        .await?;

        let allergies = sqlx::query_as::<_, Allergy>(
            "SELECT * FROM allergies WHERE health_number = ?",
        )
        .bind(health_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(FullRecord {
            patient,
            diagnoses,
            medications,
            lab_results,
            vitals,
            visits,
            allergies,
        }))
    }

    /// All health numbers in the database (demo picker).
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn demo_health_numbers(&self) -> RecordsResult<Vec<String>> {
        let numbers = sqlx::query_scalar::<_, String>(
            "SELECT health_number FROM patients ORDER BY nationality",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(numbers)
    }
}

/// Age in whole years from an ISO date of birth, `None` when unparseable.
pub fn age_from_dob(date_of_birth: &str) -> Option<u32> {
    let dob = NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d").ok()?;
    let today = Utc::now().date_naive();
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_is_computed_from_dob() {
        let age = age_from_dob("1985-03-14").unwrap();
        assert!((30..=70).contains(&age));
        assert!(age_from_dob("not-a-date").is_none());
    }
}
