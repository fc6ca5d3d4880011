use std::path::Path;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::info;

use triage_engine::{PatientRecord, TriageLevel};

use crate::error::QueueResult;
use crate::models::{QueueStats, QueueStatus, QueuedPatient};

/// GPS coordinates are rounded before persistence; street-level precision
/// is enough for the dashboard map and avoids storing exact positions.
const COORDINATE_DECIMALS: f64 = 1000.0;

const SELECT_COLUMNS: &str = "patient_id, timestamp, triage_level, chief_complaint, red_flags, \
     assessment, suspected_conditions, risk_score, recommended_action, time_sensitivity, \
     source_guidelines, eta_minutes, arrival_time, location_lat, location_lon, language, \
     destination_hospital, health_number, status, updated_at";

/// SQLite-backed queue of incoming triaged patients
#[derive(Debug, Clone)]
pub struct PatientQueue {
    pool: SqlitePool,
}

impl PatientQueue {
    /// Open (creating if missing) the queue database at `path`.
    ///
    /// # Errors
    ///
    /// Returns a database error when the file cannot be opened or the
    /// schema cannot be created.
    pub async fn connect(path: &Path) -> QueueResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let queue = Self { pool };
        queue.create_table().await?;
        info!(path = %path.display(), "Patient queue ready");
        Ok(queue)
    }

    async fn create_table(&self) -> QueueResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS patient_queue (
                patient_id TEXT PRIMARY KEY,
                timestamp TEXT NOT NULL,
                triage_level TEXT NOT NULL,
                chief_complaint TEXT NOT NULL,
                red_flags TEXT,
                assessment TEXT,
                suspected_conditions TEXT,
                risk_score INTEGER DEFAULT 5,
                recommended_action TEXT,
                time_sensitivity TEXT,
                source_guidelines TEXT,
                eta_minutes INTEGER,
                arrival_time TEXT,
                location_lat REAL,
                location_lon REAL,
                language TEXT DEFAULT 'en-US',
                destination_hospital TEXT DEFAULT '',
                health_number TEXT,
                status TEXT DEFAULT 'incoming',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Add a patient record to the queue with status `incoming`.
    ///
    /// Resubmitting the same patient id replaces the previous row.
    ///
    /// # Errors
    ///
    /// Returns a database or serialization error.
    pub async fn add(&self, record: &PatientRecord) -> QueueResult<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO patient_queue (
                patient_id, timestamp, triage_level, chief_complaint,
                red_flags, assessment, suspected_conditions, risk_score,
                recommended_action, time_sensitivity, source_guidelines,
                eta_minutes, arrival_time, location_lat, location_lon,
                language, destination_hospital, health_number, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'incoming', ?, ?)
            "#,
        )
        .bind(&record.patient_id)
        .bind(record.timestamp)
        .bind(record.triage_level.as_str())
        .bind(&record.chief_complaint)
        .bind(serde_json::to_string(&record.red_flags)?)
        .bind(&record.assessment)
        .bind(serde_json::to_string(&record.suspected_conditions)?)
        .bind(i64::from(record.risk_score))
        .bind(&record.recommended_action)
        .bind(&record.time_sensitivity)
        .bind(serde_json::to_string(&record.source_guidelines)?)
        .bind(record.eta_minutes.map(i64::from))
        .bind(record.arrival_time)
        .bind(record.location.map(|loc| round_coordinate(loc.lat)))
        .bind(record.location.map(|loc| round_coordinate(loc.lon)))
        .bind(&record.language)
        .bind(&record.destination_hospital)
        .bind(record.health_number.as_deref())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        info!(patient_id = %record.patient_id, level = %record.triage_level, "Patient added to queue");
        Ok(())
    }

    /// Incoming (not yet arrived) patients: emergencies first, then by ETA.
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn incoming(&self, limit: i64) -> QueueResult<Vec<QueuedPatient>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM patient_queue
            WHERE status = 'incoming'
            ORDER BY
                CASE triage_level
                    WHEN 'EMERGENCY' THEN 1
                    WHEN 'URGENT' THEN 2
                    WHEN 'ROUTINE' THEN 3
                    ELSE 4
                END,
                eta_minutes ASC
            LIMIT ?
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(patient_from_row).collect()
    }

    /// All patients regardless of status, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn all(&self, limit: i64) -> QueueResult<Vec<QueuedPatient>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM patient_queue
            ORDER BY updated_at DESC
            LIMIT ?
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(patient_from_row).collect()
    }

    /// Look up one patient by id.
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn find(&self, patient_id: &str) -> QueueResult<Option<QueuedPatient>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM patient_queue WHERE patient_id = ?"
        ))
        .bind(patient_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(patient_from_row).transpose()
    }

    /// Update a patient's status. Returns `false` when the patient id is
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns a database error when the update fails.
    pub async fn update_status(
        &self,
        patient_id: &str,
        status: QueueStatus,
    ) -> QueueResult<bool> {
        let result = sqlx::query(
            "UPDATE patient_queue SET status = ?, updated_at = ? WHERE patient_id = ?",
        )
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(patient_id)
        .execute(&self.pool)
        .await?;

        let found = result.rows_affected() > 0;
        if found {
            info!(patient_id = %patient_id, status = %status, "Patient status updated");
        }
        Ok(found)
    }

    /// Summary statistics: incoming counts per triage level plus counts
    /// per status over the whole queue.
    ///
    /// # Errors
    ///
    /// Returns a database error when a query fails.
    pub async fn stats(&self) -> QueueResult<QueueStats> {
        let mut stats = QueueStats::default();

        let level_rows = sqlx::query(
            r#"
            SELECT triage_level, COUNT(*) as count
            FROM patient_queue
            WHERE status = 'incoming'
            GROUP BY triage_level
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        for row in level_rows {
            let level: String = row.try_get("triage_level")?;
            let count: i64 = row.try_get("count")?;
            stats.total_incoming += count;
            stats.by_level.insert(level, count);
        }

        let status_rows = sqlx::query(
            "SELECT status, COUNT(*) as count FROM patient_queue GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        for row in status_rows {
            let status: String = row.try_get("status")?;
            let count: i64 = row.try_get("count")?;
            stats.by_status.insert(status, count);
        }

        Ok(stats)
    }

    /// Delete every patient. Used by tests and the demo reset endpoint.
    ///
    /// # Errors
    ///
    /// Returns a database error when the delete fails.
    pub async fn clear(&self) -> QueueResult<()> {
        sqlx::query("DELETE FROM patient_queue")
            .execute(&self.pool)
            .await?;
        info!("Patient queue cleared");
        Ok(())
    }
}

fn round_coordinate(value: f64) -> f64 {
    (value * COORDINATE_DECIMALS).round() / COORDINATE_DECIMALS
}

fn patient_from_row(row: &sqlx::sqlite::SqliteRow) -> QueueResult<QueuedPatient> {
    let triage_level: String = row.try_get("triage_level")?;
    let status: String = row.try_get("status")?;
    let timestamp: DateTime<Utc> = row.try_get("timestamp")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    let eta_minutes: Option<i64> = row.try_get("eta_minutes")?;
    let risk_score: i64 = row.try_get("risk_score")?;

    Ok(QueuedPatient {
        patient_id: row.try_get("patient_id")?,
        timestamp,
        triage_level: TriageLevel::parse(&triage_level).unwrap_or(TriageLevel::Urgent),
        chief_complaint: row.try_get("chief_complaint")?,
        red_flags: json_list(row.try_get("red_flags")?),
        assessment: row.try_get::<Option<String>, _>("assessment")?.unwrap_or_default(),
        suspected_conditions: json_list(row.try_get("suspected_conditions")?),
        risk_score: risk_score.clamp(0, 10) as u8,
        recommended_action: row
            .try_get::<Option<String>, _>("recommended_action")?
            .unwrap_or_default(),
        time_sensitivity: row
            .try_get::<Option<String>, _>("time_sensitivity")?
            .unwrap_or_default(),
        source_guidelines: json_list(row.try_get("source_guidelines")?),
        eta_minutes: eta_minutes.and_then(|eta| u32::try_from(eta).ok()),
        arrival_time: row.try_get("arrival_time")?,
        location_lat: row.try_get("location_lat")?,
        location_lon: row.try_get("location_lon")?,
        language: row.try_get("language")?,
        destination_hospital: row
            .try_get::<Option<String>, _>("destination_hospital")?
            .unwrap_or_default(),
        health_number: row.try_get("health_number")?,
        status: QueueStatus::parse(&status).unwrap_or(QueueStatus::Incoming),
        updated_at,
    })
}

/// List-valued columns travel as JSON text; malformed values decode to
/// an empty list rather than failing the whole row.
fn json_list(value: Option<String>) -> Vec<String> {
    value
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_round_to_three_decimals() {
        assert_eq!(round_coordinate(48.77581234), 48.776);
        assert_eq!(round_coordinate(9.1829), 9.183);
    }

    #[test]
    fn malformed_json_lists_decode_empty() {
        assert!(json_list(Some("not json".to_string())).is_empty());
        assert!(json_list(None).is_empty());
        assert_eq!(
            json_list(Some("[\"a\",\"b\"]".to_string())),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
