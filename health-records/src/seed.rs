//! Demo seed data: four patients with realistic multi-year histories

use sqlx::sqlite::SqlitePool;

use crate::error::RecordsResult;

pub(crate) async fn seed_demo_patients(pool: &SqlitePool) -> RecordsResult<()> {
    let patients: [(&str, &str, &str, &str, &str, &str, &str, &str, &str, &str, &str, &str, &str, &str, &str); 4] = [
        (
            "DE-1985-447291", "Klaus", "Müller", "1985-03-14", "Male", "A+", "DE",
            "k.mueller@email.de", "+49 711 123 4567",
            "Kriegsbergstraße 10, 70174 Stuttgart",
            "Greta Müller", "+49 711 987 6543",
            "AOK-BW 123456789", "Dr. Hans Becker",
            "Patient has known cardiac history. Takes statins daily.",
        ),
        (
            "TR-1972-881043", "Ahmet", "Yılmaz", "1972-07-22", "Male", "B+", "TR",
            "a.yilmaz@email.com", "+90 532 111 2233",
            "Atatürk Cad. No: 15, 34000 İstanbul",
            "Fatma Yılmaz", "+90 532 444 5566",
            "SGK-5512873690", "Dr. Mehmet Kaya",
            "Type 2 diabetes controlled with metformin. Hypertension.",
        ),
        (
            "UK-1990-334872", "Emily", "Clarke", "1990-11-05", "Female", "O-", "UK",
            "e.clarke@email.co.uk", "+44 7700 900 123",
            "14 Baker Street, London W1U 3BW",
            "James Clarke", "+44 7700 900 456",
            "NHS-789012345", "Dr. Sarah Thompson",
            "Asthma since childhood. Carries Ventolin inhaler.",
        ),
        (
            "DE-1978-992817", "Maria", "Schmidt", "1978-09-30", "Female", "AB+", "DE",
            "m.schmidt@email.de", "+49 89 555 1234",
            "Marienplatz 5, 80331 München",
            "Peter Schmidt", "+49 89 555 5678",
            "TK-987654321", "Dr. Elisabeth Weber",
            "No significant past medical history. Occasional migraines.",
        ),
    ];

    for p in patients {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO patients (
                health_number, first_name, last_name, date_of_birth, sex,
                blood_type, nationality, email, phone, address,
                emergency_name, emergency_phone, insurance_id, gp_name, notes
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(p.0).bind(p.1).bind(p.2).bind(p.3).bind(p.4)
        .bind(p.5).bind(p.6).bind(p.7).bind(p.8).bind(p.9)
        .bind(p.10).bind(p.11).bind(p.12).bind(p.13).bind(p.14)
        .execute(pool)
        .await?;
    }

    let diagnoses: [(&str, &str, &str, &str, &str, &str, &str); 9] = [
        ("DE-1985-447291", "I25.10", "Coronary artery disease without angina pectoris", "active", "2019-06-10", "Dr. Becker", "Managed with medication"),
        ("DE-1985-447291", "E78.5", "Hyperlipidaemia", "active", "2018-03-05", "Dr. Becker", "Statin therapy"),
        ("DE-1985-447291", "I10", "Essential hypertension", "active", "2017-01-20", "Dr. Becker", "ACE inhibitor"),
        ("TR-1972-881043", "E11.9", "Type 2 diabetes mellitus without complications", "active", "2015-04-12", "Dr. Kaya", "Metformin 1000mg BD"),
        ("TR-1972-881043", "I10", "Essential hypertension", "active", "2016-08-03", "Dr. Kaya", "Amlodipine 5mg"),
        ("TR-1972-881043", "E11.51", "Diabetic peripheral angiopathy", "active", "2022-11-19", "Dr. Özdemir", "Annual review"),
        ("UK-1990-334872", "J45.20", "Mild intermittent asthma, uncomplicated", "active", "2005-03-22", "Dr. Thompson", "SABA as needed"),
        ("UK-1990-334872", "J30.1", "Allergic rhinitis due to pollen", "active", "2012-07-14", "Dr. Thompson", "Seasonal antihistamines"),
        ("DE-1978-992817", "G43.909", "Migraine, unspecified, not intractable", "active", "2020-02-28", "Dr. Weber", "Triptans PRN"),
    ];

    for d in diagnoses {
        sqlx::query(
            r#"
            INSERT INTO diagnoses (health_number, icd_code, description, status, diagnosed_date, diagnosing_doctor, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(d.0).bind(d.1).bind(d.2).bind(d.3).bind(d.4).bind(d.5).bind(d.6)
        .execute(pool)
        .await?;
    }

    let medications: [(&str, &str, &str, &str, &str, Option<&str>, &str, &str); 10] = [
        ("DE-1985-447291", "Atorvastatin 40mg", "40mg", "Once daily (evening)", "2019-06-15", None, "Dr. Becker", "active"),
        ("DE-1985-447291", "Ramipril 5mg", "5mg", "Once daily (morning)", "2017-01-25", None, "Dr. Becker", "active"),
        ("DE-1985-447291", "Aspirin 100mg", "100mg", "Once daily", "2019-06-15", None, "Dr. Becker", "active"),
        ("DE-1985-447291", "Bisoprolol 5mg", "5mg", "Once daily", "2020-03-10", None, "Dr. Becker", "active"),
        ("TR-1972-881043", "Metformin 1000mg", "1000mg", "Twice daily with meals", "2015-04-15", None, "Dr. Kaya", "active"),
        ("TR-1972-881043", "Amlodipine 5mg", "5mg", "Once daily", "2016-08-10", None, "Dr. Kaya", "active"),
        ("TR-1972-881043", "Aspirin 100mg", "100mg", "Once daily", "2018-06-01", None, "Dr. Kaya", "active"),
        ("UK-1990-334872", "Salbutamol inhaler 100mcg", "2 puffs", "PRN (as needed)", "2005-03-25", None, "Dr. Thompson", "active"),
        ("UK-1990-334872", "Loratadine 10mg", "10mg", "Once daily (seasonal)", "2012-07-20", Some("2012-10-01"), "Dr. Thompson", "inactive"),
        ("DE-1978-992817", "Sumatriptan 50mg", "50mg", "PRN max 2/day", "2020-03-01", None, "Dr. Weber", "active"),
    ];

    for m in medications {
        sqlx::query(
            r#"
            INSERT INTO medications (health_number, name, dosage, frequency, start_date, end_date, prescribing_doctor, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(m.0).bind(m.1).bind(m.2).bind(m.3).bind(m.4).bind(m.5).bind(m.6).bind(m.7)
        .execute(pool)
        .await?;
    }

    let vitals: [(&str, &str, i64, i64, i64, f64, f64, f64, f64, f64, f64); 8] = [
        ("DE-1985-447291", "2026-01-15T09:30:00", 138, 88, 74, 98.0, 36.7, 84.5, 178.0, 26.7, 5.1),
        ("DE-1985-447291", "2025-10-22T10:00:00", 142, 91, 78, 97.5, 36.5, 85.0, 178.0, 26.8, 5.4),
        ("DE-1985-447291", "2025-07-08T08:45:00", 136, 86, 71, 98.2, 36.6, 84.0, 178.0, 26.5, 5.0),
        ("TR-1972-881043", "2026-02-01T11:00:00", 148, 94, 82, 97.0, 37.0, 91.0, 172.0, 30.8, 8.2),
        ("TR-1972-881043", "2025-11-15T09:15:00", 152, 96, 85, 96.5, 36.9, 92.5, 172.0, 31.3, 9.1),
        ("UK-1990-334872", "2026-01-20T14:30:00", 118, 76, 68, 99.0, 36.4, 62.0, 168.0, 21.9, 4.8),
        ("UK-1990-334872", "2025-09-10T16:00:00", 115, 74, 66, 98.8, 36.3, 61.5, 168.0, 21.8, 4.7),
        ("DE-1978-992817", "2026-02-10T10:00:00", 122, 78, 70, 99.0, 36.5, 68.0, 165.0, 25.0, 4.9),
    ];

    for v in vitals {
        sqlx::query(
            r#"
            INSERT INTO vitals (health_number, recorded_at, bp_systolic, bp_diastolic, heart_rate, spo2, temperature, weight_kg, height_cm, bmi, glucose)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(v.0).bind(v.1).bind(v.2).bind(v.3).bind(v.4).bind(v.5)
        .bind(v.6).bind(v.7).bind(v.8).bind(v.9).bind(v.10)
        .execute(pool)
        .await?;
    }

    let labs: [(&str, &str, &str, &str, &str, &str, &str, &str); 12] = [
        ("DE-1985-447291", "HbA1c", "5.4%", "%", "< 5.7%", "normal", "2026-01-15", "Labor Stuttgart"),
        ("DE-1985-447291", "LDL Cholesterol", "2.1 mmol/L", "mmol/L", "< 1.8 mmol/L", "high", "2026-01-15", "Labor Stuttgart"),
        ("DE-1985-447291", "Troponin I", "0.01 ng/mL", "ng/mL", "< 0.04 ng/mL", "normal", "2025-10-22", "Labor Stuttgart"),
        ("DE-1985-447291", "eGFR", "78 ml/min", "ml/min", ">= 60 ml/min", "normal", "2026-01-15", "Labor Stuttgart"),
        ("DE-1985-447291", "CRP", "4.2 mg/L", "mg/L", "< 5.0 mg/L", "normal", "2026-01-15", "Labor Stuttgart"),
        ("TR-1972-881043", "HbA1c", "8.2%", "%", "< 7.0%", "high", "2026-02-01", "Acıbadem Lab"),
        ("TR-1972-881043", "Fasting Glucose", "9.1 mmol/L", "mmol/L", "3.9-5.5", "high", "2026-02-01", "Acıbadem Lab"),
        ("TR-1972-881043", "Creatinine", "1.3 mg/dL", "mg/dL", "0.7-1.2 mg/dL", "high", "2026-02-01", "Acıbadem Lab"),
        ("UK-1990-334872", "Peak Flow", "480 L/min", "L/min", "400-550 L/min", "normal", "2026-01-20", "NHS Lab London"),
        ("UK-1990-334872", "IgE (total)", "180 IU/mL", "IU/mL", "< 100 IU/mL", "high", "2026-01-20", "NHS Lab London"),
        ("DE-1978-992817", "Full Blood Count", "Normal", "", "", "normal", "2026-02-10", "Labor München"),
        ("DE-1978-992817", "Thyroid (TSH)", "2.1 mIU/L", "mIU/L", "0.4-4.0 mIU/L", "normal", "2026-02-10", "Labor München"),
    ];

    for l in labs {
        sqlx::query(
            r#"
            INSERT INTO lab_results (health_number, test_name, value, unit, reference_range, status, test_date, lab_name)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(l.0).bind(l.1).bind(l.2).bind(l.3).bind(l.4).bind(l.5).bind(l.6).bind(l.7)
        .execute(pool)
        .await?;
    }

    let allergies: [(&str, &str, &str, &str, &str); 5] = [
        ("DE-1985-447291", "Penicillin", "Anaphylaxis", "severe", "2010-05-12"),
        ("DE-1985-447291", "Ibuprofen", "GI bleed", "moderate", "2015-08-20"),
        ("TR-1972-881043", "Sulfonamides", "Rash", "mild", "2018-03-01"),
        ("UK-1990-334872", "Latex", "Urticaria", "moderate", "2008-11-30"),
        ("UK-1990-334872", "Aspirin", "Bronchospasm", "severe", "2015-02-14"),
    ];

    for a in allergies {
        sqlx::query(
            r#"
            INSERT INTO allergies (health_number, allergen, reaction, severity, confirmed_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(a.0).bind(a.1).bind(a.2).bind(a.3).bind(a.4)
        .execute(pool)
        .await?;
    }

    let visits: [(&str, &str, &str, &str, &str, &str, &str, &str, &str, &str); 8] = [
        ("DE-1985-447291", "2025-11-03", "Emergency", "Klinikum Stuttgart - Katharinenhospital", "Cardiology",
         "Chest tightness and palpitations", "Stable CAD, no acute event", "IV nitrates, monitoring", "Discharged after 6h observation", "Dr. Schreiber"),
        ("DE-1985-447291", "2024-06-18", "Outpatient", "Klinikum Stuttgart - Katharinenhospital", "Cardiology",
         "Routine cardiology follow-up", "Stable CAD", "Medication adjustment", "Continue current medications", "Dr. Schreiber"),
        ("DE-1985-447291", "2023-01-09", "Emergency", "Robert-Bosch-Krankenhaus Stuttgart", "Emergency",
         "Hypertensive crisis BP 185/110", "Hypertensive urgency", "IV labetalol, oral agents restarted", "BP controlled, discharged", "Dr. Hoffmann"),
        ("TR-1972-881043", "2025-12-01", "Emergency", "Acıbadem Hastanesi", "Emergency",
         "Hyperglycemia, blood sugar 22 mmol/L", "DKA, mild", "IV insulin, fluids", "Admitted 2 days, discharged", "Dr. Özdemir"),
        ("TR-1972-881043", "2024-09-15", "Outpatient", "İstanbul Üniversitesi", "Endocrinology",
         "Diabetes review", "T2DM, suboptimal control", "Insulin addition discussed", "Metformin dose increased", "Dr. Kaya"),
        ("UK-1990-334872", "2025-08-22", "Emergency", "King's College Hospital London", "Emergency",
         "Acute asthma attack", "Moderate acute asthma", "Nebulised salbutamol x3, steroids", "Discharged with short oral steroid course", "Dr. Patel"),
        ("UK-1990-334872", "2024-04-10", "Outpatient", "Guy's Hospital London", "Respiratory",
         "Annual asthma review", "Well-controlled asthma", "Spirometry normal", "Continue SABA, annual review", "Dr. Thompson"),
        ("DE-1978-992817", "2026-01-20", "Emergency", "LMU Klinikum München - Großhadern", "Neurology",
         "Severe migraine with visual aura", "Migraine with aura", "IV paracetamol + sumatriptan", "Discharged after 4h", "Dr. Braun"),
    ];

    for v in visits {
        sqlx::query(
            r#"
            INSERT INTO visits (health_number, visit_date, visit_type, hospital, department, chief_complaint, diagnosis, treatment, discharge_notes, attending_doctor)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(v.0).bind(v.1).bind(v.2).bind(v.3).bind(v.4)
        .bind(v.5).bind(v.6).bind(v.7).bind(v.8).bind(v.9)
        .execute(pool)
        .await?;
    }

    Ok(())
}
