//! Local triage heuristics
//!
//! Used whenever Azure OpenAI is unavailable. Question banks are keyed by
//! complaint keywords; the assessment scores the patient's actual answers
//! for red flags and severity instead of echoing the complaint back.

use tracing::debug;

use crate::models::{AnswerType, Assessment, Question, QuestionAnswer, TriageLevel};

/// Complaint keywords that force EMERGENCY regardless of answer scoring.
const EMERGENCY_KEYWORDS: [&str; 11] = [
    "chest pain",
    "heart",
    "stroke",
    "unconscious",
    "bleeding",
    "can't breathe",
    "seizure",
    "severe",
    "arm weakness",
    "face droop",
    "can't move",
];

const URGENT_KEYWORDS: [&str; 8] = [
    "pain", "fever", "vomiting", "broken", "injury", "fall", "cough", "stomach",
];

/// Affirmative / negative answers across the supported languages
/// (EN, DE, TR, FR, ES, IT, PT, RU, AR, ZH).
const AFFIRMATIVE: [&str; 11] = [
    "yes", "ja", "evet", "oui", "sí", "si", "sì", "sim", "да", "نعم", "是",
];
const NEGATIVE: [&str; 8] = ["no", "nein", "hayır", "non", "não", "нет", "لا", "否"];

fn question(
    text: &str,
    answer_type: AnswerType,
    options: &[&str],
    rationale: &str,
) -> Question {
    Question {
        question: text.to_string(),
        answer_type,
        options: options.iter().map(|o| o.to_string()).collect(),
        clinical_rationale: rationale.to_string(),
    }
}

fn scale_options() -> Vec<String> {
    (1..=10).map(|i| i.to_string()).collect()
}

fn scale_question(text: &str, rationale: &str) -> Question {
    Question {
        question: text.to_string(),
        answer_type: AnswerType::Scale,
        options: scale_options(),
        clinical_rationale: rationale.to_string(),
    }
}

/// Keyword-matched follow-up questions for the complaint.
pub fn mock_questions(chief_complaint: &str) -> Vec<Question> {
    let complaint = chief_complaint.to_lowercase();
    let contains_any =
        |keywords: &[&str]| keywords.iter().any(|kw| complaint.contains(kw));

    if contains_any(&["chest", "heart", "cardiac"]) {
        return vec![
            question(
                "Does the pain radiate to your arm, jaw, or back?",
                AnswerType::YesNo,
                &["Yes", "No"],
                "Cardiac radiation pattern",
            ),
            scale_question("Rate your pain on a scale of 1-10", "Pain severity"),
            question(
                "Do you have any of these symptoms?",
                AnswerType::MultipleChoice,
                &["Sweating", "Shortness of breath", "Nausea", "Dizziness", "None"],
                "Associated symptoms",
            ),
            question(
                "Do you have a history of heart disease?",
                AnswerType::YesNo,
                &["Yes", "No"],
                "Cardiac history",
            ),
        ];
    }

    if contains_any(&["head", "stroke", "face", "speech"]) {
        return vec![
            question(
                "Did symptoms start suddenly?",
                AnswerType::YesNo,
                &["Yes", "No"],
                "Sudden onset assessment",
            ),
            question(
                "Can you smile with both sides of your face?",
                AnswerType::YesNo,
                &["Yes", "No"],
                "FAST - Face assessment",
            ),
            question(
                "Can you raise both arms equally?",
                AnswerType::YesNo,
                &["Yes", "No"],
                "FAST - Arms assessment",
            ),
            question(
                "Is your speech slurred or unclear?",
                AnswerType::YesNo,
                &["Yes", "No"],
                "FAST - Speech assessment",
            ),
        ];
    }

    if contains_any(&["stomach", "abdom", "belly", "vomit", "nausea"]) {
        return vec![
            question(
                "Where exactly is the pain?",
                AnswerType::MultipleChoice,
                &[
                    "Upper right",
                    "Upper left",
                    "Lower right",
                    "Lower left",
                    "Central",
                    "All over",
                ],
                "Pain localization for differential diagnosis",
            ),
            scale_question("Rate your pain on a scale of 1-10", "Pain severity assessment"),
            question(
                "Do you have any of these symptoms?",
                AnswerType::MultipleChoice,
                &["Fever", "Vomiting", "Diarrhea", "Blood in stool", "None"],
                "Associated GI symptoms",
            ),
            question(
                "Was the onset sudden or gradual?",
                AnswerType::YesNo,
                &["Sudden", "Gradual"],
                "Onset pattern for surgical vs medical cause",
            ),
        ];
    }

    if contains_any(&["breath", "asthma", "wheez", "cough", "lung"]) {
        return vec![
            question(
                "Can you complete a full sentence without stopping to breathe?",
                AnswerType::YesNo,
                &["Yes", "No"],
                "Severity of respiratory distress",
            ),
            question(
                "When did the breathing difficulty start?",
                AnswerType::MultipleChoice,
                &["Just now", "Hours ago", "Days ago", "Ongoing"],
                "Onset timing",
            ),
            question(
                "Do you have asthma, COPD, or any lung disease?",
                AnswerType::YesNo,
                &["Yes", "No"],
                "Respiratory history",
            ),
            question(
                "Were you exposed to anything before this started?",
                AnswerType::MultipleChoice,
                &["Allergen", "Smoke/fumes", "Cold air", "Exercise", "Nothing specific"],
                "Trigger identification",
            ),
        ];
    }

    if contains_any(&["diabet", "sugar", "insulin", "glucose"]) {
        return vec![
            question(
                "Do you have diabetes? What type?",
                AnswerType::MultipleChoice,
                &["Type 1", "Type 2", "Not sure", "No diabetes"],
                "Diabetes classification",
            ),
            question(
                "What is your blood sugar if known?",
                AnswerType::MultipleChoice,
                &[
                    "Below 70 mg/dL",
                    "70-180 mg/dL",
                    "180-300 mg/dL",
                    "Above 300 mg/dL",
                    "Don't know",
                ],
                "Glucose level assessment",
            ),
            question(
                "Do you have nausea, vomiting, or abdominal pain?",
                AnswerType::YesNo,
                &["Yes", "No"],
                "DKA symptom check",
            ),
            question(
                "Are you feeling confused or drowsy?",
                AnswerType::YesNo,
                &["Yes", "No"],
                "Altered mental status assessment",
            ),
        ];
    }

    vec![
        question(
            "When did the symptoms start?",
            AnswerType::MultipleChoice,
            &["Just now", "Hours ago", "Days ago", "Weeks ago"],
            "Onset timing",
        ),
        scale_question(
            "Rate your discomfort on a scale of 1-10",
            "Severity assessment",
        ),
        question(
            "Do you have any chronic medical conditions?",
            AnswerType::YesNo,
            &["Yes", "No"],
            "Medical history",
        ),
    ]
}

struct AnswerFindings {
    red_flags: Vec<String>,
    positive: Vec<String>,
    negative: Vec<String>,
    severity: i32,
}

/// Offline triage assessment from the complaint and answers.
pub fn mock_assessment(chief_complaint: &str, answers: &[QuestionAnswer]) -> Assessment {
    let complaint = chief_complaint.to_lowercase();
    let findings = analyze_answers(answers);

    let mut red_flags = dedupe(findings.red_flags);

    let level;
    let risk_score;
    if red_flags.len() >= 3 || EMERGENCY_KEYWORDS.iter().any(|kw| complaint.contains(kw)) {
        level = TriageLevel::Emergency;
        risk_score = (7 + red_flags.len() as i32).min(10);
    } else if !red_flags.is_empty()
        || findings.severity >= 3
        || URGENT_KEYWORDS.iter().any(|kw| complaint.contains(kw))
    {
        level = TriageLevel::Urgent;
        risk_score = (4 + red_flags.len() as i32).min(8);
    } else {
        level = TriageLevel::Routine;
        risk_score = findings.severity.clamp(1, 4);
    }

    let mut parts = Vec::new();
    if !findings.positive.is_empty() {
        let shown: Vec<_> = findings.positive.iter().take(5).cloned().collect();
        parts.push(format!("Findings: {}.", shown.join("; ")));
    }
    if !findings.negative.is_empty() {
        let shown: Vec<_> = findings.negative.iter().take(3).cloned().collect();
        parts.push(format!("Negative: {}.", shown.join("; ")));
    }
    if !red_flags.is_empty() {
        parts.push(format!("{} red flag(s) identified.", red_flags.len()));
    }
    let mut assessment_text = if parts.is_empty() {
        "Assessment based on reported symptoms.".to_string()
    } else {
        parts.join(" ")
    };
    assessment_text.push_str(&format!(" Triage level: {}.", level));

    let suspected = suspected_conditions(&complaint, &red_flags);

    if red_flags.is_empty() {
        red_flags.push("none_identified".to_string());
    }

    debug!(level = %level, risk_score, "Offline triage assessment");

    Assessment {
        triage_level: level,
        assessment: assessment_text,
        red_flags,
        recommended_action: recommended_action(level).to_string(),
        risk_score: risk_score as u8,
        source_guidelines: vec!["local_protocol_fallback".to_string()],
        suspected_conditions: suspected,
        time_sensitivity: time_sensitivity(level).to_string(),
    }
}

fn analyze_answers(answers: &[QuestionAnswer]) -> AnswerFindings {
    let mut findings = AnswerFindings {
        red_flags: Vec::new(),
        positive: Vec::new(),
        negative: Vec::new(),
        severity: 0,
    };

    for qa in answers {
        let question = qa.question.to_lowercase();
        let answer = qa.answer.to_lowercase();
        let q_has = |words: &[&str]| words.iter().any(|w| question.contains(w));
        let a_has = |words: &[&str]| words.iter().any(|w| answer.contains(w));

        // Severity from scale answers.
        if let Ok(value) = answer.trim().parse::<i32>() {
            if value >= 7 {
                findings.severity += 3;
                findings
                    .positive
                    .push(format!("Pain severity {}/10", value));
            } else if value >= 4 {
                findings.severity += 1;
            }
        }

        if AFFIRMATIVE.contains(&answer.as_str()) {
            if q_has(&["radiat", "jaw", "back"]) {
                findings.red_flags.push("pain_radiation".to_string());
                findings
                    .positive
                    .push("Pain radiates to arm/jaw/back".to_string());
            }
            if q_has(&["sudden", "plötzlich"]) {
                findings.red_flags.push("sudden_onset".to_string());
                findings
                    .positive
                    .push("Sudden onset of symptoms".to_string());
            }
            if q_has(&["heart disease", "cardiac"]) {
                findings.red_flags.push("cardiac_history".to_string());
                findings
                    .positive
                    .push("History of heart disease".to_string());
            }
            if q_has(&["slur", "speech"]) {
                findings.red_flags.push("speech_impairment".to_string());
                findings.positive.push("Speech is slurred".to_string());
            }
            if q_has(&["smile", "face"]) {
                findings.positive.push("Facial symmetry normal".to_string());
            }
            if q_has(&["raise", "arm"]) {
                findings
                    .positive
                    .push("Can raise arms normally".to_string());
            }
            if q_has(&["fever", "fieber"]) {
                findings.red_flags.push("fever".to_string());
                findings.positive.push("Has fever".to_string());
            }
            if q_has(&["blood", "blut"]) {
                findings.red_flags.push("bleeding".to_string());
                findings.positive.push("Blood present".to_string());
            }
            if q_has(&["chronic", "condition"]) {
                findings
                    .positive
                    .push("Has chronic medical conditions".to_string());
            }
            if q_has(&["confused", "drowsy"]) {
                findings
                    .red_flags
                    .push("altered_mental_status".to_string());
                findings
                    .positive
                    .push("Confusion or drowsiness reported".to_string());
            }
            findings.severity += 1;
        } else if NEGATIVE.contains(&answer.as_str()) {
            if q_has(&["slur", "speech"]) {
                findings.negative.push("Speech is NOT slurred".to_string());
            }
            if q_has(&["smile", "face"]) {
                findings.red_flags.push("facial_asymmetry".to_string());
                findings
                    .positive
                    .push("Cannot smile symmetrically (facial droop)".to_string());
            }
            if q_has(&["raise", "arm"]) {
                findings.red_flags.push("arm_weakness".to_string());
                findings
                    .positive
                    .push("Cannot raise both arms equally".to_string());
            }
            if q_has(&["sentence", "breathe"]) {
                findings.red_flags.push("severe_dyspnea".to_string());
                findings
                    .positive
                    .push("Cannot complete a sentence (severe breathing difficulty)".to_string());
            }
            if q_has(&["heart disease", "cardiac"]) {
                findings
                    .negative
                    .push("No history of heart disease".to_string());
            }
            if q_has(&["chronic", "condition"]) {
                findings
                    .negative
                    .push("No chronic conditions reported".to_string());
            }
        }

        // Multi-choice symptom answers, keywords across the supported
        // languages (EN / DE / TR / FR / ES / IT / PT / RU / AR).
        if a_has(&[
            "sweating", "schwitzen", "terleme", "transpiration", "sudoración",
            "sudorazione", "suor", "потоотделение", "تعرق",
        ]) {
            findings.red_flags.push("diaphoresis".to_string());
            findings.positive.push("Sweating".to_string());
        }
        if a_has(&[
            "shortness", "breath", "atemnot", "nefes", "essoufflement",
            "dificultad respirar", "mancanza di fiato", "falta de ar", "одышка",
            "ضيق التنفس",
        ]) {
            findings.red_flags.push("dyspnea".to_string());
            findings.positive.push("Shortness of breath".to_string());
        }
        if a_has(&[
            "nausea", "übelkeit", "bulantı", "nausée", "náuseas", "náusea",
            "тошнота", "غثيان",
        ]) {
            findings.positive.push("Nausea".to_string());
        }
        if a_has(&[
            "dizz", "schwindel", "baş dönmesi", "vertige", "mareo", "vertigine",
            "tontura", "головокружение", "دوار",
        ]) {
            findings.red_flags.push("dizziness".to_string());
            findings.positive.push("Dizziness".to_string());
        }
        if a_has(&[
            "vomit", "erbrechen", "kusma", "vomissement", "vómito", "vomito",
            "vômito", "рвота", "قيء",
        ]) {
            findings.positive.push("Vomiting".to_string());
        }
        if a_has(&[
            "fever", "fieber", "ateş", "fièvre", "fiebre", "febbre", "febre",
            "лихорадка", "حمى",
        ]) {
            findings.red_flags.push("fever".to_string());
            findings.positive.push("Fever".to_string());
        }
        if a_has(&["blood", "blut", "kan", "sang", "sangre", "sangue", "кровь", "دم"]) {
            findings.red_flags.push("bleeding_sign".to_string());
            findings.positive.push("Blood reported".to_string());
        }

        // Pain localization.
        if answer.contains("lower right") {
            findings
                .positive
                .push("Lower right quadrant pain (possible appendicitis)".to_string());
        }
        if answer.contains("all over") || answer.contains("diffuse") {
            findings.red_flags.push("diffuse_pain".to_string());
            findings.positive.push("Diffuse abdominal pain".to_string());
        }
    }

    findings
}

fn suspected_conditions(complaint: &str, red_flags: &[String]) -> Vec<String> {
    let has_flag = |flag: &str| red_flags.iter().any(|f| f == flag);
    let mut suspected = Vec::new();

    if ["chest", "heart"].iter().any(|kw| complaint.contains(kw)) {
        if has_flag("pain_radiation") || has_flag("diaphoresis") {
            suspected.push("Acute Coronary Syndrome".to_string());
        } else {
            suspected.push("Chest Pain — requires evaluation".to_string());
        }
    }
    if ["stroke", "face", "arm", "speech", "move"]
        .iter()
        .any(|kw| complaint.contains(kw))
    {
        if has_flag("facial_asymmetry") || has_flag("arm_weakness") {
            suspected.push("Possible Stroke (FAST positive)".to_string());
        } else {
            suspected.push("Neurological symptoms — requires evaluation".to_string());
        }
    }
    if ["stomach", "abdom", "belly"]
        .iter()
        .any(|kw| complaint.contains(kw))
    {
        suspected.push("Abdominal Pain — requires evaluation".to_string());
    }
    if ["breath", "asthma", "wheez"]
        .iter()
        .any(|kw| complaint.contains(kw))
    {
        suspected.push("Respiratory Distress".to_string());
    }
    if suspected.is_empty() {
        suspected.push("Requires clinical evaluation".to_string());
    }
    suspected
}

fn recommended_action(level: TriageLevel) -> &'static str {
    match level {
        TriageLevel::Emergency => {
            "Proceed to nearest ER immediately. Call emergency services if unable to travel."
        }
        TriageLevel::Urgent => "Visit ER or urgent care within 2 hours.",
        TriageLevel::Routine => {
            "Schedule a visit with your primary care physician. Self-care as needed."
        }
    }
}

fn time_sensitivity(level: TriageLevel) -> &'static str {
    match level {
        TriageLevel::Emergency => "Seek ER within 10 minutes",
        TriageLevel::Urgent => "Seek medical care within 2 hours",
        TriageLevel::Routine => "Schedule appointment within 48 hours",
    }
}

/// Deduplicate preserving first-seen order.
fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qa(question: &str, answer: &str) -> QuestionAnswer {
        QuestionAnswer {
            question: question.to_string(),
            answer: answer.to_string(),
            original_answer: None,
        }
    }

    #[test]
    fn chest_pain_gets_cardiac_questions() {
        let questions = mock_questions("severe chest pain");
        assert!(!questions.is_empty());
        assert!(questions.len() <= 5);
        assert!(questions[0].question.contains("radiate"));
    }

    #[test]
    fn stroke_complaint_gets_fast_questions() {
        let questions = mock_questions("sudden arm weakness and slurred speech");
        assert!(questions
            .iter()
            .any(|q| q.question.to_lowercase().contains("smile")));
    }

    #[test]
    fn unknown_complaint_gets_generic_questions() {
        let questions = mock_questions("strange tingling everywhere");
        assert_eq!(questions.len(), 3);
    }

    #[test]
    fn cardiac_red_flags_escalate_to_emergency() {
        let answers = vec![
            qa("Does pain radiate to arm?", "Yes"),
            qa("Pain severity 1-10?", "9"),
            qa("Symptoms?", "Sweating, Shortness of breath"),
            qa("Heart disease history?", "Yes"),
        ];
        let assessment = mock_assessment("severe chest pain radiating to left arm", &answers);
        assert_eq!(assessment.triage_level, TriageLevel::Emergency);
        assert!(assessment.risk_score >= 7);
        assert!(assessment.red_flags.contains(&"diaphoresis".to_string()));
    }

    #[test]
    fn mild_headache_without_flags_is_routine() {
        let answers = vec![
            qa("When did it start?", "Days ago"),
            qa("Severity?", "3"),
            qa("Chronic conditions?", "No"),
        ];
        let assessment = mock_assessment("mild headache", &answers);
        assert_eq!(assessment.triage_level, TriageLevel::Routine);
        assert_eq!(assessment.red_flags, vec!["none_identified".to_string()]);
    }

    #[test]
    fn fast_positive_answers_raise_stroke_flags() {
        let answers = vec![
            qa("Did symptoms start suddenly?", "Yes"),
            qa("Can you smile with both sides of your face?", "No"),
            qa("Can you raise both arms equally?", "No"),
            qa("Is your speech slurred or unclear?", "Yes"),
        ];
        let assessment =
            mock_assessment("sudden face drooping and can't raise right arm", &answers);
        assert!(matches!(
            assessment.triage_level,
            TriageLevel::Emergency | TriageLevel::Urgent
        ));
        assert!(assessment.red_flags.contains(&"facial_asymmetry".to_string()));
        assert!(assessment.red_flags.contains(&"arm_weakness".to_string()));
        assert!(assessment
            .suspected_conditions
            .contains(&"Possible Stroke (FAST positive)".to_string()));
    }

    #[test]
    fn german_answers_are_recognized() {
        let answers = vec![
            qa("Does the pain radiate to your arm, jaw, or back?", "Ja"),
            qa("Symptoms?", "Schwitzen und Atemnot"),
        ];
        let assessment = mock_assessment("starke Brustschmerzen chest pain", &answers);
        assert!(assessment.red_flags.contains(&"pain_radiation".to_string()));
        assert!(assessment.red_flags.contains(&"diaphoresis".to_string()));
    }

    #[test]
    fn red_flags_are_deduplicated() {
        let answers = vec![
            qa("Any fever?", "Yes"),
            qa("Symptoms?", "Fever and vomiting"),
        ];
        let assessment = mock_assessment("feeling unwell with fever", &answers);
        let fever_count = assessment
            .red_flags
            .iter()
            .filter(|f| f.as_str() == "fever")
            .count();
        assert_eq!(fever_count, 1);
    }
}
