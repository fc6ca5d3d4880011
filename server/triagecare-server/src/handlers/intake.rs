//! Patient intake flow: transcribe, follow-up questions, assessment,
//! queue submission

use axum::{extract::State, Json};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use speech_service::{language_name, SpeechError};
use triage_engine::{Assessment, GeoPoint, PatientRecord, Question, QuestionAnswer};

use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::server::TriageCareServer;

const DEFAULT_LANGUAGE: &str = "en-US";

/// Voice transcription request (base64-encoded WAV audio)
#[derive(Debug, Deserialize, ToSchema)]
pub struct TranscribeRequest {
    pub audio_base64: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranscribeResponse {
    pub text: String,
    /// Detected BCP-47 locale
    pub language: String,
    /// Native display name of the detected language
    pub language_name: String,
    pub confidence: Option<f64>,
}

/// Transcribe patient audio with automatic language detection
#[utoipa::path(
    post,
    path = "/api/v1/intake/transcribe",
    tag = "intake",
    request_body = TranscribeRequest,
    responses(
        (status = 200, description = "Audio transcribed", body = TranscribeResponse),
        (status = 422, description = "No speech recognized"),
        (status = 503, description = "Speech service not configured")
    )
)]
pub async fn transcribe(
    State(server): State<TriageCareServer>,
    Json(request): Json<TranscribeRequest>,
) -> ApiResult<Json<ApiResponse<TranscribeResponse>>> {
    if !server.speech.is_available() {
        return Err(ApiError::service_unavailable(
            "Voice input is not configured; use text input instead",
        ));
    }

    let audio = base64::engine::general_purpose::STANDARD
        .decode(&request.audio_base64)
        .map_err(|err| ApiError::bad_request(format!("Invalid base64 audio: {}", err)))?;

    let result = server.speech.transcribe(&audio).await.map_err(|err| match err {
        SpeechError::NoMatch => ApiError::unprocessable("No speech recognized"),
        SpeechError::Config(message) => ApiError::service_unavailable(message),
        other => ApiError::internal(other.to_string()),
    })?;

    let response = TranscribeResponse {
        language_name: language_name(&result.language).to_string(),
        text: result.text,
        language: result.language,
        confidence: result.confidence,
    };
    Ok(Json(api_success(response)))
}

/// Follow-up question request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuestionsRequest {
    /// Chief complaint in the patient's language
    #[validate(length(min = 1, max = 2000))]
    pub complaint: String,
    /// BCP-47 locale of the complaint; detected when omitted
    pub language: Option<String>,
    /// Answers collected in earlier rounds
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub previous_answers: Vec<QuestionAnswer>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionsResponse {
    #[schema(value_type = Vec<Object>)]
    pub questions: Vec<Question>,
    /// Language the complaint was interpreted in
    pub language: String,
    /// The complaint after translation to English
    pub complaint_english: String,
}

/// Generate AI follow-up questions for the complaint
#[utoipa::path(
    post,
    path = "/api/v1/intake/questions",
    tag = "intake",
    request_body = QuestionsRequest,
    responses(
        (status = 200, description = "Follow-up questions generated", body = QuestionsResponse),
        (status = 422, description = "Complaint flagged by the content safety filter")
    )
)]
pub async fn questions(
    State(server): State<TriageCareServer>,
    Json(request): Json<QuestionsRequest>,
) -> ApiResult<Json<ApiResponse<QuestionsResponse>>> {
    request
        .validate()
        .map_err(|err| ApiError::validation(err.to_string()))?;

    let verdict = server.safety.analyze_text(&request.complaint).await;
    if !verdict.is_safe {
        return Err(ApiError::unprocessable(format!(
            "Input flagged by content safety: {}",
            verdict.flagged.join(", ")
        )));
    }

    let language = resolve_language(&server, &request.language, &request.complaint).await;
    let complaint_english = server
        .translator
        .to_english(&request.complaint, Some(&language))
        .await;

    let questions = server
        .engine
        .generate_questions(&complaint_english, &request.previous_answers)
        .await;

    info!(count = questions.len(), language = %language, "Follow-up questions ready");

    Ok(Json(api_success(QuestionsResponse {
        questions,
        language,
        complaint_english,
    })))
}

/// One answered question as submitted by the patient app
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnsweredQuestion {
    pub question: String,
    /// Answer in the patient's language
    pub answer: String,
}

/// Triage assessment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssessRequest {
    #[validate(length(min = 1, max = 2000))]
    pub complaint: String,
    pub language: Option<String>,
    pub answers: Vec<AnsweredQuestion>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssessResponse {
    #[schema(value_type = Object)]
    pub assessment: Assessment,
    /// Plain-language meaning of the triage level
    pub triage_description: String,
}

/// Produce the final triage assessment from the collected answers
#[utoipa::path(
    post,
    path = "/api/v1/intake/assess",
    tag = "intake",
    request_body = AssessRequest,
    responses(
        (status = 200, description = "Triage assessment", body = AssessResponse)
    )
)]
pub async fn assess(
    State(server): State<TriageCareServer>,
    Json(request): Json<AssessRequest>,
) -> ApiResult<Json<ApiResponse<AssessResponse>>> {
    request
        .validate()
        .map_err(|err| ApiError::validation(err.to_string()))?;

    let language = resolve_language(&server, &request.language, &request.complaint).await;
    let complaint_english = server
        .translator
        .to_english(&request.complaint, Some(&language))
        .await;

    // The backend reasons in English; the original answer stays on the
    // record for the staff dashboard.
    let mut answers = Vec::with_capacity(request.answers.len());
    for answered in &request.answers {
        let english = server
            .translator
            .to_english(&answered.answer, Some(&language))
            .await;
        let original = (english != answered.answer).then(|| answered.answer.clone());
        answers.push(QuestionAnswer {
            question: answered.question.clone(),
            answer: english,
            original_answer: original,
        });
    }

    let assessment = server.engine.assess(&complaint_english, &answers).await;
    let triage_description = assessment.triage_level.description().to_string();

    Ok(Json(api_success(AssessResponse {
        assessment,
        triage_description,
    })))
}

/// Queue submission request: the completed assessment plus logistics
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitRequest {
    #[validate(length(min = 1, max = 2000))]
    pub complaint: String,
    pub language: Option<String>,
    #[schema(value_type = Object)]
    pub assessment: Assessment,
    pub eta_minutes: Option<u32>,
    #[schema(value_type = Option<Object>)]
    pub location: Option<GeoPoint>,
    pub destination_hospital: Option<String>,
    /// National health number, when the patient consented to share it
    pub health_number: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitResponse {
    /// Registration number to show at the hospital reception
    pub patient_id: String,
    pub triage_level: String,
    pub arrival_time: Option<chrono::DateTime<chrono::Utc>>,
    pub destination_hospital: String,
}

/// Submit the triaged patient to the hospital queue
#[utoipa::path(
    post,
    path = "/api/v1/intake/submit",
    tag = "intake",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Patient queued", body = SubmitResponse)
    )
)]
pub async fn submit(
    State(server): State<TriageCareServer>,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<Json<ApiResponse<SubmitResponse>>> {
    request
        .validate()
        .map_err(|err| ApiError::validation(err.to_string()))?;

    if let Some(location) = &request.location {
        validate_coordinates(location.lat, location.lon)?;
    }

    let language = request
        .language
        .clone()
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let mut record = PatientRecord::from_assessment(
        &request.complaint,
        &request.assessment,
        &language,
        request.eta_minutes,
        request.location,
    );
    record.destination_hospital = request.destination_hospital.unwrap_or_default();
    record.health_number = request.health_number;

    server.queue.add(&record).await?;

    info!(
        patient_id = %record.patient_id,
        level = %record.triage_level,
        hospital = %record.destination_hospital,
        "Patient submitted to queue"
    );

    Ok(Json(api_success(SubmitResponse {
        patient_id: record.patient_id,
        triage_level: record.triage_level.as_str().to_string(),
        arrival_time: record.arrival_time,
        destination_hospital: record.destination_hospital,
    })))
}

/// Use the caller-provided locale, fall back to detection, then to the
/// default locale.
async fn resolve_language(
    server: &TriageCareServer,
    requested: &Option<String>,
    text: &str,
) -> String {
    if let Some(language) = requested {
        if !language.is_empty() {
            return language.clone();
        }
    }
    match server.translator.detect_language(text).await {
        Some(detected) => detected,
        None => DEFAULT_LANGUAGE.to_string(),
    }
}

pub(crate) fn validate_coordinates(lat: f64, lon: f64) -> ApiResult<()> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(ApiError::validation(format!(
            "Coordinates out of range: ({}, {})",
            lat, lon
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_validation_bounds() {
        assert!(validate_coordinates(48.78, 9.18).is_ok());
        assert!(validate_coordinates(91.0, 9.18).is_err());
        assert!(validate_coordinates(48.78, -181.0).is_err());
    }
}
