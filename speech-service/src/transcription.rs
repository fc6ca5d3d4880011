use serde::{Deserialize, Serialize};

/// Transcription result from speech recognition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Transcribed text in the spoken language
    pub text: String,
    /// Detected BCP-47 locale, e.g. `de-DE`
    pub language: String,
    /// Recognition confidence when the provider reports one
    pub confidence: Option<f64>,
}
