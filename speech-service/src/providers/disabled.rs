use async_trait::async_trait;

use crate::error::{SpeechError, SpeechResult};
use crate::providers::SpeechProvider;
use crate::transcription::TranscriptionResult;

/// Placeholder provider used when no speech credentials are configured.
/// Voice input is unavailable; text input still works.
pub struct DisabledProvider;

#[async_trait]
impl SpeechProvider for DisabledProvider {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        _sample_rate: u32,
    ) -> SpeechResult<TranscriptionResult> {
        Err(SpeechError::Config(
            "Speech credentials not configured; voice input is unavailable".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}
