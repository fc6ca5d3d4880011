pub mod azure;
pub mod disabled;

use async_trait::async_trait;

use crate::config::SpeechProviderConfig;
use crate::error::SpeechResult;
use crate::transcription::TranscriptionResult;

/// Trait for speech recognition providers
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Transcribe WAV audio to text, detecting the spoken language from the
    /// candidate list.
    async fn transcribe(&self, audio_data: &[u8], sample_rate: u32)
        -> SpeechResult<TranscriptionResult>;

    /// Whether this provider can actually perform recognition.
    fn is_available(&self) -> bool;
}

/// Create a provider instance based on configuration
pub fn create_provider(config: &SpeechProviderConfig) -> SpeechResult<Box<dyn SpeechProvider>> {
    match config {
        SpeechProviderConfig::AzureSpeech { .. } => {
            Ok(Box::new(azure::AzureSpeechProvider::new(config)?))
        }
        SpeechProviderConfig::Disabled => Ok(Box::new(disabled::DisabledProvider)),
    }
}
