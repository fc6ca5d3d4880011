use tracing::debug;

use crate::config::SpeechConfig;
use crate::error::{SpeechError, SpeechResult};
use crate::providers::{create_provider, SpeechProvider};
use crate::transcription::TranscriptionResult;

/// Speech recognition service for patient intake
pub struct SpeechService {
    config: SpeechConfig,
    provider: Box<dyn SpeechProvider>,
}

impl SpeechService {
    /// Create a new speech service.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the provider cannot be built.
    pub fn new(config: SpeechConfig) -> SpeechResult<Self> {
        let provider = create_provider(&config.provider)?;
        Ok(Self { config, provider })
    }

    /// Whether voice input can be offered to the patient.
    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }

    /// Transcribe WAV audio with automatic language detection.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Config` when the payload exceeds the configured
    /// limit or no provider is available, `SpeechError::NoMatch` when no
    /// speech was recognized, and provider errors otherwise.
    pub async fn transcribe(&self, audio_data: &[u8]) -> SpeechResult<TranscriptionResult> {
        if audio_data.len() > self.config.max_audio_bytes {
            return Err(SpeechError::Config(format!(
                "Audio payload of {} bytes exceeds the {} byte limit",
                audio_data.len(),
                self.config.max_audio_bytes
            )));
        }

        debug!(audio_size = audio_data.len(), "Transcribing audio");
        self.provider
            .transcribe(audio_data, self.config.sample_rate)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpeechProviderConfig;

    fn disabled_service() -> SpeechService {
        SpeechService::new(SpeechConfig {
            provider: SpeechProviderConfig::Disabled,
            sample_rate: 16000,
            max_audio_bytes: 64,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn disabled_provider_reports_unavailable() {
        let service = disabled_service();
        assert!(!service.is_available());
        let err = service.transcribe(&[0u8; 8]).await.unwrap_err();
        assert!(matches!(err, SpeechError::Config(_)));
    }

    #[tokio::test]
    async fn oversized_audio_is_rejected() {
        let service = disabled_service();
        let err = service.transcribe(&[0u8; 128]).await.unwrap_err();
        assert!(matches!(err, SpeechError::Config(_)));
    }
}
