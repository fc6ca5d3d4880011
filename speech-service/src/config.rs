use serde::{Deserialize, Serialize};

use crate::error::{SpeechError, SpeechResult};

/// Provider-specific configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SpeechProviderConfig {
    /// Azure Speech Service (short-audio REST recognition)
    #[serde(rename = "azure-speech")]
    AzureSpeech {
        region: String,
        subscription_key: String,
    },
    /// No speech backend; transcription is unavailable but the text intake
    /// path still works
    Disabled,
}

/// Speech service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpeechConfig {
    pub provider: SpeechProviderConfig,
    /// Expected input sample rate for WAV audio
    pub sample_rate: u32,
    /// Maximum accepted audio payload in bytes
    pub max_audio_bytes: usize,
}

impl SpeechConfig {
    /// Load configuration from environment variables.
    ///
    /// `SPEECH_KEY` missing or left at the placeholder value selects the
    /// disabled provider rather than failing startup.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Config` when `SPEECH_PROVIDER` names an
    /// unknown provider.
    pub fn from_env() -> SpeechResult<Self> {
        let sample_rate = std::env::var("SPEECH_SAMPLE_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(16000);

        let max_audio_bytes = std::env::var("SPEECH_MAX_AUDIO_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10 * 1024 * 1024);

        let provider = match std::env::var("SPEECH_PROVIDER")
            .unwrap_or_else(|_| "azure".to_string())
            .to_lowercase()
            .as_str()
        {
            "azure" | "azure-speech" => {
                let key = std::env::var("SPEECH_KEY").unwrap_or_default();
                if key.is_empty() || key == "your-key" {
                    SpeechProviderConfig::Disabled
                } else {
                    SpeechProviderConfig::AzureSpeech {
                        region: std::env::var("SPEECH_REGION")
                            .unwrap_or_else(|_| "westeurope".to_string()),
                        subscription_key: key,
                    }
                }
            }
            "disabled" | "none" => SpeechProviderConfig::Disabled,
            other => {
                return Err(SpeechError::Config(format!(
                    "Unknown speech provider: {}",
                    other
                )))
            }
        };

        Ok(Self {
            provider,
            sample_rate,
            max_audio_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_selects_disabled_provider() {
        // SPEECH_KEY is not set in the test environment.
        let config = SpeechConfig::from_env().unwrap();
        assert!(matches!(config.provider, SpeechProviderConfig::Disabled));
        assert_eq!(config.sample_rate, 16000);
    }
}
