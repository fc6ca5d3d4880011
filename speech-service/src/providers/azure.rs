//! Azure Speech Service provider (short-audio REST recognition)

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::config::SpeechProviderConfig;
use crate::error::{SpeechError, SpeechResult};
use crate::languages::AUTO_DETECT_LANGUAGES;
use crate::providers::SpeechProvider;
use crate::transcription::TranscriptionResult;

pub struct AzureSpeechProvider {
    region: String,
    subscription_key: String,
    client: reqwest::Client,
}

impl AzureSpeechProvider {
    pub fn new(config: &SpeechProviderConfig) -> SpeechResult<Self> {
        match config {
            SpeechProviderConfig::AzureSpeech {
                region,
                subscription_key,
            } => Ok(Self {
                region: region.clone(),
                subscription_key: subscription_key.clone(),
                client: reqwest::Client::new(),
            }),
            _ => Err(SpeechError::Config(
                "Azure provider requires azure-speech configuration".to_string(),
            )),
        }
    }

    /// Run one recognition request against a single candidate locale.
    ///
    /// The short-audio endpoint recognizes one locale per request, so
    /// language detection is done by trying each candidate and keeping the
    /// highest-confidence result.
    async fn recognize_locale(
        &self,
        audio_data: &[u8],
        sample_rate: u32,
        locale: &str,
    ) -> SpeechResult<Option<(String, f64)>> {
        let url = format!(
            "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1",
            self.region
        );

        let response = self
            .client
            .post(&url)
            .query(&[("language", locale), ("format", "detailed")])
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .header(
                "Content-Type",
                format!(
                    "audio/wav; codecs=audio/pcm; samplerate={}",
                    sample_rate
                ),
            )
            .header("Accept", "application/json")
            .body(audio_data.to_vec())
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SpeechError::Canceled(
                "Authentication failed, check SPEECH_KEY and SPEECH_REGION".to_string(),
            ));
        }
        let response = response.error_for_status()?;
        let body: RecognitionResponse = response.json().await?;

        match body.recognition_status.as_str() {
            "Success" => {
                let confidence = body
                    .n_best
                    .as_ref()
                    .and_then(|nbest| nbest.first())
                    .map(|alt| alt.confidence)
                    .unwrap_or(0.0);
                let text = body.display_text.unwrap_or_default();
                debug!(locale = %locale, confidence, "Recognition candidate");
                Ok(Some((text, confidence)))
            }
            "NoMatch" | "InitialSilenceTimeout" => Ok(None),
            other => Err(SpeechError::Canceled(format!(
                "Recognition failed with status {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl SpeechProvider for AzureSpeechProvider {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        sample_rate: u32,
    ) -> SpeechResult<TranscriptionResult> {
        let mut best: Option<TranscriptionResult> = None;

        for locale in AUTO_DETECT_LANGUAGES {
            match self.recognize_locale(audio_data, sample_rate, locale).await {
                Ok(Some((text, confidence))) => {
                    let better = best
                        .as_ref()
                        .map(|b| confidence > b.confidence.unwrap_or(0.0))
                        .unwrap_or(true);
                    if better && !text.is_empty() {
                        best = Some(TranscriptionResult {
                            text,
                            language: locale.to_string(),
                            confidence: Some(confidence),
                        });
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    // Auth/connection problems affect every locale equally.
                    error!(locale = %locale, error = %err, "Recognition request failed");
                    return Err(err);
                }
            }
        }

        match best {
            Some(result) => {
                info!(
                    language = %result.language,
                    confidence = result.confidence.unwrap_or(0.0),
                    "Speech recognized"
                );
                Ok(result)
            }
            None => Err(SpeechError::NoMatch),
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    #[serde(rename = "RecognitionStatus")]
    recognition_status: String,
    #[serde(rename = "DisplayText")]
    display_text: Option<String>,
    #[serde(rename = "NBest")]
    n_best: Option<Vec<NBestAlternative>>,
}

#[derive(Debug, Deserialize)]
struct NBestAlternative {
    #[serde(rename = "Confidence")]
    confidence: f64,
}
