use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::TranslationResult;

const API_VERSION: &str = "3.0";

/// Azure Translator client with passthrough fallback
///
/// All translation failures degrade to returning the input text unchanged:
/// a missing translation must never block the triage flow.
#[derive(Debug, Clone)]
pub struct Translator {
    key: String,
    endpoint: String,
    region: String,
    client: reqwest::Client,
    configured: bool,
}

impl Translator {
    /// Build the translator from `TRANSLATOR_KEY` / `TRANSLATOR_ENDPOINT` /
    /// `TRANSLATOR_REGION`.
    pub fn from_env() -> Self {
        let key = std::env::var("TRANSLATOR_KEY").unwrap_or_default();
        let endpoint = std::env::var("TRANSLATOR_ENDPOINT")
            .unwrap_or_else(|_| "https://api.cognitive.microsofttranslator.com/".to_string());
        let region = std::env::var("TRANSLATOR_REGION").unwrap_or_else(|_| "global".to_string());

        let configured = !key.is_empty() && key != "your-key";
        if configured {
            info!(region = %region, "Translator initialized");
        } else {
            warn!("Translator credentials not configured, translation will pass text through unchanged");
        }

        Self {
            key,
            endpoint,
            region,
            client: reqwest::Client::new(),
            configured,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Translate `text` into `target_language`.
    ///
    /// Locale strings are reduced to their base language (`de-DE` -> `de`).
    /// Returns the original text when unconfigured, when source and target
    /// languages match, or on any service failure.
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> String {
        if !self.configured || text.trim().is_empty() {
            return text.to_string();
        }

        let target = base_language(target_language);
        let source = source_language.map(base_language);

        if source.as_deref() == Some(target.as_str()) {
            return text.to_string();
        }

        match self.request_translation(text, &target, source.as_deref()).await {
            Ok(translated) => {
                info!(
                    from = source.as_deref().unwrap_or("auto"),
                    to = %target,
                    "Translated text"
                );
                translated
            }
            Err(err) => {
                error!(error = %err, "Translation failed, passing text through");
                text.to_string()
            }
        }
    }

    /// Detect the language of `text`, returning a base language code.
    pub async fn detect_language(&self, text: &str) -> Option<String> {
        if !self.configured || text.trim().is_empty() {
            return None;
        }

        match self.request_detection(text).await {
            Ok((language, score)) => {
                info!(language = %language, confidence = score, "Detected language");
                Some(language)
            }
            Err(err) => {
                error!(error = %err, "Language detection failed");
                None
            }
        }
    }

    /// Translate patient text into English for the backend.
    pub async fn to_english(&self, text: &str, source_language: Option<&str>) -> String {
        self.translate(text, "en", source_language).await
    }

    /// Translate backend English text into the patient's language.
    pub async fn from_english(&self, text: &str, target_language: &str) -> String {
        self.translate(text, target_language, Some("en")).await
    }

    async fn request_translation(
        &self,
        text: &str,
        target: &str,
        source: Option<&str>,
    ) -> TranslationResult<String> {
        let url = format!("{}/translate", self.endpoint.trim_end_matches('/'));

        let mut query: Vec<(&str, &str)> =
            vec![("api-version", API_VERSION), ("to", target)];
        if let Some(from) = source {
            query.push(("from", from));
        }

        let response = self
            .client
            .post(&url)
            .query(&query)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .header("X-ClientTraceId", Uuid::new_v4().to_string())
            .json(&json!([{ "text": text }]))
            .send()
            .await?
            .error_for_status()?;

        let body: Vec<TranslateItem> = response.json().await?;
        body.into_iter()
            .next()
            .and_then(|item| item.translations.into_iter().next())
            .map(|t| t.text)
            .ok_or_else(|| crate::TranslationError::Parse("empty translation response".to_string()))
    }

    async fn request_detection(&self, text: &str) -> TranslationResult<(String, f64)> {
        let url = format!("{}/detect", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", API_VERSION)])
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .header("X-ClientTraceId", Uuid::new_v4().to_string())
            .json(&json!([{ "text": text }]))
            .send()
            .await?
            .error_for_status()?;

        let body: Vec<DetectItem> = response.json().await?;
        body.into_iter()
            .next()
            .map(|item| (item.language, item.score.unwrap_or(0.0)))
            .ok_or_else(|| crate::TranslationError::Parse("empty detection response".to_string()))
    }
}

/// Reduce a BCP-47 locale to its base language code.
fn base_language(locale: &str) -> String {
    locale
        .split('-')
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}

#[derive(Debug, Deserialize)]
struct TranslateItem {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct DetectItem {
    language: String,
    score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured() -> Translator {
        Translator {
            key: String::new(),
            endpoint: "https://api.cognitive.microsofttranslator.com/".to_string(),
            region: "global".to_string(),
            client: reqwest::Client::new(),
            configured: false,
        }
    }

    #[test]
    fn base_language_strips_region() {
        assert_eq!(base_language("de-DE"), "de");
        assert_eq!(base_language("en"), "en");
        assert_eq!(base_language("zh-CN"), "zh");
    }

    #[tokio::test]
    async fn passthrough_when_unconfigured() {
        let translator = unconfigured();
        let result = translator.translate("Hello world", "de", None).await;
        assert_eq!(result, "Hello world");
    }

    #[tokio::test]
    async fn empty_string_stays_empty() {
        let translator = unconfigured();
        assert_eq!(translator.translate("", "de", None).await, "");
    }

    #[tokio::test]
    async fn detection_unavailable_when_unconfigured() {
        let translator = unconfigured();
        assert_eq!(translator.detect_language("Hallo").await, None);
    }
}
