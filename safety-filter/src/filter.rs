use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::error::SafetyResult;

const API_VERSION: &str = "2023-10-01";

/// Severity thresholds per category. Medical context allows higher
/// violence/self-harm severity because patients describe injuries and
/// symptoms; severities at or above the threshold are flagged.
fn default_thresholds() -> HashMap<String, u8> {
    HashMap::from([
        ("Hate".to_string(), 2),
        ("Violence".to_string(), 4),
        ("SelfHarm".to_string(), 4),
        ("Sexual".to_string(), 2),
    ])
}

/// Outcome of a content safety analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub is_safe: bool,
    /// Severity score (0-6) per analyzed category
    pub categories: HashMap<String, u8>,
    /// Categories whose severity met or exceeded the threshold
    pub flagged: Vec<String>,
}

impl SafetyVerdict {
    fn safe() -> Self {
        Self {
            is_safe: true,
            categories: HashMap::new(),
            flagged: Vec::new(),
        }
    }
}

/// Content safety filter over Azure AI Content Safety
#[derive(Debug, Clone)]
pub struct SafetyFilter {
    endpoint: String,
    key: String,
    thresholds: HashMap<String, u8>,
    client: reqwest::Client,
    configured: bool,
}

impl SafetyFilter {
    /// Build the filter from `CONTENT_SAFETY_ENDPOINT` / `CONTENT_SAFETY_KEY`.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("CONTENT_SAFETY_ENDPOINT").unwrap_or_default();
        let key = std::env::var("CONTENT_SAFETY_KEY").unwrap_or_default();

        let configured = !endpoint.is_empty() && !key.is_empty() && key != "your-key";
        if configured {
            info!("Content safety filter initialized");
        } else {
            info!("Content safety not configured, safety filtering disabled");
        }

        Self {
            endpoint,
            key,
            thresholds: default_thresholds(),
            client: reqwest::Client::new(),
            configured,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Analyze text for harmful content.
    ///
    /// Fails open: unconfigured or failing analysis returns a safe verdict
    /// so the triage flow is never blocked by the safety service itself.
    pub async fn analyze_text(&self, text: &str) -> SafetyVerdict {
        if !self.configured || text.trim().is_empty() {
            return SafetyVerdict::safe();
        }

        match self.request_analysis(text).await {
            Ok(verdict) => {
                if !verdict.is_safe {
                    warn!(flagged = ?verdict.flagged, "Content flagged by safety filter");
                }
                verdict
            }
            Err(err) => {
                error!(error = %err, "Content safety analysis failed, allowing content");
                SafetyVerdict::safe()
            }
        }
    }

    async fn request_analysis(&self, text: &str) -> SafetyResult<SafetyVerdict> {
        let url = format!(
            "{}/contentsafety/text:analyze?api-version={}",
            self.endpoint.trim_end_matches('/'),
            API_VERSION
        );

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .json(&json!({ "text": text }))
            .send()
            .await?
            .error_for_status()?;

        let body: AnalysisResponse = response.json().await?;

        let mut categories = HashMap::new();
        let mut flagged = Vec::new();
        for item in body.categories_analysis {
            let threshold = self.thresholds.get(&item.category).copied().unwrap_or(4);
            if item.severity >= threshold {
                flagged.push(item.category.clone());
            }
            categories.insert(item.category, item.severity);
        }

        Ok(SafetyVerdict {
            is_safe: flagged.is_empty(),
            categories,
            flagged,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    #[serde(rename = "categoriesAnalysis")]
    categories_analysis: Vec<CategoryAnalysis>,
}

#[derive(Debug, Deserialize)]
struct CategoryAnalysis {
    category: String,
    severity: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_filter_allows_everything() {
        let filter = SafetyFilter {
            endpoint: String::new(),
            key: String::new(),
            thresholds: default_thresholds(),
            client: reqwest::Client::new(),
            configured: false,
        };
        let verdict = filter.analyze_text("describing a bleeding wound").await;
        assert!(verdict.is_safe);
        assert!(verdict.flagged.is_empty());
    }

    #[test]
    fn medical_thresholds_relax_violence_and_self_harm() {
        let thresholds = default_thresholds();
        assert_eq!(thresholds.get("Violence"), Some(&4));
        assert_eq!(thresholds.get("SelfHarm"), Some(&4));
        assert_eq!(thresholds.get("Hate"), Some(&2));
    }
}
