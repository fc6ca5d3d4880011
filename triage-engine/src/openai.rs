//! Azure OpenAI chat completions client

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::{TriageError, TriageResult};

const MAX_TOKENS: u32 = 1000;

/// Thin client over the Azure OpenAI chat completions REST API.
///
/// Requests always use `response_format: json_object`, so prompts must
/// instruct the model to answer with JSON.
#[derive(Debug, Clone)]
pub struct AzureOpenAi {
    endpoint: String,
    key: String,
    deployment: String,
    api_version: String,
    client: reqwest::Client,
    configured: bool,
}

impl AzureOpenAi {
    /// Build the client from `AZURE_OPENAI_ENDPOINT` / `AZURE_OPENAI_KEY` /
    /// `GPT_DEPLOYMENT` / `AZURE_OPENAI_API_VERSION`.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("AZURE_OPENAI_ENDPOINT").unwrap_or_default();
        let key = std::env::var("AZURE_OPENAI_KEY").unwrap_or_default();
        let deployment =
            std::env::var("GPT_DEPLOYMENT").unwrap_or_else(|_| "gpt-4".to_string());
        let api_version = std::env::var("AZURE_OPENAI_API_VERSION")
            .unwrap_or_else(|_| "2024-12-01-preview".to_string());

        let configured = !endpoint.is_empty() && !key.is_empty() && key != "your-key";
        if configured {
            info!(deployment = %deployment, "Azure OpenAI client initialized");
        } else {
            warn!("Azure OpenAI credentials not configured, using local triage heuristics");
        }

        Self {
            endpoint,
            key,
            deployment,
            api_version,
            client: reqwest::Client::new(),
            configured,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Run a chat completion and parse the assistant message as JSON.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::Config` when credentials are missing, network
    /// errors from the request, and `TriageError::ModelResponse` when the
    /// response has no parseable JSON content.
    pub async fn chat_json(
        &self,
        system_prompt: &str,
        user_message: &str,
        temperature: f64,
    ) -> TriageResult<serde_json::Value> {
        if !self.configured {
            return Err(TriageError::Config(
                "Azure OpenAI credentials not configured".to_string(),
            ));
        }

        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        );

        let body = json!({
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_message },
            ],
            "response_format": { "type": "json_object" },
            "temperature": temperature,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let completion: ChatCompletion = response.json().await?;

        // Token usage is logged for cost monitoring.
        if let Some(usage) = &completion.usage {
            info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Chat completion token usage"
            );
        }

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                TriageError::ModelResponse("completion contained no message content".to_string())
            })?;

        serde_json::from_str(&content).map_err(|err| {
            TriageError::ModelResponse(format!("completion was not valid JSON: {}", err))
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
}
