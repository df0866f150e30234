//! Client for the hosted LLM completions API used for time summaries.
//!
//! The backend is pure glue here: it formats a prompt (see
//! `timewheel_core::summary`) and forwards it; no retries, no streaming.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::LlmConfig;

/// Errors from the LLM client. All surface to the caller as 502.
#[derive(Debug, thiserror::Error)]
#[error("LLM request failed: {0}")]
pub struct LlmError(pub String);

/// Produces a completion for a summary prompt.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Production client for a chat-completions style API.
pub struct HostedSummaryModel {
    client: reqwest::Client,
    api_base_url: String,
    api_key: String,
    model: String,
}

impl HostedSummaryModel {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

/// Minimal slice of the chat-completions response shape.
#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl SummaryModel for HostedSummaryModel {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.api_base_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt },
            ],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError(format!("unexpected status {status}")));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError(format!("malformed completion payload: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError("completion contained no choices".into()))
    }
}
