//! OpenAI chat-completions client
//!
//! Thin HTTP client for the `/chat/completions` endpoint of an
//! OpenAI-compatible API. One request per call, no retries: a failed or
//! malformed response is reported to the caller as a [`ProviderError`]
//! instead of being papered over with a second attempt.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{GenerationParams, GenerationProvider, ProviderError};

/// HTTP client for an OpenAI-compatible chat-completions API
#[derive(Clone)]
pub struct OpenAiProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider client
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn request_body(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        })
    }

    /// Pull the first choice's text out of a parsed response.
    ///
    /// A missing `content` field becomes an empty string; the orchestrator
    /// decides what an empty generation means. No choices at all is a
    /// malformed response.
    fn extract_text(response: ChatCompletionsResponse) -> Result<String, ProviderError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("response contained no choices".to_string()))?;
        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let body = self.request_body(system_prompt, user_prompt, params);

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Status { status, body });
        }

        let parsed: ChatCompletionsResponse = resp.json().await?;
        Self::extract_text(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
