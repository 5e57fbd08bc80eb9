//! Generation provider abstraction
//!
//! The chat orchestrator talks to an optional text generation provider
//! through the [`GenerationProvider`] trait. In production that is an
//! OpenAI-compatible chat-completions API; in tests it is a scripted mock.
//!
//! ## Provider selection
//!
//! [`provider_from_config`] decides once at startup:
//!
//! - `OPENAI_API_KEY` set: requests go to [`OpenAiProvider`], one call per
//!   chat request, never retried.
//! - unset: no provider is built and the orchestrator answers every chat
//!   from local data. This is a supported mode, not an error.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::Config;

pub mod openai;
pub use openai::OpenAiProvider;

/// Provider call errors
///
/// Any of these surfaces to the caller as a failed chat request. The
/// orchestrator never swaps in the local answer once a provider exists.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Sampling parameters for one generation call
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Unified trait for text generation providers
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate a reply for one system/user prompt pair
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError>;

    /// Model identifier for logging and response payloads
    fn model_name(&self) -> &str;
}

/// Build the provider selected by the configuration, if any.
pub fn provider_from_config(config: &Config) -> Option<Arc<dyn GenerationProvider>> {
    match &config.openai_api_key {
        Some(key) => {
            info!(
                model = %config.model,
                base_url = %config.openai_base_url,
                "Chat provider configured"
            );
            Some(Arc::new(OpenAiProvider::new(
                key,
                &config.openai_base_url,
                &config.model,
                config.llm_timeout_secs,
            )))
        }
        None => {
            info!("OPENAI_API_KEY not set, chat will answer from local data");
            None
        }
    }
}
