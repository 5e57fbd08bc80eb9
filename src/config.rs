//! Service configuration — environment variables, CLI args, defaults
//!
//! Precedence is CLI arg > environment variable > built-in default. The only
//! secret is `OPENAI_API_KEY`; when it is absent the chat endpoint answers
//! from local data instead of calling the provider, which keeps development
//! setups credential-free.

use std::path::PathBuf;

use tracing::warn;

/// Runtime configuration for the service
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind port (`PORT`, default 3000)
    pub port: u16,
    /// Provider credential (`OPENAI_API_KEY`); `None` selects the local
    /// fallback path
    pub openai_api_key: Option<String>,
    /// Model requested from the provider (`FARO_MODEL`)
    pub model: String,
    /// Base URL of the OpenAI-compatible API (`FARO_OPENAI_BASE_URL`)
    pub openai_base_url: String,
    /// Path to the projects dataset (`FARO_DATA_PATH`)
    pub data_path: PathBuf,
    /// Provider request timeout in seconds (`FARO_LLM_TIMEOUT_SECS`)
    pub llm_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            openai_api_key: None,
            model: "gpt-4o-mini".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            data_path: PathBuf::from("data/projects.json"),
            llm_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with CLI overrides
    pub fn from_env(port: Option<u16>, data_path: Option<PathBuf>) -> Self {
        let mut config = Self::default();

        // Port: CLI arg > PORT env var
        if let Some(p) = port {
            config.port = p;
        } else if let Ok(v) = std::env::var("PORT") {
            match v.parse() {
                Ok(p) => config.port = p,
                Err(_) => warn!(value = %v, "PORT is not a valid port number, using default"),
            }
        }

        // Credential: an empty value counts as absent
        config.openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        if let Ok(v) = std::env::var("FARO_MODEL") {
            if !v.is_empty() {
                config.model = v;
            }
        }
        if let Ok(v) = std::env::var("FARO_OPENAI_BASE_URL") {
            if !v.is_empty() {
                config.openai_base_url = v;
            }
        }

        // Dataset path: CLI arg > env var
        if let Some(path) = data_path {
            config.data_path = path;
        } else if let Ok(v) = std::env::var("FARO_DATA_PATH") {
            if !v.is_empty() {
                config.data_path = PathBuf::from(v);
            }
        }

        if let Ok(v) = std::env::var("FARO_LLM_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                config.llm_timeout_secs = n;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.data_path, PathBuf::from("data/projects.json"));
        assert_eq!(config.llm_timeout_secs, 30);
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        // CLI values win over whatever the process environment holds.
        let config = Config::from_env(Some(9090), Some(PathBuf::from("/tmp/custom.json")));
        assert_eq!(config.port, 9090);
        assert_eq!(config.data_path, PathBuf::from("/tmp/custom.json"));
    }
}
