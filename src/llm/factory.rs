//! LLM client factory.
//!
//! Centralizes provider-specific logic for creating LLM clients.

use crate::error::{QuantbotError, Result};
use crate::llm::{GroqClient, GroqConfig, LlmClient, LlmProvider, MockLlmClient};

/// Creates an LLM client for the given provider.
///
/// If `api_key` is provided, it takes precedence over environment
/// variables; otherwise the key is read from `GROQ_API_KEY`. Model
/// selection comes from `GROQ_MODEL` (defaults to "mixtral-8x7b-32768")
/// and the endpoint from `GROQ_BASE_URL`.
pub fn create_client(provider: LlmProvider, api_key: Option<String>) -> Result<Box<dyn LlmClient>> {
    match provider {
        LlmProvider::Groq => {
            let Some(key) = api_key else {
                return Ok(Box::new(GroqClient::from_env()?));
            };
            let model =
                std::env::var("GROQ_MODEL").unwrap_or_else(|_| "mixtral-8x7b-32768".to_string());
            let mut config = GroqConfig::new(key, model);
            if let Ok(base_url) = std::env::var("GROQ_BASE_URL") {
                config = config.with_base_url(base_url);
            }
            Ok(Box::new(GroqClient::new(config)?))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}

/// Resolves a provider name into a client, mapping parse failures to
/// configuration errors.
pub fn create_client_by_name(name: &str, api_key: Option<String>) -> Result<Box<dyn LlmClient>> {
    let provider: LlmProvider = name
        .parse()
        .map_err(|e: String| QuantbotError::config(e))?;
    create_client(provider, api_key)
}
