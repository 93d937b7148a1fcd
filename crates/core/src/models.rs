//! # CodeForge Models
//!
//! Centralized LLM configuration types for the CodeForge pipeline.
//! `ModelConfig` describes one concrete LLM client; `LlmConfig` is the
//! environment-derived run configuration including the ordered fallback
//! candidates consumed by the `fallback` module.

use radkit::models::providers::{
    AnthropicLlm, DeepSeekLlm, GeminiLlm, GrokLlm, OpenAILlm, OpenRouterLlm,
};
use radkit::models::BaseLlm;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported LLM providers
///
/// OpenRouter is the primary integration path; OpenAI is the alternate,
/// OpenAI-compatible path used when OpenRouter candidates are exhausted.
/// API keys come from the environment:
/// - OpenRouter (Gateway) - `OPENROUTER_API_KEY`
/// - OpenAI (GPT) - `OPENAI_API_KEY`
/// - Anthropic (Claude) - `ANTHROPIC_API_KEY`
/// - Gemini (Google) - `GEMINI_API_KEY`
/// - Grok (xAI) - `XAI_API_KEY`
/// - DeepSeek - `DEEPSEEK_API_KEY`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenRouter,
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
    Gemini,
    Grok,
    DeepSeek,
}

impl LlmProvider {
    /// Get all available providers
    pub fn all() -> Vec<LlmProvider> {
        vec![
            LlmProvider::OpenRouter,
            LlmProvider::OpenAI,
            LlmProvider::Anthropic,
            LlmProvider::Gemini,
            LlmProvider::Grok,
            LlmProvider::DeepSeek,
        ]
    }

    /// Display name for logs and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            LlmProvider::OpenRouter => "OpenRouter",
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::Anthropic => "Anthropic",
            LlmProvider::Gemini => "Gemini",
            LlmProvider::Grok => "Grok",
            LlmProvider::DeepSeek => "DeepSeek",
        }
    }

    /// Whether this provider supports custom base URL
    pub fn supports_base_url(&self) -> bool {
        matches!(self, LlmProvider::OpenAI)
    }
}

/// Configuration for LLM model selection
///
/// Describes the single (provider, model, base-url) combination one pipeline
/// stage talks to. The coordinator derives one of these per agent from its
/// global settings and per-agent overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// LLM provider to use
    #[serde(default)]
    pub provider: LlmProvider,
    /// Model name (e.g., "anthropic/claude-3.5-sonnet", "gpt-4o")
    pub model: String,
    /// Optional base URL override for OpenAI-compatible APIs
    pub base_url: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenRouter,
            model: "anthropic/claude-3.5-sonnet".to_string(),
            base_url: None,
        }
    }
}

impl ModelConfig {
    /// Create a new model config with the default provider (OpenRouter)
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            provider: LlmProvider::OpenRouter,
            model: model.into(),
            base_url: None,
        }
    }

    /// Create config for a specific provider
    pub fn with_provider(provider: LlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            base_url: None,
        }
    }

    /// Set base URL (for OpenAI-compatible endpoints)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Create an LLM client based on the configured provider
    ///
    /// Each provider loads its API key from the environment via `from_env()`.
    pub fn create_llm(&self) -> anyhow::Result<Box<dyn BaseLlm + Send + Sync>> {
        match self.provider {
            LlmProvider::OpenRouter => Ok(Box::new(OpenRouterLlm::from_env(&self.model)?)),
            LlmProvider::OpenAI => {
                let llm = if let Some(base_url) = &self.base_url {
                    OpenAILlm::from_env(&self.model)?.with_base_url(base_url)
                } else {
                    OpenAILlm::from_env(&self.model)?
                };
                Ok(Box::new(llm))
            }
            LlmProvider::Anthropic => Ok(Box::new(AnthropicLlm::from_env(&self.model)?)),
            LlmProvider::Gemini => Ok(Box::new(GeminiLlm::from_env(&self.model)?)),
            LlmProvider::Grok => Ok(Box::new(GrokLlm::from_env(&self.model)?)),
            LlmProvider::DeepSeek => Ok(Box::new(DeepSeekLlm::from_env(&self.model)?)),
        }
    }
}

/// Primary LLM configuration plus ordered fallback candidates
///
/// Loaded once per run from the environment and passed by value into the
/// attempt planner. The primary `model` and `base_url` are always defined
/// and are implicitly the first candidates; the fallback lists may repeat
/// the primary or each other (the planner deduplicates).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Primary provider family
    pub provider: LlmProvider,
    /// Primary model identifier
    pub model: String,
    /// Alternate models to try, in priority order
    pub fallback_models: Vec<String>,
    /// Primary endpoint URL
    pub base_url: String,
    /// Alternate endpoint URLs to try, in priority order
    pub fallback_base_urls: Vec<String>,
    /// Extra request headers, applied on the OpenAI-compatible path
    pub headers: HashMap<String, String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenRouter,
            model: "anthropic/claude-3.5-sonnet".to_string(),
            fallback_models: Vec::new(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            fallback_base_urls: Vec::new(),
            headers: HashMap::new(),
        }
    }
}

impl LlmConfig {
    /// Load the run configuration from environment variables
    ///
    /// Unset variables fall back to the defaults, so this always produces a
    /// usable configuration object.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: LlmProvider::OpenRouter,
            model: env_or("OPENROUTER_MODEL", &defaults.model),
            fallback_models: parse_csv_list(&std::env::var("OPENROUTER_FALLBACK_MODELS").unwrap_or_default()),
            base_url: env_or("OPENROUTER_BASE_URL", &defaults.base_url),
            fallback_base_urls: parse_csv_list(
                &std::env::var("OPENROUTER_FALLBACK_BASE_URLS").unwrap_or_default(),
            ),
            headers: parse_header_list(&std::env::var("OPENROUTER_EXTRA_HEADERS").unwrap_or_default()),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Split a comma-separated env value into trimmed, non-empty entries
pub(crate) fn parse_csv_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse comma-separated `Name: value` pairs into a header map
///
/// Entries without a colon are ignored rather than treated as fatal; a
/// malformed optional header should not stop the pipeline from starting.
pub(crate) fn parse_header_list(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|entry| {
            let (name, value) = entry.split_once(':')?;
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                None
            } else {
                Some((name.to_string(), value.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_config() {
        let config = ModelConfig::default();
        assert_eq!(config.provider, LlmProvider::OpenRouter);
        assert!(config.model.contains("claude"));
    }

    #[test]
    fn test_provider_display_names() {
        assert_eq!(LlmProvider::OpenRouter.display_name(), "OpenRouter");
        assert_eq!(LlmProvider::OpenAI.display_name(), "OpenAI");
    }

    #[test]
    fn test_base_url_support() {
        assert!(LlmProvider::OpenAI.supports_base_url());
        assert!(!LlmProvider::OpenRouter.supports_base_url());
    }

    #[test]
    fn test_model_config_serialization() {
        let config = ModelConfig::with_provider(LlmProvider::OpenAI, "gpt-4o");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("openai"));
        assert!(json.contains("gpt-4o"));
    }

    #[test]
    fn test_parse_csv_list_trims_and_drops_empty() {
        let entries = parse_csv_list(" m1 , ,m2,, m3 ");
        assert_eq!(entries, vec!["m1", "m2", "m3"]);
        assert!(parse_csv_list("").is_empty());
    }

    #[test]
    fn test_parse_header_list() {
        let headers = parse_header_list("HTTP-Referer: https://example.dev, X-Title: CodeForge");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["HTTP-Referer"], "https://example.dev");
        assert_eq!(headers["X-Title"], "CodeForge");
        assert!(parse_header_list("not-a-header").is_empty());
    }

    #[test]
    fn test_llm_config_default_is_openrouter_primary() {
        let config = LlmConfig::default();
        assert_eq!(config.provider, LlmProvider::OpenRouter);
        assert!(config.base_url.contains("openrouter.ai"));
        assert!(config.fallback_models.is_empty());
        assert!(config.headers.is_empty());
    }
}
