//! # Pipeline Runner
//!
//! Top-level entry point: loads the LLM configuration, builds the fallback
//! attempt plan, and runs the coordinator once per attempt until one
//! succeeds.

use anyhow::Result;
use tokio::sync::mpsc;

use crate::fallback::{build_attempts, run_with_fallback, AttemptOverride};
use crate::models::LlmConfig;

use super::coordinator::{Coordinator, CoordinatorConfig};
use super::events::PipelineEvent;

/// Merge one attempt's overrides onto the primary configuration
///
/// Fields absent from the override fall back to the primary values; the
/// resulting config is what one coordinator run sees.
pub fn apply_override(config: &LlmConfig, overrides: &AttemptOverride) -> CoordinatorConfig {
    CoordinatorConfig {
        global_provider: overrides
            .provider
            .clone()
            .unwrap_or_else(|| config.provider.clone()),
        global_model: Some(
            overrides
                .model
                .clone()
                .unwrap_or_else(|| config.model.clone()),
        ),
        base_url: Some(
            overrides
                .base_url
                .clone()
                .unwrap_or_else(|| config.base_url.clone()),
        ),
        ..CoordinatorConfig::default()
    }
}

/// Run the development pipeline for a coding task, with fallback attempts
///
/// Reads `LlmConfig` from the environment, then tries the pipeline against
/// each candidate configuration in priority order. The first successful run
/// wins; if every candidate fails, the last failure is returned. Pass an
/// event sender to stream per-stage progress.
pub async fn run_development_pipeline(
    topic: &str,
    event_tx: Option<mpsc::Sender<PipelineEvent>>,
) -> Result<String> {
    let config = LlmConfig::from_env();
    let attempts = build_attempts(&config);
    tracing::info!(
        topic,
        attempts = attempts.len(),
        provider = config.provider.display_name(),
        model = %config.model,
        base_url = %config.base_url,
        "Starting development pipeline"
    );

    run_with_fallback(topic, &attempts, |topic, overrides| {
        let coordinator_config = apply_override(&config, &overrides);
        let event_tx = event_tx.clone();
        async move {
            let mut coordinator = Coordinator::new(coordinator_config);
            if let Some(tx) = event_tx {
                coordinator = coordinator.with_event_channel(tx);
            }
            let result = coordinator.run(&topic).await?;
            Ok(result.final_report)
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LlmProvider;
    use std::collections::HashMap;

    fn base_config() -> LlmConfig {
        LlmConfig {
            provider: LlmProvider::OpenRouter,
            model: "anthropic/claude-3.5-sonnet".to_string(),
            fallback_models: vec!["openai/gpt-4o-mini".to_string()],
            base_url: "https://openrouter.ai/api/v1".to_string(),
            fallback_base_urls: vec![],
            headers: HashMap::new(),
        }
    }

    #[test]
    fn test_apply_override_empty_keeps_primary() {
        let config = base_config();
        let merged = apply_override(&config, &AttemptOverride::default());
        assert_eq!(merged.global_provider, LlmProvider::OpenRouter);
        assert_eq!(merged.global_model.as_deref(), Some("anthropic/claude-3.5-sonnet"));
        assert_eq!(merged.base_url.as_deref(), Some("https://openrouter.ai/api/v1"));
        assert!(merged.per_agent_models.is_empty());
    }

    #[test]
    fn test_apply_override_replaces_set_fields() {
        let config = base_config();
        let overrides = AttemptOverride {
            provider: Some(LlmProvider::OpenAI),
            model: Some("gpt-4o".to_string()),
            base_url: Some("https://api.openai.com/v1".to_string()),
            ..AttemptOverride::default()
        };
        let merged = apply_override(&config, &overrides);
        assert_eq!(merged.global_provider, LlmProvider::OpenAI);
        assert_eq!(merged.global_model.as_deref(), Some("gpt-4o"));
        assert_eq!(merged.base_url.as_deref(), Some("https://api.openai.com/v1"));
    }

    #[test]
    fn test_apply_override_partial() {
        let config = base_config();
        let overrides = AttemptOverride {
            model: Some("openai/gpt-4o-mini".to_string()),
            ..AttemptOverride::default()
        };
        let merged = apply_override(&config, &overrides);
        // Unset fields keep the primary configuration.
        assert_eq!(merged.global_provider, LlmProvider::OpenRouter);
        assert_eq!(merged.global_model.as_deref(), Some("openai/gpt-4o-mini"));
        assert_eq!(merged.base_url.as_deref(), Some("https://openrouter.ai/api/v1"));
    }
}
