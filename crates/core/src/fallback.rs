//! # Fallback Planning
//!
//! Builds the ordered list of LLM override attempts for one pipeline run and
//! drives the retry loop that works through them. Candidates are tried
//! strictly in sequence; the first success wins and, if every candidate
//! fails, the last failure is surfaced to the caller.
//!
//! Ordering policy: all combinations reachable through the primary provider
//! family come first (home provider, primary credentials), then the same
//! model/base-url grid through the alternate OpenAI-compatible path. The
//! alternate path implies different request shaping, so it is last resort.

use crate::models::{LlmConfig, LlmProvider};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use std::future::Future;

/// Placeholder substituted for sensitive override values in log records
pub const REDACTED: &str = "[set]";

/// Sparse set of fields that differ from the primary configuration for one
/// attempt. The all-`None` value means "use the primary configuration
/// unmodified" and is always the first attempt in a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttemptOverride {
    /// Provider family to route through; absent means the primary family
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<LlmProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_headers: Option<HashMap<String, String>>,
    /// Never populated by the planner; present so UI-supplied overrides are
    /// redacted like every other credential field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl AttemptOverride {
    /// True when no field deviates from the primary configuration
    pub fn is_empty(&self) -> bool {
        self.provider.is_none()
            && self.model.is_none()
            && self.base_url.is_none()
            && self.default_headers.is_none()
            && self.extra_headers.is_none()
            && self.api_key.is_none()
    }

    /// Copy of the set fields with sensitive values masked, for log records.
    ///
    /// The override itself is never modified; the attempt always runs with
    /// the real values.
    pub fn sanitized(&self) -> Value {
        let mut fields = Map::new();
        if let Some(provider) = &self.provider {
            fields.insert("provider".to_string(), json!(provider));
        }
        if let Some(model) = &self.model {
            fields.insert("model".to_string(), json!(model));
        }
        if let Some(base_url) = &self.base_url {
            fields.insert("base_url".to_string(), json!(base_url));
        }
        if self.default_headers.is_some() {
            fields.insert("default_headers".to_string(), json!(REDACTED));
        }
        if self.extra_headers.is_some() {
            fields.insert("extra_headers".to_string(), json!(REDACTED));
        }
        if self.api_key.is_some() {
            fields.insert("api_key".to_string(), json!(REDACTED));
        }
        Value::Object(fields)
    }
}

/// Construct the ordered, deduplicated attempt plan for one run.
///
/// Candidate base URLs and models keep their listed priority (primary first,
/// first occurrence wins on duplicates). The grid is walked provider family
/// outermost, model, then base URL, and any (family, model, base_url) triple
/// already emitted is skipped regardless of which family produced it first.
/// The result is never empty: a config with no usable fallbacks still yields
/// the single "run the primary as-is" attempt.
pub fn build_attempts(config: &LlmConfig) -> Vec<AttemptOverride> {
    let mut attempts = Vec::new();
    let mut seen: HashSet<(LlmProvider, String, String)> = HashSet::new();

    let base_urls = dedup_keep_first(
        std::iter::once(config.base_url.as_str()).chain(config.fallback_base_urls.iter().map(String::as_str)),
    );
    let models = dedup_keep_first(
        std::iter::once(config.model.as_str()).chain(config.fallback_models.iter().map(String::as_str)),
    );

    let families = [
        (config.provider.clone(), true),
        (LlmProvider::OpenAI, false),
    ];

    for (family, is_primary_family) in families {
        for model in &models {
            for base_url in &base_urls {
                let key = (family.clone(), model.clone(), base_url.clone());
                if !seen.insert(key) {
                    continue;
                }

                let mut overrides = AttemptOverride::default();

                if base_url != &config.base_url {
                    overrides.base_url = Some(base_url.clone());
                }

                if is_primary_family {
                    // Absence of the provider field routes through the
                    // primary family's default integration.
                    if model != &config.model {
                        overrides.model = Some(model.clone());
                    }
                } else {
                    // The alternate path has no defaults of its own, so
                    // provider and model are always explicit, and any
                    // configured headers ride along as copies.
                    overrides.provider = Some(LlmProvider::OpenAI);
                    overrides.model = Some(model.clone());
                    if !config.headers.is_empty() {
                        overrides.default_headers = Some(config.headers.clone());
                        overrides.extra_headers = Some(config.headers.clone());
                    }
                }

                attempts.push(overrides);
            }
        }
    }

    if attempts.is_empty() {
        attempts.push(AttemptOverride::default());
    }

    attempts
}

/// Order-preserving dedup, first occurrence wins
fn dedup_keep_first<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}

/// Run `run_once` against each attempt in order, returning the first success.
///
/// Every failure is logged with the sanitized override and abandoned; there
/// is no distinction between failure kinds at this layer. If all attempts
/// fail, the error from the final attempt is returned - the most recent
/// failure is the one most likely to reflect the current environment.
pub async fn run_with_fallback<T, F, Fut>(
    topic: &str,
    attempts: &[AttemptOverride],
    mut run_once: F,
) -> anyhow::Result<T>
where
    F: FnMut(String, AttemptOverride) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let total = attempts.len();
    let mut last_error: Option<anyhow::Error> = None;

    for (index, overrides) in attempts.iter().enumerate() {
        let attempt = index + 1;
        if !overrides.is_empty() {
            tracing::info!(
                attempt,
                total,
                overrides = %overrides.sanitized(),
                "Trying pipeline with fallback overrides"
            );
        }

        match run_once(topic.to_string(), overrides.clone()).await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(
                        attempt,
                        total,
                        overrides = %overrides.sanitized(),
                        "Fallback succeeded"
                    );
                }
                return Ok(result);
            }
            Err(error) => {
                tracing::error!(
                    attempt,
                    total,
                    overrides = %overrides.sanitized(),
                    error = format!("{error:#}"),
                    "Pipeline attempt failed"
                );
                last_error = Some(error);
            }
        }
    }

    // build_attempts guarantees a non-empty plan, so reaching exhaustion
    // with no recorded error is a construction bug.
    debug_assert!(last_error.is_some(), "attempt plan must never be empty");
    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no fallback attempts were executed")))
}
