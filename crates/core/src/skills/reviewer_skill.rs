//! # Reviewer Skill
//!
//! Final stage of the pipeline. Audits the implementation and its test
//! results, and delivers the verdict the pipeline reports to the user.

use crate::models::ModelConfig;
use crate::run_llm_worker;
use crate::skills::artifact_registry::{ConcernSummary, ReviewArtifact};
use crate::skills::tools::{calc_tools, code_tools, doc_tools, search_tools};
use async_trait::async_trait;
use radkit::agent::{Artifact, OnRequestResult, SkillHandler};
use radkit::errors::{AgentError, AgentResult};
use radkit::macros::{skill, LLMOutput};
use radkit::models::Content;
use radkit::runtime::context::{ProgressSender, State};
use radkit::runtime::AgentRuntime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single concern raised by the reviewer
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct Concern {
    /// Severity: "blocking", "major", "minor", "suggestion"
    pub severity: String,
    /// Description of the concern
    pub description: String,
    /// Suggested fix if applicable
    #[serde(default)]
    pub suggested_fix: Option<String>,
}

/// Output from the reviewer skill
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct ReviewOutput {
    /// Overall verdict: "approved", "needs_changes", "rejected"
    pub verdict: String,
    /// Summary of the review
    pub summary: String,
    /// List of concerns found
    pub concerns: Vec<Concern>,
    /// Findings from the dependency audit
    #[serde(default)]
    pub dependency_findings: Vec<String>,
    /// Confidence in the verdict (0.0 - 1.0)
    pub confidence: f32,
}

impl ReviewOutput {
    /// Number of blocking concerns
    pub fn blocking_count(&self) -> usize {
        self.concerns.iter().filter(|c| c.severity == "blocking").count()
    }
}

/// Reviewer skill for the final quality gate
#[skill(
    id = "review",
    name = "Review",
    description = "Reviews implementation and test results for quality, security, and dependency health. Delivers the final verdict.",
    tags = ["review", "quality", "security", "audit"],
    examples = ["Review this implementation", "Audit code quality and dependencies"],
    input_modes = ["text/plain", "application/json"],
    output_modes = ["application/json"]
)]
pub struct ReviewerSkill {
    config: ModelConfig,
}

impl ReviewerSkill {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn with_model(model: &str) -> Self {
        Self::new(ModelConfig::new(model))
    }

    pub fn default() -> Self {
        Self::new(ModelConfig::default())
    }

    /// SDK-style call for direct Coordinator integration.
    pub async fn run(
        topic: &str,
        implementation_json: &str,
        test_report_json: &str,
        config: &ModelConfig,
    ) -> anyhow::Result<ReviewOutput> {
        let prompt = format!(
            "Coding task: {}\n\nImplementation under review:\n{}\n\nTest report:\n{}",
            topic, implementation_json, test_report_json
        );
        run_llm_worker!(
            config,
            ReviewOutput,
            SYSTEM_PROMPT,
            prompt,
            search_tools::search_web,
            doc_tools::search_docs,
            calc_tools::calculate,
            code_tools::audit_dependencies,
        )
    }
}

#[async_trait]
impl SkillHandler for ReviewerSkill {
    async fn on_request(
        &self,
        _state: &mut State,
        progress: &ProgressSender,
        _runtime: &dyn AgentRuntime,
        content: Content,
    ) -> AgentResult<OnRequestResult> {
        let input = content.first_text().unwrap_or_default();

        progress.send_update("Reviewing implementation...").await?;

        let result = run_llm_worker!(
            &self.config,
            ReviewOutput,
            SYSTEM_PROMPT,
            input,
            search_tools::search_web,
            doc_tools::search_docs,
            calc_tools::calculate,
            code_tools::audit_dependencies,
        )
        .map_err(|e| AgentError::Internal {
            component: "reviewer_skill".to_string(),
            reason: e.to_string(),
        })?;

        progress.send_update("Review complete.").await?;

        let artifact_data = ReviewArtifact {
            verdict: result.verdict.clone(),
            confidence: result.confidence,
            concerns: result
                .concerns
                .iter()
                .map(|c| ConcernSummary {
                    severity: c.severity.clone(),
                    description: c.description.clone(),
                })
                .collect(),
            blocking_count: result.blocking_count(),
        };

        let artifact = Artifact::from_json("review.json", &artifact_data).map_err(|e| {
            AgentError::Internal {
                component: "reviewer_skill".to_string(),
                reason: format!("Failed to create artifact: {}", e),
            }
        })?;

        Ok(OnRequestResult::Completed {
            message: Some(Content::from_text(&format!(
                "Verdict: {} ({} concern(s))",
                result.verdict,
                result.concerns.len()
            ))),
            artifacts: vec![artifact],
        })
    }
}

const SYSTEM_PROMPT: &str = include_str!("defaults/reviewer.md");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_count() {
        let review = ReviewOutput {
            verdict: "needs_changes".to_string(),
            summary: String::new(),
            concerns: vec![
                Concern {
                    severity: "blocking".to_string(),
                    description: "unvalidated input".to_string(),
                    suggested_fix: None,
                },
                Concern {
                    severity: "minor".to_string(),
                    description: "naming".to_string(),
                    suggested_fix: None,
                },
            ],
            dependency_findings: vec![],
            confidence: 0.9,
        };
        assert_eq!(review.blocking_count(), 1);
    }
}
