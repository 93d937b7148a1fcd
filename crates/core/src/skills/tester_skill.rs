//! # Tester Skill
//!
//! Third stage of the pipeline. Designs a test suite for the implementation
//! and reports a verdict per case from close reading of the code.

use crate::models::ModelConfig;
use crate::run_llm_worker;
use crate::skills::artifact_registry::TestRunArtifact;
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

/// A single test case with its verdict
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct TestCase {
    /// Test name describing what is being tested
    pub name: String,
    /// Kind: "unit", "integration", "edge_case", "error_path"
    pub kind: String,
    /// What the test does
    pub description: String,
    /// Expected outcome
    pub expected: String,
    /// Verdict: "pass", "fail", or "not_run"
    pub verdict: String,
    /// Reasoning, required when the verdict is "fail"
    #[serde(default)]
    pub notes: Option<String>,
}

/// Output from the tester skill
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct TestOutput {
    /// Overall testing strategy and scope
    pub strategy: String,
    /// Designed test cases with verdicts
    pub cases: Vec<TestCase>,
    /// Concrete defects found, with severity and reproduction notes
    #[serde(default)]
    pub issues: Vec<String>,
    /// Estimated fraction of behavior covered (0.0 - 1.0)
    pub coverage_estimate: f32,
}

impl TestOutput {
    /// Number of cases whose verdict is "fail"
    pub fn failing_cases(&self) -> usize {
        self.cases.iter().filter(|c| c.verdict == "fail").count()
    }
}

/// Tester skill for designing and evaluating the test suite
#[skill(
    id = "test",
    name = "Test",
    description = "Designs unit/integration/edge-case tests for an implementation and reports per-case verdicts and coverage.",
    tags = ["testing", "quality", "coverage"],
    examples = ["Test this palindrome implementation", "Design tests for the service"],
    input_modes = ["text/plain", "application/json"],
    output_modes = ["application/json"]
)]
pub struct TesterSkill {
    config: ModelConfig,
}

impl TesterSkill {
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
        plan_summary: &str,
        implementation_json: &str,
        config: &ModelConfig,
    ) -> anyhow::Result<TestOutput> {
        let prompt = format!(
            "Coding task: {}\n\nPlan summary: {}\n\nImplementation to test:\n{}",
            topic, plan_summary, implementation_json
        );
        run_llm_worker!(
            config,
            TestOutput,
            SYSTEM_PROMPT,
            prompt,
            code_tools::search_testing_practice,
            search_tools::search_web,
            doc_tools::search_docs,
            calc_tools::calculate,
        )
    }
}

#[async_trait]
impl SkillHandler for TesterSkill {
    async fn on_request(
        &self,
        _state: &mut State,
        progress: &ProgressSender,
        _runtime: &dyn AgentRuntime,
        content: Content,
    ) -> AgentResult<OnRequestResult> {
        let input = content.first_text().unwrap_or_default();

        progress.send_update("Designing test suite...").await?;

        let result = run_llm_worker!(
            &self.config,
            TestOutput,
            SYSTEM_PROMPT,
            input,
            code_tools::search_testing_practice,
            search_tools::search_web,
            doc_tools::search_docs,
            calc_tools::calculate,
        )
        .map_err(|e| AgentError::Internal {
            component: "tester_skill".to_string(),
            reason: e.to_string(),
        })?;

        progress.send_update("Testing complete.").await?;

        let artifact_data = TestRunArtifact {
            strategy: result.strategy.clone(),
            total_cases: result.cases.len(),
            failing_cases: result.failing_cases(),
            coverage_estimate: result.coverage_estimate,
            issue_count: result.issues.len(),
        };

        let artifact = Artifact::from_json("test_run.json", &artifact_data).map_err(|e| {
            AgentError::Internal {
                component: "tester_skill".to_string(),
                reason: format!("Failed to create artifact: {}", e),
            }
        })?;

        Ok(OnRequestResult::Completed {
            message: Some(Content::from_text(&format!(
                "{} case(s), {} failing",
                result.cases.len(),
                result.failing_cases()
            ))),
            artifacts: vec![artifact],
        })
    }
}

const SYSTEM_PROMPT: &str = include_str!("defaults/tester.md");

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, verdict: &str) -> TestCase {
        TestCase {
            name: name.to_string(),
            kind: "unit".to_string(),
            description: String::new(),
            expected: String::new(),
            verdict: verdict.to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_failing_case_count() {
        let output = TestOutput {
            strategy: "unit first".to_string(),
            cases: vec![case("a", "pass"), case("b", "fail"), case("c", "not_run")],
            issues: vec![],
            coverage_estimate: 0.7,
        };
        assert_eq!(output.failing_cases(), 1);
    }
}
