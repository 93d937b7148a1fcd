//! # Pipeline Coordinator
//!
//! Orchestrates the development pipeline from coding task to reviewed
//! implementation. Stages run strictly in sequence, each feeding its output
//! into the next stage's prompt context.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::mpsc;

use crate::models::{LlmProvider, ModelConfig};
use crate::skills::planner_skill::PlanOutput;
use crate::skills::reviewer_skill::ReviewOutput;
use crate::skills::tester_skill::TestOutput;
use crate::skills::writer_skill::ImplementationOutput;
use crate::skills::{PlannerSkill, ReviewerSkill, TesterSkill, WriterSkill};

use super::events::{PipelineEvent, PipelineEventKind};
use super::pipeline::Pipeline;

/// Configuration for the coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Global LLM provider (default: OpenRouter)
    #[serde(default)]
    pub global_provider: LlmProvider,
    /// Global model to use for all agents
    pub global_model: Option<String>,
    /// Base URL override for LLM API (for OpenAI-compatible endpoints)
    pub base_url: Option<String>,
    /// Per-agent model overrides (agent_id -> model name)
    #[serde(default)]
    pub per_agent_models: HashMap<String, String>,
    /// Per-agent provider overrides (agent_id -> provider)
    #[serde(default)]
    pub per_agent_providers: HashMap<String, LlmProvider>,
    /// Per-agent base URL overrides (agent_id -> base_url)
    #[serde(default)]
    pub per_agent_base_urls: HashMap<String, String>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            global_provider: LlmProvider::OpenRouter,
            global_model: None,
            base_url: None,
            per_agent_models: HashMap::new(),
            per_agent_providers: HashMap::new(),
            per_agent_base_urls: HashMap::new(),
        }
    }
}

/// Result of one full pipeline run
#[derive(Debug)]
pub struct PipelineResult {
    /// Architecture plan from the planner
    pub plan: PlanOutput,
    /// Source files and dependencies from the writer
    pub implementation: ImplementationOutput,
    /// Test suite and verdicts from the tester
    pub tests: TestOutput,
    /// Final review from the reviewer
    pub review: ReviewOutput,
    /// Events that occurred
    pub events: Vec<PipelineEvent>,
    /// Whether the pipeline reached the reviewer
    pub success: bool,
    /// Rendered report handed back to the caller
    pub final_report: String,
}

/// The pipeline coordinator
pub struct Coordinator {
    config: CoordinatorConfig,
    pipeline: Pipeline,
    events: Vec<PipelineEvent>,
    event_tx: Option<mpsc::Sender<PipelineEvent>>,
}

impl Coordinator {
    /// Create a new coordinator
    pub fn new(config: CoordinatorConfig) -> Self {
        Self {
            config,
            pipeline: Pipeline::new(),
            events: Vec::new(),
            event_tx: None,
        }
    }

    /// Set event channel for streaming events
    pub fn with_event_channel(mut self, tx: mpsc::Sender<PipelineEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Get model config for a specific agent
    fn get_model_config(&self, agent_id: &str) -> ModelConfig {
        // Provider: per-agent override -> global
        let provider = self
            .config
            .per_agent_providers
            .get(agent_id)
            .cloned()
            .unwrap_or_else(|| self.config.global_provider.clone());

        // Model: per-agent override -> global -> default for provider
        let model = self
            .config
            .per_agent_models
            .get(agent_id)
            .or(self.config.global_model.as_ref())
            .cloned()
            .unwrap_or_else(|| match provider {
                LlmProvider::OpenRouter => "anthropic/claude-3.5-sonnet".to_string(),
                LlmProvider::OpenAI => "gpt-4o".to_string(),
                LlmProvider::Anthropic => "claude-sonnet-4-20250514".to_string(),
                LlmProvider::Gemini => "gemini-2.0-flash-exp".to_string(),
                LlmProvider::Grok => "grok-2".to_string(),
                LlmProvider::DeepSeek => "deepseek-chat".to_string(),
            });

        // Base URL: per-agent override -> global (only where supported)
        let base_url = if provider.supports_base_url() {
            self.config
                .per_agent_base_urls
                .get(agent_id)
                .or(self.config.base_url.as_ref())
                .cloned()
        } else {
            None
        };

        ModelConfig {
            provider,
            model,
            base_url,
        }
    }

    /// Emit an event
    async fn emit(&mut self, event: PipelineEvent) {
        self.events.push(event.clone());
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    /// Record a stage failure and surface the error to the caller
    async fn abort<T>(&mut self, agent: &str, error: anyhow::Error) -> Result<T> {
        self.pipeline.fail();
        self.emit(
            PipelineEvent::new(PipelineEventKind::AgentFailed, agent)
                .with_data(serde_json::json!({ "error": format!("{error:#}") })),
        )
        .await;
        self.emit(PipelineEvent::new(
            PipelineEventKind::PipelineFailed,
            "coordinator",
        ))
        .await;
        Err(error)
    }

    /// Run the development pipeline on a coding task
    #[tracing::instrument(skip(self), fields(topic_preview = %topic.chars().take(50).collect::<String>()))]
    pub async fn run(&mut self, topic: &str) -> Result<PipelineResult> {
        self.emit(PipelineEvent::new(
            PipelineEventKind::PipelineStarted,
            "coordinator",
        ))
        .await;

        // Stage 1: Planning
        self.emit(PipelineEvent::new(PipelineEventKind::AgentStarted, "planner"))
            .await;
        let model_config = self.get_model_config("planner");
        tracing::info!(
            provider = model_config.provider.display_name(),
            model = %model_config.model,
            "Planner starting"
        );
        let plan = match PlannerSkill::run(topic, &model_config).await.context(format!(
            "Planner failed (provider: {:?}, model: {})",
            model_config.provider, model_config.model
        )) {
            Ok(plan) => plan,
            Err(error) => return self.abort("planner", error).await,
        };
        tracing::info!(plan_summary = %plan.summary, "Planner output");
        self.emit(
            PipelineEvent::new(PipelineEventKind::AgentCompleted, "planner")
                .with_data(serde_json::to_value(&plan)?),
        )
        .await;
        self.pipeline.advance();

        // Stage 2: Writing
        self.emit(PipelineEvent::new(PipelineEventKind::AgentStarted, "writer"))
            .await;
        let model_config = self.get_model_config("writer");
        let plan_json = serde_json::to_string_pretty(&plan)?;
        let implementation = match WriterSkill::run(topic, &plan_json, &model_config)
            .await
            .context(format!(
                "Writer failed (provider: {:?}, model: {})",
                model_config.provider, model_config.model
            )) {
            Ok(implementation) => implementation,
            Err(error) => return self.abort("writer", error).await,
        };
        tracing::info!(
            files = implementation.files.len(),
            summary = %implementation.summary,
            "Writer output"
        );
        self.emit(
            PipelineEvent::new(PipelineEventKind::AgentCompleted, "writer")
                .with_data(serde_json::to_value(&implementation)?),
        )
        .await;
        self.pipeline.advance();

        // Stage 3: Testing
        self.emit(PipelineEvent::new(PipelineEventKind::AgentStarted, "tester"))
            .await;
        let model_config = self.get_model_config("tester");
        let implementation_json = serde_json::to_string_pretty(&implementation)?;
        let tests = match TesterSkill::run(topic, &plan.summary, &implementation_json, &model_config)
            .await
            .context(format!(
                "Tester failed (provider: {:?}, model: {})",
                model_config.provider, model_config.model
            )) {
            Ok(tests) => tests,
            Err(error) => return self.abort("tester", error).await,
        };
        tracing::info!(
            cases = tests.cases.len(),
            failing = tests.failing_cases(),
            "Tester output"
        );
        self.emit(
            PipelineEvent::new(PipelineEventKind::AgentCompleted, "tester")
                .with_data(serde_json::to_value(&tests)?),
        )
        .await;
        self.pipeline.advance();

        // Stage 4: Reviewing
        self.emit(PipelineEvent::new(PipelineEventKind::AgentStarted, "reviewer"))
            .await;
        let model_config = self.get_model_config("reviewer");
        let test_report_json = serde_json::to_string_pretty(&tests)?;
        let review = match ReviewerSkill::run(
            topic,
            &implementation_json,
            &test_report_json,
            &model_config,
        )
        .await
        .context(format!(
            "Reviewer failed (provider: {:?}, model: {})",
            model_config.provider, model_config.model
        )) {
            Ok(review) => review,
            Err(error) => return self.abort("reviewer", error).await,
        };
        tracing::info!(verdict = %review.verdict, "Reviewer output");
        self.emit(
            PipelineEvent::new(PipelineEventKind::AgentCompleted, "reviewer")
                .with_data(serde_json::to_value(&review)?),
        )
        .await;
        self.pipeline.advance();

        self.emit(PipelineEvent::new(
            PipelineEventKind::PipelineCompleted,
            "coordinator",
        ))
        .await;

        let final_report = render_final_report(topic, &implementation, &tests, &review);
        tracing::info!(length = final_report.len(), "Pipeline completed with final report");

        Ok(PipelineResult {
            plan,
            implementation,
            tests,
            review,
            events: std::mem::take(&mut self.events),
            success: self.pipeline.is_success(),
            final_report,
        })
    }
}

/// Render the user-facing report from the pipeline outputs
fn render_final_report(
    topic: &str,
    implementation: &ImplementationOutput,
    tests: &TestOutput,
    review: &ReviewOutput,
) -> String {
    let mut report = String::new();
    report.push_str(&format!("# Development Report: {}\n\n", topic));
    report.push_str(&format!("**Verdict:** {}\n\n", review.verdict));
    report.push_str(&format!("{}\n\n", review.summary));

    report.push_str("## Implementation\n\n");
    report.push_str(&format!("{}\n\n", implementation.summary));
    for file in &implementation.files {
        report.push_str(&format!("### `{}`\n\n```{}\n{}\n```\n\n", file.path, file.language, file.content));
    }
    if !implementation.dependencies.is_empty() {
        report.push_str("**Dependencies:**\n");
        for dependency in &implementation.dependencies {
            report.push_str(&format!("- {}\n", dependency));
        }
        report.push('\n');
    }

    report.push_str("## Test Results\n\n");
    report.push_str(&format!(
        "{} case(s), {} failing, estimated coverage {:.0}%\n\n",
        tests.cases.len(),
        tests.failing_cases(),
        tests.coverage_estimate * 100.0
    ));
    for issue in &tests.issues {
        report.push_str(&format!("- {}\n", issue));
    }
    if !tests.issues.is_empty() {
        report.push('\n');
    }

    if !review.concerns.is_empty() {
        report.push_str("## Review Concerns\n\n");
        for concern in &review.concerns {
            report.push_str(&format!("- **{}**: {}\n", concern.severity, concern.description));
        }
        report.push('\n');
    }

    if !review.dependency_findings.is_empty() {
        report.push_str("## Dependency Audit\n\n");
        for finding in &review.dependency_findings {
            report.push_str(&format!("- {}\n", finding));
        }
    }

    report.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::reviewer_skill::Concern;
    use crate::skills::tester_skill::TestCase;
    use crate::skills::writer_skill::SourceFile;

    #[test]
    fn test_get_model_config_layering() {
        let mut config = CoordinatorConfig::default();
        config.global_model = Some("anthropic/claude-3.5-sonnet".to_string());
        config
            .per_agent_models
            .insert("tester".to_string(), "openai/gpt-4o-mini".to_string());
        config
            .per_agent_providers
            .insert("reviewer".to_string(), LlmProvider::OpenAI);
        config.base_url = Some("https://gateway.example.dev/v1".to_string());

        let coordinator = Coordinator::new(config);

        // Global model wins where no per-agent override exists.
        let planner = coordinator.get_model_config("planner");
        assert_eq!(planner.provider, LlmProvider::OpenRouter);
        assert_eq!(planner.model, "anthropic/claude-3.5-sonnet");
        // OpenRouter ignores the base_url override.
        assert!(planner.base_url.is_none());

        // Per-agent model override wins.
        let tester = coordinator.get_model_config("tester");
        assert_eq!(tester.model, "openai/gpt-4o-mini");

        // Per-agent provider override carries the base_url through.
        let reviewer = coordinator.get_model_config("reviewer");
        assert_eq!(reviewer.provider, LlmProvider::OpenAI);
        assert_eq!(
            reviewer.base_url.as_deref(),
            Some("https://gateway.example.dev/v1")
        );
    }

    #[test]
    fn test_get_model_config_default_model_per_provider() {
        let coordinator = Coordinator::new(CoordinatorConfig::default());
        let config = coordinator.get_model_config("planner");
        assert_eq!(config.provider, LlmProvider::OpenRouter);
        assert!(config.model.contains('/'), "OpenRouter model ids are namespaced");
    }

    #[test]
    fn test_render_final_report_sections() {
        let implementation = ImplementationOutput {
            summary: "Palindrome checker with normalization.".to_string(),
            files: vec![SourceFile {
                path: "palindrome.py".to_string(),
                language: "python".to_string(),
                content: "def is_palindrome(s): ...".to_string(),
            }],
            dependencies: vec!["pytest>=8".to_string()],
            usage: "python palindrome.py".to_string(),
        };
        let tests = TestOutput {
            strategy: "unit".to_string(),
            cases: vec![TestCase {
                name: "reversed_equals".to_string(),
                kind: "unit".to_string(),
                description: String::new(),
                expected: String::new(),
                verdict: "pass".to_string(),
                notes: None,
            }],
            issues: vec![],
            coverage_estimate: 0.8,
        };
        let review = ReviewOutput {
            verdict: "approved".to_string(),
            summary: "Solid implementation.".to_string(),
            concerns: vec![Concern {
                severity: "minor".to_string(),
                description: "Consider Unicode normalization.".to_string(),
                suggested_fix: None,
            }],
            dependency_findings: vec!["pytest: no known advisories".to_string()],
            confidence: 0.95,
        };

        let report = render_final_report("palindrome checker", &implementation, &tests, &review);
        assert!(report.contains("# Development Report: palindrome checker"));
        assert!(report.contains("**Verdict:** approved"));
        assert!(report.contains("### `palindrome.py`"));
        assert!(report.contains("estimated coverage 80%"));
        assert!(report.contains("## Dependency Audit"));
    }
}
