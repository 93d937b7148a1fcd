//! # Writer Skill
//!
//! Second stage of the pipeline. Implements the architecture plan into
//! complete source files with dependencies and usage notes.

use crate::models::ModelConfig;
use crate::run_llm_worker;
use crate::skills::artifact_registry::{FileSummary, ImplementationArtifact};
use crate::skills::tools::{code_tools, doc_tools, search_tools};
use async_trait::async_trait;
use radkit::agent::{Artifact, OnRequestResult, SkillHandler};
use radkit::errors::{AgentError, AgentResult};
use radkit::macros::{skill, LLMOutput};
use radkit::models::Content;
use radkit::runtime::context::{ProgressSender, State};
use radkit::runtime::AgentRuntime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One produced source file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct SourceFile {
    /// Relative path (e.g., "src/palindrome.py")
    pub path: String,
    /// Language of the file contents
    pub language: String,
    /// Complete file contents, no elisions
    pub content: String,
}

/// Output from the writer skill
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct ImplementationOutput {
    /// Short description of what was implemented
    pub summary: String,
    /// All source files, complete
    pub files: Vec<SourceFile>,
    /// External dependencies with version constraints
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Setup and usage instructions
    pub usage: String,
}

/// Writer skill for implementing the plan
#[skill(
    id = "write",
    name = "Write Code",
    description = "Implements an architecture plan into production-ready source files with documentation and dependencies.",
    tags = ["implementation", "code-generation"],
    examples = ["Implement the planned palindrome checker", "Write the service from this plan"],
    input_modes = ["text/plain", "application/json"],
    output_modes = ["application/json"]
)]
pub struct WriterSkill {
    config: ModelConfig,
}

impl WriterSkill {
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
    ///
    /// Receives the plan as JSON so the implementation can follow it
    /// component by component.
    pub async fn run(
        topic: &str,
        plan_json: &str,
        config: &ModelConfig,
    ) -> anyhow::Result<ImplementationOutput> {
        let prompt = format!(
            "Coding task: {}\n\nArchitecture plan to implement:\n{}",
            topic, plan_json
        );
        run_llm_worker!(
            config,
            ImplementationOutput,
            SYSTEM_PROMPT,
            prompt,
            doc_tools::search_docs,
            search_tools::search_web,
            code_tools::search_code_syntax,
        )
    }
}

#[async_trait]
impl SkillHandler for WriterSkill {
    async fn on_request(
        &self,
        _state: &mut State,
        progress: &ProgressSender,
        _runtime: &dyn AgentRuntime,
        content: Content,
    ) -> AgentResult<OnRequestResult> {
        let input = content.first_text().unwrap_or_default();

        progress.send_update("Implementing the plan...").await?;

        let result = run_llm_worker!(
            &self.config,
            ImplementationOutput,
            SYSTEM_PROMPT,
            input,
            doc_tools::search_docs,
            search_tools::search_web,
            code_tools::search_code_syntax,
        )
        .map_err(|e| AgentError::Internal {
            component: "writer_skill".to_string(),
            reason: e.to_string(),
        })?;

        progress.send_update("Implementation complete.").await?;

        let artifact_data = ImplementationArtifact {
            files: result
                .files
                .iter()
                .map(|f| FileSummary {
                    path: f.path.clone(),
                    language: f.language.clone(),
                    lines: f.content.lines().count(),
                })
                .collect(),
            dependency_count: result.dependencies.len(),
            summary: result.summary.clone(),
        };

        let artifact = Artifact::from_json("implementation.json", &artifact_data).map_err(|e| {
            AgentError::Internal {
                component: "writer_skill".to_string(),
                reason: format!("Failed to create artifact: {}", e),
            }
        })?;

        Ok(OnRequestResult::Completed {
            message: Some(Content::from_text(&format!(
                "Implemented {} file(s): {}",
                result.files.len(),
                result.summary
            ))),
            artifacts: vec![artifact],
        })
    }
}

const SYSTEM_PROMPT: &str = include_str!("defaults/writer.md");
