//! # Planner Skill
//!
//! First stage of the pipeline. Turns a coding task into a structured
//! architecture plan: components, stack, milestones, and risks.

use crate::models::ModelConfig;
use crate::run_llm_worker;
use crate::skills::artifact_registry::{MilestoneSummary, PlanArtifact};
use crate::skills::tools::{calc_tools, doc_tools, search_tools};
use async_trait::async_trait;
use radkit::agent::{Artifact, OnRequestResult, SkillHandler};
use radkit::errors::{AgentError, AgentResult};
use radkit::macros::{skill, LLMOutput};
use radkit::models::Content;
use radkit::runtime::context::{ProgressSender, State};
use radkit::runtime::AgentRuntime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A planned system component
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct ComponentPlan {
    /// Component name
    pub name: String,
    /// What this component is responsible for
    pub responsibility: String,
    /// Names of components this one depends on
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// A development milestone
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct Milestone {
    /// Short identifier (e.g., "M1")
    pub id: String,
    /// Milestone title
    pub title: String,
    /// Concrete deliverable that marks this milestone done
    pub deliverable: String,
}

/// A technical risk with its mitigation
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct Risk {
    /// Description of the risk
    pub description: String,
    /// How to mitigate it
    pub mitigation: String,
}

/// Output from the planner skill
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct PlanOutput {
    /// Executive summary of the plan
    pub summary: String,
    /// Functional and non-functional requirements
    pub requirements: Vec<String>,
    /// System components and their responsibilities
    pub components: Vec<ComponentPlan>,
    /// Selected technology stack (languages, frameworks, libraries)
    pub stack: Vec<String>,
    /// Implementation phases in order
    pub milestones: Vec<Milestone>,
    /// Identified risks and mitigations
    #[serde(default)]
    pub risks: Vec<Risk>,
}

/// Planner skill for designing the development roadmap
#[skill(
    id = "plan",
    name = "Plan",
    description = "Designs a milestone-driven architecture plan for a coding task: requirements, components, stack, milestones, risks.",
    tags = ["planning", "architecture", "roadmap"],
    examples = ["Plan a palindrome checker", "Design a REST service architecture"],
    input_modes = ["text/plain", "application/json"],
    output_modes = ["application/json"]
)]
pub struct PlannerSkill {
    config: ModelConfig,
}

impl PlannerSkill {
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
    pub async fn run(topic: &str, config: &ModelConfig) -> anyhow::Result<PlanOutput> {
        let prompt = format!("Coding task: {}", topic);
        run_llm_worker!(
            config,
            PlanOutput,
            SYSTEM_PROMPT,
            prompt,
            doc_tools::search_docs,
            search_tools::search_web,
            calc_tools::calculate,
        )
    }
}

#[async_trait]
impl SkillHandler for PlannerSkill {
    async fn on_request(
        &self,
        _state: &mut State,
        progress: &ProgressSender,
        _runtime: &dyn AgentRuntime,
        content: Content,
    ) -> AgentResult<OnRequestResult> {
        let topic = content.first_text().unwrap_or_default();

        progress.send_update("Designing architecture plan...").await?;

        let result = run_llm_worker!(
            &self.config,
            PlanOutput,
            SYSTEM_PROMPT,
            topic,
            doc_tools::search_docs,
            search_tools::search_web,
            calc_tools::calculate,
        )
        .map_err(|e| AgentError::Internal {
            component: "planner_skill".to_string(),
            reason: e.to_string(),
        })?;

        progress.send_update("Plan complete.").await?;

        let artifact_data = PlanArtifact {
            summary: result.summary.clone(),
            component_count: result.components.len(),
            stack: result.stack.clone(),
            milestones: result
                .milestones
                .iter()
                .map(|m| MilestoneSummary {
                    id: m.id.clone(),
                    title: m.title.clone(),
                    deliverable: m.deliverable.clone(),
                })
                .collect(),
            risk_count: result.risks.len(),
        };

        let artifact = Artifact::from_json("plan.json", &artifact_data).map_err(|e| {
            AgentError::Internal {
                component: "planner_skill".to_string(),
                reason: format!("Failed to create artifact: {}", e),
            }
        })?;

        Ok(OnRequestResult::Completed {
            message: Some(Content::from_text(&result.summary)),
            artifacts: vec![artifact],
        })
    }
}

const SYSTEM_PROMPT: &str = include_str!("defaults/planner.md");
