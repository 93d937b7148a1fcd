//! # A2A Agent Definitions
//!
//! Composes the pipeline agents from skills using radkit's Agent::builder().
//! Each agent can run as an A2A server exposing its skill; the coordinator
//! uses the skills' SDK entry points directly.

use crate::models::ModelConfig;
use radkit::agent::{Agent, AgentDefinition};

use crate::skills::{PlannerSkill, ReviewerSkill, TesterSkill, WriterSkill};

/// The Planner Agent
///
/// First agent in the pipeline. Designs the architecture roadmap the rest
/// of the crew implements.
pub fn planner_agent(config: ModelConfig) -> AgentDefinition {
    Agent::builder()
        .with_name("Planner")
        .with_description(
            "Designs milestone-driven architecture plans for coding tasks: \
             requirements, components, technology stack, and risks.",
        )
        .with_skill(PlannerSkill::new(config))
        .build()
}

/// The Writer Agent
///
/// Second agent. Implements the plan into complete source files.
pub fn writer_agent(config: ModelConfig) -> AgentDefinition {
    Agent::builder()
        .with_name("Writer")
        .with_description(
            "Implements architecture plans into production-ready, documented \
             source files with explicit dependencies.",
        )
        .with_skill(WriterSkill::new(config))
        .build()
}

/// The Tester Agent
///
/// Third agent. Designs the test suite and reports per-case verdicts.
pub fn tester_agent(config: ModelConfig) -> AgentDefinition {
    Agent::builder()
        .with_name("Tester")
        .with_description(
            "Designs unit, integration, and edge-case tests for an \
             implementation and reports verdicts and coverage.",
        )
        .with_skill(TesterSkill::new(config))
        .build()
}

/// The Reviewer Agent
///
/// Fourth agent. Final quality gate: review verdict plus dependency audit.
pub fn reviewer_agent(config: ModelConfig) -> AgentDefinition {
    Agent::builder()
        .with_name("Reviewer")
        .with_description(
            "Reviews implementation and test results for quality, security, \
             and dependency health, and delivers the final verdict.",
        )
        .with_skill(ReviewerSkill::new(config))
        .build()
}

/// Create the full development crew in pipeline order:
/// Planner → Writer → Tester → Reviewer
pub fn create_crew(config: ModelConfig) -> Vec<AgentDefinition> {
    vec![
        planner_agent(config.clone()),
        writer_agent(config.clone()),
        tester_agent(config.clone()),
        reviewer_agent(config),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crew_has_one_agent_per_stage() {
        let crew = create_crew(ModelConfig::default());
        assert_eq!(crew.len(), 4);
    }
}
