//! # Pipeline Stages
//!
//! Defines the stages of the development pipeline.

use serde::{Deserialize, Serialize};

/// Stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Planner designing the architecture
    Planning,
    /// Writer implementing the plan
    Writing,
    /// Tester designing and evaluating tests
    Testing,
    /// Reviewer delivering the final verdict
    Reviewing,
    /// Complete
    Complete,
    /// Failed
    Failed,
}

impl PipelineStage {
    /// Agent identifier responsible for this stage, if any
    pub fn agent_id(&self) -> Option<&'static str> {
        match self {
            PipelineStage::Planning => Some("planner"),
            PipelineStage::Writing => Some("writer"),
            PipelineStage::Testing => Some("tester"),
            PipelineStage::Reviewing => Some("reviewer"),
            PipelineStage::Complete | PipelineStage::Failed => None,
        }
    }
}

/// The pipeline state machine: strictly linear, no loopbacks
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Current stage
    pub stage: PipelineStage,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            stage: PipelineStage::Planning,
        }
    }
}

impl Pipeline {
    /// Create a new pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next stage
    pub fn advance(&mut self) {
        self.stage = match self.stage {
            PipelineStage::Planning => PipelineStage::Writing,
            PipelineStage::Writing => PipelineStage::Testing,
            PipelineStage::Testing => PipelineStage::Reviewing,
            PipelineStage::Reviewing => PipelineStage::Complete,
            PipelineStage::Complete => PipelineStage::Complete,
            PipelineStage::Failed => PipelineStage::Failed,
        };
    }

    /// Fail the pipeline
    pub fn fail(&mut self) {
        self.stage = PipelineStage::Failed;
    }

    /// Check if pipeline is complete
    pub fn is_complete(&self) -> bool {
        matches!(self.stage, PipelineStage::Complete | PipelineStage::Failed)
    }

    /// Check if pipeline succeeded
    pub fn is_success(&self) -> bool {
        self.stage == PipelineStage::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advances_through_all_stages_in_order() {
        let mut pipeline = Pipeline::new();
        assert_eq!(pipeline.stage, PipelineStage::Planning);

        pipeline.advance();
        assert_eq!(pipeline.stage, PipelineStage::Writing);
        pipeline.advance();
        assert_eq!(pipeline.stage, PipelineStage::Testing);
        pipeline.advance();
        assert_eq!(pipeline.stage, PipelineStage::Reviewing);
        pipeline.advance();
        assert_eq!(pipeline.stage, PipelineStage::Complete);
        assert!(pipeline.is_complete());
        assert!(pipeline.is_success());
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut pipeline = Pipeline::new();
        for _ in 0..10 {
            pipeline.advance();
        }
        assert_eq!(pipeline.stage, PipelineStage::Complete);
    }

    #[test]
    fn test_failed_is_terminal_and_not_success() {
        let mut pipeline = Pipeline::new();
        pipeline.advance();
        pipeline.fail();
        assert_eq!(pipeline.stage, PipelineStage::Failed);
        pipeline.advance();
        assert_eq!(pipeline.stage, PipelineStage::Failed);
        assert!(pipeline.is_complete());
        assert!(!pipeline.is_success());
    }

    #[test]
    fn test_stage_agent_ids() {
        assert_eq!(PipelineStage::Planning.agent_id(), Some("planner"));
        assert_eq!(PipelineStage::Reviewing.agent_id(), Some("reviewer"));
        assert_eq!(PipelineStage::Complete.agent_id(), None);
    }
}
