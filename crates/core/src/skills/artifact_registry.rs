//! # A2A Artifact Registry
//!
//! Shared artifact types for inter-agent communication. These types are
//! serialized to JSON and returned in `OnRequestResult::Completed` by the
//! pipeline skills.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Planner Artifacts
// ============================================================================

/// Summary of one development milestone
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MilestoneSummary {
    pub id: String,
    pub title: String,
    pub deliverable: String,
}

/// Artifact from PlannerSkill containing the architecture plan
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlanArtifact {
    pub summary: String,
    pub component_count: usize,
    pub stack: Vec<String>,
    pub milestones: Vec<MilestoneSummary>,
    pub risk_count: usize,
}

// ============================================================================
// Writer Artifacts
// ============================================================================

/// Summary of one produced source file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FileSummary {
    pub path: String,
    pub language: String,
    pub lines: usize,
}

/// Artifact from WriterSkill containing the implementation overview
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImplementationArtifact {
    pub files: Vec<FileSummary>,
    pub dependency_count: usize,
    pub summary: String,
}

// ============================================================================
// Tester Artifacts
// ============================================================================

/// Artifact from TesterSkill containing the test run overview
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TestRunArtifact {
    pub strategy: String,
    pub total_cases: usize,
    pub failing_cases: usize,
    pub coverage_estimate: f32,
    pub issue_count: usize,
}

// ============================================================================
// Reviewer Artifacts
// ============================================================================

/// Summary of a review concern
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConcernSummary {
    pub severity: String,
    pub description: String,
}

/// Artifact from ReviewerSkill containing the final review
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReviewArtifact {
    pub verdict: String,
    pub confidence: f32,
    pub concerns: Vec<ConcernSummary>,
    pub blocking_count: usize,
}
