//! # Swarm Orchestration
//!
//! Sequential pipeline orchestration: stage state machine, event stream,
//! the coordinator that runs the four skills in order, and the top-level
//! runner that wraps the coordinator in fallback retry.

pub mod coordinator;
pub mod events;
pub mod pipeline;
pub mod runner;

pub use coordinator::{Coordinator, CoordinatorConfig, PipelineResult};
pub use events::{PipelineEvent, PipelineEventKind};
pub use pipeline::{Pipeline, PipelineStage};
pub use runner::{apply_override, run_development_pipeline};
