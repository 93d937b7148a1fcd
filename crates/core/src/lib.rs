//! # CodeForge Core
//!
//! Business logic for the CodeForge development pipeline: planner → writer
//! → tester → reviewer, with provider/model fallback retry around each run.
//!
//! ## Architecture
//!
//! - `models` - Centralized LLM provider configuration
//! - `fallback` - Attempt planning and the retry executor
//! - `skills/` - A2A-native pipeline skills and their tools
//! - `swarm/` - Sequential orchestration and the top-level runner
//!
//! ## Usage
//!
//! ```rust,ignore
//! use codeforge_core::swarm::run_development_pipeline;
//!
//! let report = run_development_pipeline("Build a palindrome checker", None).await?;
//! ```

pub mod fallback;
pub mod models;
pub mod skills;
pub mod swarm;
