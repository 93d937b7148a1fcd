//! # Radkit-Compatible Tools
//!
//! Tools annotated with `#[tool]` macro for use in Skills.
//! These are the building blocks the pipeline skills use to ground their
//! output: web search, knowledge-base retrieval, arithmetic, and the
//! focused code/testing/audit searches.

pub mod calc_tools;
pub mod code_tools;
pub mod doc_tools;
pub mod search_tools;
