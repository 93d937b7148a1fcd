//! Default prompt templates bundled at compile time.
//!
//! One system prompt per pipeline stage, included from `defaults/`.

/// Planner - designs the architecture and implementation roadmap
pub const PLANNER: &str = include_str!("defaults/planner.md");

/// Writer - implements the plan into source files
pub const WRITER: &str = include_str!("defaults/writer.md");

/// Tester - designs the test strategy and reports results
pub const TESTER: &str = include_str!("defaults/tester.md");

/// Reviewer - audits quality, security, and dependencies
pub const REVIEWER: &str = include_str!("defaults/reviewer.md");

/// All default prompts with their slugs
pub fn all_defaults() -> Vec<(&'static str, &'static str)> {
    vec![
        ("planner", PLANNER),
        ("writer", WRITER),
        ("tester", TESTER),
        ("reviewer", REVIEWER),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_prompts_non_empty() {
        for (slug, content) in all_defaults() {
            assert!(!content.is_empty(), "Prompt '{}' should not be empty", slug);
            assert!(content.len() > 50, "Prompt '{}' seems too short", slug);
        }
    }

    #[test]
    fn test_prompt_count() {
        assert_eq!(all_defaults().len(), 4, "Should have one prompt per stage");
    }
}
