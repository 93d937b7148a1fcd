//! # Code Tools
//!
//! Focused search tools for the writer, tester, and reviewer stages. Each
//! shapes the query toward its concern before hitting the shared search
//! backend, and the audit tool fans one query out per dependency.

use super::search_tools::{fetch_search_results, format_report};
use radkit::macros::tool;
use radkit::tools::ToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

const FOCUSED_MAX_RESULTS: u32 = 3;

/// Arguments for a focused code search
#[derive(Deserialize, JsonSchema)]
pub struct CodeQueryArgs {
    /// Concise search phrase focused on code elements
    pub query: String,
}

/// Search for language syntax and code patterns
#[tool(
    description = "Search for correct language syntax, standard library usage, code patterns, and language-specific best practices. Provide a concise phrase focused on code elements."
)]
pub async fn search_code_syntax(args: CodeQueryArgs) -> ToolResult {
    let focused_query = format!("{} code syntax example best practice", args.query);
    tracing::info!(query = %focused_query, "Focused code syntax search");

    let results = fetch_search_results(&focused_query, FOCUSED_MAX_RESULTS)
        .await
        .unwrap_or_default();
    ToolResult::success(json!({
        "query": args.query,
        "report": format!(
            "--- Code Syntax Results for '{}' ---\n\n{}",
            args.query,
            format_report(&focused_query, &results)
        ),
    }))
}

/// Search for testing frameworks and known failure modes
#[tool(
    description = "Search for testing frameworks, test case patterns, mocking guides, and common bug or vulnerability types. Provide a concise query about testing concepts."
)]
pub async fn search_testing_practice(args: CodeQueryArgs) -> ToolResult {
    let focused_query = format!("testing framework {} test case example vulnerability", args.query);
    tracing::info!(query = %focused_query, "Focused testing practice search");

    let results = fetch_search_results(&focused_query, FOCUSED_MAX_RESULTS)
        .await
        .unwrap_or_default();
    ToolResult::success(json!({
        "query": args.query,
        "report": format!(
            "--- Testing Results for '{}' ---\n\n{}",
            args.query,
            format_report(&focused_query, &results)
        ),
    }))
}

/// Arguments for the dependency audit
#[derive(Deserialize, JsonSchema)]
pub struct AuditDependenciesArgs {
    /// Comma-separated list of dependencies with versions
    /// (e.g., "serde==1.0, tokio>=1.30")
    pub dependency_list: String,
}

/// Audit dependencies for advisories and license concerns
#[tool(
    description = "Performs a security and license check on a list of dependencies. Provide a comma-separated list of libraries with versions. Surfaces known advisories and license conflicts."
)]
pub async fn audit_dependencies(args: AuditDependenciesArgs) -> ToolResult {
    let dependencies = parse_dependency_list(&args.dependency_list);
    if dependencies.is_empty() {
        return ToolResult::error("No dependencies provided for audit.");
    }

    let mut sections = Vec::new();
    for dependency in &dependencies {
        let focused_query = format!("security vulnerability and license for {}", dependency);
        tracing::info!(dependency = %dependency, "Auditing dependency");

        let results = fetch_search_results(&focused_query, FOCUSED_MAX_RESULTS)
            .await
            .unwrap_or_default();
        sections.push(format!(
            "Audit Results for **{}**:\n{}",
            dependency,
            format_report(&focused_query, &results)
        ));
    }

    ToolResult::success(json!({
        "dependencies": dependencies,
        "report": format!("--- Dependency Audit Report ---\n\n{}", sections.join("\n\n")),
    }))
}

/// Split a comma-separated dependency list into trimmed, non-empty entries
fn parse_dependency_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dependency_list() {
        let deps = parse_dependency_list("serde==1.0, tokio>=1.30 ,, ");
        assert_eq!(deps, vec!["serde==1.0", "tokio>=1.30"]);
    }

    #[test]
    fn test_parse_dependency_list_empty() {
        assert!(parse_dependency_list("").is_empty());
        assert!(parse_dependency_list(" , ,").is_empty());
    }
}
