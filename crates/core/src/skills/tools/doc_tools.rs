//! # Doc Tools
//!
//! Local knowledge-base retrieval. Walks a docs directory, splits files
//! into passages, and ranks them by query-term overlap. Ranking is plain
//! term matching - good enough for a curated internal knowledge base.

use ignore::WalkBuilder;
use radkit::macros::tool;
use radkit::tools::ToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

const DEFAULT_TOP_K: usize = 4;
const DOC_EXTENSIONS: &[&str] = &["md", "txt", "rst"];

/// Arguments for knowledge-base retrieval
#[derive(Deserialize, JsonSchema)]
pub struct SearchDocsArgs {
    /// What to look up in the knowledge base
    pub query: String,
    /// Number of passages to return (default: 4)
    pub top_k: Option<usize>,
}

/// Retrieve relevant passages from the local knowledge base
#[tool(
    description = "Query the local knowledge base for internal standards and documentation. Returns the most relevant passages with their source files."
)]
pub async fn search_docs(args: SearchDocsArgs) -> ToolResult {
    let knowledge_dir = std::env::var("KNOWLEDGE_DIR").unwrap_or_else(|_| "knowledge".to_string());
    let top_k = args.top_k.unwrap_or(DEFAULT_TOP_K);

    if !Path::new(&knowledge_dir).is_dir() {
        return ToolResult::success(json!({
            "query": args.query,
            "passages": [],
            "message": format!("Knowledge base directory '{}' not found.", knowledge_dir),
        }));
    }

    let passages = rank_passages(&knowledge_dir, &args.query, top_k);
    if passages.is_empty() {
        return ToolResult::success(json!({
            "query": args.query,
            "passages": [],
            "message": "No matching passages in the knowledge base.",
        }));
    }

    ToolResult::success(json!({
        "query": args.query,
        "passages": passages
            .iter()
            .map(|p| json!({"file": p.file, "score": p.score, "excerpt": p.excerpt}))
            .collect::<Vec<_>>(),
    }))
}

/// One ranked knowledge-base passage
#[derive(Debug, Clone)]
pub(crate) struct RankedPassage {
    pub file: String,
    pub score: usize,
    pub excerpt: String,
}

/// Walk the knowledge directory and rank all passages against the query
pub(crate) fn rank_passages(dir: &str, query: &str, top_k: usize) -> Vec<RankedPassage> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut ranked = Vec::new();
    for entry in WalkBuilder::new(dir).build().flatten() {
        let path = entry.path();
        if !is_doc_file(path) {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(path) else {
            continue;
        };
        let file = path.display().to_string();
        for passage in split_passages(&content) {
            let score = score_passage(&terms, passage);
            if score > 0 {
                ranked.push(RankedPassage {
                    file: file.clone(),
                    score,
                    excerpt: passage.to_string(),
                });
            }
        }
    }

    // Stable sort keeps document order among equal scores.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(top_k);
    ranked
}

fn is_doc_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| DOC_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

/// Lowercased, deduplicated query terms
fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = query
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    terms.sort();
    terms.dedup();
    terms
}

/// Split file content into blank-line-delimited passages
pub(crate) fn split_passages(content: &str) -> Vec<&str> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Score one passage: total occurrences of query terms, weighted so that
/// passages matching more distinct terms outrank one-term repetition.
pub(crate) fn score_passage(terms: &[String], passage: &str) -> usize {
    let lowered = passage.to_lowercase();
    let mut distinct = 0;
    let mut occurrences = 0;
    for term in terms {
        let count = lowered.matches(term.as_str()).count();
        if count > 0 {
            distinct += 1;
            occurrences += count;
        }
    }
    if distinct == 0 {
        0
    } else {
        distinct * 100 + occurrences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_passages_skips_blank_blocks() {
        let passages = split_passages("first block\n\n\n\nsecond block\n\n  \n\nthird");
        assert_eq!(passages, vec!["first block", "second block", "third"]);
    }

    #[test]
    fn test_score_prefers_distinct_term_matches() {
        let terms = query_terms("error handling");
        let repeated = score_passage(&terms, "error error error error");
        let both = score_passage(&terms, "error handling conventions");
        assert!(both > repeated, "two distinct terms must beat one repeated term");
    }

    #[test]
    fn test_score_zero_without_matches() {
        let terms = query_terms("retry policy");
        assert_eq!(score_passage(&terms, "unrelated content"), 0);
    }

    #[test]
    fn test_query_terms_normalized() {
        let terms = query_terms("Error, error HANDLING?");
        assert_eq!(terms, vec!["error", "handling"]);
    }

    #[test]
    fn test_rank_passages_over_a_real_directory() {
        let dir = std::env::temp_dir().join(format!("codeforge-kb-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("standards.md"),
            "# Standards\n\nAll retry loops log every attempt.\n\nUnrelated paragraph.",
        )
        .unwrap();
        std::fs::write(dir.join("notes.txt"), "retry budgets are set per service").unwrap();
        std::fs::write(dir.join("image.png"), "binary-ish").unwrap();

        let ranked = rank_passages(dir.to_str().unwrap(), "retry attempt", 10);
        assert!(!ranked.is_empty());
        assert!(ranked[0].excerpt.contains("retry"));
        assert!(ranked.iter().all(|p| !p.file.ends_with(".png")));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
