//! # Search Tools
//!
//! Web search for the pipeline skills, backed by a SearXNG-compatible
//! metasearch endpoint with a small fallback chain.

use radkit::macros::tool;
use radkit::tools::ToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

/// Arguments for web search
#[derive(Deserialize, JsonSchema)]
pub struct SearchWebArgs {
    /// Search query
    pub query: String,
    /// Maximum number of results (default: 5)
    pub max_results: Option<u32>,
}

/// Search the web for information
#[tool(
    description = "Search the web for current information. Returns search results with titles, URLs, and snippets."
)]
pub async fn search_web(args: SearchWebArgs) -> ToolResult {
    let max_results = args.max_results.unwrap_or(5);

    match fetch_search_results(&args.query, max_results).await {
        Some(results) => ToolResult::success(json!({
            "query": args.query,
            "results": results,
            "report": format_report(&args.query, &results),
        })),
        None => ToolResult::success(json!({
            "query": args.query,
            "results": [],
            "report": format!("No search results found for '{}'.", args.query),
        })),
    }
}

/// Query the metasearch backend, trying endpoints in order.
///
/// Endpoint priority: `SEARCH_ENDPOINT_URL` env var, then public SearXNG
/// instances, then a local instance. Returns `None` when every endpoint
/// fails or returns no result array.
pub(crate) async fn fetch_search_results(
    query: &str,
    max_results: u32,
) -> Option<Vec<serde_json::Value>> {
    let mut endpoints: Vec<String> = Vec::new();

    if let Ok(custom_url) = std::env::var("SEARCH_ENDPOINT_URL") {
        endpoints.push(format!("{}/search", custom_url.trim_end_matches('/')));
    }

    // Public SearXNG instances (subset of reliable ones)
    endpoints.extend([
        "https://searx.be/search".to_string(),
        "https://search.sapti.me/search".to_string(),
        "https://searx.tiekoetter.com/search".to_string(),
    ]);

    endpoints.push("http://localhost:8888/search".to_string());

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .ok()?;

    for endpoint in endpoints {
        let url = format!("{}?q={}&format=json", endpoint, urlencoding::encode(query));

        if let Ok(response) = client.get(&url).send().await {
            if let Ok(body) = response.json::<serde_json::Value>().await {
                if let Some(results) = body.get("results").and_then(|r| r.as_array()) {
                    let limited: Vec<serde_json::Value> = results
                        .iter()
                        .take(max_results as usize)
                        .map(|r| {
                            json!({
                                "title": r.get("title").and_then(|t| t.as_str()).unwrap_or("Untitled result"),
                                "url": r.get("url").and_then(|u| u.as_str()).unwrap_or(""),
                                "snippet": r.get("content").and_then(|c| c.as_str()).unwrap_or("No summary provided.")
                            })
                        })
                        .collect();
                    return Some(limited);
                }
            }
        }
    }

    None
}

/// Render results as the numbered text block the agents quote from
pub(crate) fn format_report(query: &str, results: &[serde_json::Value]) -> String {
    if results.is_empty() {
        return format!("No search results found for '{}'.", query);
    }

    let blocks: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            format!(
                "Result {}: {}\nURL: {}\nSummary: {}",
                index + 1,
                result.get("title").and_then(|t| t.as_str()).unwrap_or("Untitled result"),
                result.get("url").and_then(|u| u.as_str()).unwrap_or(""),
                result.get("snippet").and_then(|s| s.as_str()).unwrap_or("No summary provided.")
            )
        })
        .collect();

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_report_numbers_results() {
        let results = vec![
            json!({"title": "Rust Book", "url": "https://doc.rust-lang.org/book/", "snippet": "The book."}),
            json!({"title": "Rustonomicon", "url": "https://doc.rust-lang.org/nomicon/", "snippet": "Unsafe."}),
        ];
        let report = format_report("rust", &results);
        assert!(report.starts_with("Result 1: Rust Book"));
        assert!(report.contains("Result 2: Rustonomicon"));
        assert!(report.contains("URL: https://doc.rust-lang.org/book/"));
    }

    #[test]
    fn test_format_report_empty() {
        let report = format_report("nothing", &[]);
        assert!(report.contains("No search results"));
        assert!(report.contains("nothing"));
    }

    #[test]
    fn test_format_report_tolerates_missing_fields() {
        let results = vec![json!({"url": "https://example.dev"})];
        let report = format_report("q", &results);
        assert!(report.contains("Untitled result"));
        assert!(report.contains("No summary provided."));
    }
}
