//! web_search: sample search results keyed by topic

use async_trait::async_trait;
use serde::Serialize;
use toolloop_domain::{Tool, ToolArguments, ToolError, ToolParameter, ToolSpec};

pub const WEB_SEARCH: &str = "web_search";

/// Number of results when `num_results` is not given
pub const DEFAULT_NUM_RESULTS: usize = 3;

#[derive(Debug, Clone, Serialize)]
struct SearchHit {
    title: String,
    url: String,
    snippet: String,
}

impl SearchHit {
    fn new(title: &str, url: &str, snippet: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
        }
    }
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    results: Vec<SearchHit>,
}

fn sample_results(topic: &str) -> Vec<SearchHit> {
    match topic {
        "python" => vec![
            SearchHit::new(
                "Python official site",
                "python.org",
                "Python is an interpreted, general-purpose programming language first released in 1991.",
            ),
            SearchHit::new(
                "Python documentation",
                "docs.python.org",
                "Language reference and standard library documentation.",
            ),
        ],
        "rust" => vec![
            SearchHit::new(
                "Rust programming language",
                "rust-lang.org",
                "Rust is a systems language focused on safety, speed and concurrency.",
            ),
            SearchHit::new(
                "The Rust Book",
                "doc.rust-lang.org/book",
                "An introductory book about Rust.",
            ),
        ],
        "agent" => vec![SearchHit::new(
            "Software agents",
            "en.wikipedia.org/wiki/Software_agent",
            "An agent is a program that perceives its environment, makes decisions and takes actions.",
        )],
        "machine learning" => vec![
            SearchHit::new(
                "Machine learning basics",
                "ml-tutorial.com",
                "Core concepts of machine learning with worked examples.",
            ),
            SearchHit::new(
                "Deep learning courses",
                "deeplearning.ai",
                "Structured courses on deep learning.",
            ),
        ],
        _ => Vec::new(),
    }
}

const TOPICS: &[&str] = &["python", "rust", "agent", "machine learning"];

/// The `web_search` tool, backed by fixed sample results.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSearchTool;

impl WebSearchTool {
    fn search(query: &str, limit: usize) -> Vec<SearchHit> {
        let needle = query.to_lowercase();
        let mut hits = TOPICS
            .iter()
            .find(|topic| topic.contains(&needle) || needle.contains(*topic))
            .map(|topic| sample_results(topic))
            .unwrap_or_default();

        if hits.is_empty() {
            hits.push(SearchHit::new(
                &format!("Search results: {}", query),
                "example.com",
                &format!("General information about {}.", query),
            ));
        }

        hits.truncate(limit.max(1));
        hits
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            WEB_SEARCH,
            "Search the web for facts you do not know. Input: the search query.",
        )
        .with_parameter(ToolParameter::new("query", "Search keywords", true))
        .with_parameter(
            ToolParameter::new("num_results", "Number of results to return", false)
                .with_type("integer"),
        )
    }

    async fn execute(&self, args: &ToolArguments) -> Result<String, ToolError> {
        let query = args
            .require_primary("query")
            .map_err(ToolError::invalid_argument)?;
        let limit = args
            .get_i64("num_results")
            .map(|n| n.max(1) as usize)
            .unwrap_or(DEFAULT_NUM_RESULTS);

        let results = Self::search(query, limit);

        if args.is_text() {
            let lines: Vec<String> = results
                .iter()
                .map(|hit| format!("{} ({}): {}", hit.title, hit.url, hit.snippet))
                .collect();
            return Ok(lines.join("\n"));
        }

        serde_json::to_string(&SearchResponse { query, results })
            .map_err(|e| ToolError::execution_failed(e.to_string()))
    }
}
