use crate::error::SearchError;
use crate::search::SearchEngine;
use rmcp::schemars;
use serde::Deserialize;

/// Parameters for search_docs tool
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SearchDocsRequest {
    /// Regular expression to search for, e.g. "Web[Ss]ocket"
    pub pattern: String,
    /// Only search documents whose path starts with this prefix, e.g. "api/" or "guides/"
    #[serde(default)]
    pub path: Option<String>,
    /// Maximum number of results to return (default: 30)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Regex flags: i (ignore case), m (multi-line), s (dot matches newline), x (extended)
    #[serde(default)]
    pub flags: Option<String>,
}

/// Runs the search and encodes the ranked results as a JSON array of `{uri, matchCount}`.
pub fn handle_search_docs(
    engine: &SearchEngine,
    request: &SearchDocsRequest,
) -> Result<String, SearchError> {
    let results = engine.search(
        &request.pattern,
        request.path.as_deref(),
        request.limit,
        request.flags.as_deref(),
    )?;

    Ok(serde_json::to_string_pretty(&results).unwrap_or_else(|_| "[]".to_string()))
}
