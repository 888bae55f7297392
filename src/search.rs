//! Regex search over indexed documents, ranked by match count.

use crate::error::SearchError;
use crate::index::{DocIndex, slug_of};
use crate::resolve::{LoadFailure, load_text};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::sync::Arc;

/// Flag characters understood by the engine; `g` is always on.
const KNOWN_FLAGS: &str = "gimsux";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub uri: String,
    pub match_count: usize,
}

/// Deduplicates flags, drops unknown characters, and forces `g`.
///
/// The result always starts with `g`, followed by the remaining known flags
/// in first-seen order.
pub fn normalize_flags(flags: Option<&str>) -> String {
    let mut normalized = String::from("g");
    for flag in flags.unwrap_or_default().chars() {
        if KNOWN_FLAGS.contains(flag) && !normalized.contains(flag) {
            normalized.push(flag);
        }
    }
    normalized
}

/// Compiles `pattern` with JavaScript-style flag characters.
pub fn compile_pattern(pattern: &str, flags: &str) -> Result<Regex, SearchError> {
    if pattern.is_empty() {
        return Err(SearchError::EmptyPattern);
    }

    RegexBuilder::new(pattern)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .ignore_whitespace(flags.contains('x'))
        .build()
        .map_err(|source| SearchError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Lexical search over an immutable index.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    index: Arc<DocIndex>,
}

impl SearchEngine {
    pub const fn new(index: Arc<DocIndex>) -> Self {
        Self { index }
    }

    /// Counts non-overlapping matches in every document under `path_prefix`.
    ///
    /// Results are sorted by descending count; ties keep index order. Zero-match,
    /// oversized, and unreadable documents are left out.
    pub fn search(
        &self,
        pattern: &str,
        path_prefix: Option<&str>,
        limit: Option<usize>,
        flags: Option<&str>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let flags = normalize_flags(flags);
        let regex = compile_pattern(pattern, &flags)?;
        let prefix = path_prefix.map(clean_prefix).unwrap_or_default();
        let limit = limit.unwrap_or(self.index.settings().default_search_limit);
        let max_bytes = self.index.settings().max_document_bytes;

        let mut scanned = 0usize;
        let mut results: Vec<SearchResult> = Vec::new();
        for resource in self.index.documents() {
            if !slug_of(&resource.uri).starts_with(prefix) {
                continue;
            }
            let Some(path) = resource.file_path.as_deref() else {
                continue;
            };

            scanned += 1;
            let text = match load_text(path, max_bytes) {
                Ok(text) => text,
                Err(LoadFailure::TooLarge { size }) => {
                    tracing::debug!(uri = %resource.uri, size, "Skipping oversized document");
                    continue;
                }
                Err(LoadFailure::Unreadable(reason)) => {
                    tracing::debug!(uri = %resource.uri, "Skipping unreadable document: {}", reason);
                    continue;
                }
            };

            let match_count = regex.find_iter(&text).count();
            if match_count > 0 {
                results.push(SearchResult {
                    uri: resource.uri.clone(),
                    match_count,
                });
            }
        }

        results.sort_by(|a, b| b.match_count.cmp(&a.match_count));
        let total = results.len();
        results.truncate(limit);

        tracing::debug!(
            pattern,
            flags = %flags,
            prefix,
            scanned,
            matched = total,
            returned = results.len(),
            "Search complete"
        );

        Ok(results)
    }
}

/// Prefix filters compare against slugs, so drop the scheme and leading `/`.
fn clean_prefix(prefix: &str) -> &str {
    slug_of(prefix.trim()).trim_start_matches('/')
}
