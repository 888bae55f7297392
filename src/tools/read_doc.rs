use crate::resolve::{ReadResult, Resolver};
use rmcp::schemars;
use serde::Deserialize;

/// Parameters for read_doc tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadDocRequest {
    /// Document or directory path, e.g. "api/websockets", "api/websockets.md", or "bun://guides"
    pub path: String,
}

/// Reads a document (or lists a directory) and renders it as text.
pub fn handle_read_doc(resolver: &Resolver, request: &ReadDocRequest) -> ReadResult {
    let result = resolver.resolve(&request.path);
    if !result.is_success() {
        tracing::debug!(path = %request.path, uri = %result.uri(), "Read did not resolve to content");
    }
    result
}
