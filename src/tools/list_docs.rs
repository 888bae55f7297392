use crate::resolve::{Resolver, normalize_path};
use rmcp::schemars;
use serde::Deserialize;

/// Parameters for list_docs tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListDocsRequest {
    /// Directory to list, e.g. "guides" or "bun://guides/http". Omit for the top level.
    #[serde(default)]
    pub path: Option<String>,
}

/// Lists the root or a directory as JSON; other paths get a short explanation.
pub fn handle_list_docs(resolver: &Resolver, request: ListDocsRequest) -> String {
    let path = request.path.unwrap_or_default();
    match resolver.list(&path) {
        Some(entries) => {
            serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
        }
        None => {
            let slug = normalize_path(&path);
            match resolver.lookup(&slug) {
                Some(resource) => format!(
                    "{} is a document, not a directory. Use read_doc to read it.",
                    resource.uri
                ),
                None => format!("No directory found at '{}'.", slug),
            }
        }
    }
}
