//! MCP server: documentation resources plus list, read, and search tools.

use crate::config::SCHEME;
use crate::error::SearchError;
use crate::index::{DocIndex, ListingEntry};
use crate::resolve::Resolver;
use crate::search::SearchEngine;
use crate::tools::{
    ListDocsRequest, ReadDocRequest, SearchDocsRequest, handle_list_docs, handle_read_doc,
    handle_search_docs,
};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP Server for Bun documentation queries
#[derive(Clone)]
pub struct DocServer {
    resolver: Resolver,
    engine: SearchEngine,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocServer")
            .field("resources", &self.resolver.index().len())
            .finish()
    }
}

#[tool_router]
impl DocServer {
    /// Create a new DocServer over a built index.
    pub fn new(index: Arc<DocIndex>) -> Self {
        Self {
            resolver: Resolver::new(index.clone()),
            engine: SearchEngine::new(index),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List Bun documentation. Without a path, lists top-level pages, the guides directory, and ecosystem pages. With a directory path (e.g. 'guides' or 'guides/http'), lists its direct children."
    )]
    async fn list_docs(&self, Parameters(request): Parameters<ListDocsRequest>) -> String {
        handle_list_docs(&self.resolver, request)
    }

    #[tool(
        description = "Read a Bun documentation page by path (e.g. 'api/websockets' or 'bun://cli/run'). Directory paths return their listing."
    )]
    async fn read_doc(&self, Parameters(request): Parameters<ReadDocRequest>) -> String {
        let (_, text) = handle_read_doc(&self.resolver, &request).render();
        text
    }

    #[tool(
        description = "Search Bun documentation with a regular expression. Returns a JSON array of {uri, matchCount} ordered by match count. Optional path prefix filter, result limit (default 30), and flags (i, m, s, x)."
    )]
    async fn search_docs(
        &self,
        Parameters(request): Parameters<SearchDocsRequest>,
    ) -> Result<String, McpError> {
        let engine = self.engine.clone();
        tokio::task::spawn_blocking(move || handle_search_docs(&engine, &request))
            .await
            .map_err(|e| McpError::internal_error(format!("Search task failed: {}", e), None))?
            .map_err(search_error)
    }
}

#[tool_handler]
impl ServerHandler for DocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
        )
        .with_protocol_version(ProtocolVersion::V_2024_11_05)
        .with_server_info(Implementation::from_build_env())
        .with_instructions(format!(
            "bun-docs-mcp: Bun documentation matched to the installed Bun version. \
             Browse with list_docs or the {0}:// resources, read pages with read_doc, \
             and find pages with search_docs (regex, ranked by match count).",
            SCHEME
        ))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self
            .resolver
            .root_listing()
            .iter()
            .map(to_resource)
            .collect();
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let resolver = self.resolver.clone();
        let contents =
            tokio::task::spawn_blocking(move || resource_contents(&resolver, &request.uri))
                .await
                .map_err(|e| McpError::internal_error(format!("Read task failed: {}", e), None))??;

        Ok(ReadResourceResult::new(vec![contents]))
    }
}

/// Reads a `bun://` URI into MCP resource contents carrying the rendered MIME type.
fn resource_contents(resolver: &Resolver, uri: &str) -> Result<ResourceContents, McpError> {
    if !uri.starts_with(&format!("{}://", SCHEME)) {
        return Err(McpError::invalid_params(
            format!("Unsupported resource URI '{}': expected {}://<path>", uri, SCHEME),
            None,
        ));
    }

    let (mime, text) = resolver.resolve(uri).render();
    Ok(ResourceContents::text(text, uri).with_mime_type(mime))
}

fn to_resource(entry: &ListingEntry) -> Resource {
    let mut raw = RawResource::new(entry.uri.clone(), entry.name.clone());
    raw.description = Some(entry.description.clone()).filter(|d| !d.is_empty());
    raw.mime_type = Some(entry.mime_type.clone());
    raw.no_annotation()
}

fn search_error(error: SearchError) -> McpError {
    McpError::invalid_params(error.to_string(), None)
}
