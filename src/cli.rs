use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bun-docs-mcp", version)]
#[command(
    about = "Serve version-matched Bun documentation to MCP clients over stdio",
    long_about = None
)]
pub struct Cli {
    /// Bun version whose docs to serve (default: output of `bun --version`)
    #[arg(long, env = "BUN_DOCS_VERSION")]
    pub bun_version: Option<String>,

    /// Local docs directory checked before the cache
    #[arg(long, env = "BUN_DOCS_DIR")]
    pub docs_dir: Option<PathBuf>,

    /// Root of the version-keyed docs cache (default: ~/.cache/bun-docs-mcp)
    #[arg(long, env = "BUN_DOCS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Archive URL template; `{version}` is replaced with the Bun version
    #[arg(long, env = "BUN_DOCS_ARCHIVE_URL")]
    pub archive_url: Option<String>,

    /// Maximum characters in a generated description preview
    #[arg(long, env = "BUN_DOCS_PREVIEW_LEN")]
    pub preview_len: Option<usize>,

    /// Documents larger than this many bytes are neither read nor searched
    #[arg(long, env = "BUN_DOCS_MAX_DOCUMENT_BYTES")]
    pub max_document_bytes: Option<u64>,

    /// Default number of search results
    #[arg(long, env = "BUN_DOCS_SEARCH_LIMIT")]
    pub search_limit: Option<usize>,
}
