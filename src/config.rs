//! Runtime configuration assembled from the command line and environment.

use crate::cli::Cli;
use crate::corpus::DEFAULT_ARCHIVE_URL;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// URI scheme under which every indexed resource is addressed.
pub const SCHEME: &str = "bun";

/// File name of the navigation manifest at the root of a docs tree.
pub const MANIFEST_FILE: &str = "nav.json";

/// Project-local docs directory probed before the cache.
pub const LOCAL_DOCS_DIR: &str = "node_modules/bun-types/docs";

/// Tunables for index construction and querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    /// Maximum characters kept from a first-line description preview.
    pub preview_len: usize,
    /// Documents larger than this are not served or searched.
    pub max_document_bytes: u64,
    /// Result cap used when a search does not specify one.
    pub default_search_limit: usize,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            preview_len: 100,
            max_document_bytes: 1024 * 1024,
            default_search_limit: 30,
        }
    }
}

/// Fully resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Version override; when `None` the version is read from `bun --version`.
    pub bun_version: Option<String>,
    /// Project-local docs directory.
    pub local_docs_dir: PathBuf,
    /// Root of the version-keyed cache, if one could be derived.
    pub cache_root: Option<PathBuf>,
    /// Archive URL template; `{version}` is substituted.
    pub archive_url: String,
    pub index: IndexSettings,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let defaults = IndexSettings::default();
        Self {
            bun_version: cli.bun_version.clone(),
            local_docs_dir: cli
                .docs_dir
                .as_deref()
                .map_or_else(|| PathBuf::from(LOCAL_DOCS_DIR), expand_path),
            cache_root: cli
                .cache_dir
                .as_deref()
                .map(expand_path)
                .or_else(default_cache_root),
            archive_url: cli
                .archive_url
                .clone()
                .unwrap_or_else(|| DEFAULT_ARCHIVE_URL.to_string()),
            index: IndexSettings {
                preview_len: cli.preview_len.unwrap_or(defaults.preview_len),
                max_document_bytes: cli
                    .max_document_bytes
                    .unwrap_or(defaults.max_document_bytes),
                default_search_limit: cli
                    .search_limit
                    .unwrap_or(defaults.default_search_limit),
            },
        }
    }
}

/// `~/.cache/bun-docs-mcp`, or `None` when no home directory is known.
pub fn default_cache_root() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cache").join("bun-docs-mcp"))
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(expand_tilde(&path.to_string_lossy()).as_ref())
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
