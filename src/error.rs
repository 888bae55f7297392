//! Error handling types and utilities.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for bun-docs-mcp startup glue.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in the binary and startup sequence.
pub type Result<T> = anyhow::Result<T>;

/// Error returned by a [`DocsFetcher`](crate::corpus::DocsFetcher) when a
/// documentation snapshot cannot be downloaded or unpacked.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An external command (`curl`, `tar`) could not be spawned.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },
    /// An external command ran but exited unsuccessfully.
    #[error("`{command}` failed for {url}: {stderr}")]
    Command {
        command: &'static str,
        url: String,
        stderr: String,
    },
    /// The archive unpacked but did not contain a docs directory.
    #[error("archive for version {version} has no docs directory")]
    NoDocsDirectory { version: String },
    #[error("filesystem error during fetch: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned when the documentation corpus cannot be located.
#[derive(Debug, Error)]
pub enum LocateError {
    /// No cache root could be derived (no home directory and no override).
    #[error("cannot determine a cache directory; pass --cache-dir")]
    NoCacheRoot,
    /// Every version candidate failed to download.
    #[error("failed to fetch documentation for Bun {version}")]
    Fetch {
        version: String,
        #[source]
        source: FetchError,
    },
    /// Documentation was fetched but the navigation manifest is absent.
    #[error(
        "documentation for Bun {version} has no {manifest} at {}; the version may be unsupported or the upstream layout changed",
        dir.display()
    )]
    ManifestMissing {
        version: String,
        manifest: &'static str,
        dir: PathBuf,
    },
    #[error("cache I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error returned when the navigation index cannot be built.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("navigation manifest not found at {}", path.display())]
    ManifestNotFound { path: PathBuf },
    #[error("failed to read navigation manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed navigation manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("navigation manifest lists slug '{slug}' more than once")]
    DuplicateSlug { slug: String },
}

/// Error returned for caller input problems in a search query.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search pattern must not be empty")]
    EmptyPattern,
    #[error("invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
