//! Resolving the on-disk documentation directory for a Bun version.

use super::fetch::DocsFetcher;
use super::version::version_candidates;
use crate::config::MANIFEST_FILE;
use crate::error::{FetchError, LocateError};
use std::path::{Path, PathBuf};

/// Where a resolved corpus came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusSource {
    /// Project-local docs directory; never fetched or modified.
    Local,
    /// Version-keyed cache directory, possibly populated by this run.
    Cache,
}

/// The documentation directory chosen for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLocation {
    pub dir: PathBuf,
    pub version: String,
    pub source: CorpusSource,
}

/// Resolves a corpus directory: local docs first, then the cache, fetching on miss.
#[derive(Debug)]
pub struct CorpusLocator<F> {
    local_dir: PathBuf,
    cache_root: Option<PathBuf>,
    fetcher: F,
}

impl<F: DocsFetcher> CorpusLocator<F> {
    pub fn new(local_dir: impl Into<PathBuf>, cache_root: Option<PathBuf>, fetcher: F) -> Self {
        Self {
            local_dir: local_dir.into(),
            cache_root,
            fetcher,
        }
    }

    /// Cache directory for a version, if a cache root is configured.
    pub fn cache_dir(&self, version: &str) -> Option<PathBuf> {
        self.cache_root.as_ref().map(|root| root.join(version))
    }

    pub async fn locate(&self, version: &str) -> Result<CorpusLocation, LocateError> {
        if tokio::fs::metadata(&self.local_dir)
            .await
            .is_ok_and(|meta| meta.is_dir())
        {
            tracing::info!(dir = %self.local_dir.display(), "Using local documentation");
            return Ok(CorpusLocation {
                dir: self.local_dir.clone(),
                version: version.to_string(),
                source: CorpusSource::Local,
            });
        }

        let cache_root = self.cache_root.as_ref().ok_or(LocateError::NoCacheRoot)?;
        let cache_dir = cache_root.join(version);

        if has_manifest(&cache_dir).await {
            tracing::info!(version, dir = %cache_dir.display(), "Using cached documentation");
        } else {
            if tokio::fs::metadata(&cache_dir).await.is_ok() {
                tracing::warn!(
                    version,
                    dir = %cache_dir.display(),
                    "Cached documentation has no {}, fetching again",
                    MANIFEST_FILE
                );
            }
            self.populate(cache_root, &cache_dir, version).await?;
        }

        Ok(CorpusLocation {
            dir: cache_dir,
            version: version.to_string(),
            source: CorpusSource::Cache,
        })
    }

    /// Tries each version candidate until one yields a tree with a manifest,
    /// then moves it into `cache_dir`.
    async fn populate(
        &self,
        cache_root: &Path,
        cache_dir: &Path,
        version: &str,
    ) -> Result<(), LocateError> {
        tokio::fs::create_dir_all(cache_root)
            .await
            .map_err(|source| LocateError::Io {
                path: cache_root.to_path_buf(),
                source,
            })?;

        let mut last_error = None;
        for candidate in version_candidates(version) {
            // Staging lives under the cache root so the final rename stays on one filesystem.
            let staging = tempfile::Builder::new()
                .prefix(".fetch-")
                .tempdir_in(cache_root)
                .map_err(|source| LocateError::Io {
                    path: cache_root.to_path_buf(),
                    source,
                })?;

            match self.fetcher.fetch(&candidate, staging.path()).await {
                Ok(()) if has_manifest(staging.path()).await => {
                    install(staging, cache_dir).await?;
                    tracing::info!(
                        version,
                        candidate = %candidate,
                        dir = %cache_dir.display(),
                        "Fetched documentation"
                    );
                    return Ok(());
                }
                Ok(()) => {
                    tracing::warn!(candidate = %candidate, "Fetched docs have no {}", MANIFEST_FILE);
                    last_error = Some(LocateError::ManifestMissing {
                        version: version.to_string(),
                        manifest: MANIFEST_FILE,
                        dir: cache_dir.to_path_buf(),
                    });
                }
                Err(source) => {
                    tracing::warn!(candidate = %candidate, error = %source, "Fetch failed");
                    last_error = Some(LocateError::Fetch {
                        version: candidate,
                        source,
                    });
                }
            }
        }

        // Leave either a complete cache directory or none at all.
        if tokio::fs::metadata(cache_dir).await.is_ok() {
            tracing::warn!(dir = %cache_dir.display(), "Removing incomplete cached documentation");
            tokio::fs::remove_dir_all(cache_dir)
                .await
                .map_err(|source| LocateError::Io {
                    path: cache_dir.to_path_buf(),
                    source,
                })?;
        }

        Err(last_error.unwrap_or_else(|| LocateError::Fetch {
            version: version.to_string(),
            source: FetchError::NoDocsDirectory {
                version: version.to_string(),
            },
        }))
    }
}

async fn has_manifest(dir: &Path) -> bool {
    tokio::fs::metadata(dir.join(MANIFEST_FILE))
        .await
        .is_ok_and(|meta| meta.is_file())
}

/// Replaces `cache_dir` with the staged tree via rename.
async fn install(staging: tempfile::TempDir, cache_dir: &Path) -> Result<(), LocateError> {
    let io_err = |source| LocateError::Io {
        path: cache_dir.to_path_buf(),
        source,
    };

    if tokio::fs::metadata(cache_dir).await.is_ok() {
        tokio::fs::remove_dir_all(cache_dir).await.map_err(io_err)?;
    }
    tokio::fs::rename(staging.path(), cache_dir)
        .await
        .map_err(io_err)?;
    // The staged path no longer exists; disarm the drop guard.
    let _ = staging.keep();
    Ok(())
}
