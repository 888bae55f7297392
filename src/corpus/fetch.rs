//! Downloading a documentation snapshot for a Bun version.

use crate::error::FetchError;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Archive published for every tagged Bun release.
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/oven-sh/bun/archive/refs/tags/bun-v{version}.tar.gz";

/// Populates a directory with the documentation tree for one version.
///
/// Implementations write into `dest`, which already exists and is empty.
/// The caller owns atomic placement and cleanup, so a fetcher may leave
/// `dest` in any state on failure.
pub trait DocsFetcher: Send + Sync {
    fn fetch(
        &self,
        version: &str,
        dest: &Path,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;
}

/// Fetches the release tarball with `curl` and unpacks its `docs/` tree with `tar`.
///
/// The unpacked tree is used as-is: the index needs a declarative
/// `docs/nav.json` at its root. Releases whose docs ship their navigation in
/// another form (for example a `nav.ts` module) unpack without it, and the
/// locator reports `LocateError::ManifestMissing` for that version. Point
/// `--archive-url` at an archive that carries `docs/nav.json`, or install
/// docs into the local docs directory, to serve such versions.
#[derive(Debug, Clone)]
pub struct TarballFetcher {
    url_template: String,
}

impl TarballFetcher {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
        }
    }

    pub fn url_for(&self, version: &str) -> String {
        self.url_template.replace("{version}", version)
    }
}

impl Default for TarballFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE_URL)
    }
}

impl DocsFetcher for TarballFetcher {
    async fn fetch(&self, version: &str, dest: &Path) -> Result<(), FetchError> {
        let url = self.url_for(version);
        let work = tempfile::Builder::new().prefix(".unpack-").tempdir_in(dest)?;
        let archive = work.path().join("docs.tar.gz");

        tracing::info!(version, url = %url, "Downloading documentation archive");
        run(
            "curl",
            tokio::process::Command::new("curl")
                .arg("--fail")
                .arg("--silent")
                .arg("--show-error")
                .arg("--location")
                .arg("--output")
                .arg(&archive)
                .arg(&url),
            &url,
        )
        .await?;

        let unpacked = work.path().join("src");
        tokio::fs::create_dir(&unpacked).await?;
        run(
            "tar",
            tokio::process::Command::new("tar")
                .arg("-xzf")
                .arg(&archive)
                .arg("-C")
                .arg(&unpacked),
            &url,
        )
        .await?;

        let docs = find_docs_dir(&unpacked)
            .await?
            .ok_or_else(|| FetchError::NoDocsDirectory {
                version: version.to_string(),
            })?;

        let mut entries = tokio::fs::read_dir(&docs).await?;
        while let Some(entry) = entries.next_entry().await? {
            tokio::fs::rename(entry.path(), dest.join(entry.file_name())).await?;
        }

        tracing::debug!(version, dest = %dest.display(), "Unpacked documentation archive");
        Ok(())
    }
}

async fn run(
    command: &'static str,
    cmd: &mut tokio::process::Command,
    url: &str,
) -> Result<(), FetchError> {
    let output = cmd
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| FetchError::Spawn { command, source })?;

    if !output.status.success() {
        return Err(FetchError::Command {
            command,
            url: url.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

/// GitHub archives wrap the repository in one top-level directory
/// (`bun-bun-v1.2.3/`); the docs live directly beneath it.
async fn find_docs_dir(unpacked: &Path) -> std::io::Result<Option<PathBuf>> {
    let mut entries = tokio::fs::read_dir(unpacked).await?;
    while let Some(entry) = entries.next_entry().await? {
        let candidate = entry.path().join("docs");
        if tokio::fs::metadata(&candidate)
            .await
            .is_ok_and(|meta| meta.is_dir())
        {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}
