//! Path resolution: root and directory listings, document reads.

use crate::config::SCHEME;
use crate::index::{DocIndex, IndexedResource, ListingEntry, slug_of, to_uri};
use std::path::Path;
use std::sync::Arc;

/// Outcome of resolving one path against the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    Directory {
        uri: String,
        entries: Vec<ListingEntry>,
    },
    Document {
        uri: String,
        mime_type: String,
        text: String,
    },
    NotFound {
        path: String,
    },
    TooLarge {
        uri: String,
        size: u64,
        limit: u64,
    },
    Unreadable {
        uri: String,
        reason: String,
    },
}

impl ReadResult {
    /// URI to report back to the client.
    pub fn uri(&self) -> String {
        match self {
            Self::Directory { uri, .. }
            | Self::Document { uri, .. }
            | Self::TooLarge { uri, .. }
            | Self::Unreadable { uri, .. } => uri.clone(),
            Self::NotFound { path } => to_uri(path),
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Directory { .. } | Self::Document { .. })
    }

    /// MIME type and body as sent on the wire.
    ///
    /// Directories become a JSON array of listing entries; failures become
    /// a plain-text explanation.
    pub fn render(&self) -> (String, String) {
        match self {
            Self::Directory { entries, .. } => (
                crate::index::DIRECTORY_MIME.to_string(),
                serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string()),
            ),
            Self::Document {
                mime_type, text, ..
            } => (mime_type.clone(), text.clone()),
            Self::NotFound { path } => (
                "text/plain".to_string(),
                format!(
                    "Not found: {}://{}\n\nList {}:// to browse available documents.",
                    SCHEME, path, SCHEME
                ),
            ),
            Self::TooLarge { uri, size, limit } => (
                "text/plain".to_string(),
                format!(
                    "Document too large: {} is {} bytes (limit {} bytes)",
                    uri, size, limit
                ),
            ),
            Self::Unreadable { uri, reason } => (
                "text/plain".to_string(),
                format!("Unreadable document {}: {}", uri, reason),
            ),
        }
    }
}

/// Why a document's text could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    TooLarge { size: u64 },
    Unreadable(String),
}

/// Reads a document as UTF-8 text, refusing files over `max_bytes`.
pub fn load_text(path: &Path, max_bytes: u64) -> Result<String, LoadFailure> {
    let size = std::fs::metadata(path)
        .map_err(|e| LoadFailure::Unreadable(e.to_string()))?
        .len();
    if size > max_bytes {
        return Err(LoadFailure::TooLarge { size });
    }

    let bytes = std::fs::read(path).map_err(|e| LoadFailure::Unreadable(e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|_| LoadFailure::Unreadable("content is not valid UTF-8".to_string()))
}

/// Canonical slug form of a client-supplied path.
///
/// Strips whitespace, a leading `bun://` (even after leading separators), and
/// leading, trailing, and repeated separators.
/// `normalize_path(normalize_path(x)) == normalize_path(x)`.
pub fn normalize_path(path: &str) -> String {
    slug_of(path.trim().trim_start_matches('/').trim_start())
        .split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Answers browse and read requests against an immutable index.
#[derive(Debug, Clone)]
pub struct Resolver {
    index: Arc<DocIndex>,
}

impl Resolver {
    pub const fn new(index: Arc<DocIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &DocIndex {
        &self.index
    }

    /// Finds the resource for a normalized slug, tolerating a trailing `.md`.
    pub fn lookup(&self, slug: &str) -> Option<&IndexedResource> {
        self.index.get_slug(slug).or_else(|| {
            slug.strip_suffix(".md")
                .and_then(|stripped| self.index.get_slug(stripped))
        })
    }

    /// Root-visible entries.
    pub fn root_listing(&self) -> Vec<ListingEntry> {
        self.index
            .root_entries()
            .into_iter()
            .map(IndexedResource::listing_entry)
            .collect()
    }

    /// Listing for the root or a directory; `None` for documents and unknown paths.
    pub fn list(&self, path: &str) -> Option<Vec<ListingEntry>> {
        match self.resolve_listing(path) {
            ReadResult::Directory { entries, .. } => Some(entries),
            _ => None,
        }
    }

    pub fn resolve(&self, path: &str) -> ReadResult {
        let slug = normalize_path(path);
        match self.lookup(&slug) {
            Some(resource) if !resource.is_directory => self.read_document(resource),
            _ => self.resolve_listing(path),
        }
    }

    fn resolve_listing(&self, path: &str) -> ReadResult {
        let slug = normalize_path(path);
        if slug.is_empty() {
            return ReadResult::Directory {
                uri: to_uri(""),
                entries: self.root_listing(),
            };
        }

        match self.lookup(&slug) {
            Some(resource) if resource.is_directory => ReadResult::Directory {
                uri: resource.uri.clone(),
                entries: self
                    .index
                    .children(resource.slug())
                    .into_iter()
                    .map(IndexedResource::listing_entry)
                    .collect(),
            },
            _ => ReadResult::NotFound { path: slug },
        }
    }

    fn read_document(&self, resource: &IndexedResource) -> ReadResult {
        let Some(path) = resource.file_path.as_deref() else {
            return ReadResult::NotFound {
                path: resource.slug().to_string(),
            };
        };

        let limit = self.index.settings().max_document_bytes;
        match load_text(path, limit) {
            Ok(text) => ReadResult::Document {
                uri: resource.uri.clone(),
                mime_type: resource.mime_type.clone(),
                text,
            },
            Err(LoadFailure::TooLarge { size }) => ReadResult::TooLarge {
                uri: resource.uri.clone(),
                size,
                limit,
            },
            Err(LoadFailure::Unreadable(reason)) => {
                tracing::warn!(uri = %resource.uri, "Failed to read document: {}", reason);
                ReadResult::Unreadable {
                    uri: resource.uri.clone(),
                    reason,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("/", "")]
    #[case("api/websockets", "api/websockets")]
    #[case("/api/websockets/", "api/websockets")]
    #[case("api//websockets", "api/websockets")]
    #[case("  //api///websockets//  ", "api/websockets")]
    #[case("bun://api/websockets", "api/websockets")]
    #[case("bun:///guides/", "guides")]
    #[case("/bun://api/websockets", "api/websockets")]
    #[case(" // bun://guides/http", "guides/http")]
    #[case("api/websockets.md", "api/websockets.md")]
    fn normalize_strips_separators(#[case] input: &str, #[case] expected: &str) {
        check!(normalize_path(input) == expected);
    }

    #[rstest]
    #[case("//a//b//")]
    #[case("bun://bun://x")]
    #[case("/ bun://x")]
    #[case(" a / b ")]
    #[case("guides/http/server.md")]
    fn normalize_is_idempotent(#[case] input: &str) {
        let once = normalize_path(input);
        check!(normalize_path(&once) == once);
    }

    #[test]
    fn failures_render_as_plain_text() {
        let (mime, text) = ReadResult::NotFound {
            path: "nope".to_string(),
        }
        .render();
        check!(mime == "text/plain");
        check!(text.starts_with("Not found: bun://nope"));

        let (_, text) = ReadResult::TooLarge {
            uri: "bun://big".to_string(),
            size: 10,
            limit: 5,
        }
        .render();
        check!(text.contains("10 bytes"));
    }

    #[test]
    fn load_text_enforces_size_guard() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("big.md");
        std::fs::write(&path, "0123456789").unwrap();

        let_assert!(Err(LoadFailure::TooLarge { size }) = load_text(&path, 5));
        check!(size == 10);
        check!(load_text(&path, 10).as_deref() == Ok("0123456789"));
    }

    #[test]
    fn load_text_rejects_invalid_utf8() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("bin.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let_assert!(Err(LoadFailure::Unreadable(reason)) = load_text(&path, 1024));
        check!(reason.contains("UTF-8"));
    }
}
