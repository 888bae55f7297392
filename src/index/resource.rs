use crate::config::SCHEME;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const MARKDOWN_MIME: &str = "text/markdown";
pub const DIRECTORY_MIME: &str = "application/json";

/// Which discovery pass produced a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOrigin {
    /// A page listed in the navigation manifest.
    Manifest,
    /// The `guides` directory placeholder.
    GuideRoot,
    /// A subdirectory somewhere under `guides/`.
    GuideDirectory,
    /// A markdown file somewhere under `guides/`.
    Guide,
    /// A markdown file directly inside `ecosystem/`.
    Ecosystem,
}

impl ResourceOrigin {
    /// Whether resources of this origin appear in the root listing.
    pub const fn listed_at_root(self) -> bool {
        matches!(self, Self::Manifest | Self::GuideRoot | Self::Ecosystem)
    }
}

/// One addressable unit of the corpus: a document or a directory node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedResource {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
    pub is_directory: bool,
    /// Backing file; `None` for directory nodes.
    pub file_path: Option<PathBuf>,
    pub origin: ResourceOrigin,
}

impl IndexedResource {
    pub fn document(
        slug: &str,
        name: impl Into<String>,
        description: impl Into<String>,
        file_path: PathBuf,
        origin: ResourceOrigin,
    ) -> Self {
        Self {
            uri: to_uri(slug),
            name: name.into(),
            description: description.into(),
            mime_type: guess_mime(&file_path).to_string(),
            is_directory: false,
            file_path: Some(file_path),
            origin,
        }
    }

    pub fn directory(
        slug: &str,
        name: impl Into<String>,
        description: impl Into<String>,
        origin: ResourceOrigin,
    ) -> Self {
        Self {
            uri: to_uri(slug),
            name: name.into(),
            description: description.into(),
            mime_type: DIRECTORY_MIME.to_string(),
            is_directory: true,
            file_path: None,
            origin,
        }
    }

    /// The URI with the scheme removed.
    pub fn slug(&self) -> &str {
        slug_of(&self.uri)
    }

    pub fn listing_entry(&self) -> ListingEntry {
        ListingEntry {
            uri: self.uri.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Wire shape of a resource in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

pub fn to_uri(slug: &str) -> String {
    format!("{}://{}", SCHEME, slug)
}

/// Strips the `bun://` prefix if present.
pub fn slug_of(uri: &str) -> &str {
    uri.strip_prefix(SCHEME)
        .and_then(|rest| rest.strip_prefix("://"))
        .unwrap_or(uri)
}

/// MIME type from a file extension; unknown extensions are plain text.
pub fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("md" | "mdx" | "markdown") => MARKDOWN_MIME,
        Some("json") => "application/json",
        Some("html" | "htm") => "text/html",
        Some("js" | "mjs" | "cjs") => "text/javascript",
        Some("ts" | "tsx" | "mts") => "text/typescript",
        _ => "text/plain",
    }
}
