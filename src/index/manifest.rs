//! Navigation manifest (`nav.json`) parsing.

use crate::error::IndexError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Ordered list of pages and section dividers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub items: Vec<NavEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavEntry {
    /// Section heading; applies to the pages that follow it.
    Divider { title: String },
    Page(NavPage),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavPage {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Known but unavailable; never listed or searched.
    #[serde(default)]
    pub disabled: bool,
    /// External redirect; never backed by a local file.
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    Object { items: Vec<NavEntry> },
    List(Vec<NavEntry>),
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                IndexError::ManifestNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IndexError::ManifestRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::parse(&content).map_err(|err| match err {
            ParseFailure::Json(source) => IndexError::ManifestParse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::DuplicateSlug(slug) => IndexError::DuplicateSlug { slug },
        })
    }

    fn parse(content: &str) -> Result<Self, ParseFailure> {
        let items = match serde_json::from_str(content).map_err(ParseFailure::Json)? {
            ManifestFile::Object { items } | ManifestFile::List(items) => items,
        };

        let mut seen = HashSet::new();
        for page in items.iter().filter_map(NavEntry::as_page) {
            if !seen.insert(page.slug.as_str()) {
                return Err(ParseFailure::DuplicateSlug(page.slug.clone()));
            }
        }

        Ok(Self { items })
    }
}

impl NavEntry {
    pub const fn as_page(&self) -> Option<&NavPage> {
        match self {
            Self::Page(page) => Some(page),
            Self::Divider { .. } => None,
        }
    }
}

#[derive(Debug)]
enum ParseFailure {
    Json(serde_json::Error),
    DuplicateSlug(String),
}
