//! Builds the in-memory documentation index from a corpus directory.
//!
//! Three passes run in a fixed order, and an earlier pass always wins a key
//! collision:
//! 1. Pages from the navigation manifest
//! 2. The recursive `guides/` tree (directories and markdown files)
//! 3. Markdown files directly inside `ecosystem/`

use super::frontmatter::{first_content_line, preview, split_front_matter, title_case};
use super::manifest::{Manifest, NavEntry, NavPage};
use super::resource::{IndexedResource, ResourceOrigin, slug_of, to_uri};
use crate::config::{IndexSettings, MANIFEST_FILE};
use crate::error::IndexError;
use ahash::AHashMap;
use ignore::WalkBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const GUIDES_DIR: &str = "guides";
const ECOSYSTEM_DIR: &str = "ecosystem";
/// Optional per-directory metadata inside `guides/`.
const DIRECTORY_META_FILE: &str = "index.json";

/// Counters reported once the index is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub pages: usize,
    pub missing: usize,
    pub disabled: usize,
    pub external: usize,
    pub guides: usize,
    pub guide_directories: usize,
    pub ecosystem: usize,
    /// Crawled entries dropped because the key was already taken.
    pub shadowed: usize,
}

/// Immutable index over one corpus, keyed by URI.
#[derive(Debug, Clone)]
pub struct DocIndex {
    root: PathBuf,
    settings: IndexSettings,
    resources: AHashMap<String, IndexedResource>,
    /// URIs in insertion order.
    order: Vec<String>,
    stats: BuildStats,
}

#[derive(Debug, Default, Deserialize)]
struct DirectoryMeta {
    name: Option<String>,
    description: Option<String>,
}

impl DocIndex {
    /// Builds the index for `root`. Fails only if the manifest is missing or malformed.
    pub fn build(root: &Path, settings: &IndexSettings) -> Result<Self, IndexError> {
        let manifest = Manifest::load(&root.join(MANIFEST_FILE))?;

        let mut index = Self {
            root: root.to_path_buf(),
            settings: settings.clone(),
            resources: AHashMap::new(),
            order: Vec::new(),
            stats: BuildStats::default(),
        };

        index.ingest_manifest(&manifest);
        index.crawl_guides();
        index.crawl_ecosystem();

        let stats = index.stats;
        tracing::info!(
            root = %root.display(),
            resources = index.len(),
            pages = stats.pages,
            guides = stats.guides,
            ecosystem = stats.ecosystem,
            missing = stats.missing,
            disabled = stats.disabled,
            external = stats.external,
            "Built documentation index"
        );

        Ok(index)
    }

    pub const fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    pub const fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, uri: &str) -> Option<&IndexedResource> {
        self.resources.get(uri)
    }

    /// Looks a resource up by slug (URI without scheme).
    pub fn get_slug(&self, slug: &str) -> Option<&IndexedResource> {
        self.resources.get(&to_uri(slug))
    }

    /// All resources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedResource> {
        self.order.iter().filter_map(|uri| self.resources.get(uri))
    }

    /// Document resources in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = &IndexedResource> {
        self.iter().filter(|resource| !resource.is_directory)
    }

    /// Resources visible in the root listing, in insertion order.
    pub fn root_entries(&self) -> Vec<&IndexedResource> {
        self.iter()
            .filter(|resource| resource.origin.listed_at_root())
            .collect()
    }

    /// Direct children of a directory slug, sorted by URI.
    pub fn children(&self, dir_slug: &str) -> Vec<&IndexedResource> {
        let prefix = format!("{}/", dir_slug);
        let mut children: Vec<_> = self
            .iter()
            .filter(|resource| {
                slug_of(&resource.uri)
                    .strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
            })
            .collect();
        children.sort_by(|a, b| a.uri.cmp(&b.uri));
        children
    }

    /// First-seen wins; returns whether the resource was inserted.
    fn insert(&mut self, resource: IndexedResource) -> bool {
        if self.resources.contains_key(&resource.uri) {
            tracing::debug!(uri = %resource.uri, "Skipping duplicate resource");
            self.stats.shadowed += 1;
            return false;
        }
        self.order.push(resource.uri.clone());
        self.resources.insert(resource.uri.clone(), resource);
        true
    }

    fn ingest_manifest(&mut self, manifest: &Manifest) {
        let mut section: Option<&str> = None;

        for entry in &manifest.items {
            let page = match entry {
                NavEntry::Divider { title } => {
                    section = Some(title.as_str());
                    continue;
                }
                NavEntry::Page(page) => page,
            };

            if page.disabled {
                self.stats.disabled += 1;
                continue;
            }
            if page.href.is_some() {
                self.stats.external += 1;
                continue;
            }

            let slug = page.slug.trim_matches('/');
            let Some(file) = self.page_file(slug) else {
                tracing::debug!(slug, "Manifest page has no backing file");
                self.stats.missing += 1;
                continue;
            };

            let description = compose_description(section, page);
            if self.insert(IndexedResource::document(
                slug,
                page.title.clone(),
                description,
                file,
                ResourceOrigin::Manifest,
            )) {
                self.stats.pages += 1;
            }
        }
    }

    /// `{slug}.md`, falling back to `{slug}/index.md`.
    fn page_file(&self, slug: &str) -> Option<PathBuf> {
        [
            self.root.join(format!("{}.md", slug)),
            self.root.join(slug).join("index.md"),
        ]
        .into_iter()
        .find(|path| path.is_file())
    }

    fn crawl_guides(&mut self) {
        let guides_root = self.root.join(GUIDES_DIR);
        if !guides_root.is_dir() {
            return;
        }

        self.insert(IndexedResource::directory(
            GUIDES_DIR,
            "Guides",
            "Step-by-step guides and examples",
            ResourceOrigin::GuideRoot,
        ));

        let walker = WalkBuilder::new(&guides_root)
            .standard_filters(false)
            .hidden(true)
            .sort_by_file_path(Path::cmp)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable guide entry: {}", e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            let Some(relative) = relative_slug(&guides_root, path) else {
                continue;
            };
            let slug = format!("{}/{}", GUIDES_DIR, relative);

            if entry.file_type().is_some_and(|t| t.is_dir()) {
                let meta = read_directory_meta(path);
                let base = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let name = meta.name.unwrap_or(base);
                let description = meta
                    .description
                    .unwrap_or_else(|| format!("Guides: {}", name));
                if self.insert(IndexedResource::directory(
                    &slug,
                    name,
                    description,
                    ResourceOrigin::GuideDirectory,
                )) {
                    self.stats.guide_directories += 1;
                }
            } else if is_markdown(path) {
                let slug = strip_md(&slug);
                if let Some(resource) = self.guide_document(slug, path)
                    && self.insert(resource)
                {
                    self.stats.guides += 1;
                }
            }
        }
    }

    fn guide_document(&self, slug: &str, path: &Path) -> Option<IndexedResource> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Skipping unreadable guide: {}", e);
                return None;
            }
        };

        let (front, body) = split_front_matter(&content);
        let front = front.unwrap_or_default();
        let name = front
            .get("name")
            .or_else(|| front.get("title"))
            .map_or_else(|| title_case(&file_stem(path)), str::to_string);
        let description = front.get("description").map_or_else(
            || {
                first_content_line(body)
                    .map(|line| preview(line, self.settings.preview_len))
                    .unwrap_or_default()
            },
            str::to_string,
        );

        Some(IndexedResource::document(
            slug,
            name,
            description,
            path.to_path_buf(),
            ResourceOrigin::Guide,
        ))
    }

    fn crawl_ecosystem(&mut self) {
        let dir = self.root.join(ECOSYSTEM_DIR);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), "Cannot read ecosystem directory: {}", e);
                return;
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_markdown(path))
            .collect();
        files.sort();

        for path in files {
            let stem = file_stem(&path);
            let description = std::fs::read_to_string(&path)
                .ok()
                .and_then(|content| {
                    let (_, body) = split_front_matter(&content);
                    first_content_line(body).map(|line| preview(line, self.settings.preview_len))
                })
                .unwrap_or_default();

            let slug = format!("{}/{}", ECOSYSTEM_DIR, stem);
            if self.insert(IndexedResource::document(
                &slug,
                title_case(&stem),
                description,
                path,
                ResourceOrigin::Ecosystem,
            )) {
                self.stats.ecosystem += 1;
            }
        }
    }
}

fn compose_description(section: Option<&str>, page: &NavPage) -> String {
    let section = section.filter(|s| !s.is_empty());
    let description = page.description.as_deref().filter(|d| !d.is_empty());
    match (section, description) {
        (Some(section), Some(description)) => format!("{} / {}", section, description),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    }
}

fn read_directory_meta(dir: &Path) -> DirectoryMeta {
    let path = dir.join(DIRECTORY_META_FILE);
    let Ok(content) = std::fs::read_to_string(&path) else {
        return DirectoryMeta::default();
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), "Ignoring malformed directory metadata: {}", e);
        DirectoryMeta::default()
    })
}

/// `/`-joined path of `path` relative to `base`.
fn relative_slug(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

fn strip_md(slug: &str) -> &str {
    slug.strip_suffix(".md").unwrap_or(slug)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
