//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Every test writes its own corpus into a fresh temporary directory, so
//! index builds never observe another test's files.
//!
//! # Available Fixtures
//!
//! - `corpus`: a small but complete docs tree (manifest, guides, ecosystem)
//! - `index`: the same corpus, already indexed with default settings

use bun_docs_mcp::{DocIndex, IndexSettings};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Content of `api/websockets.md` in the sample corpus.
#[allow(dead_code)]
pub const WEBSOCKETS_MD: &str = "# WebSockets\nUse Bun.serve...";

/// Content of `guides/websockets/pubsub.md`: three `Web[Ss]ocket` matches.
#[allow(dead_code)]
pub const PUBSUB_MD: &str = "---\nname: Pub/sub with WebSockets\n---\n\nBuild a WebSocket chat server.\nEvery Websocket subscribes to a topic.\n";

#[allow(dead_code)]
pub const NAV_JSON: &str = r#"{
  "items": [
    { "type": "divider", "title": "Intro" },
    { "type": "page", "slug": "index", "title": "What is Bun?", "description": "Overview of Bun" },
    { "type": "page", "slug": "installation", "title": "Installation" },
    { "type": "divider", "title": "API" },
    { "type": "page", "slug": "api/websockets", "title": "WebSockets", "description": "Server-side WebSockets" },
    { "type": "page", "slug": "api/http", "title": "HTTP server" },
    { "type": "page", "slug": "api/ffi", "title": "FFI", "disabled": true },
    { "type": "page", "slug": "old-api", "title": "Old API", "href": "https://example.com" },
    { "type": "page", "slug": "api/missing", "title": "Missing page" },
    { "type": "page", "slug": "ecosystem/react", "title": "React with Bun" }
  ]
}"#;

/// A temporary directory for test isolation.
///
/// # Example
///
/// ```ignore
/// let workspace = TempWorkspace::new();
/// workspace.create_file("api/http.md", "# HTTP");
/// assert!(workspace.path().join("api/http.md").exists());
/// ```
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a directory (and all parent directories) within this workspace.
    ///
    /// # Panics
    /// Panics if directory creation fails.
    pub fn create_dir(&self, path: &str) {
        let full_path = self.root.join(path);
        std::fs::create_dir_all(&full_path)
            .unwrap_or_else(|e| panic!("Failed to create directory '{}': {}", path, e));
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Reads a file from this workspace.
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.root.join(path))
            .unwrap_or_else(|e| panic!("Failed to read file '{}': {}", path, e))
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes the sample docs tree into `workspace`.
///
/// Layout:
/// - manifest pages: `index`, `installation`, `api/websockets`, `api/http`
///   (via `index.md`), `ecosystem/react`; plus a disabled page with a file,
///   an external page, and a page with no file
/// - `guides/`: `http/simple.md`, `http/tls/setup.md`, `websockets/pubsub.md`,
///   a `websockets/index.json` directory description, and a hidden directory
/// - `ecosystem/`: `react.md` (shadowed by the manifest), `express.md`, and a
///   nested file that the flat crawl must ignore
#[allow(dead_code)]
pub fn write_sample_corpus(workspace: &TempWorkspace) {
    workspace.create_file("nav.json", NAV_JSON);
    workspace.create_file(
        "index.md",
        "# What is Bun?\nBun is a fast JavaScript runtime.\n",
    );
    workspace.create_file(
        "installation.md",
        "# Installation\ncurl -fsSL https://bun.sh/install | bash\n",
    );
    workspace.create_file("api/websockets.md", WEBSOCKETS_MD);
    workspace.create_file(
        "api/http/index.md",
        "# HTTP\nBun.serve starts an HTTP server.\n",
    );
    workspace.create_file("api/ffi.md", "# FFI\nWebSocket over FFI is not a thing.\n");

    workspace.create_file(
        "guides/http/simple.md",
        "# Simple HTTP server\n\nStart a server with Bun.serve.\n",
    );
    workspace.create_file(
        "guides/http/tls/setup.md",
        "---\ntitle: Configure TLS\ndescription: Serve HTTPS from Bun\n---\nTLS needs a key and a cert.\n",
    );
    workspace.create_file("guides/websockets/pubsub.md", PUBSUB_MD);
    workspace.create_file(
        "guides/websockets/index.json",
        r#"{ "name": "Realtime", "description": "Realtime servers with Bun" }"#,
    );
    workspace.create_file("guides/.hidden/secret.md", "# Secret\n");

    workspace.create_file("ecosystem/react.md", "# React\nUse React with Bun.\n");
    workspace.create_file(
        "ecosystem/express.md",
        "\nExpress works with Bun out of the box.\n",
    );
    workspace.create_file("ecosystem/nested/skip.md", "# Skip\n");
}

/// A built index plus the directory backing it.
#[allow(dead_code)]
pub struct IndexedCorpus {
    pub workspace: TempWorkspace,
    pub index: Arc<DocIndex>,
}

#[allow(dead_code)]
impl IndexedCorpus {
    pub fn build(workspace: TempWorkspace, settings: &IndexSettings) -> Self {
        let index = DocIndex::build(workspace.path(), settings).expect("Failed to build index");
        Self {
            workspace,
            index: Arc::new(index),
        }
    }
}

#[allow(dead_code)]
#[fixture]
pub fn corpus() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    write_sample_corpus(&workspace);
    workspace
}

#[allow(dead_code)]
#[fixture]
pub fn index(corpus: TempWorkspace) -> IndexedCorpus {
    IndexedCorpus::build(corpus, &IndexSettings::default())
}
