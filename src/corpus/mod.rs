//! Corpus location: local docs, version-keyed cache, and fetching on miss.

pub mod fetch;
pub mod locator;
pub mod version;

pub use fetch::{DEFAULT_ARCHIVE_URL, DocsFetcher, TarballFetcher};
pub use locator::{CorpusLocation, CorpusLocator, CorpusSource};
pub use version::{detect_bun_version, version_candidates};
