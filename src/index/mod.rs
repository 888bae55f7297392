//! Navigation index: manifest parsing, auxiliary crawls, and the resource map.

pub mod builder;
pub mod frontmatter;
pub mod manifest;
pub mod resource;

pub use builder::{BuildStats, DocIndex};
pub use manifest::{Manifest, NavEntry, NavPage};
pub use resource::{
    DIRECTORY_MIME, IndexedResource, ListingEntry, MARKDOWN_MIME, ResourceOrigin, slug_of, to_uri,
};
