pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod resolve;
pub mod search;
pub mod server;
pub mod tools;
pub mod tracing;

pub use config::{Config, IndexSettings};
pub use corpus::{CorpusLocation, CorpusLocator, CorpusSource, DocsFetcher, TarballFetcher};
pub use index::{DocIndex, IndexedResource, ResourceOrigin};
pub use resolve::{ReadResult, Resolver, normalize_path};
pub use search::{SearchEngine, SearchResult};
pub use server::DocServer;
