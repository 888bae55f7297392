pub mod list_docs;
pub mod read_doc;
pub mod search_docs;

pub use list_docs::*;
pub use read_doc::*;
pub use search_docs::*;
