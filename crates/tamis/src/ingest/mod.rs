//! CSV ingestion: extract file → raw records plus source metadata.

mod loader;
mod source;

pub use loader::{Loader, LoaderConfig};
pub use source::SourceMetadata;
