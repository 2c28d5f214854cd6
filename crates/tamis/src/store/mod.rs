//! SQLite-backed staging and curated stores.
//!
//! Both stores borrow a connection owned by the caller and use
//! truncate-then-insert replace semantics inside a transaction, so a reader
//! sees either the prior complete dataset or the new one.

mod curated;
mod staging;

pub use curated::CuratedStore;
pub use staging::StagingStore;
