//! Tamis: batch ETL pipeline for short-stay listing extracts.
//!
//! Tamis loads a listings CSV into a staging table, runs a fixed sequence of
//! cleaning transformations over the staged rows, and replaces a curated
//! table with the result. The cleaning stage is the core: type coercion,
//! a single missing-value rule, first-seen de-duplication, primary-key
//! enforcement, geographic filtering, price outlier clipping, and a
//! minimum-nights cap, in that order.
//!
//! # Example
//!
//! ```no_run
//! use tamis::{Config, Pipeline};
//!
//! let config = Config::resolve(None).unwrap();
//! let pipeline = Pipeline::open(&config).unwrap();
//! let (summary, report) = pipeline.run("listings.csv").unwrap();
//!
//! println!("Staged: {}", summary.rows_staged);
//! println!("Curated: {}", report.rows_after);
//! ```

pub mod clean;
pub mod config;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod record;
pub mod store;

pub use clean::{CleanReport, Cleaner, PriceBand};
pub use config::Config;
pub use error::{Error, Result};
pub use ingest::{Loader, LoaderConfig, SourceMetadata};
pub use pipeline::{LoadSummary, Pipeline};
pub use record::{CleanRecord, FieldKind, RawRecord, SOURCE_COLUMNS};
pub use store::{CuratedStore, StagingStore};
