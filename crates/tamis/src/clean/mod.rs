//! The record cleaner: a fixed sequence of data-quality transformations.

mod cleaner;
mod report;
mod stats;

pub use cleaner::Cleaner;
pub use report::{CleanReport, PriceBand};
pub use stats::percentile;
