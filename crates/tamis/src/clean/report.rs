//! Diagnostics produced alongside a cleaning run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Price band used for outlier clipping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    /// 1st percentile of present prices.
    pub lower: f64,
    /// 99th percentile of present prices.
    pub upper: f64,
}

impl PriceBand {
    /// Clamp a price into the band.
    pub fn clamp(&self, price: f64) -> f64 {
        price.clamp(self.lower, self.upper)
    }
}

/// Counters accumulated while cleaning one staged batch.
///
/// Surfaced to the operator after every run; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanReport {
    /// Staged rows entering the cleaner.
    pub rows_before: usize,
    /// Curated rows leaving the cleaner.
    pub rows_after: usize,
    /// Rows removed because an earlier row carried the same id.
    pub duplicates_removed: usize,
    /// Rows dropped for carrying no id at all.
    pub missing_id_rows: usize,
    /// Rows dropped for an out-of-range latitude or longitude.
    pub geo_invalid_rows: usize,
    /// Clipping band, present only when the stage ran (enough prices).
    pub price_band: Option<PriceBand>,
    /// Absent-value counts over the final set, in column contract order.
    pub absent_counts: IndexMap<String, usize>,
}

impl CleanReport {
    /// Total rows dropped across all dropping stages.
    pub fn rows_dropped(&self) -> usize {
        self.duplicates_removed + self.missing_id_rows + self.geo_invalid_rows
    }
}
