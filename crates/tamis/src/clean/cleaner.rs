//! The nine-stage cleaning pipeline over a staged batch.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use indexmap::IndexMap;
use tracing::debug;

use crate::record::{
    CleanRecord, RawRecord, SOURCE_COLUMNS, coerce_date, coerce_float, coerce_int, coerce_number,
    coerce_text,
};

use super::report::{CleanReport, PriceBand};
use super::stats::percentile;

/// Minimum number of present prices before outlier clipping runs.
const MIN_PRICE_SAMPLE: usize = 10;

/// Largest accepted minimum_nights; anything above is rewritten to this.
const MAX_MINIMUM_NIGHTS: i64 = 365;

/// Valid latitude range, degrees.
const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range, degrees.
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A fully coerced row, prior to primary-key enforcement.
#[derive(Debug, Clone, Default)]
struct Coerced {
    id: Option<i64>,
    name: Option<String>,
    host_id: Option<i64>,
    neighbourhood: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    room_type: Option<String>,
    price: Option<f64>,
    minimum_nights: Option<i64>,
    number_of_reviews: Option<i64>,
    last_review: Option<NaiveDate>,
    reviews_per_month: Option<f64>,
    availability_365: Option<i64>,
}

impl Coerced {
    /// Stages 1 and 2: text normalization plus numeric/date coercion.
    fn from_raw(raw: &RawRecord) -> Self {
        let text = |v: &Option<String>| v.as_deref().and_then(coerce_text);
        let float = |v: &Option<String>| v.as_deref().and_then(coerce_float);
        let int = |v: &Option<String>| v.as_deref().and_then(coerce_int);
        let number = |v: &Option<String>| v.as_deref().and_then(coerce_number);
        let date = |v: &Option<String>| v.as_deref().and_then(coerce_date);

        Self {
            id: int(&raw.id),
            name: text(&raw.name),
            host_id: int(&raw.host_id),
            neighbourhood: text(&raw.neighbourhood),
            latitude: float(&raw.latitude),
            longitude: float(&raw.longitude),
            room_type: text(&raw.room_type),
            price: float(&raw.price),
            minimum_nights: int(&raw.minimum_nights),
            number_of_reviews: int(&raw.number_of_reviews),
            last_review: date(&raw.last_review),
            reviews_per_month: number(&raw.reviews_per_month),
            availability_365: int(&raw.availability_365),
        }
    }

    /// Promote to a curated row. Returns `None` when `id` is absent.
    fn into_clean(self, loaded_at: DateTime<Utc>) -> Option<CleanRecord> {
        let id = self.id?;
        Some(CleanRecord {
            id,
            name: self.name,
            host_id: self.host_id,
            neighbourhood: self.neighbourhood,
            latitude: self.latitude,
            longitude: self.longitude,
            room_type: self.room_type,
            price: self.price,
            minimum_nights: self.minimum_nights,
            number_of_reviews: self.number_of_reviews,
            last_review: self.last_review,
            reviews_per_month: self.reviews_per_month,
            availability_365: self.availability_365,
            loaded_at,
        })
    }
}

/// Applies the fixed cleaning sequence to a staged batch.
///
/// The cleaner is state-free: one call transforms one whole batch in memory
/// and reports diagnostics for it. Stage order matters and is fixed:
/// coercion, review imputation, de-duplication, primary-key enforcement,
/// geographic filtering, price clipping, minimum-nights cap, batch stamp.
pub struct Cleaner;

impl Cleaner {
    pub fn new() -> Self {
        Self
    }

    /// Clean one staged batch, producing curated rows and diagnostics.
    ///
    /// An empty batch is valid and yields an empty output with zeroed
    /// counters. No data-quality condition is fatal.
    pub fn clean(&self, raw: &[RawRecord]) -> (Vec<CleanRecord>, CleanReport) {
        let mut report = CleanReport {
            rows_before: raw.len(),
            ..Default::default()
        };

        let mut rows: Vec<Coerced> = raw.iter().map(Coerced::from_raw).collect();

        impute_reviews_per_month(&mut rows);
        report.duplicates_removed = dedupe_by_id(&mut rows);
        report.missing_id_rows = drop_missing_ids(&mut rows);
        report.geo_invalid_rows = drop_invalid_geography(&mut rows);
        report.price_band = clip_prices(&mut rows);
        cap_minimum_nights(&mut rows);

        // One timestamp for the whole batch, second precision.
        let loaded_at = Utc::now().trunc_subsecs(0);
        let cleaned: Vec<CleanRecord> = rows
            .into_iter()
            .filter_map(|row| row.into_clean(loaded_at))
            .collect();

        report.rows_after = cleaned.len();
        report.absent_counts = absent_counts(&cleaned);

        debug!(
            before = report.rows_before,
            after = report.rows_after,
            dropped = report.rows_dropped(),
            "cleaned staged batch"
        );
        (cleaned, report)
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Stage 3: rows with zero-or-absent review counts get an explicit 0.0
/// reviews_per_month. The only imputation rule; no other field is filled.
fn impute_reviews_per_month(rows: &mut [Coerced]) {
    for row in rows {
        let zero_reviews = row.number_of_reviews.unwrap_or(0) == 0;
        if zero_reviews && row.reviews_per_month.is_none() {
            row.reviews_per_month = Some(0.0);
        }
    }
}

/// Stage 4: first-seen wins per id. An absent id is a key like any other,
/// so repeated id-less rows collapse to the first.
fn dedupe_by_id(rows: &mut Vec<Coerced>) -> usize {
    let before = rows.len();
    let mut seen = HashSet::new();
    rows.retain(|row| seen.insert(row.id));
    before - rows.len()
}

/// Stage 5: curated rows must carry a primary key.
fn drop_missing_ids(rows: &mut Vec<Coerced>) -> usize {
    let before = rows.len();
    rows.retain(|row| row.id.is_some());
    before - rows.len()
}

/// Stage 6: drop rows whose present coordinates are out of range. Rows with
/// absent coordinates are retained.
fn drop_invalid_geography(rows: &mut Vec<Coerced>) -> usize {
    let before = rows.len();
    rows.retain(|row| {
        let lat_ok = row.latitude.is_none_or(|v| LATITUDE_RANGE.contains(&v));
        let lon_ok = row.longitude.is_none_or(|v| LONGITUDE_RANGE.contains(&v));
        lat_ok && lon_ok
    });
    before - rows.len()
}

/// Stage 7: clamp present prices to the [p1, p99] band. Skipped entirely
/// when fewer than [`MIN_PRICE_SAMPLE`] prices are present.
fn clip_prices(rows: &mut [Coerced]) -> Option<PriceBand> {
    let mut prices: Vec<f64> = rows.iter().filter_map(|row| row.price).collect();
    if prices.len() < MIN_PRICE_SAMPLE {
        debug!(present = prices.len(), "price sample too small, clip skipped");
        return None;
    }

    prices.sort_by(f64::total_cmp);
    let band = PriceBand {
        lower: percentile(&prices, 0.01),
        upper: percentile(&prices, 0.99),
    };
    for row in rows.iter_mut() {
        if let Some(price) = row.price.as_mut() {
            *price = band.clamp(*price);
        }
    }
    Some(band)
}

/// Stage 8: cap minimum_nights at one year.
fn cap_minimum_nights(rows: &mut [Coerced]) {
    for row in rows {
        if let Some(nights) = row.minimum_nights.as_mut() {
            if *nights > MAX_MINIMUM_NIGHTS {
                *nights = MAX_MINIMUM_NIGHTS;
            }
        }
    }
}

/// Absent-value counts over the final set, keyed in column contract order.
fn absent_counts(rows: &[CleanRecord]) -> IndexMap<String, usize> {
    SOURCE_COLUMNS
        .iter()
        .map(|(column, _)| {
            let absent = rows.iter().filter(|row| row.is_absent(column)).count();
            (column.to_string(), absent)
        })
        .collect()
}
