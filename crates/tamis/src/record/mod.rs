//! Record types and the fixed column contract.

mod coerce;

pub use coerce::{coerce_date, coerce_float, coerce_int, coerce_number, coerce_text};

use chrono::{DateTime, NaiveDate, Utc};

/// How a source column is coerced during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Trimmed text, empty becomes absent.
    Text,
    /// Float parsed after junk-character stripping.
    Float,
    /// Integer parsed after junk-character stripping.
    Int,
    /// Float parsed as-is, no stripping.
    Number,
    /// Calendar date.
    Date,
}

/// The thirteen source columns, in contract order.
///
/// This table is the single definition of the schema shared by ingestion
/// (column selection and the mismatch check), the stores' DDL, and the
/// per-column absence counters in the diagnostics report.
pub const SOURCE_COLUMNS: [(&str, FieldKind); 13] = [
    ("id", FieldKind::Int),
    ("name", FieldKind::Text),
    ("host_id", FieldKind::Int),
    ("neighbourhood", FieldKind::Text),
    ("latitude", FieldKind::Float),
    ("longitude", FieldKind::Float),
    ("room_type", FieldKind::Text),
    ("price", FieldKind::Float),
    ("minimum_nights", FieldKind::Int),
    ("number_of_reviews", FieldKind::Int),
    ("last_review", FieldKind::Date),
    ("reviews_per_month", FieldKind::Number),
    ("availability_365", FieldKind::Int),
];

/// Column stamped on curated rows in addition to [`SOURCE_COLUMNS`].
pub const LOADED_AT_COLUMN: &str = "loaded_at";

/// One row exactly as ingested: every field is raw text or absent.
///
/// Produced by ingestion, staged verbatim, and read back as the cleaner's
/// input. Never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub host_id: Option<String>,
    pub neighbourhood: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub room_type: Option<String>,
    pub price: Option<String>,
    pub minimum_nights: Option<String>,
    pub number_of_reviews: Option<String>,
    pub last_review: Option<String>,
    pub reviews_per_month: Option<String>,
    pub availability_365: Option<String>,
}

/// One validated output row: every field is typed or explicitly absent,
/// never a malformed string.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    /// Natural key, guaranteed present and unique across the batch.
    pub id: i64,
    pub name: Option<String>,
    pub host_id: Option<i64>,
    pub neighbourhood: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub room_type: Option<String>,
    pub price: Option<f64>,
    pub minimum_nights: Option<i64>,
    pub number_of_reviews: Option<i64>,
    pub last_review: Option<NaiveDate>,
    pub reviews_per_month: Option<f64>,
    pub availability_365: Option<i64>,
    /// Transform time, second precision, identical across one batch.
    pub loaded_at: DateTime<Utc>,
}

impl CleanRecord {
    /// Whether the named source column is absent on this row.
    ///
    /// `id` is never absent on a curated row. Unknown column names report
    /// as present.
    pub fn is_absent(&self, column: &str) -> bool {
        match column {
            "id" => false,
            "name" => self.name.is_none(),
            "host_id" => self.host_id.is_none(),
            "neighbourhood" => self.neighbourhood.is_none(),
            "latitude" => self.latitude.is_none(),
            "longitude" => self.longitude.is_none(),
            "room_type" => self.room_type.is_none(),
            "price" => self.price.is_none(),
            "minimum_nights" => self.minimum_nights.is_none(),
            "number_of_reviews" => self.number_of_reviews.is_none(),
            "last_review" => self.last_review.is_none(),
            "reviews_per_month" => self.reviews_per_month.is_none(),
            "availability_365" => self.availability_365.is_none(),
            _ => false,
        }
    }
}
