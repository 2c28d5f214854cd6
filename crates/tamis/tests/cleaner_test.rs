//! Integration tests for the cleaning pipeline.

use tamis::{Cleaner, RawRecord};

fn some(v: &str) -> Option<String> {
    Some(v.to_string())
}

/// A fully populated, well-formed staged row.
fn listing(id: &str) -> RawRecord {
    RawRecord {
        id: some(id),
        name: some("Canal view studio"),
        host_id: some("10"),
        neighbourhood: some("Centrum"),
        latitude: some("52.37"),
        longitude: some("4.89"),
        room_type: some("Entire home/apt"),
        price: some("120"),
        minimum_nights: some("2"),
        number_of_reviews: some("5"),
        last_review: some("2024-05-01"),
        reviews_per_month: some("0.40"),
        availability_365: some("200"),
    }
}

// =============================================================================
// Coercion
// =============================================================================

#[test]
fn test_messy_values_coerced_not_fatal() {
    let row = RawRecord {
        price: some("$1,250.00"),
        minimum_nights: some(" 3 nights"),
        last_review: some("not a date"),
        reviews_per_month: some("garbage"),
        ..listing("1")
    };

    let (cleaned, report) = Cleaner::new().clean(&[row]);
    assert_eq!(report.rows_after, 1);

    let out = &cleaned[0];
    assert_eq!(out.price, Some(1250.0));
    assert_eq!(out.minimum_nights, Some(3));
    assert_eq!(out.last_review, None);
    assert_eq!(out.reviews_per_month, None);
}

#[test]
fn test_garbage_id_is_dropped_as_missing() {
    let row = RawRecord {
        id: some("not-an-id"),
        ..listing("1")
    };
    let (cleaned, report) = Cleaner::new().clean(&[row]);
    assert!(cleaned.is_empty());
    assert_eq!(report.missing_id_rows, 1);
}

// =============================================================================
// Missing-value policy
// =============================================================================

#[test]
fn test_reviews_per_month_forced_to_zero() {
    let zero_reviews = RawRecord {
        id: some("1"),
        number_of_reviews: some("0"),
        reviews_per_month: None,
        ..listing("1")
    };
    let absent_reviews = RawRecord {
        id: some("2"),
        number_of_reviews: None,
        reviews_per_month: None,
        ..listing("2")
    };
    let reviewed = RawRecord {
        id: some("3"),
        number_of_reviews: some("5"),
        reviews_per_month: None,
        ..listing("3")
    };

    let (cleaned, _) = Cleaner::new().clean(&[zero_reviews, absent_reviews, reviewed]);
    assert_eq!(cleaned[0].reviews_per_month, Some(0.0));
    assert_eq!(cleaned[1].reviews_per_month, Some(0.0));
    assert_eq!(cleaned[2].reviews_per_month, None);
}

// =============================================================================
// De-duplication and primary key
// =============================================================================

#[test]
fn test_dedup_first_seen_wins() {
    let rows = vec![
        RawRecord {
            name: some("a"),
            ..listing("1")
        },
        RawRecord {
            name: some("b"),
            ..listing("1")
        },
        RawRecord {
            name: some("c"),
            ..listing("2")
        },
    ];

    let (cleaned, report) = Cleaner::new().clean(&rows);
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(cleaned.len(), 2);
    assert_eq!(cleaned[0].name.as_deref(), Some("a"));
    assert_eq!(cleaned[1].name.as_deref(), Some("c"));
}

#[test]
fn test_ids_unique_in_output() {
    let rows = vec![listing("1"), listing("2"), listing("1"), listing("2")];
    let (cleaned, _) = Cleaner::new().clean(&rows);
    let mut ids: Vec<i64> = cleaned.iter().map(|r| r.id).collect();
    ids.dedup();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_all_absent_row_dies_at_pk_stage() {
    let rows = vec![RawRecord::default(), RawRecord::default(), listing("1")];
    let (cleaned, report) = Cleaner::new().clean(&rows);

    // The two id-less rows collapse to one duplicate, then the survivor is
    // dropped for having no id.
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.missing_id_rows, 1);
    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].id, 1);
}

// =============================================================================
// Geographic filter
// =============================================================================

#[test]
fn test_out_of_range_latitude_dropped() {
    let bad = RawRecord {
        latitude: some("95"),
        ..listing("1")
    };
    let (cleaned, report) = Cleaner::new().clean(&[bad]);
    assert!(cleaned.is_empty());
    assert_eq!(report.geo_invalid_rows, 1);
}

#[test]
fn test_absent_latitude_retained() {
    let row = RawRecord {
        latitude: None,
        longitude: some("10"),
        ..listing("1")
    };
    let (cleaned, report) = Cleaner::new().clean(&[row]);
    assert_eq!(cleaned.len(), 1);
    assert_eq!(report.geo_invalid_rows, 0);
    assert_eq!(cleaned[0].latitude, None);
    assert_eq!(cleaned[0].longitude, Some(10.0));
}

// =============================================================================
// Price clipping
// =============================================================================

fn priced_batch(prices: &[f64]) -> Vec<RawRecord> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| RawRecord {
            price: some(&format!("{p}")),
            ..listing(&(i + 1).to_string())
        })
        .collect()
}

#[test]
fn test_small_sample_skips_clipping() {
    let mut prices = vec![5.0; 8];
    prices.push(1_000_000.0);
    let (cleaned, report) = Cleaner::new().clean(&priced_batch(&prices));

    assert_eq!(report.price_band, None);
    assert_eq!(cleaned[8].price, Some(1_000_000.0));
}

#[test]
fn test_clipping_clamps_to_percentile_band() {
    let prices: Vec<f64> = (0..=100).map(f64::from).collect();
    let (cleaned, report) = Cleaner::new().clean(&priced_batch(&prices));

    let band = report.price_band.expect("clipping should run");
    assert_eq!(band.lower, 1.0);
    assert_eq!(band.upper, 99.0);

    let out: Vec<f64> = cleaned.iter().filter_map(|r| r.price).collect();
    assert_eq!(out[0], 1.0);
    assert_eq!(out[100], 99.0);
    assert_eq!(out[50], 50.0);
}

#[test]
fn test_clipping_stable_on_cleaned_output() {
    let prices: Vec<f64> = (0..=100).map(f64::from).collect();
    let (first_pass, _) = Cleaner::new().clean(&priced_batch(&prices));

    // Feed the cleaned prices back through; the band is stable and the
    // second pass changes nothing.
    let clipped: Vec<f64> = first_pass.iter().filter_map(|r| r.price).collect();
    let (second_pass, report) = Cleaner::new().clean(&priced_batch(&clipped));

    let band = report.price_band.expect("clipping should run");
    assert_eq!(band.lower, 1.0);
    assert_eq!(band.upper, 99.0);
    let twice: Vec<f64> = second_pass.iter().filter_map(|r| r.price).collect();
    assert_eq!(twice, clipped);
}

// =============================================================================
// Minimum nights
// =============================================================================

#[test]
fn test_minimum_nights_capped() {
    let long = RawRecord {
        minimum_nights: some("1000"),
        ..listing("1")
    };
    let normal = RawRecord {
        minimum_nights: some("300"),
        ..listing("2")
    };

    let (cleaned, _) = Cleaner::new().clean(&[long, normal]);
    assert_eq!(cleaned[0].minimum_nights, Some(365));
    assert_eq!(cleaned[1].minimum_nights, Some(300));
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn test_row_count_conservation() {
    let rows = vec![
        listing("1"),
        listing("1"), // duplicate
        listing("2"),
        RawRecord::default(), // missing id
        RawRecord {
            latitude: some("95"),
            ..listing("3")
        }, // bad geography
        listing("4"),
    ];

    let (cleaned, report) = Cleaner::new().clean(&rows);
    assert_eq!(report.rows_before, 6);
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.missing_id_rows, 1);
    assert_eq!(report.geo_invalid_rows, 1);
    assert_eq!(
        report.rows_after,
        report.rows_before - report.rows_dropped()
    );
    assert_eq!(cleaned.len(), report.rows_after);

    let ids: Vec<i64> = cleaned.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);
}

#[test]
fn test_batch_timestamp_uniform_and_second_precision() {
    let rows = vec![listing("1"), listing("2"), listing("3")];
    let (cleaned, _) = Cleaner::new().clean(&rows);

    let stamp = cleaned[0].loaded_at;
    assert_eq!(stamp.timestamp_subsec_nanos(), 0);
    assert!(cleaned.iter().all(|r| r.loaded_at == stamp));
}

#[test]
fn test_absent_counts_over_final_set() {
    let rows = vec![
        RawRecord {
            name: None,
            price: None,
            ..listing("1")
        },
        listing("2"),
        RawRecord::default(), // dropped, must not count
    ];

    let (_, report) = Cleaner::new().clean(&rows);
    assert_eq!(report.absent_counts["id"], 0);
    assert_eq!(report.absent_counts["name"], 1);
    assert_eq!(report.absent_counts["price"], 1);
    assert_eq!(report.absent_counts["neighbourhood"], 0);

    // Contract order is preserved for the operator report.
    let columns: Vec<&str> = report.absent_counts.keys().map(String::as_str).collect();
    assert_eq!(columns[0], "id");
    assert_eq!(columns[12], "availability_365");
}
