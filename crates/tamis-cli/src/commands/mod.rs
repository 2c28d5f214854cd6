//! CLI command implementations.

pub mod load;
pub mod run;
pub mod status;
pub mod transform;

use colored::Colorize;
use tamis::CleanReport;

/// Print the diagnostics report from a cleaning run.
pub(crate) fn print_report(
    report: &CleanReport,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "Rows before: {} | after cleaning: {}",
        report.rows_before.to_string().white().bold(),
        report.rows_after.to_string().white().bold(),
    );
    println!(
        "  duplicates removed: {}  missing id: {}  bad coordinates: {}",
        report.duplicates_removed.to_string().yellow(),
        report.missing_id_rows.to_string().yellow(),
        report.geo_invalid_rows.to_string().yellow(),
    );

    match report.price_band {
        Some(band) => println!("Price band: {:.2} to {:.2}", band.lower, band.upper),
        None => println!("{}", "Price clipping skipped (sample too small)".dimmed()),
    }

    let with_absences: Vec<String> = report
        .absent_counts
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(column, count)| format!("{column}: {count}"))
        .collect();
    if with_absences.is_empty() {
        println!("No absent values in the curated set");
    } else {
        println!("Absent values: {}", with_absences.join(", "));
    }

    Ok(())
}
