//! Run command - load and transform in one pass.

use std::path::PathBuf;

use colored::Colorize;
use tamis::{Config, Pipeline};

use super::print_report;

pub fn run(file: PathBuf, db: Option<PathBuf>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = Config::resolve(db)?;
    let pipeline = Pipeline::open(&config)?;

    if !json {
        println!(
            "{} {}",
            "Running pipeline on".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let (summary, report) = pipeline.run(&file)?;

    if !json {
        println!(
            "Staged {} rows from {}",
            summary.rows_staged.to_string().white().bold(),
            summary.source.file,
        );
    }
    print_report(&report, json)
}
