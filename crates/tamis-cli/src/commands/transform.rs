//! Transform command - clean staged rows into the curated table.

use std::path::PathBuf;

use colored::Colorize;
use tamis::{Config, Pipeline};

use super::print_report;

pub fn run(db: Option<PathBuf>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::resolve(db)?;
    let pipeline = Pipeline::open(&config)?;

    if !json {
        println!("{}", "Transforming staged rows".cyan().bold());
    }

    let report = pipeline.transform()?;
    print_report(&report, json)
}
