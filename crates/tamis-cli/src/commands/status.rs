//! Status command - show staging and curated row counts.

use std::path::PathBuf;

use colored::Colorize;
use tamis::{Config, Pipeline};

pub fn run(db: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::resolve(db)?;
    let pipeline = Pipeline::open(&config)?;

    println!("Database: {}", config.db_path.display().to_string().white());
    println!(
        "  staged rows:  {}",
        pipeline.staged_rows()?.to_string().white().bold()
    );
    println!(
        "  curated rows: {}",
        pipeline.curated_rows()?.to_string().white().bold()
    );

    Ok(())
}
