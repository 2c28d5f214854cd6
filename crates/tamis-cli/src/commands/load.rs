//! Load command - stage a listings extract.

use std::path::PathBuf;

use colored::Colorize;
use tamis::{Config, Pipeline};

pub fn run(file: PathBuf, db: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Loading".cyan().bold(),
        file.display().to_string().white()
    );

    let config = Config::resolve(db)?;
    let pipeline = Pipeline::open(&config)?;
    let summary = pipeline.load(&file)?;

    println!(
        "Staged {} rows from {} ({})",
        summary.rows_staged.to_string().white().bold(),
        summary.source.file,
        summary.source.format,
    );

    Ok(())
}
