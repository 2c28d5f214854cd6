//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tamis: batch ETL that stages, cleans, and curates listing extracts
#[derive(Parser)]
#[command(name = "tamis")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a listings CSV extract into the staging table
    Load {
        /// Path to the CSV extract
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Database path (overrides TAMIS_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Clean the staged rows and replace the curated table
    Transform {
        /// Database path (overrides TAMIS_DB)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Print the diagnostics report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load and transform in one pass
    Run {
        /// Path to the CSV extract
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Database path (overrides TAMIS_DB)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Print the diagnostics report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show staging and curated row counts
    Status {
        /// Database path (overrides TAMIS_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}
