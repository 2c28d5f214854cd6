//! Tamis CLI - batch ETL for listing extracts.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tamis=debug")),
            )
            .init();
    }

    let result = match cli.command {
        Commands::Load { file, db } => commands::load::run(file, db),

        Commands::Transform { db, json } => commands::transform::run(db, json),

        Commands::Run { file, db, json } => commands::run::run(file, db, json),

        Commands::Status { db } => commands::status::run(db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
