//! Pipeline orchestration: extract → staging → cleaner → curated.

use std::path::Path;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clean::{CleanReport, Cleaner};
use crate::config::Config;
use crate::error::Result;
use crate::ingest::{Loader, SourceMetadata};
use crate::store::{CuratedStore, StagingStore};

/// Summary of one staging load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Rows written to the staging table.
    pub rows_staged: usize,
    /// Metadata about the ingested extract.
    pub source: SourceMetadata,
}

/// One pipeline run against a single database handle.
///
/// The connection is constructed explicitly, owned for the life of the run,
/// and released on drop; there is no ambient connection state. Fatal
/// conditions abort before any curated write.
pub struct Pipeline {
    conn: Connection,
}

impl Pipeline {
    /// Wrap an existing connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open the database named by the configuration.
    pub fn open(config: &Config) -> Result<Self> {
        let conn = Connection::open(&config.db_path)?;
        Ok(Self::new(conn))
    }

    /// Ingest an extract and replace the staging table with it.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadSummary> {
        let loader = Loader::new();
        let (rows, source) = loader.read_file(path)?;

        let staging = StagingStore::new(&self.conn);
        staging.init()?;
        let rows_staged = staging.replace(&rows)?;

        info!(rows = rows_staged, file = %source.file, "staged extract");
        Ok(LoadSummary { rows_staged, source })
    }

    /// Clean the staged rows and replace the curated table with the result.
    ///
    /// The diagnostics report is returned to the caller; nothing persists it.
    pub fn transform(&self) -> Result<CleanReport> {
        let staging = StagingStore::new(&self.conn);
        staging.init()?;
        let raw = staging.fetch_all()?;

        let (cleaned, report) = Cleaner::new().clean(&raw);

        let curated = CuratedStore::new(&self.conn);
        curated.init()?;
        curated.replace(&cleaned)?;

        info!(
            before = report.rows_before,
            after = report.rows_after,
            "curated table replaced"
        );
        Ok(report)
    }

    /// Load and transform in one pass.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<(LoadSummary, CleanReport)> {
        let summary = self.load(path)?;
        let report = self.transform()?;
        Ok((summary, report))
    }

    /// Rows currently staged.
    pub fn staged_rows(&self) -> Result<usize> {
        let staging = StagingStore::new(&self.conn);
        staging.init()?;
        staging.count()
    }

    /// Rows currently curated.
    pub fn curated_rows(&self) -> Result<usize> {
        let curated = CuratedStore::new(&self.conn);
        curated.init()?;
        curated.count()
    }
}
