//! Curated store: validated, typed rows for downstream consumption.

use rusqlite::{Connection, params};
use tracing::info;

use crate::error::Result;
use crate::record::{CleanRecord, FieldKind, LOADED_AT_COLUMN, SOURCE_COLUMNS};

/// The curated listings table.
///
/// Fourteen typed columns with `id` as primary key, replaced wholesale on
/// every transform run. Secondary indexes cover the common downstream
/// lookups by neighbourhood and room type.
pub struct CuratedStore<'c> {
    conn: &'c Connection,
}

impl<'c> CuratedStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Create the curated table and its indexes when missing.
    ///
    /// The column list is derived from the shared contract table.
    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS listings ({});
            CREATE INDEX IF NOT EXISTS idx_listings_neighbourhood
                ON listings (neighbourhood);
            CREATE INDEX IF NOT EXISTS idx_listings_room_type
                ON listings (room_type);",
            curated_columns_ddl(),
        ))?;
        Ok(())
    }

    /// Replace the curated table wholesale.
    ///
    /// Truncate-then-insert inside one transaction: a reader sees the prior
    /// complete dataset or the new one, never an interleaving.
    pub fn replace(&self, rows: &[CleanRecord]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM listings", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO listings (id, name, host_id, neighbourhood, latitude, \
                 longitude, room_type, price, minimum_nights, number_of_reviews, \
                 last_review, reviews_per_month, availability_365, loaded_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.id,
                    row.name,
                    row.host_id,
                    row.neighbourhood,
                    row.latitude,
                    row.longitude,
                    row.room_type,
                    row.price,
                    row.minimum_nights,
                    row.number_of_reviews,
                    row.last_review,
                    row.reviews_per_month,
                    row.availability_365,
                    row.loaded_at,
                ])?;
            }
        }
        tx.commit()?;
        info!(rows = rows.len(), "replaced curated table");
        Ok(rows.len())
    }

    /// All curated rows, ordered by id.
    pub fn fetch_all(&self) -> Result<Vec<CleanRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, host_id, neighbourhood, latitude, longitude, room_type, \
             price, minimum_nights, number_of_reviews, last_review, reviews_per_month, \
             availability_365, loaded_at FROM listings ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CleanRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                host_id: row.get(2)?,
                neighbourhood: row.get(3)?,
                latitude: row.get(4)?,
                longitude: row.get(5)?,
                room_type: row.get(6)?,
                price: row.get(7)?,
                minimum_nights: row.get(8)?,
                number_of_reviews: row.get(9)?,
                last_review: row.get(10)?,
                reviews_per_month: row.get(11)?,
                availability_365: row.get(12)?,
                loaded_at: row.get(13)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM listings", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

/// Typed column definitions for the curated table, in contract order.
fn curated_columns_ddl() -> String {
    let mut columns: Vec<String> = SOURCE_COLUMNS
        .iter()
        .map(|(name, kind)| {
            let sql_type = match kind {
                FieldKind::Text | FieldKind::Date => "TEXT",
                FieldKind::Float | FieldKind::Number => "REAL",
                FieldKind::Int => "INTEGER",
            };
            if *name == "id" {
                format!("{name} {sql_type} PRIMARY KEY")
            } else {
                format!("{name} {sql_type}")
            }
        })
        .collect();
    columns.push(format!("{LOADED_AT_COLUMN} TEXT NOT NULL"));
    columns.join(", ")
}
