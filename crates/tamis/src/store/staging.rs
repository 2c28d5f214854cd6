//! Staging store: raw rows exactly as ingested.

use rusqlite::{Connection, params};
use tracing::info;

use crate::error::Result;
use crate::record::RawRecord;

/// Raw listings staged ahead of cleaning.
///
/// Every column is TEXT and nothing is validated here; the staging table is
/// a verbatim copy of the extract. Row order (rowid) carries the ingestion
/// order that de-duplication treats as first-seen.
pub struct StagingStore<'c> {
    conn: &'c Connection,
}

impl<'c> StagingStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Create the staging table when missing.
    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS raw_listings (
                id TEXT,
                name TEXT,
                host_id TEXT,
                neighbourhood TEXT,
                latitude TEXT,
                longitude TEXT,
                room_type TEXT,
                price TEXT,
                minimum_nights TEXT,
                number_of_reviews TEXT,
                last_review TEXT,
                reviews_per_month TEXT,
                availability_365 TEXT
            )",
        )?;
        Ok(())
    }

    /// Replace the staged batch wholesale.
    pub fn replace(&self, rows: &[RawRecord]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM raw_listings", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO raw_listings (id, name, host_id, neighbourhood, latitude, \
                 longitude, room_type, price, minimum_nights, number_of_reviews, \
                 last_review, reviews_per_month, availability_365) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
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
                ])?;
            }
        }
        tx.commit()?;
        info!(rows = rows.len(), "replaced staged batch");
        Ok(rows.len())
    }

    /// All staged rows, in ingestion order.
    pub fn fetch_all(&self) -> Result<Vec<RawRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, host_id, neighbourhood, latitude, longitude, room_type, \
             price, minimum_nights, number_of_reviews, last_review, reviews_per_month, \
             availability_365 FROM raw_listings ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RawRecord {
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
            .query_row("SELECT COUNT(*) FROM raw_listings", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_conn() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    fn raw(id: &str, name: &str) -> RawRecord {
        RawRecord {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_preserves_order_and_absence() {
        let conn = store_conn();
        let store = StagingStore::new(&conn);
        store.init().unwrap();

        let rows = vec![raw("2", "b"), raw("1", "a"), RawRecord::default()];
        store.replace(&rows).unwrap();

        let fetched = store.fetch_all().unwrap();
        assert_eq!(fetched, rows);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_replace_is_destructive() {
        let conn = store_conn();
        let store = StagingStore::new(&conn);
        store.init().unwrap();

        store.replace(&[raw("1", "a"), raw("2", "b")]).unwrap();
        store.replace(&[raw("3", "c")]).unwrap();

        let fetched = store.fetch_all().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id.as_deref(), Some("3"));
    }

    #[test]
    fn test_replace_with_empty_batch() {
        let conn = store_conn();
        let store = StagingStore::new(&conn);
        store.init().unwrap();

        store.replace(&[raw("1", "a")]).unwrap();
        store.replace(&[]).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }
}
