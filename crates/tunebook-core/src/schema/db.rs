use rusqlite::Connection;
use std::path::Path;

use crate::error::Result;
use crate::model::{NewTune, Tune, TuneId};

use super::ddl::{CREATE_TUNES, DROP_TUNES, INSERT_TUNE, SELECT_TUNES};

/// A handle on the tune store.
///
/// The handle owns its SQLite connection; dropping it closes the file on
/// every exit path.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and ensure the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize(false)?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize(false)?;
        Ok(db)
    }

    /// Ensure the `tunes` table exists.
    ///
    /// With `reset` the table is dropped first, discarding every stored tune
    /// and restarting id assignment. Without it, existing rows are untouched.
    pub fn initialize(&self, reset: bool) -> Result<()> {
        if reset {
            log::info!("Resetting tunes table");
            self.conn.execute_batch(DROP_TUNES)?;
        }
        self.conn.execute_batch(CREATE_TUNES)?;
        Ok(())
    }

    /// Number of tunes currently stored.
    pub fn count_tunes(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM tunes", [], |row| row.get(0))?;
        Ok(count)
    }
}

// Tune persistence
impl Database {
    /// Append a batch of tunes and return their new ids in input order.
    ///
    /// The batch is written in one transaction: if any row fails the whole
    /// batch is rolled back and the error returned. Batches committed by
    /// earlier calls are unaffected.
    pub fn insert_many(&mut self, tunes: &[NewTune]) -> Result<Vec<TuneId>> {
        if tunes.is_empty() {
            return Ok(Vec::new());
        }

        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(tunes.len());
        {
            let mut stmt = tx.prepare_cached(INSERT_TUNE)?;
            for tune in tunes {
                let rowid = stmt.insert(rusqlite::params![
                    tune.book,
                    tune.source_name,
                    tune.reference,
                    tune.title,
                    tune.rhythm,
                    tune.meter,
                    tune.key,
                    tune.body,
                ])?;
                ids.push(TuneId::from(rowid));
            }
        }
        tx.commit()?;

        log::debug!("Inserted {} tune(s)", ids.len());
        Ok(ids)
    }

    /// Load every stored tune in id order.
    pub fn load_all(&self) -> Result<Vec<Tune>> {
        let mut stmt = self.conn.prepare(SELECT_TUNES)?;
        let tunes = stmt
            .query_map([], row_to_tune)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tunes)
    }
}

fn row_to_tune(row: &rusqlite::Row) -> rusqlite::Result<Tune> {
    Ok(Tune {
        id: row.get(0)?,
        book: row.get(1)?,
        source_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        reference: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        title: row.get(4)?,
        rhythm: row.get(5)?,
        meter: row.get(6)?,
        key: row.get(7)?,
        body: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
    })
}
