//! SQLite storage layer for Hackathon OS

mod kv;
mod migrations;
mod notes;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;

use crate::error::Result;
use crate::models::QuickNote;

pub use kv::KvStore;
pub use notes::{NoteStore, NOTES_KEY};
pub use traits::NoteRepository;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    pub fn schema_version(&self) -> Result<u32> {
        migrations::current_version(&self.conn)
    }

    pub fn notes(&self) -> NoteStore<'_> {
        NoteStore::new(&self.conn)
    }
}

impl NoteRepository for Database {
    fn load_notes(&self) -> Result<Vec<QuickNote>> {
        self.notes().load()
    }

    fn save_notes(&self, notes: &[QuickNote]) -> Result<()> {
        self.notes().save(notes)
    }
}
