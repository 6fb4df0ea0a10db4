//! Quick note persistence
//!
//! All notes are stored as one ordered JSON list under a fixed key. There is
//! no schema version: an absent or unreadable value loads as an empty list.

use rusqlite::Connection;
use tracing::warn;

use super::kv::KvStore;
use crate::error::{Error, Result};
use crate::models::QuickNote;

/// Storage key for the note list
pub const NOTES_KEY: &str = "hackathon-os:quick-notes";

/// Note store
pub struct NoteStore<'a> {
    kv: KvStore<'a>,
}

impl<'a> NoteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            kv: KvStore::new(conn),
        }
    }

    /// Load notes, newest first as they were saved
    pub fn load(&self) -> Result<Vec<QuickNote>> {
        match self.kv.get::<Vec<QuickNote>>(NOTES_KEY) {
            Ok(Some(notes)) => Ok(notes),
            Ok(None) => Ok(Vec::new()),
            Err(Error::Serialization(e)) => {
                warn!(error = %e, "Discarding unreadable quick notes");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Replace the stored list
    pub fn save(&self, notes: &[QuickNote]) -> Result<()> {
        self.kv.set(NOTES_KEY, notes)
    }
}
