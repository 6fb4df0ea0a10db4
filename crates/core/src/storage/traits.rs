//! Storage repository traits
//!
//! The workspace store depends on these rather than on SQLite directly.

use crate::error::Result;
use crate::models::QuickNote;

/// Persistence for the current user's quick notes
pub trait NoteRepository {
    /// Load the saved list; absent or unreadable data is an empty list
    fn load_notes(&self) -> Result<Vec<QuickNote>>;

    /// Replace the saved list
    fn save_notes(&self, notes: &[QuickNote]) -> Result<()>;
}
