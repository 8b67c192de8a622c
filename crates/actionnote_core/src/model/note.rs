//! Note record.

use serde::{Deserialize, Serialize};

/// Storage-assigned note identifier.
pub type NoteId = i64;

/// Free-text note as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    /// SQLite `datetime('now')` text, UTC.
    pub created_at: String,
}
