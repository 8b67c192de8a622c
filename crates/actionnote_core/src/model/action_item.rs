//! Action item record.
//!
//! # Invariants
//! - `note_id` is `None` for items extracted without saving the source note,
//!   or whose note was deleted afterwards.
//! - `done` starts as `false` and only changes through `mark_done`.

use crate::model::note::NoteId;
use serde::{Deserialize, Serialize};

/// Storage-assigned action item identifier.
pub type ActionItemId = i64;

/// One actionable line derived from a note or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: ActionItemId,
    pub note_id: Option<NoteId>,
    pub text: String,
    pub done: bool,
    /// SQLite `datetime('now')` text, UTC.
    pub created_at: String,
}
