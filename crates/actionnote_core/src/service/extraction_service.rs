//! Persistence of extraction results.
//!
//! # Responsibility
//! - Store an optional source note plus the items extracted from it, as one
//!   unit of work.
//!
//! # Invariants
//! - Either every row of one extraction is committed or none is.
//! - Blank items are never persisted.
//! - Returned items carry storage timestamps (read back after insert).

use crate::extract::ExtractionMethod;
use crate::model::action_item::ActionItem;
use crate::model::note::NoteId;
use crate::repo::action_item_repo::{ActionItemRepository, SqliteActionItemRepository};
use crate::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use crate::service::ServiceError;
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Stored outcome of one extraction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRecord {
    /// Id of the saved source note, when saving was requested.
    pub note_id: Option<NoteId>,
    /// Persisted items in extraction order.
    pub items: Vec<ActionItem>,
    pub method: ExtractionMethod,
}

/// Persists `items` extracted from `text`, saving `text` as a note first
/// when `save_note` is set.
pub fn persist_extraction(
    conn: &mut Connection,
    text: &str,
    save_note: bool,
    items: &[String],
    method: ExtractionMethod,
) -> Result<ExtractionRecord, ServiceError> {
    let items: Vec<String> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let (note_id, stored) = {
        let note_id = if save_note {
            Some(SqliteNoteRepository::try_new(&tx)?.create_note(text)?)
        } else {
            None
        };

        let repo = SqliteActionItemRepository::try_new(&tx)?;
        let ids = repo.create_action_items(&items, note_id)?;
        let mut stored = Vec::with_capacity(ids.len());
        for id in ids {
            let item = repo
                .get_action_item(id)?
                .ok_or(ServiceError::InconsistentState(
                    "inserted action item not found in read-back",
                ))?;
            stored.push(item);
        }
        (note_id, stored)
    };
    tx.commit()?;

    info!(
        "event=extraction_persist module=service status=ok method={} note_saved={} item_count={}",
        method.as_str(),
        note_id.is_some(),
        stored.len()
    );

    Ok(ExtractionRecord {
        note_id,
        items: stored,
        method,
    })
}
