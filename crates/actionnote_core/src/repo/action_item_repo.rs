//! Action item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Bulk-insert extracted items, optionally linked to a note.
//! - Fetch, list and toggle completion of action items.
//!
//! # Invariants
//! - Bulk inserts return ids in input order.
//! - `mark_done` on an unknown id is `RepoError::NotFound`, never a no-op.
//! - Listing is newest first (`id DESC`).

use crate::model::action_item::{ActionItem, ActionItemId};
use crate::model::note::NoteId;
use crate::repo::{ensure_tables_exist, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ACTION_ITEM_SELECT_SQL: &str = "SELECT
    id,
    note_id,
    text,
    done,
    created_at
FROM action_items";

/// Query options for listing action items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionItemListQuery {
    /// Restricts the list to items linked to this note.
    pub note_id: Option<NoteId>,
}

/// Repository interface for action item operations.
pub trait ActionItemRepository {
    /// Inserts items in order and returns their ids.
    fn create_action_items(
        &self,
        items: &[String],
        note_id: Option<NoteId>,
    ) -> RepoResult<Vec<ActionItemId>>;
    /// Gets one action item by id.
    fn get_action_item(&self, id: ActionItemId) -> RepoResult<Option<ActionItem>>;
    /// Lists action items, newest first.
    fn list_action_items(&self, query: &ActionItemListQuery) -> RepoResult<Vec<ActionItem>>;
    /// Sets the completion flag of one item.
    fn mark_done(&self, id: ActionItemId, done: bool) -> RepoResult<()>;
}

/// SQLite-backed action item repository.
pub struct SqliteActionItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActionItemRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_exist(conn, &["notes", "action_items"])?;
        Ok(Self { conn })
    }
}

impl ActionItemRepository for SqliteActionItemRepository<'_> {
    fn create_action_items(
        &self,
        items: &[String],
        note_id: Option<NoteId>,
    ) -> RepoResult<Vec<ActionItemId>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self
            .conn
            .prepare("INSERT INTO action_items (note_id, text) VALUES (?1, ?2);")?;
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            ids.push(stmt.insert(params![note_id, item.as_str()])?);
        }
        Ok(ids)
    }

    fn get_action_item(&self, id: ActionItemId) -> RepoResult<Option<ActionItem>> {
        let item = self
            .conn
            .query_row(
                &format!("{ACTION_ITEM_SELECT_SQL} WHERE id = ?1;"),
                [id],
                action_item_from_row,
            )
            .optional()?;
        Ok(item)
    }

    fn list_action_items(&self, query: &ActionItemListQuery) -> RepoResult<Vec<ActionItem>> {
        let items = match query.note_id {
            Some(note_id) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{ACTION_ITEM_SELECT_SQL} WHERE note_id = ?1 ORDER BY id DESC;"
                ))?;
                let rows = stmt.query_map([note_id], action_item_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{ACTION_ITEM_SELECT_SQL} ORDER BY id DESC;"))?;
                let rows = stmt.query_map([], action_item_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(items)
    }

    fn mark_done(&self, id: ActionItemId, done: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE action_items SET done = ?1 WHERE id = ?2;",
            params![bool_to_int(done), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "action item",
                id,
            });
        }
        Ok(())
    }
}

fn action_item_from_row(row: &Row<'_>) -> rusqlite::Result<ActionItem> {
    Ok(ActionItem {
        id: row.get("id")?,
        note_id: row.get("note_id")?,
        text: row.get("text")?,
        done: row.get::<_, Option<i64>>("done")?.unwrap_or(0) != 0,
        created_at: row.get::<_, Option<String>>("created_at")?.unwrap_or_default(),
    })
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
