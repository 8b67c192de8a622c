//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert, fetch and list raw notes.
//!
//! # Invariants
//! - Listing is newest first (`id DESC`).
//! - Content is stored as given; normalization belongs to the service layer.

use crate::model::note::{Note, NoteId};
use crate::repo::{ensure_tables_exist, RepoResult};
use rusqlite::{Connection, OptionalExtension, Row};

const NOTE_SELECT_SQL: &str = "SELECT id, content, created_at FROM notes";

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Inserts one note and returns its id.
    fn create_note(&self, content: &str) -> RepoResult<NoteId>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists all notes, newest first.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables_exist(conn, &["notes"])?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, content: &str) -> RepoResult<NoteId> {
        self.conn
            .execute("INSERT INTO notes (content) VALUES (?1);", [content])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let note = self
            .conn
            .query_row(
                &format!("{NOTE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                note_from_row,
            )
            .optional()?;
        Ok(note)
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id DESC;"))?;
        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        content: row.get("content")?,
        created_at: row.get::<_, Option<String>>("created_at")?.unwrap_or_default(),
    })
}
