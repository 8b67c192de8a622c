//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/get/list APIs with input normalization.
//!
//! # Invariants
//! - Stored content is trimmed and never blank.
//! - Note list is always sorted newest first.

use crate::model::normalize_text_input;
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::NoteRepository;
use crate::service::ServiceError;
use log::info;

/// List result envelope used by service callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResult {
    /// Notes sorted newest first.
    pub items: Vec<Note>,
    pub count: usize,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note from user content and returns the stored record.
    pub fn create_note(&self, content: &str) -> Result<Note, ServiceError> {
        let content = normalize_text_input("content", content)?;
        let note_id = self.repo.create_note(content.as_str())?;
        info!(
            "event=note_create module=service status=ok note_id={} content_chars={}",
            note_id,
            content.chars().count()
        );
        self.repo
            .get_note(note_id)?
            .ok_or(ServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Gets one note by id.
    pub fn get_note(&self, note_id: NoteId) -> Result<Note, ServiceError> {
        self.repo
            .get_note(note_id)?
            .ok_or(ServiceError::NoteNotFound(note_id))
    }

    /// Lists all notes.
    pub fn list_notes(&self) -> Result<NotesListResult, ServiceError> {
        let items = self.repo.list_notes()?;
        Ok(NotesListResult {
            count: items.len(),
            items,
        })
    }
}
