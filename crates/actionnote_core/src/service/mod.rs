//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep HTTP/CLI layers decoupled from storage details.

pub mod action_item_service;
pub mod extraction_service;
pub mod note_service;

use crate::model::action_item::ActionItemId;
use crate::model::note::NoteId;
use crate::model::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note and action item use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// User input failed validation.
    InvalidInput(ValidationError),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Target action item does not exist.
    ActionItemNotFound(ActionItemId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "Note with id {id} not found"),
            Self::ActionItemNotFound(id) => write!(f, "Action item with id {id} not found"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "action item",
                id,
            } => Self::ActionItemNotFound(id),
            RepoError::NotFound { entity: "note", id } => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}
