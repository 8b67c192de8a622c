//! Core domain logic for the action item extractor.
//! This crate is the single source of truth for extraction rules and store
//! invariants.

pub mod config;
pub mod db;
pub mod extract;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, Settings};
pub use extract::{
    extract_action_items, extract_action_items_llm, run_extraction, ChatBackend,
    ExtractionMethod, LlmError, OllamaBackend,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::action_item::{ActionItem, ActionItemId};
pub use model::note::{Note, NoteId};
pub use model::{normalize_text_input, ValidationError};
pub use repo::action_item_repo::{
    ActionItemListQuery, ActionItemRepository, SqliteActionItemRepository,
};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::action_item_service::{ActionItemService, ActionItemsListResult, MarkDoneResult};
pub use service::extraction_service::{persist_extraction, ExtractionRecord};
pub use service::note_service::{NoteService, NotesListResult};
pub use service::ServiceError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
