//! Request and response bodies.

use actionnote_core::{ActionItem, ExtractionMethod, Note, NoteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct NoteCreateRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteListResponse {
    pub notes: Vec<Note>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItemListResponse {
    pub items: Vec<ActionItem>,
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractActionItemsRequest {
    pub text: String,
    #[serde(default)]
    pub save_note: bool,
    #[serde(default)]
    pub use_llm: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractActionItemsResponse {
    pub note_id: Option<NoteId>,
    pub items: Vec<ActionItem>,
    pub extraction_method: ExtractionMethod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkActionItemDoneRequest {
    #[serde(default = "default_done")]
    pub done: bool,
}

fn default_done() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkActionItemDoneResponse {
    pub id: i64,
    pub done: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionItemListParams {
    pub note_id: Option<NoteId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub app: String,
    pub version: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
    pub status_code: u16,
}
