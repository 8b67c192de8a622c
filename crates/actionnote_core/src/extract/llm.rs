//! Language-model action item extraction over the Ollama chat API.
//!
//! # Responsibility
//! - Build the extraction prompt and the structured-output schema.
//! - Call a chat backend and parse its `{"action_items": [...]}` reply.
//!
//! # Invariants
//! - `extract_action_items_llm` never fails; any backend or parse error is
//!   logged and yields an empty list.
//! - There is no fallback to the heuristic extractor on failure.
//! - Returned items are trimmed and never blank.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Failure talking to a chat backend.
#[derive(Debug)]
pub enum LlmError {
    /// Connection, timeout or body read failure.
    Transport(reqwest::Error),
    /// Backend answered with a non-success HTTP status.
    Status { code: u16, body: String },
    /// Reply did not match the expected JSON shape.
    Decode(serde_json::Error),
}

impl Display for LlmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "llm request failed: {err}"),
            Self::Status { code, body } => write!(f, "llm backend returned {code}: {body}"),
            Self::Decode(err) => write!(f, "llm reply is not valid json: {err}"),
        }
    }
}

impl Error for LlmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Chat-completion seam used by the language-model extractor.
pub trait ChatBackend {
    /// Sends one user prompt constrained to `schema` and returns the raw
    /// message content.
    fn complete_json(&self, prompt: &str, schema: &Value) -> Result<String, LlmError>;
}

/// Structured reply expected from the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItemsPayload {
    pub action_items: Vec<String>,
}

/// JSON schema handed to the backend as the structured-output format.
pub fn action_items_schema() -> Value {
    json!({
        "title": "ActionItemsResponse",
        "type": "object",
        "properties": {
            "action_items": {
                "title": "Action Items",
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["action_items"]
    })
}

/// Builds the extraction prompt for `text`.
pub fn build_extraction_prompt(text: &str) -> String {
    format!(
        "Extract all action items from the following meeting notes or text.\n\
         An action item is a specific task, todo, or item that requires action or follow-up.\n\
         \n\
         Text:\n\
         {text}\n\
         \n\
         Return the action items as a JSON object with an \"action_items\" array containing the extracted items."
    )
}

/// Parses model output into trimmed, non-blank action items.
pub fn parse_action_items_payload(content: &str) -> Result<Vec<String>, LlmError> {
    let payload: ActionItemsPayload = serde_json::from_str(content)?;
    Ok(payload
        .action_items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect())
}

/// Extracts action items by asking `backend`.
///
/// Returns an empty list on any failure.
pub fn extract_action_items_llm<B: ChatBackend + ?Sized>(backend: &B, text: &str) -> Vec<String> {
    let started_at = Instant::now();
    let prompt = build_extraction_prompt(text);
    let result = backend
        .complete_json(&prompt, &action_items_schema())
        .and_then(|content| parse_action_items_payload(&content));

    match result {
        Ok(items) => {
            info!(
                "event=llm_extract module=extract status=ok duration_ms={} item_count={}",
                started_at.elapsed().as_millis(),
                items.len()
            );
            items
        }
        Err(err) => {
            warn!(
                "event=llm_extract module=extract status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Vec::new()
        }
    }
}

/// Blocking client for a local Ollama server.
///
/// The HTTP client is built per call, so the backend can be created inside
/// an async runtime and used from blocking worker threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaBackend {
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    format: &'a Value,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL)
    }
}

impl ChatBackend for OllamaBackend {
    fn complete_json(&self, prompt: &str, schema: &Value) -> Result<String, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            format: schema,
            options: ChatOptions { temperature: 0.0 },
        };

        let response = client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Status {
                code: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let reply: ChatResponse = serde_json::from_str(&response.text()?)?;
        Ok(reply.message.content)
    }
}
