//! Action item extraction strategies.
//!
//! # Responsibility
//! - Turn free text into an ordered list of candidate action items.
//! - Offer a deterministic heuristic and a language-model strategy behind
//!   one method selector.
//!
//! # Invariants
//! - Extraction never fails; failures degrade to an empty list.
//! - Extraction is pure with respect to storage: callers decide what to
//!   persist.

pub mod heuristic;
pub mod llm;

use serde::{Deserialize, Serialize};

pub use heuristic::extract_action_items;
pub use llm::{extract_action_items_llm, ChatBackend, LlmError, OllamaBackend};

/// Strategy used to produce a list of action items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Heuristic,
    Llm,
}

impl ExtractionMethod {
    /// Stable wire name (`heuristic` | `llm`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Llm => "llm",
        }
    }

    /// Picks the strategy from a `use_llm` request flag.
    pub fn from_use_llm(use_llm: bool) -> Self {
        if use_llm {
            Self::Llm
        } else {
            Self::Heuristic
        }
    }
}

/// Runs the selected strategy.
///
/// `Llm` delegates to `backend`; the heuristic ignores it.
pub fn run_extraction<B: ChatBackend + ?Sized>(
    method: ExtractionMethod,
    backend: &B,
    text: &str,
) -> Vec<String> {
    match method {
        ExtractionMethod::Heuristic => extract_action_items(text),
        ExtractionMethod::Llm => extract_action_items_llm(backend, text),
    }
}
