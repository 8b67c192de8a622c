//! Domain model for notes and the action items derived from them.
//!
//! # Responsibility
//! - Define the records shared by storage, services and outer surfaces.
//! - Own input normalization rules for user-provided text.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never reused.
//! - An action item may outlive its note; the link is cleared, not cascaded.

pub mod action_item;
pub mod note;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for user-provided text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input is empty or only whitespace.
    EmptyText { field: &'static str },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText { field } => {
                write!(f, "{field} cannot be empty or whitespace only")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims user text and rejects blank values.
///
/// `field` names the input in the error message (`content`, `text`).
pub fn normalize_text_input(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_text_input, ValidationError};

    #[test]
    fn normalize_trims_surrounding_whitespace() {
        assert_eq!(
            normalize_text_input("content", "  body \n").unwrap(),
            "body"
        );
    }

    #[test]
    fn normalize_rejects_whitespace_only() {
        let err = normalize_text_input("text", " \t\n").unwrap_err();
        assert_eq!(err, ValidationError::EmptyText { field: "text" });
        assert_eq!(err.to_string(), "text cannot be empty or whitespace only");
    }
}
