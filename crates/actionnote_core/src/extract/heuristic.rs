//! Rule-based action item extraction.
//!
//! # Responsibility
//! - Pick marked lines (bullets, numbering, keywords, checkboxes) and strip
//!   their markup.
//! - Fall back to imperative-looking sentences when no line is marked.
//! - Deduplicate case-insensitively, keeping first occurrences in order.
//!
//! # Invariants
//! - Total over all inputs; empty or blank text yields an empty list.
//! - The sentence fallback runs only when the line pass found nothing at all.
//! - Output never holds two items equal after lower-casing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static BULLET_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([-*•]|\d+\.)\s+").expect("valid bullet prefix regex"));
static SENTENCE_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence boundary regex"));
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z']+").expect("valid word regex"));
static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C-\x1E\x{85}\x{2028}\x{2029}]")
        .expect("valid line break regex")
});

const KEYWORD_PREFIXES: [&str; 3] = ["todo:", "action:", "next:"];
const CHECKBOX_UNCHECKED: &str = "[ ]";
const CHECKBOX_TODO: &str = "[todo]";

const IMPERATIVE_STARTERS: [&str; 12] = [
    "add",
    "create",
    "implement",
    "fix",
    "update",
    "write",
    "check",
    "verify",
    "refactor",
    "document",
    "design",
    "investigate",
];

/// Extracts action items from free text.
///
/// Rules, in order:
/// 1. Every non-blank line (split on any Unicode line terminator, `\r\n`
///    counting once) starting with a bullet (`-`, `*`, `•`, `N.`), a
///    keyword (`todo:`, `action:`, `next:`) or containing a checkbox
///    (`[ ]`, `[todo]`) becomes an item with that markup removed.
/// 2. When no line qualifies, sentences whose first word is a known
///    imperative verb become items verbatim.
/// 3. Items are deduplicated case-insensitively, first occurrence wins.
pub fn extract_action_items(text: &str) -> Vec<String> {
    let mut extracted: Vec<String> = LINE_BREAK_RE
        .split(text)
        .map(str::trim)
        .filter(|line| is_action_line(line))
        .map(clean_action_line)
        .collect();

    if extracted.is_empty() {
        extracted = split_sentences(text.trim())
            .into_iter()
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty() && looks_imperative(sentence))
            .map(str::to_string)
            .collect();
    }

    dedup_case_insensitive(extracted)
}

fn is_action_line(line: &str) -> bool {
    let lowered = line.trim().to_lowercase();
    if lowered.is_empty() {
        return false;
    }
    if BULLET_PREFIX_RE.is_match(&lowered) {
        return true;
    }
    if KEYWORD_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return true;
    }
    lowered.contains(CHECKBOX_UNCHECKED) || lowered.contains(CHECKBOX_TODO)
}

fn clean_action_line(line: &str) -> String {
    let cleaned = BULLET_PREFIX_RE.replace(line, "");
    let mut cleaned = cleaned.trim();
    if let Some(keyword) = KEYWORD_PREFIXES
        .iter()
        .find(|prefix| starts_with_ignore_case(cleaned, prefix))
    {
        cleaned = cleaned[keyword.len()..].trim();
    }
    cleaned = cleaned.strip_prefix(CHECKBOX_UNCHECKED).unwrap_or(cleaned).trim();
    cleaned = cleaned.strip_prefix(CHECKBOX_TODO).unwrap_or(cleaned).trim();
    cleaned.to_string()
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Splits after `.`, `!` or `?` when followed by whitespace; the
/// punctuation stays with its sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_BOUNDARY_RE.find_iter(text) {
        // The punctuation is one ASCII byte.
        sentences.push(&text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);
    sentences
}

fn looks_imperative(sentence: &str) -> bool {
    WORD_RE.find(sentence).is_some_and(|word| {
        let first = word.as_str().to_lowercase();
        IMPERATIVE_STARTERS.contains(&first.as_str())
    })
}

fn dedup_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{clean_action_line, extract_action_items, is_action_line, split_sentences};

    #[test]
    fn mixed_markers_skip_narrative_lines() {
        let text = "- [ ] Set up the database schema\n* Implement the API extract endpoint\n1. Write unit tests\nRegular narrative text.";
        assert_eq!(
            extract_action_items(text),
            vec![
                "Set up the database schema",
                "Implement the API extract endpoint",
                "Write unit tests",
            ]
        );
    }

    #[test]
    fn keyword_prefixes_are_case_insensitive_and_stripped() {
        let text = "TODO: Fix the bug\naction: Update auth\nnext: Test feature\ntodo: Review PRs";
        assert_eq!(
            extract_action_items(text),
            vec!["Fix the bug", "Update auth", "Test feature", "Review PRs"]
        );
    }

    #[test]
    fn fallback_keeps_imperative_sentences_only() {
        let text = "Implement the new feature by next week.\nThis is just a regular sentence.\nCreate a user dashboard.";
        assert_eq!(
            extract_action_items(text),
            vec![
                "Implement the new feature by next week.",
                "Create a user dashboard.",
            ]
        );
    }

    #[test]
    fn duplicates_collapse_to_first_spelling() {
        let text = "- Set up database\n- SET UP DATABASE\n- set up database";
        assert_eq!(extract_action_items(text), vec!["Set up database"]);
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(extract_action_items("").is_empty());
        assert!(extract_action_items("   \n\t \n").is_empty());
    }

    #[test]
    fn narrative_without_imperatives_yields_nothing() {
        let text = "Just narrative text with no markers and no imperative openers.";
        assert!(extract_action_items(text).is_empty());
    }

    #[test]
    fn fallback_is_skipped_when_any_line_matches() {
        let text = "Fix the login flow.\n- review docs";
        assert_eq!(extract_action_items(text), vec!["review docs"]);
    }

    #[test]
    fn checkbox_lines_without_bullets_are_extracted() {
        let text = "[todo] Add error handling\nsomething [ ] inline";
        assert_eq!(
            extract_action_items(text),
            vec!["Add error handling", "something [ ] inline"]
        );
    }

    #[test]
    fn uppercase_checkbox_matches_but_is_kept_verbatim() {
        assert!(is_action_line("[TODO] Ship it"));
        assert_eq!(extract_action_items("[TODO] Ship it"), vec!["[TODO] Ship it"]);
        assert_eq!(clean_action_line("- [Todo] review"), "[Todo] review");
    }

    #[test]
    fn carriage_return_only_line_endings_split_lines() {
        assert_eq!(
            extract_action_items("- Fix login\r- Write docs\r- Deploy"),
            vec!["Fix login", "Write docs", "Deploy"]
        );
    }

    #[test]
    fn unicode_line_separators_split_lines() {
        assert_eq!(
            extract_action_items("- Fix login\u{2028}- Write docs\u{2029}* Ship\u{85}1. Tag"),
            vec!["Fix login", "Write docs", "Ship", "Tag"]
        );
        assert_eq!(
            extract_action_items("- a\x0b- b\x0c- c\x1c- d\x1d- e\x1e- f"),
            vec!["a", "b", "c", "d", "e", "f"]
        );
    }

    #[test]
    fn crlf_counts_as_a_single_break() {
        assert_eq!(
            extract_action_items("- one\r\n- two\r\n\r\nnarrative"),
            vec!["one", "two"]
        );
    }

    #[test]
    fn unicode_bullet_and_indentation_are_stripped() {
        let text = "   • Update the documentation\n\t2. Deploy to staging";
        assert_eq!(
            extract_action_items(text),
            vec!["Update the documentation", "Deploy to staging"]
        );
    }

    #[test]
    fn bullet_requires_trailing_whitespace() {
        assert!(!is_action_line("-dash without space"));
        assert!(!is_action_line("3.14 is not a list item"));
        assert!(is_action_line("3. is a list item"));
    }

    #[test]
    fn checkbox_before_bullet_keeps_the_dash() {
        assert_eq!(clean_action_line("[ ] - task"), "- task");
    }

    #[test]
    fn bullet_then_checkbox_strips_both() {
        assert_eq!(clean_action_line("- [ ] [todo] task"), "task");
    }

    #[test]
    fn sentences_split_on_terminal_punctuation_followed_by_space() {
        assert_eq!(
            split_sentences("Fix it! Why? Because.Now done. end"),
            vec!["Fix it!", "Why?", "Because.Now done.", "end"]
        );
    }

    #[test]
    fn fallback_matches_first_word_after_leading_punctuation() {
        let text = "\"Verify the backups\" said ops. (update) the runbook? 42 write tests.";
        assert_eq!(
            extract_action_items(text),
            vec![
                "\"Verify the backups\" said ops.",
                "(update) the runbook?",
                "42 write tests.",
            ]
        );
    }

    #[test]
    fn fallback_dedup_is_case_insensitive() {
        let text = "Fix the bug. fix the bug. FIX THE BUG!";
        assert_eq!(
            extract_action_items(text),
            vec!["Fix the bug.", "FIX THE BUG!"]
        );
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let text = "- a\n* b\n- A";
        assert_eq!(extract_action_items(text), extract_action_items(text));
        assert_eq!(extract_action_items(text), vec!["a", "b"]);
    }
}
