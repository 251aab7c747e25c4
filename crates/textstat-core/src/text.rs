//! Text processing utilities.
//!
//! Provides word extraction, sentence splitting, and the small counting
//! helpers used by the [`analyzer`](crate::analyzer).
//!
//! The rules are fixed and deterministic:
//!
//! - A *word* is a maximal run of word characters: the `regex` crate's Unicode
//!   `\w`, i.e. alphabetic characters, combining marks, decimal digits (`Nd`),
//!   connector punctuation such as `_`, and join controls. A decomposed
//!   `e\u{301}` therefore stays one word, while superscripts and other `No`
//!   digits (`²`) are separators.
//! - A *sentence* is a non-empty, trimmed segment between runs of `.`, `!`
//!   or `?`.
//!
//! Every word-based metric goes through [`extract_words`] (or its
//! case-preserving twin) so all derived numbers agree on what a word is.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for a maximal run of word characters.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Regex for a run of sentence terminators.
static TERMINATOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Extract lowercased words from text, in order, duplicates included.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn extract_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extract words using the same rule as [`extract_words`] but keeping the
/// original casing.
pub fn extract_words_preserving_case(text: &str) -> Vec<&str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Split text into sentences at runs of `.`, `!` and `?`.
///
/// Segments are trimmed and empty ones dropped, so a trailing terminator
/// never yields a spurious empty sentence.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn extract_sentences(text: &str) -> Vec<String> {
    TERMINATOR_PATTERN
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Count newline-delimited lines: newlines + 1, or 0 for empty text.
pub fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.matches('\n').count() + 1
    }
}

/// Count characters that are not a space, tab, or newline.
pub fn count_non_whitespace(text: &str) -> usize {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\n'))
        .count()
}
