//! Text processing utilities.
//!
//! Whitespace tokenization, sentence splitting, paragraph splitting, and the
//! word normalization shared by every heuristic downstream. All functions are
//! total: blank input yields empty output, never an error.

use regex::Regex;
use std::sync::LazyLock;

/// Sentence boundary: terminal punctuation followed by whitespace.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// Paragraph boundary: two or more newlines, optionally with blank-ish lines between.
static PARAGRAPH_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").expect("valid regex"));

/// Split text into whitespace-delimited tokens.
///
/// Tokens keep their punctuation; use [`normalize_word`] or [`letters_only`]
/// when comparing them against word lists.
pub fn tokenize_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split text into sentences after `.`, `!`, or `?` followed by whitespace.
///
/// The terminator stays with its sentence. Trailing text without a
/// terminator is returned as the last sentence.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Keep the punctuation character (always one byte) with the sentence.
        let end = boundary.start() + 1;
        push_trimmed(&mut sentences, &text[start..end]);
        start = boundary.end();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

/// Split text into paragraphs (blocks separated by at least one blank line).
pub fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_BOUNDARY
        .split(text)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Non-empty, trimmed lines of the text.
pub fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Lowercase a token and strip everything that is not a letter or digit.
///
/// Used for repetition checks where `"Team,"` and `"team"` are the same word.
pub fn normalize_word(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Keep only the alphabetic characters of a token, preserving case.
pub fn letters_only(token: &str) -> String {
    token.chars().filter(|c| c.is_alphabetic()).collect()
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}
