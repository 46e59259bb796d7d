//! Passive voice detection.
//!
//! A sentence is passive when an auxiliary (`is`, `was`, `were`, `are`,
//! `been`, `being`) is immediately followed by a token ending in `-ed`.
//! Irregular participles are deliberately not recognized; résumé bullets
//! rarely use them and the ratio only needs to be comparable across inputs.

use crate::text;
use crate::word_lists::PASSIVE_AUXILIARIES;

/// Returns `true` if the sentence contains an auxiliary + `-ed` pair.
pub fn is_passive_sentence(sentence: &str) -> bool {
    let words: Vec<String> = text::tokenize_words(sentence)
        .iter()
        .map(|t| text::normalize_word(t))
        .collect();

    words
        .windows(2)
        .any(|pair| PASSIVE_AUXILIARIES.contains(&pair[0].as_str()) && pair[1].ends_with("ed"))
}

/// Fraction of sentences that contain a passive construction.
#[tracing::instrument(skip_all, fields(sentence_count = sentences.len()))]
pub fn passive_ratio(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let passive = sentences.iter().filter(|s| is_passive_sentence(s)).count();
    passive as f64 / sentences.len() as f64
}
