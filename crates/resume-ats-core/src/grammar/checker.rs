//! Structural writing checks.
//!
//! Over-long sentences, sentences without any verb-like token, adjacent
//! repeated words, and long paragraphs with no sentence punctuation at all
//! (a common sign of text pasted from a table or a broken extraction).

use crate::profile::GrammarProfile;
use crate::text;
use crate::word_lists;

/// Per-sentence structural findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureFindings {
    /// Sentences longer than the configured token limit.
    pub long_sentences: usize,
    /// Sentences with no verb-like token.
    pub verbless_sentences: usize,
}

impl StructureFindings {
    /// Combined penalty, capped by the profile.
    pub fn penalty(&self, profile: &GrammarProfile) -> u32 {
        let raw = self.long_sentences + self.verbless_sentences;
        u32::try_from(raw)
            .unwrap_or(u32::MAX)
            .min(profile.structure_cap)
    }
}

/// Count long and verbless sentences.
#[tracing::instrument(skip_all, fields(sentence_count = sentences.len()))]
pub fn check_structure(sentences: &[String], profile: &GrammarProfile) -> StructureFindings {
    let mut findings = StructureFindings::default();

    for sentence in sentences {
        let tokens = text::tokenize_words(sentence);
        if tokens.len() > profile.long_sentence_tokens {
            findings.long_sentences += 1;
        }
        let has_verb = tokens.iter().any(|t| {
            let word = text::letters_only(t).to_lowercase();
            word_lists::is_verb_like(&word)
        });
        if !has_verb {
            findings.verbless_sentences += 1;
        }
    }

    findings
}

/// Returns the first adjacent repeated word ("the the"), if any.
///
/// Comparison ignores case and punctuation. Tokens without letters are
/// skipped, so bullets and dates never pair up.
pub fn find_repeated_word(input: &str) -> Option<String> {
    let words: Vec<String> = text::tokenize_words(input)
        .iter()
        .map(|t| text::normalize_word(t))
        .filter(|w| w.chars().any(char::is_alphabetic))
        .collect();

    words
        .windows(2)
        .find(|pair| pair[0] == pair[1])
        .map(|pair| pair[0].clone())
}

/// Count paragraphs longer than the limit that contain no `.`, `?`, or `!`.
pub fn count_long_unpunctuated_paragraphs(input: &str, profile: &GrammarProfile) -> usize {
    text::split_paragraphs(input)
        .iter()
        .filter(|p| p.chars().count() > profile.long_paragraph_chars)
        .filter(|p| !p.contains(['.', '?', '!']))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> GrammarProfile {
        GrammarProfile::default()
    }

    #[test]
    fn long_sentence_flagged() {
        let long = vec!["word ".repeat(40) + "managed."];
        let findings = check_structure(&long, &profile());
        assert_eq!(findings.long_sentences, 1);
        assert_eq!(findings.verbless_sentences, 0);
    }

    #[test]
    fn verbless_sentence_flagged() {
        let s = vec!["Excellent communication skills.".to_string()];
        let findings = check_structure(&s, &profile());
        assert_eq!(findings.verbless_sentences, 1);
    }

    #[test]
    fn penalty_is_capped() {
        let s: Vec<String> = (0..6).map(|_| "Great team player.".to_string()).collect();
        let findings = check_structure(&s, &profile());
        assert_eq!(findings.verbless_sentences, 6);
        assert_eq!(findings.penalty(&profile()), 3);
    }

    #[test]
    fn repeated_word_detected_across_punctuation() {
        assert_eq!(
            find_repeated_word("Managed the The team."),
            Some("the".to_string())
        );
        assert_eq!(find_repeated_word("Managed the team."), None);
    }

    #[test]
    fn repeated_numbers_ignored() {
        assert_eq!(find_repeated_word("Founded 2020 2020 reunion"), None);
    }

    #[test]
    fn long_unpunctuated_paragraph_counted() {
        let para = "word ".repeat(60);
        let text = format!("Short intro.\n\n{para}\n\nAnother short one.");
        assert_eq!(count_long_unpunctuated_paragraphs(&text, &profile()), 1);
    }

    #[test]
    fn punctuated_long_paragraph_ignored() {
        let para = "word ".repeat(60) + ".";
        assert_eq!(count_long_unpunctuated_paragraphs(&para, &profile()), 0);
    }
}
