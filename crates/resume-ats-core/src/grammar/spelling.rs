//! Dictionary-backed misspelling detection.
//!
//! Words are checked after stripping non-letters. Technology and business
//! whitelists always pass, and two shapes are treated as proper nouns or
//! acronyms and skipped entirely: ALL-CAPS words of two or more letters, and
//! Capitalized words that do not open their sentence ("Snowflake", "Kafka").
//! Whole tokens that look like emails, links, domains or codes with digits
//! ("k8s", "Q3") are skipped before any of that.

use std::sync::LazyLock;

use regex::Regex;

use crate::dictionary::Dictionary;
use crate::profile::GrammarProfile;
use crate::text;
use crate::word_lists;

/// Most misspelled words retained for feedback.
const MAX_SAMPLES: usize = 10;

/// `name.tld`, optionally followed by a path: `linkedin.com/in/jane`.
static DOMAIN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9-]+(\.[a-z0-9-]+)*\.[a-z]{2,}(/|$)").expect("valid regex")
});

/// Outcome of a spelling pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpellingReport {
    /// Words checked against the dictionary.
    pub considered: usize,
    /// Checked words found in the dictionary or a whitelist.
    pub hits: usize,
    /// Checked words not found anywhere.
    pub unmatched: usize,
    /// First few distinct unmatched words, in order of appearance.
    pub samples: Vec<String>,
}

impl SpellingReport {
    /// Fraction of checked words that were recognized. `1.0` when nothing was checked.
    pub fn hit_rate(&self) -> f64 {
        if self.considered == 0 {
            1.0
        } else {
            self.hits as f64 / self.considered as f64
        }
    }
}

/// Returns `true` if a letters-only word is exempt from spelling checks.
pub fn is_exempt(word: &str, sentence_initial: bool) -> bool {
    let letters = word.chars().count();
    if letters >= 2 && word.chars().all(char::is_uppercase) {
        return true;
    }
    let mut chars = word.chars();
    let capitalized = chars.next().is_some_and(char::is_uppercase);
    capitalized && !sentence_initial
}

/// Returns `true` for tokens that are contact details or codes, not words.
pub fn is_link_or_code(token: &str) -> bool {
    let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '/');
    token.contains('@')
        || token.contains("://")
        || trimmed.to_ascii_lowercase().starts_with("www.")
        || trimmed.chars().any(|c| c.is_ascii_digit())
        || DOMAIN_SHAPE.is_match(trimmed)
}

/// Check every word of every sentence against the dictionary.
#[tracing::instrument(skip_all, fields(sentence_count = sentences.len()))]
pub fn check_spelling(dictionary: &Dictionary, sentences: &[String]) -> SpellingReport {
    let mut report = SpellingReport::default();

    for sentence in sentences {
        let mut first_word = true;
        for token in text::tokenize_words(sentence) {
            if is_link_or_code(&token) {
                first_word = false;
                continue;
            }
            for part in token.split(['-', '/', '\u{2013}', '\u{2014}']) {
                let word = text::letters_only(part);
                if word.is_empty() {
                    continue;
                }
                let sentence_initial = first_word;
                first_word = false;

                if is_exempt(&word, sentence_initial) {
                    continue;
                }

                let lower = word.to_lowercase();
                report.considered += 1;
                if word_lists::is_whitelisted(&lower) || dictionary.contains(&lower) {
                    report.hits += 1;
                } else {
                    report.unmatched += 1;
                    if report.samples.len() < MAX_SAMPLES && !report.samples.contains(&lower) {
                        report.samples.push(lower);
                    }
                }
            }
        }
    }

    report
}

/// Misspelling penalty: free budget, then one point per started step, capped.
pub fn misspell_penalty(unmatched: usize, profile: &GrammarProfile) -> u32 {
    let extra = unmatched.saturating_sub(profile.misspell_free_budget);
    if extra == 0 {
        return 0;
    }
    let step = profile.misspell_step.max(1);
    let points = extra.div_ceil(step);
    u32::try_from(points)
        .unwrap_or(u32::MAX)
        .min(profile.misspell_cap)
}
