//! Skill phrase grammar and matcher.
//!
//! A skill string parses into a [`SkillPattern`]:
//!
//! ```text
//! skill        := alternative ( SEP alternative )*
//! SEP          := whitespace ( "or" | "/" | "|" ) whitespace
//! alternative  := token ( DELIM token )*
//! DELIM        := whitespace | "-" | "/" | "&" | "," | "(" | ")"
//! ```
//!
//! Each alternative compiles to a case-insensitive regex that requires its
//! tokens in order, separated by any run of punctuation or whitespace, and
//! word-bounded wherever the phrase starts or ends on a word character.
//! `"CI/CD"` therefore matches `CI/CD`, `CI-CD`, and `ci cd`; `"C++"` still
//! matches `C++`.
//!
//! One expansion rule: with exactly two alternatives where the first is a
//! single word and the second is a multi-word phrase, the first word is also
//! tried with the tail of the second, so `"ETL / ELT pipelines"` searches for
//! `ETL`, `ELT pipelines`, and `ETL pipelines`.

use std::sync::LazyLock;

use regex::Regex;

use crate::profile::StuffingCount;

/// Alternation separator between alternatives.
static ALTERNATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:or|/|\|)\s+").expect("valid regex"));

/// Delimiters between the tokens of one phrase.
static TOKEN_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-/&,()]+").expect("valid regex"));

/// Gap allowed between phrase tokens in résumé text.
const TOKEN_GAP: &str = r"[\W_]+";

/// One alternative: an ordered token sequence and its compiled matcher.
#[derive(Debug, Clone)]
pub struct Phrase {
    tokens: Vec<String>,
    regex: Regex,
}

impl Phrase {
    /// Tokenize and compile a phrase. Returns `None` if it has no tokens.
    pub fn parse(text: &str) -> Option<Self> {
        let tokens: Vec<String> = TOKEN_DELIMITER
            .split(text.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        let first = tokens.first()?.chars().next()?;
        let last = tokens.last()?.chars().last()?;

        let body = tokens
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join(TOKEN_GAP);
        let pattern = format!(
            "(?i){}{body}{}",
            if is_word_char(first) { r"\b" } else { "" },
            if is_word_char(last) { r"\b" } else { "" },
        );

        match Regex::new(&pattern) {
            Ok(regex) => Some(Self { tokens, regex }),
            Err(error) => {
                tracing::warn!(phrase = text, %error, "skill phrase did not compile");
                None
            }
        }
    }

    /// Tokens in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Non-overlapping occurrences in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}

/// A parsed skill: one or more alternatives.
#[derive(Debug, Clone)]
pub struct SkillPattern {
    source: String,
    alternatives: Vec<Phrase>,
}

impl SkillPattern {
    /// Parse a skill string into its alternatives.
    pub fn parse(skill: &str) -> Self {
        let mut parts: Vec<String> = ALTERNATION
            .split(skill.trim())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        if let [first, second] = parts.as_slice() {
            let second_words: Vec<&str> = second.split_whitespace().collect();
            if !first.contains(char::is_whitespace) && second_words.len() > 1 {
                let combined = format!("{first} {}", second_words[1..].join(" "));
                parts.push(combined);
            }
        }

        Self {
            source: skill.to_string(),
            alternatives: parts.iter().filter_map(|p| Phrase::parse(p)).collect(),
        }
    }

    /// The skill as authored.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parsed alternatives, including any expansion.
    pub fn alternatives(&self) -> &[Phrase] {
        &self.alternatives
    }

    /// Occurrences of each alternative in `text`.
    pub fn counts(&self, text: &str) -> Vec<usize> {
        self.alternatives.iter().map(|a| a.count(text)).collect()
    }

    /// Combined match count under the given aggregation mode.
    pub fn match_count(&self, text: &str, mode: StuffingCount) -> usize {
        let counts = self.counts(text);
        match mode {
            StuffingCount::Summed => counts.iter().sum(),
            StuffingCount::Max => counts.into_iter().max().unwrap_or(0),
        }
    }
}

/// Count how often a skill appears in résumé text. Zero means absent.
pub fn match_skill_phrase(skill: &str, text: &str, mode: StuffingCount) -> usize {
    SkillPattern::parse(skill).match_count(text, mode)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
