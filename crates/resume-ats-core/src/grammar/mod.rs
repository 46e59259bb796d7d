//! Grammar and writing-quality diagnostics.
//!
//! [`diagnose`] runs every check over the résumé text and folds the results
//! into a [`GrammarDiagnostics`] record:
//!
//! - **Spelling** ([`spelling`]): dictionary lookups with whitelists and
//!   proper-noun tolerance, a free budget, then a stepped penalty
//! - **Structure** ([`checker`]): over-long and verbless sentences, repeated
//!   words, long paragraphs without punctuation
//! - **Passive voice** ([`passive_voice`]): ratio of passive sentences
//! - **Extraction quality** ([`extraction`]): how far the text can be trusted
//!
//! The record is then handed to the band mapper ([`band`]), which blends it
//! with the formatting and structure scores into the final grammar score.

pub mod band;
pub mod checker;
pub mod extraction;
pub mod passive_voice;
pub mod spelling;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use band::{Band, GRAMMAR_MAX, GrammarReport, GrammarVerdict, map_grammar_band, select_band};
pub use extraction::{ExtractionQuality, ExtractionStatus};

use crate::dictionary::Dictionary;
use crate::profile::ScoringProfile;
use crate::text;

/// Everything the grammar checks found in one résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrammarDiagnostics {
    /// Score after all penalties, 0 to 10.
    pub raw_score: f64,
    /// Points lost to misspellings.
    pub misspell_penalty: u32,
    /// Points lost to long or verbless sentences.
    pub structure_penalty: u32,
    /// Points lost to heavy passive voice.
    pub passive_penalty: u32,
    /// Points lost to adjacent repeated words.
    pub repetition_penalty: u32,
    /// Points lost to long unpunctuated paragraphs.
    pub paragraph_penalty: u32,
    /// Fraction of sentences in passive voice.
    pub passive_ratio: f64,
    /// Whether any adjacent word pair repeats.
    pub repeated_words: bool,
    /// Paragraphs over the length limit with no sentence punctuation.
    pub long_para_count: usize,
    /// Fraction of checked words that were recognized. `1.0` without a dictionary.
    pub dictionary_hit_rate: f64,
    /// Whether a dictionary was available for spelling checks.
    pub dictionary_available: bool,
    /// Words not found in the dictionary or whitelists.
    pub misspelled_count: usize,
    /// A few of those words, for feedback.
    pub misspelled_samples: Vec<String>,
    /// Extraction classification.
    pub extraction_status: ExtractionStatus,
    /// Trust in the text, 0 to 1.
    pub confidence: f64,
    /// Whitespace tokens in the text.
    pub token_count: usize,
}

impl GrammarDiagnostics {
    /// Diagnostics for blank input: maximal raw score, `empty` status.
    pub fn empty(dictionary_available: bool, profile: &ScoringProfile) -> Self {
        Self {
            raw_score: profile.grammar.start_score.clamp(0.0, f64::from(GRAMMAR_MAX)),
            misspell_penalty: 0,
            structure_penalty: 0,
            passive_penalty: 0,
            repetition_penalty: 0,
            paragraph_penalty: 0,
            passive_ratio: 0.0,
            repeated_words: false,
            long_para_count: 0,
            dictionary_hit_rate: 1.0,
            dictionary_available,
            misspelled_count: 0,
            misspelled_samples: Vec::new(),
            extraction_status: ExtractionStatus::Empty,
            confidence: 0.0,
            token_count: 0,
        }
    }

    /// The extraction-quality projection used to gate other scorers.
    pub const fn extraction_quality(&self) -> ExtractionQuality {
        ExtractionQuality {
            extraction_status: self.extraction_status,
            confidence: self.confidence,
            token_count: self.token_count,
        }
    }

    /// Sum of every penalty applied to the raw score.
    pub const fn total_penalty(&self) -> u32 {
        self.misspell_penalty
            + self.structure_penalty
            + self.passive_penalty
            + self.repetition_penalty
            + self.paragraph_penalty
    }
}

/// Run every grammar check over `input`.
///
/// With no dictionary, spelling is skipped: the misspelling penalty is zero,
/// the hit rate reads `1.0`, and the text cannot be classified as
/// non-English.
#[tracing::instrument(skip_all, fields(text_len = input.len(), has_dictionary = dictionary.is_some()))]
pub fn diagnose(
    dictionary: Option<&Dictionary>,
    input: &str,
    extraction_hint: Option<&str>,
    profile: &ScoringProfile,
) -> GrammarDiagnostics {
    if input.trim().is_empty() {
        return GrammarDiagnostics::empty(dictionary.is_some(), profile);
    }

    let grammar = &profile.grammar;
    let token_count = text::tokenize_words(input).len();
    let sentences = text::split_sentences(input);

    let spell_report = dictionary.map(|dict| spelling::check_spelling(dict, &sentences));
    let (misspelled_count, misspelled_samples, hit_rate) = match &spell_report {
        Some(report) => (report.unmatched, report.samples.clone(), Some(report.hit_rate())),
        None => {
            tracing::debug!("no dictionary, spelling checks skipped");
            (0, Vec::new(), None)
        }
    };
    let misspell_penalty = spelling::misspell_penalty(misspelled_count, grammar);

    let structure_penalty = checker::check_structure(&sentences, grammar).penalty(grammar);

    let passive_ratio = passive_voice::passive_ratio(&sentences);
    let passive_penalty = u32::from(passive_ratio > grammar.passive_ratio_max);

    let repeated = checker::find_repeated_word(input);
    let repetition_penalty = u32::from(repeated.is_some());

    let long_para_count = checker::count_long_unpunctuated_paragraphs(input, grammar);
    let paragraph_penalty = u32::from(long_para_count > 0);

    let quality = extraction::classify(token_count, hit_rate, extraction_hint, &profile.extraction);

    let mut diagnostics = GrammarDiagnostics {
        raw_score: 0.0,
        misspell_penalty,
        structure_penalty,
        passive_penalty,
        repetition_penalty,
        paragraph_penalty,
        passive_ratio,
        repeated_words: repeated.is_some(),
        long_para_count,
        dictionary_hit_rate: hit_rate.unwrap_or(1.0),
        dictionary_available: dictionary.is_some(),
        misspelled_count,
        misspelled_samples,
        extraction_status: quality.extraction_status,
        confidence: quality.confidence,
        token_count,
    };
    diagnostics.raw_score = (grammar.start_score - f64::from(diagnostics.total_penalty()))
        .clamp(0.0, f64::from(GRAMMAR_MAX));

    tracing::debug!(
        raw_score = diagnostics.raw_score,
        misspelled = misspelled_count,
        status = %diagnostics.extraction_status,
        confidence = diagnostics.confidence,
        "grammar diagnostics complete"
    );

    diagnostics
}
