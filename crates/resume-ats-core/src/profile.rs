//! Scoring profile: every threshold, cap, and band boundary in one place.
//!
//! The scoring pipeline is a set of pure functions parameterized by a
//! [`ScoringProfile`]. Two profiles can be compared on the same input without
//! touching code, and the profile's `version` is echoed in every
//! [`ScoreResult`](crate::engine::ScoreResult).
//!
//! Profiles deserialize with `#[serde(default)]` at every level, so a config
//! file only needs to name the values it changes:
//!
//! ```toml
//! [scoring]
//! version = "strict-spelling"
//!
//! [scoring.grammar]
//! misspell_free_budget = 5
//! ```

use serde::{Deserialize, Serialize};

/// Version string of the built-in profile.
pub const DEFAULT_PROFILE_VERSION: &str = "2024.1";

/// Complete scoring configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringProfile {
    /// Identifier echoed in results.
    pub version: String,
    /// Grammar diagnostics penalties.
    pub grammar: GrammarProfile,
    /// Extraction-quality classification.
    pub extraction: ExtractionProfile,
    /// Grammar band boundaries.
    pub bands: BandProfile,
    /// Keyword scorer.
    pub keyword: KeywordProfile,
    /// Formatting scorer.
    pub formatting: FormattingProfile,
    /// Structure scorer.
    pub structure: StructureProfile,
    /// Tone scorer.
    pub tone: ToneProfile,
    /// Recommendation thresholds.
    pub recommendations: RecommendationProfile,
    /// Aggregator weights.
    pub weights: CategoryWeights,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self {
            version: DEFAULT_PROFILE_VERSION.to_string(),
            grammar: GrammarProfile::default(),
            extraction: ExtractionProfile::default(),
            bands: BandProfile::default(),
            keyword: KeywordProfile::default(),
            formatting: FormattingProfile::default(),
            structure: StructureProfile::default(),
            tone: ToneProfile::default(),
            recommendations: RecommendationProfile::default(),
            weights: CategoryWeights::default(),
        }
    }
}

/// Penalties applied by the grammar diagnostics engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GrammarProfile {
    /// Raw score before penalties.
    pub start_score: f64,
    /// Unmatched words tolerated before any misspelling penalty.
    pub misspell_free_budget: usize,
    /// Additional misspellings per penalty point.
    pub misspell_step: usize,
    /// Maximum misspelling penalty.
    pub misspell_cap: u32,
    /// Sentences with more tokens than this are penalized.
    pub long_sentence_tokens: usize,
    /// Maximum structural penalty.
    pub structure_cap: u32,
    /// Passive-sentence ratio above which one point is deducted.
    pub passive_ratio_max: f64,
    /// Unpunctuated paragraphs longer than this (in characters) are counted.
    pub long_paragraph_chars: usize,
}

impl Default for GrammarProfile {
    fn default() -> Self {
        Self {
            start_score: 10.0,
            misspell_free_budget: 15,
            misspell_step: 10,
            misspell_cap: 3,
            long_sentence_tokens: 35,
            structure_cap: 3,
            passive_ratio_max: 0.25,
            long_paragraph_chars: 200,
        }
    }
}

/// Thresholds for classifying how trustworthy the extracted text is.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionProfile {
    /// Fewer tokens than this is `very_short`.
    pub very_short_tokens: usize,
    /// OCR-hinted text with fewer tokens than this is `scanned_pdf`.
    pub scanned_max_tokens: usize,
    /// Dictionary hit rate below this is `probably_non_english`.
    pub non_english_hit_rate: f64,
    /// Token count at which the token component of confidence saturates.
    pub confidence_full_tokens: usize,
    /// Confidence below this selects hedged scoring.
    pub confidence_threshold: f64,
    /// Upper bound on confidence for any status other than `ok`.
    pub non_ok_confidence_cap: f64,
}

impl Default for ExtractionProfile {
    fn default() -> Self {
        Self {
            very_short_tokens: 30,
            scanned_max_tokens: 150,
            non_english_hit_rate: 0.3,
            confidence_full_tokens: 120,
            confidence_threshold: 0.5,
            non_ok_confidence_cap: 0.45,
        }
    }
}

/// Boundaries of the grammar band cascade.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BandProfile {
    /// Final score under low extraction confidence.
    pub neutral_score: u32,
    /// Requirements for `excellent`.
    pub excellent: BandGate,
    /// Score floor for `excellent`.
    pub excellent_floor: u32,
    /// Requirements for `good`.
    pub good: BandGate,
    /// Minimum raw score for `fair`.
    pub fair_raw_min: f64,
    /// Minimum raw score for `poor`.
    pub poor_raw_min: f64,
    /// Score range for `good`.
    pub good_scores: ScoreRange,
    /// Raw score at which `fair` uses the upper range.
    pub fair_high_raw_min: f64,
    /// Score range for `fair` at or above `fair_high_raw_min`.
    pub fair_high_scores: ScoreRange,
    /// Score range for the rest of `fair`.
    pub fair_scores: ScoreRange,
    /// Score range for `poor`.
    pub poor_scores: ScoreRange,
    /// Score cap for `very_poor`.
    pub very_poor_max: u32,
}

impl Default for BandProfile {
    fn default() -> Self {
        Self {
            neutral_score: 6,
            excellent: BandGate {
                formatting_min: 18,
                structure_min: 13,
                raw_min: 8.5,
                misspell_penalty_max: 1,
                structure_penalty_max: 1,
                hit_rate_min: 0.8,
                passive_ratio_max: Some(0.25),
                allow_repeated_words: false,
                long_paragraphs_max: Some(1),
            },
            excellent_floor: 9,
            good: BandGate {
                formatting_min: 15,
                structure_min: 11,
                raw_min: 7.0,
                misspell_penalty_max: 2,
                structure_penalty_max: 2,
                hit_rate_min: 0.7,
                passive_ratio_max: None,
                allow_repeated_words: true,
                long_paragraphs_max: None,
            },
            fair_raw_min: 5.0,
            poor_raw_min: 3.0,
            good_scores: ScoreRange { min: 7, max: 8 },
            fair_high_raw_min: 7.0,
            fair_high_scores: ScoreRange { min: 7, max: 8 },
            fair_scores: ScoreRange { min: 5, max: 6 },
            poor_scores: ScoreRange { min: 3, max: 5 },
            very_poor_max: 3,
        }
    }
}

/// Inclusive bounds a banded grammar score is held to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreRange {
    /// Lowest score.
    pub min: u32,
    /// Highest score. Wins over `min` if the two cross.
    pub max: u32,
}

impl ScoreRange {
    /// Pull `score` into the range.
    pub fn fit(self, score: u32) -> u32 {
        score.max(self.min).min(self.max)
    }
}

/// Conditions a result must meet to enter a band.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BandGate {
    /// Minimum formatting score.
    pub formatting_min: u32,
    /// Minimum structure score.
    pub structure_min: u32,
    /// Minimum raw grammar score.
    pub raw_min: f64,
    /// Maximum misspelling penalty.
    pub misspell_penalty_max: u32,
    /// Maximum structural penalty.
    pub structure_penalty_max: u32,
    /// Minimum dictionary hit rate.
    pub hit_rate_min: f64,
    /// Maximum passive ratio, if constrained.
    pub passive_ratio_max: Option<f64>,
    /// Whether adjacent repeated words are tolerated.
    pub allow_repeated_words: bool,
    /// Maximum long-paragraph count, if constrained.
    pub long_paragraphs_max: Option<usize>,
}

/// How match counts combine across the alternatives of one skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum StuffingCount {
    /// Sum the counts of every alternative.
    #[default]
    Summed,
    /// Use the count of the most frequent alternative.
    Max,
}

/// Keyword scorer points and stuffing detection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeywordProfile {
    /// Category maximum.
    pub max: u32,
    /// Points for the job title.
    pub title_points: f64,
    /// Points for full must-have coverage.
    pub must_have_points: f64,
    /// Points for full nice-to-have coverage.
    pub nice_to_have_points: f64,
    /// Title words shorter than this are ignored unless whitelisted acronyms.
    pub title_word_min_len: usize,
    /// A skill matched more often than this is flagged as stuffed.
    pub stuffing_threshold: usize,
    /// Count aggregation across alternatives.
    pub stuffing_count: StuffingCount,
}

impl Default for KeywordProfile {
    fn default() -> Self {
        Self {
            max: 40,
            title_points: 10.0,
            must_have_points: 30.0,
            nice_to_have_points: 10.0,
            title_word_min_len: 4,
            stuffing_threshold: 3,
            stuffing_count: StuffingCount::Summed,
        }
    }
}

/// Formatting scorer penalties.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormattingProfile {
    /// Category maximum.
    pub max: u32,
    /// Penalty for a multi-column layout.
    pub multi_column_penalty: u32,
    /// Penalty for pipe-delimited table rows.
    pub pipe_table_penalty: u32,
    /// Pipes per line that make a line table-like.
    pub pipes_per_line: usize,
    /// Table-like lines needed for the penalty.
    pub pipe_lines_min: usize,
    /// Contact header lines longer than this are not exempt from the pipe check.
    pub contact_line_max_chars: usize,
    /// Penalty for a missing Experience heading.
    pub missing_experience_penalty: u32,
    /// Penalty for a missing Education heading.
    pub missing_education_penalty: u32,
    /// Penalty for a missing Skills heading.
    pub missing_skills_penalty: u32,
    /// Highest score awarded in hedged mode.
    pub hedged_cap: u32,
}

impl Default for FormattingProfile {
    fn default() -> Self {
        Self {
            max: 20,
            multi_column_penalty: 10,
            pipe_table_penalty: 5,
            pipes_per_line: 3,
            pipe_lines_min: 2,
            contact_line_max_chars: 120,
            missing_experience_penalty: 3,
            missing_education_penalty: 2,
            missing_skills_penalty: 2,
            hedged_cap: 17,
        }
    }
}

/// Structure scorer penalties.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StructureProfile {
    /// Category maximum.
    pub max: u32,
    /// Non-empty lines considered the resume header.
    pub contact_window_lines: usize,
    /// Penalty for contact details outside the header.
    pub contact_penalty: u32,
    /// Penalty for Education appearing before Experience.
    pub order_penalty: u32,
    /// Distinct dates required.
    pub dates_min: usize,
    /// Penalty for too few dates.
    pub dates_penalty: u32,
    /// Penalty for no "Title at Company" line.
    pub title_company_penalty: u32,
    /// Words an Experience section needs before the title check applies.
    pub experience_min_words: usize,
    /// Highest score awarded in hedged mode.
    pub hedged_cap: u32,
}

impl Default for StructureProfile {
    fn default() -> Self {
        Self {
            max: 15,
            contact_window_lines: 30,
            contact_penalty: 2,
            order_penalty: 2,
            dates_min: 2,
            dates_penalty: 2,
            title_company_penalty: 1,
            experience_min_words: 40,
            hedged_cap: 12,
        }
    }
}

/// Tone scorer penalties.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToneProfile {
    /// Category maximum.
    pub max: u32,
    /// Sentences this short (in characters) are ignored for length.
    pub sentence_min_chars: usize,
    /// Average words per sentence that costs `long_sentence_severe_penalty`.
    pub long_sentence_severe: f64,
    /// Penalty for very long sentences.
    pub long_sentence_severe_penalty: u32,
    /// Average words per sentence that costs `long_sentence_mild_penalty`.
    pub long_sentence_mild: f64,
    /// Penalty for long sentences.
    pub long_sentence_mild_penalty: u32,
    /// Action verbs per 100 words below which the severe penalty applies.
    pub verb_density_severe: f64,
    /// Penalty for very few action verbs.
    pub verb_density_severe_penalty: u32,
    /// Action verbs per 100 words below which the mild penalty applies.
    pub verb_density_mild: f64,
    /// Penalty for few action verbs.
    pub verb_density_mild_penalty: u32,
    /// Bulleted lines expected.
    pub bullets_min: usize,
    /// Penalty for too few bullets.
    pub bullets_penalty: u32,
    /// Penalty for no percentage metric.
    pub metric_penalty: u32,
}

impl Default for ToneProfile {
    fn default() -> Self {
        Self {
            max: 15,
            sentence_min_chars: 10,
            long_sentence_severe: 25.0,
            long_sentence_severe_penalty: 3,
            long_sentence_mild: 20.0,
            long_sentence_mild_penalty: 1,
            verb_density_severe: 2.0,
            verb_density_severe_penalty: 3,
            verb_density_mild: 3.0,
            verb_density_mild_penalty: 1,
            bullets_min: 5,
            bullets_penalty: 2,
            metric_penalty: 1,
        }
    }
}

/// Category scores below these thresholds produce a recommendation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RecommendationProfile {
    /// Keyword threshold.
    pub keyword_below: u32,
    /// Formatting threshold.
    pub formatting_below: u32,
    /// Structure threshold.
    pub structure_below: u32,
    /// Tone threshold.
    pub tone_below: u32,
    /// Grammar threshold.
    pub grammar_below: u32,
    /// Missing must-have skills named in one recommendation.
    pub max_missing_skills: usize,
}

impl Default for RecommendationProfile {
    fn default() -> Self {
        Self {
            keyword_below: 30,
            formatting_below: 16,
            structure_below: 12,
            tone_below: 12,
            grammar_below: 8,
            max_missing_skills: 5,
        }
    }
}

/// Relative weight of each category in the overall score.
///
/// With equal weights the overall score is the plain sum of the five
/// category scores, whose maxima add up to 100.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CategoryWeights {
    /// Keyword weight.
    pub keyword: f64,
    /// Formatting weight.
    pub formatting: f64,
    /// Structure weight.
    pub structure: f64,
    /// Tone weight.
    pub tone: f64,
    /// Grammar weight.
    pub grammar: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            keyword: 1.0,
            formatting: 1.0,
            structure: 1.0,
            tone: 1.0,
            grammar: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_maxima_sum_to_one_hundred() {
        let p = ScoringProfile::default();
        let sum = p.keyword.max + p.formatting.max + p.structure.max + p.tone.max + 10;
        assert_eq!(sum, 100);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "grammar:\n  misspell_free_budget: 5\nversion: experiment\n";
        let p: ScoringProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.grammar.misspell_free_budget, 5);
        assert_eq!(p.grammar.misspell_step, 10);
        assert_eq!(p.version, "experiment");
        assert_eq!(p.keyword, KeywordProfile::default());
    }

    #[test]
    fn stuffing_count_deserializes_lowercase() {
        let p: KeywordProfile = serde_yaml::from_str("stuffing_count: max\n").unwrap();
        assert_eq!(p.stuffing_count, StuffingCount::Max);
    }

    #[test]
    fn excellent_gate_is_stricter_than_good() {
        let b = BandProfile::default();
        assert!(b.excellent.formatting_min > b.good.formatting_min);
        assert!(b.excellent.structure_min > b.good.structure_min);
        assert!(b.excellent.raw_min > b.good.raw_min);
    }

    #[test]
    fn score_range_fits_scores_inside() {
        let r = ScoreRange { min: 3, max: 5 };
        assert_eq!(r.fit(1), 3);
        assert_eq!(r.fit(4), 4);
        assert_eq!(r.fit(9), 5);
        let crossed = ScoreRange { min: 8, max: 6 };
        assert_eq!(crossed.fit(7), 6);
    }

    #[test]
    fn band_ranges_read_from_yaml() {
        let yaml = "good_scores:\n  min: 6\n  max: 7\nvery_poor_max: 2\n";
        let b: BandProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(b.good_scores, ScoreRange { min: 6, max: 7 });
        assert_eq!(b.very_poor_max, 2);
        assert_eq!(b.poor_scores, BandProfile::default().poor_scores);
    }
}
