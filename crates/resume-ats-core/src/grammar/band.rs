//! Grammar band mapping.
//!
//! Raw dictionary and structural penalties are not enough on their own: a
//! résumé can be spotless sentence by sentence and still be badly laid out.
//! The band cascade blends the diagnostics with the formatting and structure
//! scores into one human-facing grammar score.
//!
//! Rules are evaluated in strict priority order and the first match wins, so
//! exactly one band applies to any input:
//!
//! 1. `neutral_low_conf`: extraction not `ok` or confidence below threshold; fixed score
//! 2. `excellent`: every gate passes; score floored
//! 3. `good`: relaxed gates; score clamped to 7–8
//! 4. `fair`: raw ≥ 5; 7–8 if raw ≥ 7, else 5–6
//! 5. `poor`: raw ≥ 3; score clamped to 3–5
//! 6. `very_poor`: score capped at 3
//!
//! The numbers above are the defaults; every threshold and score range lives
//! in [`BandProfile`](crate::profile::BandProfile).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::GrammarDiagnostics;
use crate::profile::{BandGate, ScoringProfile};

/// Maximum grammar score.
pub const GRAMMAR_MAX: u32 = 10;

/// Named grammar quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Clean writing in a well-formatted résumé.
    Excellent,
    /// Minor issues.
    Good,
    /// Noticeable issues.
    Fair,
    /// Frequent issues.
    Poor,
    /// Pervasive issues.
    VeryPoor,
    /// Text could not be read reliably; score is neutral.
    NeutralLowConf,
}

impl Band {
    /// Returns the band as a snake_case string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::VeryPoor => "very_poor",
            Self::NeutralLowConf => "neutral_low_conf",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final grammar verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrammarVerdict {
    /// Band that applied.
    pub band: Band,
    /// Final score, 0 to 10.
    pub score: u32,
    /// Human-readable feedback.
    pub feedback: String,
    /// Whether downstream AI verification may run. Off under low confidence.
    pub ai_verification_enabled: bool,
}

/// Verdict and diagnostics for a grammar check on its own.
///
/// Both halves serialize flat, so JSON consumers see `band` next to
/// `rawScore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GrammarReport {
    /// Band and final score.
    #[serde(flatten)]
    pub verdict: GrammarVerdict,
    /// Measurements the verdict was drawn from.
    #[serde(flatten)]
    pub diagnostics: GrammarDiagnostics,
}

/// Select the band for a set of diagnostics and category scores.
pub fn select_band(
    diagnostics: &GrammarDiagnostics,
    formatting: u32,
    structure: u32,
    profile: &ScoringProfile,
) -> Band {
    let bands = &profile.bands;
    let raw = diagnostics.raw_score;

    if !diagnostics
        .extraction_quality()
        .is_reliable(profile.extraction.confidence_threshold)
    {
        Band::NeutralLowConf
    } else if passes_gate(diagnostics, formatting, structure, &bands.excellent) {
        Band::Excellent
    } else if passes_gate(diagnostics, formatting, structure, &bands.good) {
        Band::Good
    } else if raw >= bands.fair_raw_min {
        Band::Fair
    } else if raw >= bands.poor_raw_min {
        Band::Poor
    } else {
        Band::VeryPoor
    }
}

/// Map diagnostics and category scores to the final grammar score.
#[tracing::instrument(skip_all, fields(formatting, structure))]
pub fn map_grammar_band(
    diagnostics: &GrammarDiagnostics,
    formatting: u32,
    structure: u32,
    profile: &ScoringProfile,
) -> GrammarVerdict {
    let band = select_band(diagnostics, formatting, structure, profile);
    let raw = diagnostics.raw_score.clamp(0.0, f64::from(GRAMMAR_MAX));
    let rounded = raw.round() as u32;

    let bands = &profile.bands;
    let score = match band {
        Band::NeutralLowConf => bands.neutral_score,
        Band::Excellent => rounded.max(bands.excellent_floor),
        Band::Good => bands.good_scores.fit(rounded),
        Band::Fair if raw >= bands.fair_high_raw_min => bands.fair_high_scores.fit(rounded),
        Band::Fair => bands.fair_scores.fit(rounded),
        Band::Poor => bands.poor_scores.fit(rounded),
        Band::VeryPoor => rounded.min(bands.very_poor_max),
    }
    .min(GRAMMAR_MAX);

    tracing::debug!(band = band.as_str(), raw, score, "grammar band selected");

    GrammarVerdict {
        band,
        score,
        feedback: feedback_for(band, diagnostics),
        ai_verification_enabled: band != Band::NeutralLowConf,
    }
}

fn passes_gate(d: &GrammarDiagnostics, formatting: u32, structure: u32, gate: &BandGate) -> bool {
    formatting >= gate.formatting_min
        && structure >= gate.structure_min
        && d.raw_score >= gate.raw_min
        && d.misspell_penalty <= gate.misspell_penalty_max
        && d.structure_penalty <= gate.structure_penalty_max
        && d.dictionary_hit_rate >= gate.hit_rate_min
        && gate.passive_ratio_max.is_none_or(|max| d.passive_ratio <= max)
        && (gate.allow_repeated_words || !d.repeated_words)
        && gate.long_paragraphs_max.is_none_or(|max| d.long_para_count <= max)
}

fn feedback_for(band: Band, d: &GrammarDiagnostics) -> String {
    match band {
        Band::NeutralLowConf => format!(
            "We could not reliably read this résumé (extraction: {}, confidence {:.0}%), so \
             grammar was given a neutral score. Upload a text-based PDF or DOCX for a full check.",
            d.extraction_status,
            d.confidence * 100.0
        ),
        Band::Excellent => "Excellent writing quality: clean spelling, clear sentences, and \
                            consistent active voice."
            .to_string(),
        Band::Good => "Good writing quality with a few minor issues to polish.".to_string(),
        Band::Fair => {
            let mut parts = Vec::new();
            if d.misspell_penalty > 0 {
                parts.push("possible misspellings");
            }
            if d.structure_penalty > 0 {
                parts.push("long or incomplete sentences");
            }
            if d.repeated_words {
                parts.push("repeated words");
            }
            if d.passive_penalty > 0 {
                parts.push("heavy passive voice");
            }
            if parts.is_empty() {
                "Writing is acceptable; tighten formatting and structure to lift this score."
                    .to_string()
            } else {
                format!("Writing needs some attention: {}.", parts.join(", "))
            }
        }
        Band::Poor => "Writing has frequent issues; proofread carefully and break up long \
                       sentences."
            .to_string(),
        Band::VeryPoor => "Writing has pervasive spelling and sentence-structure problems; a \
                           thorough rewrite is recommended."
            .to_string(),
    }
}
