//! Category scorers, the aggregator, and the recommendation generator.
//!
//! Every scorer is a pure function of the résumé text plus its inputs and
//! returns a [`CategoryScore`] whose `score` is already clamped to
//! `0..=max`. Formatting and structure run in one of two
//! [`ConfidenceMode`]s chosen from the extraction quality.

pub mod aggregate;
pub mod formatting;
pub mod keyword;
pub mod recommendations;
pub mod sections;
pub mod structure;
pub mod tone;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::grammar::ExtractionQuality;

pub use aggregate::{CategoryScores, aggregate};
pub use formatting::score_formatting;
pub use keyword::{KeywordOutcome, RoleSkillSummary, score_keywords};
pub use recommendations::generate_recommendations;
pub use structure::score_structure;
pub use tone::score_tone;

/// Score and feedback for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    /// Points earned, `0..=max`.
    pub score: u32,
    /// Points available.
    pub max: u32,
    /// Human-readable summary.
    pub feedback: String,
    /// Individual deductions or notes behind the score.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<String>,
    /// Mode the scorer ran in, for confidence-gated categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ConfidenceMode>,
}

impl CategoryScore {
    /// Build a score from a possibly out-of-range raw value.
    pub fn clamped(raw: i64, max: u32, feedback: impl Into<String>) -> Self {
        let score = u32::try_from(raw.clamp(0, i64::from(max))).unwrap_or(0);
        Self {
            score,
            max,
            feedback: feedback.into(),
            findings: Vec::new(),
            mode: None,
        }
    }

    /// Attach the findings behind the score.
    #[must_use]
    pub fn with_findings(mut self, findings: Vec<String>) -> Self {
        self.findings = findings;
        self
    }

    /// Record the confidence mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ConfidenceMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Cap the score below its maximum.
    #[must_use]
    pub fn capped(mut self, cap: u32) -> Self {
        self.score = self.score.min(cap);
        self
    }
}

/// How hard confidence-gated scorers may penalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceMode {
    /// Extraction is trustworthy: every check applies.
    Strict,
    /// Extraction is doubtful: layout-sensitive checks are skipped and the
    /// ceiling is lowered.
    Hedged,
}

impl ConfidenceMode {
    /// `Hedged` when the status is not `ok` or confidence is under `threshold`.
    pub fn from_quality(quality: &ExtractionQuality, threshold: f64) -> Self {
        if quality.is_reliable(threshold) {
            Self::Strict
        } else {
            Self::Hedged
        }
    }

    /// Returns the mode as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Hedged => "hedged",
        }
    }
}

/// Join findings into a feedback sentence, or use `clean` when there are none.
pub(crate) fn summarize(findings: &[String], clean: &str) -> String {
    if findings.is_empty() {
        clean.to_string()
    } else {
        findings.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ExtractionStatus;

    #[test]
    fn clamped_bounds() {
        assert_eq!(CategoryScore::clamped(-4, 20, "").score, 0);
        assert_eq!(CategoryScore::clamped(25, 20, "").score, 20);
        assert_eq!(CategoryScore::clamped(13, 20, "").score, 13);
    }

    #[test]
    fn mode_selection() {
        let ok = ExtractionQuality {
            extraction_status: ExtractionStatus::Ok,
            confidence: 0.9,
            token_count: 400,
        };
        assert_eq!(ConfidenceMode::from_quality(&ok, 0.5), ConfidenceMode::Strict);

        let low = ExtractionQuality { confidence: 0.4, ..ok };
        assert_eq!(ConfidenceMode::from_quality(&low, 0.5), ConfidenceMode::Hedged);

        let short = ExtractionQuality {
            extraction_status: ExtractionStatus::VeryShort,
            ..ok
        };
        assert_eq!(ConfidenceMode::from_quality(&short, 0.5), ConfidenceMode::Hedged);
    }

    #[test]
    fn empty_findings_are_omitted_from_json() {
        let json = serde_json::to_value(CategoryScore::clamped(5, 10, "ok")).unwrap();
        assert!(json.get("findings").is_none());
        assert!(json.get("mode").is_none());
        assert_eq!(json["max"], 10);
    }
}
