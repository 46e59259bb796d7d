//! Extraction-quality classification.
//!
//! Decides how far the downstream heuristics can trust the text they were
//! given. Upstream extractors (PDF, DOCX, OCR) may pass a free-form hint;
//! anything mentioning OCR or a scan marks the text as image-derived.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::profile::ExtractionProfile;

/// How the résumé text is believed to have been obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// Text looks like a normal, complete résumé.
    Ok,
    /// No text at all.
    Empty,
    /// OCR output from an image-only PDF with little recoverable text.
    ScannedPdf,
    /// Too few tokens to judge.
    VeryShort,
    /// Most words are not English.
    ProbablyNonEnglish,
}

impl ExtractionStatus {
    /// Returns the status as a snake_case string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Empty => "empty",
            Self::ScannedPdf => "scanned_pdf",
            Self::VeryShort => "very_short",
            Self::ProbablyNonEnglish => "probably_non_english",
        }
    }
}

impl std::fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only projection of the diagnostics used to gate other scorers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionQuality {
    /// Classification of the text.
    pub extraction_status: ExtractionStatus,
    /// Trust in the text, 0 to 1.
    pub confidence: f64,
    /// Whitespace tokens in the text.
    pub token_count: usize,
}

impl ExtractionQuality {
    /// Quality of a blank input.
    pub const fn empty() -> Self {
        Self {
            extraction_status: ExtractionStatus::Empty,
            confidence: 0.0,
            token_count: 0,
        }
    }

    /// Returns `true` when heuristics may penalize the résumé at full strength.
    pub fn is_reliable(&self, threshold: f64) -> bool {
        self.extraction_status == ExtractionStatus::Ok && self.confidence >= threshold
    }
}

/// Returns `true` if an extractor hint says the text came from OCR.
pub fn hint_indicates_ocr(hint: Option<&str>) -> bool {
    hint.is_some_and(|h| {
        let h = h.to_lowercase();
        h.contains("ocr") || h.contains("scan") || h.contains("image")
    })
}

/// Classify extraction quality from token count and dictionary hit rate.
///
/// `hit_rate` is `None` when no dictionary was available, in which case the
/// non-English check cannot fire and confidence rests on token count alone.
pub fn classify(
    token_count: usize,
    hit_rate: Option<f64>,
    hint: Option<&str>,
    profile: &ExtractionProfile,
) -> ExtractionQuality {
    if token_count == 0 {
        return ExtractionQuality::empty();
    }

    let status = if hint_indicates_ocr(hint) && token_count < profile.scanned_max_tokens {
        ExtractionStatus::ScannedPdf
    } else if token_count < profile.very_short_tokens {
        ExtractionStatus::VeryShort
    } else if hit_rate.is_some_and(|rate| rate < profile.non_english_hit_rate) {
        ExtractionStatus::ProbablyNonEnglish
    } else {
        ExtractionStatus::Ok
    };

    let token_component = if profile.confidence_full_tokens == 0 {
        1.0
    } else {
        (token_count as f64 / profile.confidence_full_tokens as f64).min(1.0)
    };
    let mut confidence = 0.6 * token_component + 0.4 * hit_rate.unwrap_or(1.0);
    if status != ExtractionStatus::Ok {
        confidence = confidence.min(profile.non_ok_confidence_cap);
    }

    ExtractionQuality {
        extraction_status: status,
        confidence: confidence.clamp(0.0, 1.0),
        token_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ExtractionProfile {
        ExtractionProfile::default()
    }

    #[test]
    fn zero_tokens_is_empty() {
        let q = classify(0, Some(1.0), None, &profile());
        assert_eq!(q.extraction_status, ExtractionStatus::Empty);
        assert_eq!(q.confidence, 0.0);
    }

    #[test]
    fn few_tokens_is_very_short() {
        let q = classify(12, Some(0.95), None, &profile());
        assert_eq!(q.extraction_status, ExtractionStatus::VeryShort);
        assert!(q.confidence < 0.5);
    }

    #[test]
    fn ocr_hint_with_low_count_is_scanned() {
        let q = classify(80, Some(0.9), Some("OCR fallback"), &profile());
        assert_eq!(q.extraction_status, ExtractionStatus::ScannedPdf);
        assert!(!q.is_reliable(0.5));
    }

    #[test]
    fn ocr_hint_with_plenty_of_text_is_ok() {
        let q = classify(400, Some(0.9), Some("ocr"), &profile());
        assert_eq!(q.extraction_status, ExtractionStatus::Ok);
    }

    #[test]
    fn low_hit_rate_is_non_english() {
        let q = classify(300, Some(0.1), None, &profile());
        assert_eq!(q.extraction_status, ExtractionStatus::ProbablyNonEnglish);
    }

    #[test]
    fn healthy_text_is_confident() {
        let q = classify(450, Some(0.92), None, &profile());
        assert_eq!(q.extraction_status, ExtractionStatus::Ok);
        assert!(q.confidence > 0.9);
        assert!(q.is_reliable(0.5));
    }

    #[test]
    fn missing_dictionary_cannot_flag_non_english() {
        let q = classify(300, None, None, &profile());
        assert_eq!(q.extraction_status, ExtractionStatus::Ok);
        assert_eq!(q.confidence, 1.0);
    }

    #[test]
    fn hint_detection() {
        assert!(hint_indicates_ocr(Some("scanned_pdf")));
        assert!(hint_indicates_ocr(Some("image-only")));
        assert!(!hint_indicates_ocr(Some("pdf-text")));
        assert!(!hint_indicates_ocr(None));
    }
}
