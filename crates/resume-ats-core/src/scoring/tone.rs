//! Tone scorer: sentence length, action verbs, bullets, and metrics.

use std::sync::LazyLock;

use regex::Regex;

use super::{CategoryScore, summarize};
use crate::profile::{ScoringProfile, ToneProfile};
use crate::text;
use crate::word_lists::ACTION_VERBS;

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[•\-*–▪◦‣]|\d+\.)\s*\S").expect("valid regex"));

static METRIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+%").expect("valid regex"));

/// Raw figures the tone score is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMetrics {
    /// Mean words per sentence, over sentences longer than the minimum.
    pub avg_sentence_words: f64,
    /// Action verbs per 100 words.
    pub action_verb_density: f64,
    /// Lines that start with a bullet marker or `1.`.
    pub bullet_lines: usize,
    /// Whether a percentage like `40%` appears.
    pub has_metric: bool,
}

/// Measure the tone figures of `input`.
pub fn measure(input: &str, tp: &ToneProfile) -> ToneMetrics {
    let lengths: Vec<usize> = text::split_sentences(input)
        .iter()
        .filter(|s| s.chars().count() > tp.sentence_min_chars)
        .map(|s| text::tokenize_words(s).len())
        .collect();
    let avg_sentence_words = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    };

    let words = text::tokenize_words(input);
    let verbs = words
        .iter()
        .filter(|w| ACTION_VERBS.contains(&text::normalize_word(w).as_str()))
        .count();
    let action_verb_density = if words.is_empty() {
        0.0
    } else {
        verbs as f64 * 100.0 / words.len() as f64
    };

    ToneMetrics {
        avg_sentence_words,
        action_verb_density,
        bullet_lines: input.lines().filter(|l| BULLET.is_match(l)).count(),
        has_metric: METRIC.is_match(input),
    }
}

/// Score tone and impact.
#[tracing::instrument(skip_all, fields(text_len = input.len()))]
pub fn score_tone(input: &str, profile: &ScoringProfile) -> CategoryScore {
    let tp = &profile.tone;
    let m = measure(input, tp);
    let mut deduction: i64 = 0;
    let mut findings = Vec::new();

    if m.avg_sentence_words > tp.long_sentence_severe {
        deduction += i64::from(tp.long_sentence_severe_penalty);
        findings.push(format!(
            "Sentences average {:.0} words; aim for under {:.0}.",
            m.avg_sentence_words, tp.long_sentence_mild
        ));
    } else if m.avg_sentence_words > tp.long_sentence_mild {
        deduction += i64::from(tp.long_sentence_mild_penalty);
        findings.push("Tighten a few long sentences.".to_string());
    }

    if m.action_verb_density < tp.verb_density_severe {
        deduction += i64::from(tp.verb_density_severe_penalty);
        findings.push("Open bullets with strong action verbs (led, built, delivered).".to_string());
    } else if m.action_verb_density < tp.verb_density_mild {
        deduction += i64::from(tp.verb_density_mild_penalty);
        findings.push("Use a few more action verbs.".to_string());
    }

    if m.bullet_lines < tp.bullets_min {
        deduction += i64::from(tp.bullets_penalty);
        findings.push("Break achievements into bullet points.".to_string());
    }

    if !m.has_metric {
        deduction += i64::from(tp.metric_penalty);
        findings.push("Quantify impact with percentages or numbers.".to_string());
    }

    tracing::debug!(
        avg_words = m.avg_sentence_words,
        verb_density = m.action_verb_density,
        bullets = m.bullet_lines,
        deduction,
        "tone measured"
    );

    let feedback = summarize(&findings, "Confident, results-focused tone.");
    CategoryScore::clamped(i64::from(tp.max) - deduction, tp.max, feedback).with_findings(findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ScoringProfile {
        ScoringProfile::default()
    }

    const STRONG: &str = "• Led migration to Kubernetes, cutting costs 30%.\n\
        • Built the billing service.\n\
        • Delivered reporting for finance.\n\
        • Automated release checks.\n\
        • Improved onboarding docs.\n";

    #[test]
    fn strong_bullets_score_full() {
        let s = score_tone(STRONG, &profile());
        assert_eq!(s.score, 15, "{:?}", s.findings);
    }

    #[test]
    fn bullet_markers() {
        let text = "- one\n* two\n– three\n1. four\n▪ five\nplain";
        assert_eq!(measure(text, &profile().tone).bullet_lines, 5);
    }

    #[test]
    fn no_verbs_no_bullets_no_metrics() {
        let s = score_tone("Responsible for various duties in the office.", &profile());
        assert_eq!(s.score, 15 - 3 - 2 - 1);
    }

    #[test]
    fn long_sentences_penalized() {
        let sentence = format!("Led {}.", "work ".repeat(59));
        let text = format!("{STRONG}{sentence} {sentence} {sentence}");
        let m = measure(&text, &profile().tone);
        assert!(m.avg_sentence_words > 20.0);
        assert!(score_tone(&text, &profile()).score < 15);
    }

    #[test]
    fn empty_text_degrades_without_failing() {
        let s = score_tone("", &profile());
        assert_eq!(s.score, 15 - 3 - 2 - 1);
    }
}
