//! Structure scorer: contact placement, section order, dates, and job titles.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::sections::{self, Section};
use super::{CategoryScore, ConfidenceMode, summarize};
use crate::grammar::ExtractionQuality;
use crate::profile::{ScoringProfile, StructureProfile};
use crate::text;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,2}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").expect("valid regex")
});

static PROFILE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:linkedin\.com|github\.com)/").expect("valid regex"));

static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+(?:19|20)\d{2}\b",
    )
    .expect("valid regex")
});

static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:0?[1-9]|1[0-2])/(?:19|20)\d{2}\b").expect("valid regex"));

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid regex"));

/// "Senior Engineer at Acme", "Analyst @ Globex".
static TITLE_AT_COMPANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][\w&/+.-]*(?:\s+[A-Z][\w&/+.-]*)*\s+(?:at|@)\s+[A-Z]").expect("valid regex")
});

/// Returns `true` if the line contains a phone number.
pub fn has_phone(line: &str) -> bool {
    PHONE.is_match(line)
}

/// Returns `true` if the line contains an email, phone, LinkedIn, or GitHub link.
pub fn has_contact_signal(line: &str) -> bool {
    EMAIL.is_match(line) || PHONE.is_match(line) || PROFILE_LINK.is_match(line)
}

/// Distinct dates in `input`, lowercased.
///
/// Years already inside a month-year or numeric date are not counted again,
/// so "Jan 2020" is one date, not two.
pub fn distinct_dates(input: &str) -> HashSet<String> {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut dates = HashSet::new();

    for m in MONTH_YEAR.find_iter(input).chain(NUMERIC_DATE.find_iter(input)) {
        spans.push((m.start(), m.end()));
        dates.insert(m.as_str().split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase());
    }
    for m in YEAR.find_iter(input) {
        let inside = spans.iter().any(|&(s, e)| m.start() >= s && m.end() <= e);
        if !inside {
            dates.insert(m.as_str().to_string());
        }
    }

    dates
}

/// Score résumé structure, gated by extraction quality.
#[tracing::instrument(skip_all, fields(text_len = input.len()))]
pub fn score_structure(
    input: &str,
    quality: &ExtractionQuality,
    profile: &ScoringProfile,
) -> CategoryScore {
    match ConfidenceMode::from_quality(quality, profile.extraction.confidence_threshold) {
        ConfidenceMode::Strict => strict(input, &profile.structure),
        ConfidenceMode::Hedged => hedged(&profile.structure),
    }
}

/// Every structural check applies.
pub fn strict(input: &str, sp: &StructureProfile) -> CategoryScore {
    let lines = text::non_empty_lines(input);
    let mut deduction: i64 = 0;
    let mut findings = Vec::new();

    let window = lines.len().min(sp.contact_window_lines);
    let contact_in_header = lines[..window].iter().any(|l| has_contact_signal(l));
    let contact_anywhere = contact_in_header || lines[window..].iter().any(|l| has_contact_signal(l));
    if !contact_in_header && contact_anywhere {
        deduction += i64::from(sp.contact_penalty);
        findings.push("Move your contact details to the top of the résumé.".to_string());
    }

    let experience = sections::find_heading(&lines, Section::Experience);
    let education = sections::find_heading(&lines, Section::Education);
    if let (Some(exp), Some(edu)) = (experience, education)
        && exp > edu
    {
        deduction += i64::from(sp.order_penalty);
        findings.push("List Experience before Education.".to_string());
    }

    let dates = distinct_dates(input);
    if dates.len() < sp.dates_min {
        deduction += i64::from(sp.dates_penalty);
        findings.push("Add dates (month and year) to each role and degree.".to_string());
    }

    let body = sections::section_body(&lines, Section::Experience);
    let body_words: usize = body.iter().map(|l| l.split_whitespace().count()).sum();
    if body_words >= sp.experience_min_words && !body.iter().any(|l| TITLE_AT_COMPANY.is_match(l)) {
        deduction += i64::from(sp.title_company_penalty);
        findings.push("State each role as \"Title at Company\" so parsers can pair them.".to_string());
    }

    tracing::debug!(deduction, dates = dates.len(), body_words, "structure checks complete");

    let feedback = summarize(&findings, "Well-structured: contact details, section order, and dates all parse cleanly.");
    CategoryScore::clamped(i64::from(sp.max) - deduction, sp.max, feedback)
        .with_findings(findings)
        .with_mode(ConfidenceMode::Strict)
}

/// Layout checks are skipped and the ceiling is lowered.
pub fn hedged(sp: &StructureProfile) -> CategoryScore {
    CategoryScore::clamped(
        i64::from(sp.max),
        sp.max,
        "Structure could not be fully verified because the text extraction looks unreliable.",
    )
    .capped(sp.hedged_cap)
    .with_mode(ConfidenceMode::Hedged)
}
