//! Formatting scorer: layout traps that break ATS parsers.
//!
//! Multi-column layouts and pipe-delimited tables are penalized in both
//! modes. Missing section headings are only penalized in strict mode, since
//! a broken extraction loses headings the résumé actually has.

use super::sections::{self, Section};
use super::structure::has_phone;
use super::{CategoryScore, ConfidenceMode, summarize};
use crate::grammar::ExtractionQuality;
use crate::profile::{FormattingProfile, ScoringProfile};
use crate::text;

/// Returns `true` for a short header line with an email or phone number,
/// where pipes separate contact details rather than table cells.
fn is_contact_header(line: &str, fp: &FormattingProfile) -> bool {
    line.chars().count() <= fp.contact_line_max_chars && (line.contains('@') || has_phone(line))
}

/// Number of lines that look like pipe-delimited table rows.
pub fn pipe_table_lines(input: &str, fp: &FormattingProfile) -> usize {
    text::non_empty_lines(input)
        .into_iter()
        .filter(|l| l.matches('|').count() >= fp.pipes_per_line)
        .filter(|l| !is_contact_header(l, fp))
        .count()
}

/// Deductions that apply regardless of extraction confidence.
fn layout_deductions(
    input: &str,
    is_multi_column: bool,
    fp: &FormattingProfile,
    findings: &mut Vec<String>,
) -> i64 {
    let mut deduction = 0;
    if is_multi_column {
        deduction += i64::from(fp.multi_column_penalty);
        findings.push("Use a single-column layout; columns scramble ATS reading order.".to_string());
    }
    if pipe_table_lines(input, fp) >= fp.pipe_lines_min {
        deduction += i64::from(fp.pipe_table_penalty);
        findings.push("Replace tables and pipe-separated rows with plain lines.".to_string());
    }
    deduction
}

/// Score formatting, gated by extraction quality.
#[tracing::instrument(skip_all, fields(text_len = input.len(), is_multi_column))]
pub fn score_formatting(
    input: &str,
    is_multi_column: bool,
    quality: &ExtractionQuality,
    profile: &ScoringProfile,
) -> CategoryScore {
    match ConfidenceMode::from_quality(quality, profile.extraction.confidence_threshold) {
        ConfidenceMode::Strict => strict(input, is_multi_column, &profile.formatting),
        ConfidenceMode::Hedged => hedged(input, is_multi_column, &profile.formatting),
    }
}

/// Layout checks plus required section headings.
pub fn strict(input: &str, is_multi_column: bool, fp: &FormattingProfile) -> CategoryScore {
    let mut findings = Vec::new();
    let mut deduction = layout_deductions(input, is_multi_column, fp, &mut findings);

    let lines = text::non_empty_lines(input);
    let mut missing = Vec::new();
    for (section, penalty) in [
        (Section::Experience, fp.missing_experience_penalty),
        (Section::Education, fp.missing_education_penalty),
        (Section::Skills, fp.missing_skills_penalty),
    ] {
        if sections::find_heading(&lines, section).is_none() {
            deduction += i64::from(penalty);
            missing.push(section.label());
        }
    }
    if !missing.is_empty() {
        findings.push(format!("Add clear section headings for: {}.", missing.join(", ")));
    }

    let feedback = summarize(&findings, "Clean, ATS-friendly formatting.");
    CategoryScore::clamped(i64::from(fp.max) - deduction, fp.max, feedback)
        .with_findings(findings)
        .with_mode(ConfidenceMode::Strict)
}

/// Layout checks only; heading checks are suppressed and the ceiling lowered.
pub fn hedged(input: &str, is_multi_column: bool, fp: &FormattingProfile) -> CategoryScore {
    let mut findings = Vec::new();
    let deduction = layout_deductions(input, is_multi_column, fp, &mut findings);
    findings.push(
        "Section headings could not be verified because the text extraction looks unreliable."
            .to_string(),
    );

    let feedback = summarize(&findings, "");
    CategoryScore::clamped(i64::from(fp.max) - deduction, fp.max, feedback)
        .capped(fp.hedged_cap)
        .with_findings(findings)
        .with_mode(ConfidenceMode::Hedged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ExtractionStatus;

    fn fp() -> FormattingProfile {
        FormattingProfile::default()
    }

    const COMPLETE: &str = "Jane Doe | jane@example.com | (555) 123-4567 | linkedin.com/in/jane\n\
        Experience\nEngineer at Acme\nEducation\nBS\nTechnical Skills\nRust, SQL\n";

    #[test]
    fn complete_resume_scores_full() {
        let s = strict(COMPLETE, false, &fp());
        assert_eq!(s.score, 20);
        assert_eq!(s.feedback, "Clean, ATS-friendly formatting.");
    }

    #[test]
    fn multi_column_costs_ten() {
        assert_eq!(strict(COMPLETE, true, &fp()).score, 10);
    }

    #[test]
    fn pipe_tables_cost_five() {
        let text = format!("{COMPLETE}Skill | Years | Level | Notes\nRust | 5 | Expert | daily\n");
        assert_eq!(pipe_table_lines(&text, &fp()), 2);
        assert_eq!(strict(&text, false, &fp()).score, 15);
    }

    #[test]
    fn single_pipe_row_is_tolerated() {
        let text = format!("{COMPLETE}Skill | Years | Level | Notes\n");
        assert_eq!(strict(&text, false, &fp()).score, 20);
    }

    #[test]
    fn missing_headings_deducted_in_strict() {
        let s = strict("Jane Doe\nSome text only", false, &fp());
        assert_eq!(s.score, 13);
        assert!(s.feedback.contains("Experience, Education, Skills"));
    }

    #[test]
    fn hedged_suppresses_headings_and_caps() {
        let s = hedged("Jane Doe\nSome text only", false, &fp());
        assert_eq!(s.score, 17);
        assert_eq!(s.mode, Some(ConfidenceMode::Hedged));
        assert!(s.feedback.contains("could not be verified"));
    }

    #[test]
    fn hedged_still_counts_layout() {
        assert_eq!(hedged("text", true, &fp()).score, 10);
    }

    #[test]
    fn dispatch_follows_quality() {
        let low = ExtractionQuality {
            extraction_status: ExtractionStatus::ScannedPdf,
            confidence: 0.3,
            token_count: 40,
        };
        let s = score_formatting("Jane Doe", false, &low, &ScoringProfile::default());
        assert_eq!(s.mode, Some(ConfidenceMode::Hedged));
    }
}
