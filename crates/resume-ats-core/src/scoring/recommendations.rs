//! Threshold-driven remediation advice.

use super::{CategoryScores, RoleSkillSummary};
use crate::grammar::{ExtractionQuality, ExtractionStatus};
use crate::profile::ScoringProfile;

/// Build the ordered list of recommendations.
///
/// Order: extraction warning, keyword advice (with missing and stuffed
/// skills), then formatting, structure, tone, and grammar.
pub fn generate_recommendations(
    scores: CategoryScores<'_>,
    summary: &RoleSkillSummary,
    quality: &ExtractionQuality,
    profile: &ScoringProfile,
) -> Vec<String> {
    let rp = &profile.recommendations;
    let mut out = Vec::new();

    if !quality.is_reliable(profile.extraction.confidence_threshold) {
        let advice = match quality.extraction_status {
            ExtractionStatus::ScannedPdf => {
                "Your résumé looks like a scanned image. Export a text-based PDF or DOCX so ATS software can read it."
            }
            ExtractionStatus::ProbablyNonEnglish => {
                "Most of the text was not recognized as English. ATS keyword matching works best with an English résumé."
            }
            _ => "We could not extract much text. Re-export your résumé as a text-based PDF or DOCX and try again.",
        };
        out.push(advice.to_string());
    }

    if scores.keyword.score < rp.keyword_below {
        out.push(
            "Add more keywords from the job description, and mirror the target job title.".to_string(),
        );
        if !summary.missing_must_have.is_empty() {
            let shown: Vec<&str> = summary
                .missing_must_have
                .iter()
                .take(rp.max_missing_skills)
                .map(String::as_str)
                .collect();
            out.push(format!("Consider adding these must-have skills: {}.", shown.join(", ")));
        }
    }

    let stuffed: Vec<&str> = summary
        .stuffed_must_have
        .iter()
        .chain(&summary.stuffed_nice_to_have)
        .map(String::as_str)
        .collect();
    if !stuffed.is_empty() {
        out.push(format!(
            "Avoid repeating the same keywords too often: {}.",
            stuffed.join(", ")
        ));
    }

    if scores.formatting.score < rp.formatting_below {
        out.push(
            "Simplify formatting: one column, no tables, and standard headings (Experience, Education, Skills)."
                .to_string(),
        );
    }
    if scores.structure.score < rp.structure_below {
        out.push(
            "Improve structure: contact details at the top, Experience before Education, and dates on every role."
                .to_string(),
        );
    }
    if scores.tone.score < rp.tone_below {
        out.push(
            "Strengthen tone: start bullets with action verbs, keep sentences short, and quantify results."
                .to_string(),
        );
    }
    if scores.grammar.score < rp.grammar_below {
        out.push("Proofread for spelling and grammar, and break up run-on sentences.".to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::CategoryScore;

    fn cat(score: u32, max: u32) -> CategoryScore {
        CategoryScore::clamped(i64::from(score), max, "")
    }

    fn ok_quality() -> ExtractionQuality {
        ExtractionQuality {
            extraction_status: ExtractionStatus::Ok,
            confidence: 0.95,
            token_count: 400,
        }
    }

    fn recs(values: [u32; 5], summary: &RoleSkillSummary, quality: &ExtractionQuality) -> Vec<String> {
        let s = [cat(values[0], 40), cat(values[1], 20), cat(values[2], 15), cat(values[3], 15), cat(values[4], 10)];
        generate_recommendations(
            CategoryScores {
                keyword: &s[0],
                formatting: &s[1],
                structure: &s[2],
                tone: &s[3],
                grammar: &s[4],
            },
            summary,
            quality,
            &ScoringProfile::default(),
        )
    }

    #[test]
    fn strong_resume_gets_no_advice() {
        assert!(recs([35, 19, 14, 14, 9], &RoleSkillSummary::default(), &ok_quality()).is_empty());
    }

    #[test]
    fn each_threshold_fires_in_order() {
        let r = recs([10, 10, 10, 10, 5], &RoleSkillSummary::default(), &ok_quality());
        assert_eq!(r.len(), 5);
        assert!(r[0].contains("keywords"));
        assert!(r[1].contains("formatting"));
        assert!(r[2].contains("structure"));
        assert!(r[3].contains("tone"));
        assert!(r[4].contains("Proofread"));
    }

    #[test]
    fn missing_skills_are_named_and_capped() {
        let summary = RoleSkillSummary {
            missing_must_have: (1..=8).map(|i| format!("skill{i}")).collect(),
            ..RoleSkillSummary::default()
        };
        let r = recs([10, 20, 15, 15, 10], &summary, &ok_quality());
        assert_eq!(r[1], "Consider adding these must-have skills: skill1, skill2, skill3, skill4, skill5.");
    }

    #[test]
    fn stuffing_is_reported_even_with_high_scores() {
        let summary = RoleSkillSummary {
            stuffed_must_have: vec!["Python".to_string()],
            ..RoleSkillSummary::default()
        };
        let r = recs([40, 20, 15, 15, 10], &summary, &ok_quality());
        assert_eq!(r.len(), 1);
        assert!(r[0].contains("Python"));
    }

    #[test]
    fn scanned_input_leads_with_reexport_hint() {
        let quality = ExtractionQuality {
            extraction_status: ExtractionStatus::ScannedPdf,
            confidence: 0.4,
            token_count: 80,
        };
        let r = recs([40, 20, 15, 15, 10], &RoleSkillSummary::default(), &quality);
        assert!(r[0].contains("scanned"));
    }
}
