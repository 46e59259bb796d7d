//! Keyword scorer: job-title match plus must-have and nice-to-have coverage.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{CategoryScore, summarize};
use crate::profile::ScoringProfile;
use crate::roles::{RoleTemplate, SkillPattern, normalize_job_title};
use crate::word_lists::SHORT_TITLE_ACRONYMS;

/// Which template skills were found, missed, or over-used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleSkillSummary {
    /// Must-have skills found at least once.
    pub matched_must_have: Vec<String>,
    /// Must-have skills not found.
    pub missing_must_have: Vec<String>,
    /// Must-have skills found more often than the stuffing threshold.
    pub stuffed_must_have: Vec<String>,
    /// Nice-to-have skills found at least once.
    pub matched_nice_to_have: Vec<String>,
    /// Nice-to-have skills not found.
    pub missing_nice_to_have: Vec<String>,
    /// Nice-to-have skills found more often than the stuffing threshold.
    pub stuffed_nice_to_have: Vec<String>,
    /// Template tools mentioned in the résumé.
    pub matched_tools: Vec<String>,
}

/// Keyword score with the skill breakdown behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordOutcome {
    /// The category score.
    pub score: CategoryScore,
    /// Matched, missing, and stuffed skills.
    pub summary: RoleSkillSummary,
    /// Points earned by the job-title match.
    pub title_points: f64,
}

#[derive(Debug, Default)]
struct Coverage {
    matched: Vec<String>,
    missing: Vec<String>,
    stuffed: Vec<String>,
}

impl Coverage {
    fn ratio(&self) -> f64 {
        let total = self.matched.len() + self.missing.len();
        if total == 0 {
            0.0
        } else {
            self.matched.len() as f64 / total as f64
        }
    }
}

fn coverage(skills: &[String], text: &str, profile: &ScoringProfile) -> Coverage {
    let mut out = Coverage::default();
    for skill in skills {
        let count = SkillPattern::parse(skill).match_count(text, profile.keyword.stuffing_count);
        if count == 0 {
            out.missing.push(skill.clone());
            continue;
        }
        out.matched.push(skill.clone());
        if count > profile.keyword.stuffing_threshold {
            tracing::debug!(skill = %skill, count, "possible keyword stuffing");
            out.stuffed.push(skill.clone());
        }
    }
    out
}

/// Points for the job title: full marks for an exact phrase match, otherwise
/// proportional to the significant title words that appear.
pub fn title_points(text: &str, job_title: &str, profile: &ScoringProfile) -> f64 {
    let title = normalize_job_title(job_title);
    if title.is_empty() {
        return 0.0;
    }
    let haystack = format!(" {} ", normalize_job_title(text));
    let full = profile.keyword.title_points;

    if haystack.contains(&format!(" {title} ")) {
        return full;
    }

    let mut considered = 0usize;
    let mut matched = 0usize;
    for word in title.split_whitespace() {
        if SHORT_TITLE_ACRONYMS.contains(&word) {
            considered += 1;
            if haystack.contains(&format!(" {word} ")) {
                matched += 1;
            }
        } else if word.chars().count() >= profile.keyword.title_word_min_len {
            considered += 1;
            if haystack.contains(word) {
                matched += 1;
            }
        }
    }

    if considered == 0 {
        0.0
    } else {
        full * matched as f64 / considered as f64
    }
}

/// Score keyword coverage of `text` against a role template.
#[tracing::instrument(skip_all, fields(text_len = text.len(), must_have = template.must_have.len()))]
pub fn score_keywords(
    text: &str,
    job_title: &str,
    template: &RoleTemplate,
    profile: &ScoringProfile,
) -> KeywordOutcome {
    let kp = &profile.keyword;
    let title_points = title_points(text, job_title, profile);
    let must = coverage(&template.must_have, text, profile);
    let nice = coverage(&template.nice_to_have, text, profile);
    let matched_tools: Vec<String> = template
        .tools
        .iter()
        .filter(|tool| SkillPattern::parse(tool).match_count(text, kp.stuffing_count) > 0)
        .cloned()
        .collect();

    let total = title_points + kp.must_have_points * must.ratio() + kp.nice_to_have_points * nice.ratio();

    let mut findings = Vec::new();
    if !normalize_job_title(job_title).is_empty() && title_points < kp.title_points {
        findings.push("The target job title does not appear verbatim in the résumé.".to_string());
    }
    if !must.missing.is_empty() {
        let shown: Vec<&str> = must
            .missing
            .iter()
            .take(profile.recommendations.max_missing_skills)
            .map(String::as_str)
            .collect();
        findings.push(format!("Missing must-have skills: {}.", shown.join(", ")));
    }
    let stuffed: Vec<&str> = must
        .stuffed
        .iter()
        .chain(&nice.stuffed)
        .map(String::as_str)
        .collect();
    if !stuffed.is_empty() {
        findings.push(format!(
            "Repeated more than {} times, which may read as keyword stuffing: {}.",
            kp.stuffing_threshold,
            stuffed.join(", ")
        ));
    }

    let headline = format!(
        "Matched {} of {} must-have and {} of {} nice-to-have skills.",
        must.matched.len(),
        must.matched.len() + must.missing.len(),
        nice.matched.len(),
        nice.matched.len() + nice.missing.len(),
    );
    let feedback = if findings.is_empty() {
        headline
    } else {
        format!("{headline} {}", summarize(&findings, ""))
    };

    tracing::debug!(title_points, total, "keyword score computed");

    KeywordOutcome {
        score: CategoryScore::clamped(total.round() as i64, kp.max, feedback).with_findings(findings),
        summary: RoleSkillSummary {
            matched_must_have: must.matched,
            missing_must_have: must.missing,
            stuffed_must_have: must.stuffed,
            matched_nice_to_have: nice.matched,
            missing_nice_to_have: nice.missing,
            stuffed_nice_to_have: nice.stuffed,
            matched_tools,
        },
        title_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> RoleTemplate {
        RoleTemplate {
            must_have: vec![
                "Python".to_string(),
                "SQL".to_string(),
                "ETL / ELT pipelines".to_string(),
                "Spark".to_string(),
            ],
            nice_to_have: vec!["Airflow".to_string(), "Kafka".to_string()],
            tools: vec!["dbt".to_string(), "Snowflake".to_string()],
        }
    }

    fn profile() -> ScoringProfile {
        ScoringProfile::default()
    }

    const RESUME: &str = "Senior Data Engineer\nBuilt ELT pipelines in Python and SQL on Snowflake.\nOrchestrated jobs with Airflow.";

    #[test]
    fn exact_title_earns_full_points() {
        assert_eq!(title_points(RESUME, "Senior Data Engineer", &profile()), 10.0);
        // Punctuation is stripped, so "data-engineer" becomes one unmatched word.
        assert_eq!(title_points(RESUME, "senior data-engineer!", &profile()), 5.0);
    }

    #[test]
    fn partial_title_is_proportional() {
        // "staff" misses, "data" and "engineer" hit.
        let points = title_points(RESUME, "Staff Data Engineer", &profile());
        assert!((points - 10.0 * 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn short_acronyms_need_whole_words() {
        let text = "Built html pages for the team.";
        // "ml" appears inside "html" but must not count.
        assert_eq!(title_points(text, "ML", &profile()), 0.0);
        assert_eq!(title_points("Shipped ML models.", "ML", &profile()), 10.0);
    }

    #[test]
    fn empty_title_earns_nothing() {
        assert_eq!(title_points(RESUME, "", &profile()), 0.0);
        assert_eq!(title_points(RESUME, "   ", &profile()), 0.0);
    }

    #[test]
    fn coverage_scoring() {
        let out = score_keywords(RESUME, "Senior Data Engineer", &template(), &profile());
        assert_eq!(out.summary.matched_must_have, vec!["Python", "SQL", "ETL / ELT pipelines"]);
        assert_eq!(out.summary.missing_must_have, vec!["Spark"]);
        assert_eq!(out.summary.matched_nice_to_have, vec!["Airflow"]);
        assert_eq!(out.summary.matched_tools, vec!["Snowflake"]);
        // 10 + 30 * 3/4 + 10 * 1/2 = 37.5 -> 38
        assert_eq!(out.score.score, 38);
        assert_eq!(out.score.max, 40);
        assert!(out.score.feedback.contains("Spark"));
    }

    #[test]
    fn score_never_exceeds_forty() {
        let text = "Senior Data Engineer Python SQL ETL pipelines Spark Airflow Kafka";
        let out = score_keywords(text, "Senior Data Engineer", &template(), &profile());
        assert_eq!(out.score.score, 40);
    }

    #[test]
    fn stuffed_skill_still_counts_as_matched() {
        let text = "Python ".repeat(10);
        let out = score_keywords(&text, "", &template(), &profile());
        assert!(out.summary.matched_must_have.contains(&"Python".to_string()));
        assert_eq!(out.summary.stuffed_must_have, vec!["Python"]);
        assert!(out.score.feedback.contains("stuffing"));
    }

    #[test]
    fn empty_template_scores_title_only() {
        let out = score_keywords(RESUME, "Senior Data Engineer", &RoleTemplate::default(), &profile());
        assert_eq!(out.score.score, 10);
    }

    #[test]
    fn title_never_lowers_score() {
        let with = score_keywords(RESUME, "Senior Data Engineer", &template(), &profile());
        let without = score_keywords(RESUME, "", &template(), &profile());
        assert!(with.score.score >= without.score.score);
    }
}
