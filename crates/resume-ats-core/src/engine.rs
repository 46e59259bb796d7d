//! The scoring pipeline and its async entry point.
//!
//! [`score_with`] is the pure pipeline: given the résumé text, the resolved
//! template, and an optional dictionary, it runs every scorer and joins the
//! results. [`ScoringEngine`] owns the collaborators, fetches the dictionary
//! and template concurrently, and then calls [`score_with`].

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::{Dictionary, DictionaryCache, DictionaryProvider};
use crate::grammar::{self, Band, GRAMMAR_MAX, GrammarDiagnostics, GrammarReport, GrammarVerdict};
use crate::profile::ScoringProfile;
use crate::roles::{self, RoleTemplate, RoleTemplateProvider};
use crate::scoring::{
    self, CategoryScore, CategoryScores, RoleSkillSummary, score_formatting, score_keywords,
    score_structure, score_tone,
};

/// Facts about the source document supplied by the upstream extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeMetadata {
    /// The document used a multi-column layout.
    pub is_multi_column: bool,
    /// Free-form note from the extractor, e.g. `"ocr"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_hint: Option<String>,
}

/// Complete scoring output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Keyword category, out of 40.
    pub keyword_score: CategoryScore,
    /// Formatting category, out of 20.
    pub formatting_score: CategoryScore,
    /// Structure category, out of 15.
    pub structure_score: CategoryScore,
    /// Tone category, out of 15.
    pub tone_score: CategoryScore,
    /// Grammar category, out of 10.
    pub grammar_score: CategoryScore,
    /// Weighted overall score, 0 to 100.
    pub overall_score: u32,
    /// Role family whose template was used.
    pub role_family: String,
    /// Matched, missing, and stuffed skills.
    pub role_skill_summary: RoleSkillSummary,
    /// Ordered remediation advice.
    pub recommendations: Vec<String>,
    /// Raw grammar diagnostics.
    pub grammar_diagnostics: GrammarDiagnostics,
    /// Grammar band that set the grammar score.
    pub band: Band,
    /// Whether downstream AI verification may run.
    pub ai_verification_enabled: bool,
    /// Version of the scoring profile that produced this result.
    pub profile_version: String,
}

impl ScoreResult {
    /// The five category scores, for aggregation.
    pub const fn categories(&self) -> CategoryScores<'_> {
        CategoryScores {
            keyword: &self.keyword_score,
            formatting: &self.formatting_score,
            structure: &self.structure_score,
            tone: &self.tone_score,
            grammar: &self.grammar_score,
        }
    }
}

fn grammar_category(verdict: &GrammarVerdict, diagnostics: &GrammarDiagnostics) -> CategoryScore {
    let mut findings = Vec::new();
    if !diagnostics.misspelled_samples.is_empty() {
        findings.push(format!(
            "Possible misspellings: {}.",
            diagnostics.misspelled_samples.join(", ")
        ));
    }
    if diagnostics.structure_penalty > 0 {
        findings.push("Some sentences are very long or have no verb.".to_string());
    }
    if diagnostics.passive_penalty > 0 {
        findings.push(format!(
            "{:.0}% of sentences use passive voice.",
            diagnostics.passive_ratio * 100.0
        ));
    }
    if diagnostics.repeated_words {
        findings.push("A word is repeated back to back.".to_string());
    }
    if diagnostics.long_para_count > 0 {
        findings.push(format!(
            "{} long paragraph(s) have no sentence punctuation.",
            diagnostics.long_para_count
        ));
    }
    CategoryScore::clamped(i64::from(verdict.score), GRAMMAR_MAX, verdict.feedback.clone())
        .with_findings(findings)
}

/// Run the full scoring pipeline. Pure: no I/O, no shared state.
#[tracing::instrument(skip_all, fields(text_len = text.len(), role_family))]
pub fn score_with(
    text: &str,
    job_title: &str,
    metadata: &ResumeMetadata,
    role_family: &str,
    template: &RoleTemplate,
    dictionary: Option<&Dictionary>,
    profile: &ScoringProfile,
) -> ScoreResult {
    let diagnostics = grammar::diagnose(dictionary, text, metadata.extraction_hint.as_deref(), profile);
    let quality = diagnostics.extraction_quality();

    let keyword = score_keywords(text, job_title, template, profile);
    let formatting = score_formatting(text, metadata.is_multi_column, &quality, profile);
    let structure = score_structure(text, &quality, profile);
    let tone = score_tone(text, profile);
    let verdict = grammar::map_grammar_band(&diagnostics, formatting.score, structure.score, profile);
    let grammar = grammar_category(&verdict, &diagnostics);

    let scores = CategoryScores {
        keyword: &keyword.score,
        formatting: &formatting,
        structure: &structure,
        tone: &tone,
        grammar: &grammar,
    };
    let overall_score = scoring::aggregate(scores, &profile.weights);
    let recommendations =
        scoring::generate_recommendations(scores, &keyword.summary, &quality, profile);

    tracing::info!(
        overall_score,
        role_family,
        band = verdict.band.as_str(),
        status = %quality.extraction_status,
        "resume scored"
    );

    ScoreResult {
        keyword_score: keyword.score,
        formatting_score: formatting,
        structure_score: structure,
        tone_score: tone,
        grammar_score: grammar,
        overall_score,
        role_family: role_family.to_string(),
        role_skill_summary: keyword.summary,
        recommendations,
        grammar_diagnostics: diagnostics,
        band: verdict.band,
        ai_verification_enabled: verdict.ai_verification_enabled,
        profile_version: profile.version.clone(),
    }
}

/// Scores résumés using a dictionary provider and a template provider.
///
/// The dictionary cache is shared through an [`Arc`], so several engines (or
/// an engine rebuilt after a config reload) can reuse loaded dictionaries.
#[derive(Debug)]
pub struct ScoringEngine<D, R> {
    dictionaries: D,
    templates: R,
    cache: Arc<DictionaryCache>,
    profile: ScoringProfile,
}

impl<D: DictionaryProvider, R: RoleTemplateProvider> ScoringEngine<D, R> {
    /// Create an engine with the default profile and a fresh cache.
    pub fn new(dictionaries: D, templates: R) -> Self {
        Self {
            dictionaries,
            templates,
            cache: Arc::new(DictionaryCache::new()),
            profile: ScoringProfile::default(),
        }
    }

    /// Use `profile` for every score.
    #[must_use]
    pub fn with_profile(mut self, profile: ScoringProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Share an existing dictionary cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<DictionaryCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The active scoring profile.
    pub const fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// The dictionary cache.
    pub const fn cache(&self) -> &Arc<DictionaryCache> {
        &self.cache
    }

    /// The template provider.
    pub const fn templates(&self) -> &R {
        &self.templates
    }

    /// Load (or reuse) the dictionary. `None` means spelling will be skipped.
    pub async fn dictionary(&self) -> Option<Arc<Dictionary>> {
        let dictionary = self.cache.get_or_load(&self.dictionaries).await;
        if dictionary.is_none() {
            tracing::warn!(
                provider = self.dictionaries.provider_id(),
                "dictionary unavailable, spelling checks skipped"
            );
        }
        dictionary
    }

    /// Grammar diagnostics alone.
    pub async fn diagnose(&self, text: &str, extraction_hint: Option<&str>) -> GrammarDiagnostics {
        let dictionary = self.dictionary().await;
        grammar::diagnose(dictionary.as_deref(), text, extraction_hint, &self.profile)
    }

    /// Grammar diagnostics plus the band verdict.
    ///
    /// Layout is not scored here, so the formatting and structure gates are
    /// taken as met and only the writing decides the band.
    pub async fn check_grammar(&self, text: &str, extraction_hint: Option<&str>) -> GrammarReport {
        let diagnostics = self.diagnose(text, extraction_hint).await;
        let verdict = grammar::map_grammar_band(
            &diagnostics,
            self.profile.formatting.max,
            self.profile.structure.max,
            &self.profile,
        );
        GrammarReport { verdict, diagnostics }
    }

    /// Score a résumé against a job title. Never fails.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), job_title))]
    pub async fn score_resume(
        &self,
        text: &str,
        job_title: &str,
        metadata: &ResumeMetadata,
    ) -> ScoreResult {
        let normalized = roles::normalize_job_title(job_title);
        let family = roles::resolve_with_provider(&self.templates, &normalized);
        tracing::debug!(normalized = %normalized, family = %family, "role family resolved");

        let (dictionary, resolved) = tokio::join!(
            self.dictionary(),
            roles::load_role_template(&self.templates, &family)
        );

        score_with(
            text,
            job_title,
            metadata,
            &resolved.role_family,
            &resolved.template,
            dictionary.as_deref(),
            &self.profile,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{NoDictionary, StaticDictionaryProvider};
    use crate::grammar::ExtractionStatus;
    use crate::roles::BuiltinRoleTemplates;

    const CLEAN: &str = "\
Sarah Johnson
San Francisco, CA | sarah.johnson@email.com | (555) 123-4567 | linkedin.com/in/sarahjohnson

PROFESSIONAL SUMMARY
Senior Software Engineer with 8 years of experience building full-stack applications. Specialized in React, Node.js, Python, and cloud architecture. Known for delivering scalable systems and leading cross-functional teams.

PROFESSIONAL EXPERIENCE
Senior Software Engineer at TechCorp Inc., San Francisco, CA
June 2020 - Present
• Led development of a microservices platform using Node.js and PostgreSQL, improving scalability by 40%.
• Architected REST APIs serving 2M daily requests with 99.9% uptime.
• Mentored five junior engineers through code reviews and design sessions.
• Implemented a CI/CD pipeline with Jenkins and Docker, reducing deployment time by 60%.
• Delivered features for 500K active users alongside product and design partners.

Software Engineer at DataSolutions LLC, San Jose, CA
January 2018 - May 2020
• Developed responsive web applications using React, Redux, and TypeScript.
• Optimized database queries and added caching, reducing load times by 50%.
• Built data visualization dashboards for business intelligence teams.
• Wrote unit testing suites in Jest and Pytest, reaching 85% coverage.
• Automated regression checks, cutting release effort by 30%.

EDUCATION
Bachelor of Science in Computer Science
University of California, Berkeley, Graduated May 2016

TECHNICAL SKILLS
Languages: JavaScript, TypeScript, Python, Java, SQL
Backend: Node.js, Express, Django, REST APIs, GraphQL
Cloud and DevOps: AWS, Docker, Kubernetes, Jenkins, Git
Practices: Agile, data structures, algorithms, system design
";

    const JOHN_DOE: &str = "John Doe\njohn.doe@example.com\nSoftware Engineer\n\nExperience\n\
        Software Engineer at Acme, 2020-2024\nBuilt web apps with React and Node.js.\n\n\
        Education\nBS Computer Science, State University, 2020\n";

    const POOR_PASSAGE: &str = "i dont use punctuation and i dont stop ever i just keep \
        writting and writting about my experiance at the compnay where i was responsable for \
        alot of things like managment and stuf and i think i am a good canditate for this job \
        becuase i have alot of experiance";

    const POLISHED: &str = "I led the platform team at the company. I managed the release \
        process with clear goals. I built reliable tools for engineers every day. Our \
        customers improved quality by a lot. I think I am a good candidate for this job \
        because I have experience. I keep writing about my experience and stuff.";

    const WORDS: &str = "i\nuse\npunctuation\nand\nstop\never\njust\nkeep\nwriting\nabout\nmy\n\
        experience\nat\nthe\ncompany\nwhere\nwas\nresponsible\nfor\na\nlot\nof\nthings\nlike\n\
        management\nstuff\nthink\nam\ngood\ncandidate\nthis\njob\nbecause\nhave\nled\nplatform\n\
        team\nmanaged\nrelease\nprocess\nwith\nclear\ngoals\nbuilt\nreliable\ntools\nengineers\n\
        every\nday\nour\ncustomers\nimproved\nquality\nby\n";

    fn engine() -> ScoringEngine<NoDictionary, BuiltinRoleTemplates> {
        ScoringEngine::new(NoDictionary, BuiltinRoleTemplates)
    }

    fn dict_engine() -> ScoringEngine<StaticDictionaryProvider, BuiltinRoleTemplates> {
        ScoringEngine::new(StaticDictionaryProvider::english("test", WORDS), BuiltinRoleTemplates)
    }

    fn assert_bounds(r: &ScoreResult) {
        for cat in [
            &r.keyword_score,
            &r.formatting_score,
            &r.structure_score,
            &r.tone_score,
            &r.grammar_score,
        ] {
            assert!(cat.score <= cat.max, "{cat:?}");
        }
        assert!(r.overall_score <= 100);
    }

    #[tokio::test]
    async fn clean_resume_scores_high() {
        let r = engine()
            .score_resume(CLEAN, "Senior Software Engineer", &ResumeMetadata::default())
            .await;
        assert_eq!(r.role_family, "software_engineer");
        assert_eq!(r.formatting_score.score, 20);
        assert_eq!(r.structure_score.score, 15);
        assert_eq!(r.keyword_score.score, 40);
        assert_eq!(r.band, Band::Excellent);
        assert!(r.overall_score >= 90, "overall {}", r.overall_score);
        assert!(r.ai_verification_enabled);
        assert_eq!(r.profile_version, crate::profile::DEFAULT_PROFILE_VERSION);
    }

    #[tokio::test]
    async fn scoring_is_deterministic() {
        let e = dict_engine();
        let meta = ResumeMetadata::default();
        for text in [CLEAN, JOHN_DOE, POLISHED, ""] {
            let a = e.score_resume(text, "Software Engineer", &meta).await;
            let b = e.score_resume(text, "Software Engineer", &meta).await;
            assert_eq!(a, b);
        }
    }

    #[tokio::test]
    async fn results_stay_in_bounds() {
        let e = dict_engine();
        let poor = format!("{POOR_PASSAGE} {POOR_PASSAGE}");
        let multi = ResumeMetadata {
            is_multi_column: true,
            extraction_hint: Some("ocr".to_string()),
        };
        for text in [CLEAN, JOHN_DOE, POLISHED, poor.as_str(), "", "   \n\n  "] {
            for meta in [&ResumeMetadata::default(), &multi] {
                for title in ["", "Software Engineer", "!!!", "Chef"] {
                    assert_bounds(&e.score_resume(text, title, meta).await);
                }
            }
        }
    }

    #[tokio::test]
    async fn john_doe_scenario() {
        let r = engine()
            .score_resume(JOHN_DOE, "Software Engineer", &ResumeMetadata::default())
            .await;
        assert!(r.grammar_score.score <= 10);
        assert_bounds(&r);
    }

    #[tokio::test]
    async fn title_match_never_lowers_keyword_score() {
        let e = engine();
        let meta = ResumeMetadata::default();
        for text in [CLEAN, JOHN_DOE] {
            let with = e.score_resume(text, "Software Engineer", &meta).await;
            let without = e.score_resume(text, "", &meta).await;
            assert!(with.keyword_score.score >= without.keyword_score.score);
        }
    }

    #[tokio::test]
    async fn stuffed_skill_is_matched_and_reported() {
        let text = format!("{CLEAN}\n{}", "Kubernetes ".repeat(10));
        let r = engine()
            .score_resume(&text, "Platform Engineer", &ResumeMetadata::default())
            .await;
        let summary = &r.role_skill_summary;
        assert!(summary.matched_must_have.contains(&"Kubernetes".to_string()));
        assert!(summary.stuffed_must_have.contains(&"Kubernetes".to_string()));
        assert!(r.recommendations.iter().any(|s| s.contains("Kubernetes")));
    }

    #[tokio::test]
    async fn poor_writing_scores_below_polished() {
        let e = dict_engine();
        let meta = ResumeMetadata::default();
        let poor = format!("{POOR_PASSAGE} {POOR_PASSAGE}");
        let bad = e.score_resume(&poor, "", &meta).await;
        let good = e.score_resume(POLISHED, "", &meta).await;
        assert!(bad.grammar_score.score <= 7, "{:?}", bad.grammar_diagnostics);
        assert!(bad.grammar_score.score < good.grammar_score.score);
    }

    #[tokio::test]
    async fn ocr_hint_forces_neutral_grammar() {
        let meta = ResumeMetadata {
            is_multi_column: false,
            extraction_hint: Some("ocr".to_string()),
        };
        let r = engine().score_resume(JOHN_DOE, "Software Engineer", &meta).await;
        assert_eq!(r.grammar_diagnostics.extraction_status, ExtractionStatus::ScannedPdf);
        assert_eq!(r.band, Band::NeutralLowConf);
        assert_eq!(r.grammar_score.score, 6);
        assert!(!r.ai_verification_enabled);
        assert_eq!(r.structure_score.mode, Some(scoring::ConfidenceMode::Hedged));
    }

    #[tokio::test]
    async fn empty_text_degrades_gracefully() {
        let r = engine().score_resume("", "Software Engineer", &ResumeMetadata::default()).await;
        assert_eq!(r.grammar_diagnostics.raw_score, 10.0);
        assert_eq!(r.grammar_diagnostics.extraction_status, ExtractionStatus::Empty);
        assert_bounds(&r);
    }

    #[tokio::test]
    async fn unknown_title_uses_generic_template() {
        let r = engine().score_resume(CLEAN, "Chef", &ResumeMetadata::default()).await;
        assert_eq!(r.role_family, roles::GENERIC_FAMILY);
    }

    #[tokio::test]
    async fn grammar_check_reports_band() {
        let clean = engine().check_grammar(CLEAN, None).await;
        assert_eq!(clean.verdict.band, Band::Excellent);
        assert!(clean.verdict.ai_verification_enabled);

        let scanned = engine().check_grammar(CLEAN, Some("OCR")).await;
        assert_eq!(scanned.diagnostics.extraction_status, ExtractionStatus::ScannedPdf);
        assert_eq!(scanned.verdict.band, Band::NeutralLowConf);
        assert_eq!(scanned.verdict.score, 6);
        assert!(!scanned.verdict.ai_verification_enabled);
    }

    #[tokio::test]
    async fn dictionary_is_loaded_once_per_provider() {
        let e = dict_engine();
        assert!(!e.cache().is_cached("test"));
        let _ = e.diagnose(POLISHED, None).await;
        assert!(e.cache().is_cached("test"));
    }

    #[test]
    fn overall_is_a_function_of_categories() {
        let profile = ScoringProfile::default();
        let r = score_with(
            CLEAN,
            "Software Engineer",
            &ResumeMetadata::default(),
            "software_engineer",
            &roles::builtin::template("software_engineer").unwrap_or_default(),
            None,
            &profile,
        );
        assert_eq!(r.overall_score, scoring::aggregate(r.categories(), &profile.weights));
    }

    #[test]
    fn result_json_shape() {
        let r = score_with(
            JOHN_DOE,
            "Software Engineer",
            &ResumeMetadata::default(),
            "software_engineer",
            &RoleTemplate::default(),
            None,
            &ScoringProfile::default(),
        );
        let json = serde_json::to_value(&r).unwrap();
        for key in [
            "keywordScore",
            "formattingScore",
            "structureScore",
            "toneScore",
            "grammarScore",
            "overallScore",
            "roleFamily",
            "roleSkillSummary",
            "recommendations",
            "band",
            "aiVerificationEnabled",
            "profileVersion",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["grammarScore"]["max"], 10);
        assert!(json["roleSkillSummary"].get("stuffedMustHave").is_some());
    }
}
