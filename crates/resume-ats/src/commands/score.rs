//! Score command: full ATS scoring of one résumé.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use resume_ats_core::{CategoryScore, Config, ConfigSources, ResumeMetadata, ScoreResult, StuffingCount};

use super::{build_engine, read_input_file, with_dictionary_override};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Plain-text résumé to score.
    pub file: Utf8PathBuf,

    /// Target job title (e.g. "Senior Data Engineer").
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// The source document used a multi-column layout.
    #[arg(long)]
    pub multi_column: bool,

    /// Note from the text extractor (e.g. "ocr").
    #[arg(long, value_name = "HINT")]
    pub extraction_hint: Option<String>,

    /// Word list for spelling checks, overriding `dictionary_path`.
    #[arg(long, value_name = "FILE")]
    pub dictionary: Option<Utf8PathBuf>,

    /// How keyword counts combine across a skill's alternatives.
    #[arg(long, value_enum)]
    pub stuffing_count: Option<StuffingCount>,

    /// Fail if the overall score is below this value (0-100).
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<u32>,
}

/// Score a résumé file.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file, title = %args.title))]
pub async fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(
        multi_column = args.multi_column,
        hint = ?args.extraction_hint,
        "executing score command"
    );

    let content = read_input_file(&args.file, config.input_limit())?;
    let config = &with_dictionary_override(config, args.dictionary.as_deref())?;

    let mut profile = config.scoring.clone();
    if let Some(mode) = args.stuffing_count {
        profile.keyword.stuffing_count = mode;
    }
    let engine = build_engine(config, sources, profile);

    let metadata = ResumeMetadata {
        is_multi_column: args.multi_column,
        extraction_hint: args.extraction_hint,
    };
    let result = engine.score_resume(&content, &args.title, &metadata).await;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&args.file, &result);
    }

    if let Some(min) = args.min_score
        && result.overall_score < min
    {
        bail!(
            "{} scored {} (min: {min}). Address the recommendations above.",
            args.file,
            result.overall_score
        );
    }

    Ok(())
}

fn colored_total(score: u32) -> String {
    match score {
        80.. => score.green().bold().to_string(),
        60..=79 => score.yellow().bold().to_string(),
        _ => score.red().bold().to_string(),
    }
}

fn print_category(label: &str, cat: &CategoryScore, suffix: &str) {
    let ratio = format!("{:>2}/{:<2}", cat.score, cat.max);
    let ratio = if cat.score == cat.max {
        ratio.green().to_string()
    } else if cat.score * 2 < cat.max {
        ratio.red().to_string()
    } else {
        ratio.to_string()
    };
    println!("  {:<11} {ratio}{suffix}  {}", label, cat.feedback.dimmed());
}

fn print_list(label: &str, items: &[String]) {
    if !items.is_empty() {
        println!("  {}: {}", label.dimmed(), items.join(", "));
    }
}

fn print_result(file: &Utf8PathBuf, r: &ScoreResult) {
    println!(
        "{}: {}/100  ({}, profile {})",
        file,
        colored_total(r.overall_score),
        r.role_family.cyan(),
        r.profile_version
    );

    let band = format!("  [{}]", r.band);
    print_category("Keywords", &r.keyword_score, "");
    print_category("Formatting", &r.formatting_score, "");
    print_category("Structure", &r.structure_score, "");
    print_category("Tone", &r.tone_score, "");
    print_category("Grammar", &r.grammar_score, &band);

    let s = &r.role_skill_summary;
    print_list("Matched must-have", &s.matched_must_have);
    print_list("Missing must-have", &s.missing_must_have);
    print_list("Matched nice-to-have", &s.matched_nice_to_have);
    print_list("Tools mentioned", &s.matched_tools);

    if !r.recommendations.is_empty() {
        println!();
        println!("{}", "Recommendations".bold().underline());
        for (i, rec) in r.recommendations.iter().enumerate() {
            println!("  {}. {rec}", i + 1);
        }
    }
}
