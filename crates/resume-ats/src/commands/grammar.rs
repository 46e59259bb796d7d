//! Grammar command: band verdict, raw diagnostics and extraction quality.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use resume_ats_core::{Band, Config, ConfigSources, ExtractionStatus, GrammarReport};

use super::{build_engine, read_input_file, with_dictionary_override};

/// Arguments for the `grammar` subcommand.
#[derive(Args, Debug)]
pub struct GrammarArgs {
    /// Plain-text résumé to check.
    pub file: Utf8PathBuf,

    /// Note from the text extractor (e.g. "ocr").
    #[arg(long, value_name = "HINT")]
    pub extraction_hint: Option<String>,

    /// Word list for spelling checks, overriding `dictionary_path`.
    #[arg(long, value_name = "FILE")]
    pub dictionary: Option<Utf8PathBuf>,
}

/// Print grammar diagnostics for a file.
#[instrument(name = "cmd_grammar", skip_all, fields(file = %args.file))]
pub async fn cmd_grammar(
    args: GrammarArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(hint = ?args.extraction_hint, "executing grammar command");

    let content = read_input_file(&args.file, config.input_limit())?;
    let config = &with_dictionary_override(config, args.dictionary.as_deref())?;
    let engine = build_engine(config, sources, config.scoring.clone());
    let report = engine.check_grammar(&content, args.extraction_hint.as_deref()).await;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&args.file, &report);
    Ok(())
}

fn print_report(file: &Utf8PathBuf, report: &GrammarReport) {
    let v = &report.verdict;
    let d = &report.diagnostics;
    let band = match v.band {
        Band::Excellent | Band::Good => v.band.green().to_string(),
        Band::NeutralLowConf => v.band.dimmed().to_string(),
        _ => v.band.yellow().to_string(),
    };
    println!("{file}: grammar {}/10, band {band}", v.score.bold());
    println!("  {}", v.feedback);
    if !v.ai_verification_enabled {
        println!("  AI verification: {}", "off (low extraction confidence)".dimmed());
    }

    let status = match d.extraction_status {
        ExtractionStatus::Ok => d.extraction_status.green().to_string(),
        _ => d.extraction_status.yellow().to_string(),
    };
    println!(
        "  Raw score {:.1}/10 ({} tokens, extraction {status}, confidence {:.0}%)",
        d.raw_score,
        d.token_count,
        d.confidence * 100.0
    );

    if d.dictionary_available {
        println!(
            "  Dictionary hit rate: {:.0}%, {} misspelling(s)",
            d.dictionary_hit_rate * 100.0,
            d.misspelled_count
        );
        if !d.misspelled_samples.is_empty() {
            println!("    e.g. {}", d.misspelled_samples.join(", ").red());
        }
    } else {
        println!("  Spelling: {}", "skipped (no dictionary configured)".dimmed());
    }

    for (label, penalty) in [
        ("Misspellings", d.misspell_penalty),
        ("Sentence structure", d.structure_penalty),
        ("Passive voice", d.passive_penalty),
        ("Repeated words", d.repetition_penalty),
        ("Long paragraphs", d.paragraph_penalty),
    ] {
        if penalty > 0 {
            println!("  {label}: {}", format!("-{penalty}").yellow());
        }
    }
    if d.total_penalty() == 0 {
        println!("  Penalties: none");
    }
    println!("  Passive ratio: {:.0}%", d.passive_ratio * 100.0);
}
