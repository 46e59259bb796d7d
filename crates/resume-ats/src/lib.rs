//! Argument parsing and command dispatch for `resume-ats`.
//!
//! `main.rs` loads configuration and logging, then hands one of the
//! [`Commands`] to its function in [`commands`]. [`server`] holds the MCP tool
//! surface behind the `mcp` feature.
//!
//! `xtask` builds man pages and shell completions from [`command()`].

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// When to color terminal reports.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    /// Always color, even when piped.
    Always,
    /// Plain text.
    Never,
}

impl ColorChoice {
    /// Set the process-wide owo-colors override. Call once, before any output.
    pub fn apply(self) {
        match self {
            Self::Auto => {}
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
EXAMPLES:
    resume-ats score resume.txt -t \"Senior Data Engineer\"
    resume-ats score resume.txt -t SRE --min-score 75 --json
    resume-ats grammar resume.txt --extraction-hint ocr
    resume-ats roles --resolve \"Sr. ML Engineer\"

ENVIRONMENT VARIABLES:
    RUST_LOG                      Log filter (e.g. resume_ats_core=debug)
    RESUME_ATS_LOG_PATH           Also write JSONL logs to this file
    RESUME_ATS_LOG_DIR            Also write JSONL logs into this directory
    RESUME_ATS_DICTIONARY_PATH    Word list for spelling checks
    RESUME_ATS_SCORING__VERSION   Any config key works; `__` separates nested keys
";

/// Top-level arguments shared by every subcommand.
#[derive(Parser)]
#[command(name = "resume-ats")]
#[command(about = "Deterministic ATS compatibility scoring for résumés", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Config file layered over discovered resume-ats.toml files
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Change to DIR before discovering config or reading résumés
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Color the text report
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Print results as JSON instead of a text report
    #[arg(long, global = true)]
    pub json: bool,
}

/// What to do with the résumé or the role data.
#[derive(Subcommand)]
pub enum Commands {
    /// Score a résumé against a job title
    Score(commands::score::ScoreArgs),

    /// Grade a résumé's writing: grammar band, score and diagnostics
    Grammar(commands::grammar::GrammarArgs),

    /// List role families, show a template, or resolve a job title
    Roles(commands::roles::RolesArgs),

    /// Show version, config sources and the active scoring profile
    Info(commands::info::InfoArgs),

    /// Serve the scoring tools over MCP on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// The clap command tree, for man pages and completions.
pub fn command() -> clap::Command {
    Cli::command()
}
