//! Core library for resume-ats.
//!
//! A deterministic, rule-based engine that scores how well a résumé will fare
//! in an applicant tracking system. Every score is a pure function of the
//! résumé text, the job title, the document metadata, the role template, the
//! dictionary, and the [`ScoringProfile`].
//!
//! # Modules
//!
//! - [`engine`] - Scoring pipeline and the async [`ScoringEngine`]
//! - [`scoring`] - Keyword, formatting, structure, and tone scorers, plus aggregation
//! - [`grammar`] - Grammar diagnostics, extraction quality, and band mapping
//! - [`roles`] - Job title resolution and role templates
//! - [`dictionary`] - Word lists for spelling checks, and their cache
//! - [`profile`] - Every threshold and penalty, versioned
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use resume_ats_core::{BuiltinRoleTemplates, NoDictionary, ResumeMetadata, ScoringEngine};
//!
//! # async fn run() {
//! let engine = ScoringEngine::new(NoDictionary, BuiltinRoleTemplates);
//! let result = engine
//!     .score_resume("Jane Doe\njane@example.com\n...", "Data Engineer", &ResumeMetadata::default())
//!     .await;
//! println!("{} / 100", result.overall_score);
//! # }
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod profile;
pub mod roles;
pub mod scoring;
pub mod text;
pub mod word_lists;

pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use dictionary::{
    Dictionary, DictionaryCache, DictionaryProvider, FileDictionaryProvider, NoDictionary,
    StaticDictionaryProvider,
};
pub use engine::{ResumeMetadata, ScoreResult, ScoringEngine, score_with};
pub use error::{ConfigError, ConfigResult, ProviderError, ProviderResult};
pub use grammar::{
    Band, ExtractionQuality, ExtractionStatus, GrammarDiagnostics, GrammarReport, GrammarVerdict,
};
pub use profile::{ScoringProfile, StuffingCount};
pub use roles::{
    BuiltinRoleTemplates, ConfiguredRoleTemplates, RoleTemplate, RoleTemplateProvider,
};
pub use scoring::{CategoryScore, ConfidenceMode, RoleSkillSummary};

/// Check that `input` fits within `limit` bytes.
///
/// Returns the input length on success and a description of the overflow
/// otherwise. `None` disables the check.
pub fn check_input_size(input: &str, limit: Option<usize>) -> Result<usize, String> {
    match limit {
        Some(max) if input.len() > max => Err(format!(
            "input is {} bytes, exceeding the {max}-byte limit",
            input.len()
        )),
        _ => Ok(input.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_size_guard() {
        assert_eq!(check_input_size("abc", Some(3)), Ok(3));
        assert!(check_input_size("abcd", Some(3)).unwrap_err().contains("3-byte limit"));
        assert_eq!(check_input_size("abcd", None), Ok(4));
    }
}
