//! Command implementations.

use std::sync::Arc;

use anyhow::Context;
use camino::Utf8Path;
use resume_ats_core::{
    Config, ConfigSources, ConfiguredRoleTemplates, FileDictionaryProvider, ScoringEngine,
    ScoringProfile,
};

pub mod grammar;
pub mod info;
pub mod roles;
pub mod score;
#[cfg(feature = "mcp")]
pub mod serve;

/// The engine as assembled from configuration.
pub type Engine = ScoringEngine<Option<FileDictionaryProvider>, ConfiguredRoleTemplates>;

/// Build the scoring engine described by `config`.
///
/// A relative `dictionary_path` resolves against the directory of the config
/// file that was loaded.
pub fn build_engine(config: &Config, sources: &ConfigSources, profile: ScoringProfile) -> Engine {
    let dictionaries = config.dictionary_provider(sources.primary_dir());
    if let Some(ref provider) = dictionaries {
        tracing::debug!(path = %provider.path(), "dictionary configured");
    }
    ScoringEngine::new(dictionaries, config.role_template_provider())
        .with_profile(profile)
        .with_cache(Arc::new(config.dictionary_cache()))
}

/// `config` with its dictionary replaced by a `--dictionary` path.
///
/// A relative path resolves against the working directory, not the config
/// file.
pub fn with_dictionary_override(config: &Config, path: Option<&Utf8Path>) -> anyhow::Result<Config> {
    let mut config = config.clone();
    if let Some(path) = path {
        let absolute = std::path::absolute(path.as_std_path())
            .with_context(|| format!("failed to resolve {path}"))?;
        let absolute = camino::Utf8PathBuf::try_from(absolute).map_err(|e| {
            anyhow::anyhow!(
                "dictionary path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        config.dictionary_path = Some(absolute);
    }
    Ok(config)
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}
