//! Info command implementation

use clap::Args;
use owo_colors::OwoColorize;
use resume_ats_core::config::{Config, ConfigSources};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dictionary: Option<String>,
    profile_version: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    configured_roles: Vec<String>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        let mut configured_roles: Vec<String> = config.role_templates.keys().cloned().collect();
        configured_roles.sort();
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            input_limit: config.input_limit(),
            dictionary: config
                .resolved_dictionary_path(sources.primary_dir())
                .map(|p| p.to_string()),
            profile_version: config.scoring.version.clone(),
            configured_roles,
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        full_info.package.name.bold(),
        full_info.package.version.green()
    );
    if !full_info.package.description.is_empty() {
        println!("{}", full_info.package.description);
    }
    if !full_info.package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), full_info.package.license);
    }
    if !full_info.package.repository.is_empty() {
        println!(
            "{}: {}",
            "Repository".dimmed(),
            full_info.package.repository.cyan()
        );
    }

    let c = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match c.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), c.log_level);
    if let Some(ref dir) = c.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }
    match c.input_limit {
        Some(limit) => println!("{}: {limit} bytes", "Input limit".dimmed()),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    println!();
    println!("{}", "Scoring".bold().underline());
    println!("{}: {}", "Profile".dimmed(), c.profile_version);
    match c.dictionary {
        Some(ref path) => println!("{}: {}", "Dictionary".dimmed(), path),
        None => println!("{}: {}", "Dictionary".dimmed(), "(not set, spelling skipped)".dimmed()),
    }
    if !c.configured_roles.is_empty() {
        println!("{}: {}", "Configured roles".dimmed(), c.configured_roles.join(", "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_info_text_succeeds() {
        assert!(cmd_info(InfoArgs::default(), false, &Config::default(), &ConfigSources::default()).is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        assert!(cmd_info(InfoArgs::default(), true, &Config::default(), &ConfigSources::default()).is_ok());
    }

    #[test]
    fn test_config_info_no_file() {
        let info = ConfigInfo::from_config(&Config::default(), &ConfigSources::default());
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.input_limit, Some(resume_ats_core::DEFAULT_MAX_INPUT_BYTES));
        assert!(info.dictionary.is_none());
    }

    #[test]
    fn test_config_info_lists_configured_roles_sorted() {
        let mut config = Config::default();
        for name in ["zoo_keeper", "barista"] {
            config
                .role_templates
                .insert(name.to_string(), resume_ats_core::RoleTemplate::default());
        }
        let info = ConfigInfo::from_config(&config, &ConfigSources::default());
        assert_eq!(info.configured_roles, vec!["barista", "zoo_keeper"]);
    }
}
