//! resume-ats CLI
#![deny(unsafe_code)]

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use resume_ats::{Cli, Commands, commands};
use resume_ats_core::{Config, ConfigLoader, ConfigSources};
use tracing::debug;

mod observability;

fn utf8(path: std::path::PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow::anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}

/// Discover config from the working directory, with `--config` on top.
fn load_config(cli: &Cli) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(utf8(cwd, "current directory")?);
    if let Some(ref path) = cli.config {
        loader = loader.with_file(utf8(path.clone(), "config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let (config, sources) = load_config(&cli)?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config.log_dir.clone().map(Utf8PathBuf::into_std_path_buf),
    );
    let filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, filter)
        .context("failed to initialize logging")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        config_file = ?sources.primary_file(),
        "CLI initialized"
    );

    // arg_required_else_help guarantees a subcommand past --version-only
    let Some(command) = cli.command else {
        return Ok(());
    };
    let json = cli.json;

    let rt = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
    let result = match command {
        Commands::Score(args) => {
            rt.block_on(commands::score::cmd_score(args, json, &config, &sources))
        }
        Commands::Grammar(args) => {
            rt.block_on(commands::grammar::cmd_grammar(args, json, &config, &sources))
        }
        Commands::Roles(args) => rt.block_on(commands::roles::cmd_roles(args, json, &config)),
        Commands::Info(args) => commands::info::cmd_info(args, json, &config, &sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => rt.block_on(commands::serve::cmd_serve(args, &config, &sources)),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
