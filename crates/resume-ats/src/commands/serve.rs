//! Serve command: run the MCP server on stdio.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use resume_ats_core::{Config, ConfigSources};

use super::build_engine;
use crate::server::ResumeServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve scoring tools over MCP until the client disconnects.
///
/// Logs go to stderr and the log file; stdout carries the protocol.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let engine = Arc::new(build_engine(config, sources, config.scoring.clone()));
    let server = ResumeServer::new(engine, config.input_limit());

    info!(profile = %config.scoring.version, "starting MCP server on stdio");
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server terminated abnormally")?;
    info!("MCP server stopped");
    Ok(())
}
