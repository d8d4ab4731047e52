//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use reprise_core::Config;

use crate::server::RepriseServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve the analysis tools over MCP until the client disconnects.
///
/// `max_input` caps the size of text submitted to `analyze_text`; the
/// config's `[analysis]` table supplies defaults for unset tool options.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    info!(max_input = ?max_input, "starting MCP server on stdio");

    let server = RepriseServer::new(max_input, config.analysis);
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server terminated")?;

    info!("MCP server stopped");
    Ok(())
}
