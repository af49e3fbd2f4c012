use std::sync::Arc;

use agenda::{cli::Cli, Config};
use agenda_tools::{CalendarQueryAdapter, CalendarServer, CalendarSettings, GoogleCalendarSource};
use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    init_tracing(&config.log_filter);

    info!(time_zone = %config.time_zone, "MCP server starting");
    if let Some(path) = &cli.env_file {
        info!(path = %path.display(), "loaded env file");
    }
    let missing = config.missing();
    if !missing.is_empty() {
        warn!(?missing, "calendar access not configured; lookups will return an error");
    }

    let source = GoogleCalendarSource::new()?;
    let adapter = CalendarQueryAdapter::new(CalendarSettings::from(&config), Arc::new(source));

    let service = CalendarServer::new(adapter)
        .serve(stdio())
        .await
        .inspect_err(|e| error!(error = %e, "failed to start MCP service"))?;
    info!("MCP server connected via stdio");

    let reason = service.waiting().await?;
    info!(?reason, "MCP server stopped");
    Ok(())
}

// stdout carries the protocol, so logs go to stderr.
fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
