//! src/cli.rs
//! Command-line flags. Every flag is optional and overrides its environment variable.

use clap::Parser;
use std::path::PathBuf;

#[derive(Clone, Debug, Default, Parser)]
#[command(name = "agenda-server", version, about = "Serve a calendar lookup tool over MCP stdio")]
pub struct Cli {
    /// Google Calendar id to read (env: CALENDAR_ID)
    #[arg(long)]
    pub calendar_id: Option<String>,

    /// Google API key (env: GOOGLE_PUBLIC_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// IANA time zone that defines "a day" (env: AGENDA_TIME_ZONE, default UTC)
    #[arg(long)]
    pub time_zone: Option<String>,

    /// Load variables from this file instead of ./.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// tracing filter directive (env: RUST_LOG, default "info")
    #[arg(long)]
    pub log: Option<String>,
}
