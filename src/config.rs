//! src/config.rs
//! Load runtime configuration for the calendar tool.
//!
//! Priority: CLI flags > process env / .env > defaults.
//!
//! A missing calendar id or API key is not an error here. The server still starts and
//! each lookup reports the gap to the caller.

use crate::{AgendaError, Result};
use chrono_tz::Tz;
use std::{env, fmt};

pub const CALENDAR_ID_VAR: &str = "CALENDAR_ID";
pub const API_KEY_VAR: &str = "GOOGLE_PUBLIC_API_KEY";
pub const TIME_ZONE_VAR: &str = "AGENDA_TIME_ZONE";
pub const LOG_VAR: &str = "RUST_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub calendar_id: Option<String>,
    pub api_key: Option<String>,
    /// Zone that defines day boundaries; also sent to the calendar API.
    pub time_zone: Tz,
    pub log_filter: String,
}

impl Config {
    /// Build from CLI flags + env, reading `--env-file` or `./.env` first.
    pub fn load(cli: &crate::cli::Cli) -> Result<Self> {
        match &cli.env_file {
            | Some(path) => {
                dotenvy::from_path(path).map_err(|source| AgendaError::EnvFile {
                    path: path.clone(),
                    source,
                })?;
            }
            // No error if absent.
            | None => {
                let _ = dotenvy::dotenv();
            }
        }
        Self::from_lookup(cli, |key| env::var(key).ok())
    }

    /// Same as [`Config::load`] with an explicit variable source and no file loading.
    pub fn from_lookup(cli: &crate::cli::Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let pick = |flag: Option<&str>, key: &str| {
            flag.map(str::to_string)
                .or_else(|| lookup(key))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let calendar_id = pick(cli.calendar_id.as_deref(), CALENDAR_ID_VAR);
        let api_key = pick(cli.api_key.as_deref(), API_KEY_VAR);

        let time_zone = match pick(cli.time_zone.as_deref(), TIME_ZONE_VAR) {
            | Some(name) => parse_time_zone(&name)?,
            | None => Tz::UTC,
        };

        let log_filter = pick(cli.log.as_deref(), LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            calendar_id,
            api_key,
            time_zone,
            log_filter,
        })
    }

    /// Names of the required settings that are still unset.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.calendar_id.is_none() {
            missing.push(CALENDAR_ID_VAR);
        }
        if self.api_key.is_none() {
            missing.push(API_KEY_VAR);
        }
        missing
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("calendar_id", &self.calendar_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("time_zone", &self.time_zone)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|_| AgendaError::TimeZone {
        name: name.to_string(),
    })
}
