use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AgendaError> = std::result::Result<T, E>;

/// Startup and configuration failures. During a tool call these are only ever
/// rendered into an `{"error": ...}` payload, never returned to the transport.
#[derive(Debug, Error)]
pub enum AgendaError {
    // ------------------- Config / CLI -------------------
    #[error("missing required environment variable: {key}")]
    MissingEnv { key: &'static str },

    #[error("could not load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("unknown time zone {name:?} (expected an IANA name such as \"Europe/Paris\")")]
    TimeZone { name: String },

    // ------------------- HTTP / network -------------------
    #[error("could not load native TLS roots: {source}")]
    TlsRoots {
        #[source]
        source: std::io::Error,
    },
}
