//! Error type for the parts of the crate that touch files or parse messages
//!
//! Frame sampling itself never fails; out-of-range timestamps are dropped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("config error: {0}")]
    Config(String),

    #[error("control protocol error: {0}")]
    Protocol(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("could not write config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = MonitorError> = std::result::Result<T, E>;
