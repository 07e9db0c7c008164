//! Error types for the logger

use thiserror::Error;

/// Errors raised while reading logger settings or opening log outputs
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Invalid log level '{0}'. Valid levels are: trace, debug, info, warn, error")]
    UnknownLevel(String),

    #[error("Invalid log format '{0}'. Valid formats are: full, compact, json")]
    UnknownFormat(String),

    #[error("At least one output (console or file) must be enabled")]
    NoOutput,

    #[error("Failed to open log file {path}: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
