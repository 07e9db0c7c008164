//! Runtime logger configuration
//!
//! Built from `LoggerSettings` by `LoggerSettings::to_logger_config`, which is
//! where level names, formats and paths are checked. Values here are typed.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use crate::logger::error::LoggerError;

/// Line format of the log file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::UnknownFormat(s.to_string())),
        }
    }
}

/// Parse a `logger.level` value such as `info` or `DEBUG`
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        _ => Err(LoggerError::UnknownLevel(level.to_string())),
    }
}

/// Console output on stderr; stdout carries provider responses only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOutput {
    /// ANSI colors, applied only when stderr is a terminal
    pub colored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutput {
    pub path: PathBuf,
    /// Keep earlier runs' lines instead of truncating
    pub append: bool,
    pub format: LogFormat,
}

/// Outputs and verbosity for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: LevelFilter,
    pub console: Option<ConsoleOutput>,
    pub file: Option<FileOutput>,
}

impl LoggerConfig {
    /// At least one of the two outputs must be present.
    pub fn new(
        level: LevelFilter,
        console: Option<ConsoleOutput>,
        file: Option<FileOutput>,
    ) -> Result<Self, LoggerError> {
        if console.is_none() && file.is_none() {
            return Err(LoggerError::NoOutput);
        }

        Ok(Self {
            level,
            console,
            file,
        })
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            console: Some(ConsoleOutput { colored: true }),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_is_case_insensitive() {
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" warn ").unwrap(), LevelFilter::WARN);
        assert!(matches!(
            parse_level("chatty"),
            Err(LoggerError::UnknownLevel(ref level)) if level == "chatty"
        ));
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("FULL".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("json".parse::<LogFormat>().unwrap().as_str(), "json");
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_config_needs_an_output() {
        assert!(matches!(
            LoggerConfig::new(LevelFilter::INFO, None, None),
            Err(LoggerError::NoOutput)
        ));

        let file = FileOutput {
            path: PathBuf::from("logs/sms-dispatch.log"),
            append: true,
            format: LogFormat::Json,
        };
        let config = LoggerConfig::new(LevelFilter::WARN, None, Some(file)).unwrap();
        assert!(config.console.is_none());
        assert_eq!(config.level, LevelFilter::WARN);
    }
}
