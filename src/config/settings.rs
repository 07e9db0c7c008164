//! Configuration settings structures for sms-dispatch
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{
    ConsoleOutput, FileOutput, LogFormat, LoggerConfig, LoggerError, parse_level,
};
use crate::models::{SmartHiveConfig, TermiiConfig};
use crate::utils::phone::DEFAULT_COUNTRY_CODE;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "sms-dispatch".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/sms-dispatch.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("sms-dispatch/{}", crate::pkg_version())
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

fn default_sms_text() -> String {
    "Hi there, this is a test message".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// Outbound HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TCP/TLS connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}

// ============================================================================
// Dispatch Defaults
// ============================================================================

/// Values used when a command does not supply them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Recipient used when `--to` is omitted
    #[serde(default)]
    pub recipient: String,

    /// Country calling code prepended to local numbers
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Text of the transactional SMS sent by `all`
    #[serde(default = "default_sms_text")]
    pub sms_text: String,

    /// Text of the SmartHive SMS sent by `all`
    #[serde(default = "default_sms_text")]
    pub smarthive_text: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            country_code: default_country_code(),
            sms_text: default_sms_text(),
            smarthive_text: default_sms_text(),
        }
    }
}

// ============================================================================
// Logger Settings (compatible with LoggerConfig)
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Build the runtime logger configuration.
    ///
    /// This is the only check of the `[logger]` section. `Settings::validate`
    /// runs it at load time.
    pub fn to_logger_config(&self) -> Result<LoggerConfig, ConfigError> {
        let level = parse_level(&self.level).map_err(|e| logger_field_error("logger.level", e))?;
        let console = self.console.enabled.then_some(ConsoleOutput {
            colored: self.console.colored,
        });
        let file = self.file.to_file_output()?;

        LoggerConfig::new(level, console, file).map_err(|e| logger_field_error("logger", e))
    }
}

impl FileSettings {
    /// The file output, or `None` when file logging is off.
    ///
    /// The format is checked even when file logging is off.
    pub fn to_file_output(&self) -> Result<Option<FileOutput>, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| logger_field_error("logger.file.format", e))?;

        if !self.enabled {
            return Ok(None);
        }

        let path = self.path.trim();
        if path.is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        Ok(Some(FileOutput {
            path: PathBuf::from(path),
            append: self.append,
            format,
        }))
    }
}

fn logger_field_error(field: &str, error: LoggerError) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: error.to_string(),
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables. Provider credentials live in
/// `termii.api_key` and `smarthive.api_key` and are best supplied through
/// `SMS_DISPATCH_TERMII__API_KEY` / `SMS_DISPATCH_SMARTHIVE__API_KEY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,

    /// Outbound HTTP configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Fallback recipient and message texts
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Termii SMS and OTP account
    #[serde(default)]
    pub termii: TermiiConfig,

    /// SmartHive SMS account
    #[serde(default)]
    pub smarthive: SmartHiveConfig,
}
