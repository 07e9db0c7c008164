//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.
//! Provider credentials are not checked here; each dispatcher validates its
//! own account before sending.

use reqwest::Url;
use validator::Validate;

use crate::config::error::ConfigError;
use crate::config::settings::{DefaultsConfig, HttpConfig, LoggerSettings, Settings};
use crate::models::{SmartHiveConfig, TermiiConfig};

/// Check that `url` parses and uses http or https
pub(crate) fn validate_base_url(field: &str, url: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(url).map_err(|_| ConfigError::ValidationError {
        field: field.to_string(),
        message: format!("Invalid URL format: '{}'", url),
    })?;

    if parsed.scheme() != "https" && parsed.scheme() != "http" {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: "URL must use http or https protocol".to_string(),
        });
    }

    Ok(())
}

impl HttpConfig {
    /// Validate HTTP client configuration
    ///
    /// # Validation Rules
    /// - Request timeout must be greater than 0
    /// - Connect timeout must be greater than 0 and not exceed the request timeout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "http.timeout_seconds",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "http.connect_timeout_seconds",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout_seconds > self.timeout_seconds {
            return Err(ConfigError::ValidationError {
                field: "http.connect_timeout_seconds".to_string(),
                message: format!(
                    "Connect timeout ({}) cannot exceed request timeout ({}).",
                    self.connect_timeout_seconds, self.timeout_seconds
                ),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::validation(
                "http.user_agent",
                "User agent cannot be empty.",
            ));
        }

        Ok(())
    }
}

impl DefaultsConfig {
    /// Validate dispatch defaults
    pub fn validate(&self) -> Result<(), ConfigError> {
        let code = self.country_code.trim_start_matches('+');
        if code.is_empty() || code.len() > 3 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::ValidationError {
                field: "defaults.country_code".to_string(),
                message: format!(
                    "Invalid country code '{}'. Expected 1 to 3 digits, e.g. 234",
                    self.country_code
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings by building the runtime logger configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_logger_config().map(|_| ())
    }
}

impl TermiiConfig {
    /// Validate the parts of the Termii section that do not need credentials
    pub fn validate_settings(&self) -> Result<(), ConfigError> {
        validate_base_url("termii.base_url", &self.base_url)?;

        self.otp.validate().map_err(|errors| ConfigError::ValidationError {
            field: "termii.otp".to_string(),
            message: errors.to_string(),
        })?;

        Ok(())
    }
}

impl SmartHiveConfig {
    /// Validate the parts of the SmartHive section that do not need credentials
    pub fn validate_settings(&self) -> Result<(), ConfigError> {
        validate_base_url("smarthive.base_url", &self.base_url)
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// This method validates all sub-configurations and returns the first
    /// validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.http.validate()?;
        self.defaults.validate()?;
        self.termii.validate_settings()?;
        self.smarthive.validate_settings()?;
        Ok(())
    }
}
