//! Configuration error types

use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// Both the config directory and a single config file were selected
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }

    /// Configuration key the error refers to, when known
    pub fn key(&self) -> &str {
        match self {
            ConfigError::ValidationError { field, .. } => field,
            ConfigError::FileNotFound(_) => "config_file",
            ConfigError::EnvVarError(_) | ConfigError::MutualExclusivityError(_) => "environment",
            ConfigError::ParseError(_) | ConfigError::Other(_) => "config",
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        AppError::Configuration {
            key: error.key().to_string(),
            source: anyhow::Error::new(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_keeps_field_as_key() {
        let err = ConfigError::validation("http.timeout_seconds", "must be positive");
        assert_eq!(err.key(), "http.timeout_seconds");

        let app: AppError = err.into();
        match app {
            AppError::Configuration { key, source } => {
                assert_eq!(key, "http.timeout_seconds");
                assert!(source.to_string().contains("must be positive"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_env_var_error_is_a_configuration_failure() {
        let err = "tset".parse::<crate::config::environment::Environment>().unwrap_err();
        assert_eq!(err.key(), "environment");

        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 2);
    }
}
