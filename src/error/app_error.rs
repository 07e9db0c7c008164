use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// Dispatch failures are split into three kinds so callers can tell them apart:
/// the request never completed (`Transport`), the provider answered with a
/// non-2xx status (`HttpStatus`), or the provider answered with a body that
/// could not be decoded (`MalformedResponse`).
#[derive(Error, Debug)]
pub enum AppError {
    /// Network or connection failure, including timeouts
    #[error("{provider}: request failed")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-success HTTP status
    #[error("{provider}: provider returned HTTP {status}: {body}")]
    HttpStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Provider answered, but the body is not the JSON we expected
    #[error("{provider}: response body is not valid JSON (HTTP {status})")]
    MalformedResponse {
        provider: &'static str,
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Some dispatches of a batch failed; each failure was reported on its own
    #[error("{failed} of {total} dispatches failed")]
    BatchFailed { failed: usize, total: usize },

    /// OTP verification answered but did not confirm the pin
    #[error("OTP verification failed for pin {pin_id}: {reason}")]
    OtpRejected { pin_id: String, reason: String },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple field validation errors (from `validator`)
    #[error("Validation failed: {}", format_field_errors(.errors))]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// A single failed field reported by `validator`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

fn format_field_errors(errors: &[ValidationFieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Provider named in the error message, if any
    pub fn provider(&self) -> Option<&'static str> {
        match self {
            AppError::Transport { provider, .. }
            | AppError::HttpStatus { provider, .. }
            | AppError::MalformedResponse { provider, .. } => Some(*provider),
            _ => None,
        }
    }

    /// Whether this error came back from a provider rather than from local input
    pub fn is_dispatch_failure(&self) -> bool {
        matches!(
            self,
            AppError::Transport { .. }
                | AppError::HttpStatus { .. }
                | AppError::MalformedResponse { .. }
                | AppError::OtpRejected { .. }
                | AppError::BatchFailed { .. }
        )
    }

    /// Process exit code: 1 for failed dispatches, 2 for bad input or configuration
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Validation { .. }
            | AppError::ValidationErrors { .. }
            | AppError::Configuration { .. } => 2,
            _ => 1,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| ValidationFieldError {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationErrors { errors: fields }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
