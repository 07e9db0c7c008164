//! Core notification provider trait and types.
//!
//! This module provides the abstraction for SMS providers and the context
//! every provider shares (HTTP client, request timeout, country code).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::config::settings::{DefaultsConfig, HttpConfig};
use crate::config::validation::validate_base_url;
use crate::error::{AppError, AppResult};
use crate::models::{ApiKey, DispatchResponse, OutboundMessage};
use crate::utils::phone::to_msisdn;

/// Everything a provider needs besides its own account configuration.
///
/// Built once at startup; cloning is cheap since `reqwest::Client` is an
/// `Arc` internally.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub client: reqwest::Client,
    /// Per-request timeout
    pub timeout: Duration,
    /// Calling code used to normalize local recipients
    pub country_code: String,
}

impl DispatchContext {
    pub fn new(client: reqwest::Client, http: &HttpConfig, defaults: &DefaultsConfig) -> Self {
        Self {
            client,
            timeout: http.timeout(),
            country_code: defaults.country_code.trim_start_matches('+').to_string(),
        }
    }

    /// Normalize a recipient into the bare digits both providers expect
    pub fn recipient(&self, raw: &str) -> AppResult<String> {
        to_msisdn(raw, &self.country_code)
    }
}

/// Trait for SMS providers.
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync for use in async contexts.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends a message and reports the provider's 2xx response.
    ///
    /// Transport failures, non-2xx statuses and undecodable bodies are
    /// returned as errors.
    async fn send(&self, message: &OutboundMessage) -> AppResult<DispatchResponse>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    ///
    /// Called before every send so a missing credential fails locally
    /// instead of reaching the provider.
    async fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }

    /// The JSON body `send` would POST for `message`, with the API key masked
    fn preview(&self, message: &OutboundMessage) -> AppResult<JsonValue>;
}

/// Checks shared by every provider account: credential, sender and base URL
pub(crate) fn validate_account(
    section: &str,
    api_key: &ApiKey,
    sender_field: &str,
    sender: &str,
    base_url: &str,
) -> AppResult<()> {
    if api_key.is_empty() {
        return Err(AppError::validation(
            format!("{section}.api_key"),
            format!(
                "API key is not configured; set SMS_DISPATCH_{}__API_KEY",
                section.to_uppercase()
            ),
        ));
    }

    // SmartHive sends the key as a header value
    if reqwest::header::HeaderValue::from_str(api_key.expose()).is_err() {
        return Err(AppError::validation(
            format!("{section}.api_key"),
            "API key contains characters that are not allowed in an HTTP header",
        ));
    }

    if sender.trim().is_empty() {
        return Err(AppError::validation(
            format!("{section}.{sender_field}"),
            "Sender cannot be empty",
        ));
    }

    let url_field = format!("{section}.base_url");
    validate_base_url(&url_field, base_url)
        .map_err(|e| AppError::validation(url_field.clone(), e.to_string()))?;

    Ok(())
}

/// Serialize a request body and replace its `api_key` field with the masked key
pub(crate) fn masked_body<T: serde::Serialize>(body: &T, api_key: &ApiKey) -> AppResult<JsonValue> {
    let mut value = serde_json::to_value(body).map_err(|e| AppError::Internal {
        source: anyhow::Error::new(e).context("Failed to serialize request body"),
    })?;

    if let Some(field) = value.get_mut("api_key") {
        *field = JsonValue::String(api_key.masked());
    }

    Ok(value)
}
