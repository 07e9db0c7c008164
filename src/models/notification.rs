//! Provider-neutral notification models.
//!
//! These types are shared by every dispatcher: the message handed to a
//! provider, the response it reports back, and the credential wrapper.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Provider API credential.
///
/// Serializes as the raw key (it has to reach the provider verbatim), but
/// never prints it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Masked form used in dry-run previews, e.g. `TL***fZ`
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "***".to_string();
        }
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{head}***{tail}")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Message to be sent via a notification provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Recipient phone number, in any format `normalize_phone` accepts
    pub recipient: String,
    /// SMS text, or the OTP message template for the OTP dispatcher
    pub text: String,
}

impl OutboundMessage {
    pub fn new(recipient: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            text: text.into(),
        }
    }
}

/// Response body as observed from the provider
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Raw text, printed as-is
    Text(String),
    /// Parsed JSON document
    Json(JsonValue),
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Text(text) => f.write_str(text),
            ResponseBody::Json(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
        }
    }
}

/// Result of a successful dispatch (2xx response)
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    /// Provider name, as returned by `NotificationProvider::name`
    pub provider: &'static str,
    /// HTTP status code
    pub status_code: u16,
    pub body: ResponseBody,
    /// Time taken for the request in milliseconds
    pub duration_ms: u64,
}
