//! SmartHive wire models and configuration.
//!
//! SmartHive authenticates with the `x-api-key` header; the key is never part
//! of the request body.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::notification::ApiKey;

fn default_base_url() -> String {
    "https://api.smarthivesms.com".to_string()
}

/// How the handset presents the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, Default)]
#[repr(u8)]
pub enum SmartHiveMessageType {
    /// Shown on screen, not stored
    Flash = 0,
    /// Delivered to the inbox
    #[default]
    Inbox = 1,
}

/// Traffic class, which affects priority and pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SmartHiveRoute {
    #[default]
    #[serde(rename = "TRX", alias = "trx")]
    Transactional,
    #[serde(rename = "MKT", alias = "mkt")]
    Marketing,
}

/// SmartHive account configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartHiveConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: ApiKey,

    /// Approved sender name
    #[serde(default)]
    pub sender: String,

    /// 0 = flash, 1 = inbox
    #[serde(default)]
    pub message_type: SmartHiveMessageType,

    #[serde(default)]
    pub route: SmartHiveRoute,
}

impl Default for SmartHiveConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: ApiKey::default(),
            sender: String::new(),
            message_type: SmartHiveMessageType::default(),
            route: SmartHiveRoute::default(),
        }
    }
}

impl SmartHiveConfig {
    pub fn send_url(&self) -> String {
        format!("{}/api/sms/send", self.base_url.trim_end_matches('/'))
    }
}

/// Body of `POST /api/sms/send`
#[derive(Debug, Clone, Serialize)]
pub struct SmartHiveSmsRequest<'a> {
    pub sender: &'a str,
    pub recipients: &'a str,
    pub msg: &'a str,
    #[serde(rename = "type")]
    pub message_type: SmartHiveMessageType,
    pub route: SmartHiveRoute,
}
