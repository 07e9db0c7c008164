//! Termii wire models and configuration.
//!
//! Termii takes the API key as a body field on every endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::{Validate, ValidationError};

use super::notification::ApiKey;

fn default_base_url() -> String {
    "https://v3.api.termii.com".to_string()
}

fn default_pin_attempts() -> u32 {
    3
}

fn default_pin_time_to_live() -> u32 {
    5
}

fn default_pin_length() -> u32 {
    6
}

fn default_pin_placeholder() -> String {
    "< 1234 >".to_string()
}

fn default_message_text() -> String {
    "Your verification code is < 1234 >".to_string()
}

/// Route a Termii message is delivered over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TermiiChannel {
    #[default]
    Generic,
    Dnd,
    Whatsapp,
}

/// Termii message `type`; the API only accepts plain messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmsType {
    #[default]
    Plain,
}

/// Character set of a generated pin (also used for `message_type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PinType {
    #[default]
    Numeric,
    Alphanumeric,
}

/// OTP policy sent with every OTP request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_template_placeholder"))]
pub struct OtpPolicy {
    #[serde(default)]
    pub message_type: PinType,

    #[serde(default)]
    pub pin_type: PinType,

    #[serde(default = "default_pin_attempts")]
    #[validate(range(min = 1, message = "pin_attempts must be at least 1"))]
    pub pin_attempts: u32,

    /// Minutes before the pin expires
    #[serde(default = "default_pin_time_to_live")]
    #[validate(range(max = 60, message = "pin_time_to_live must be between 0 and 60 minutes"))]
    pub pin_time_to_live: u32,

    #[serde(default = "default_pin_length")]
    #[validate(range(min = 4, max = 8, message = "pin_length must be between 4 and 8"))]
    pub pin_length: u32,

    /// Token the provider replaces with the generated pin
    #[serde(default = "default_pin_placeholder")]
    #[validate(length(min = 1, message = "pin_placeholder cannot be empty"))]
    pub pin_placeholder: String,

    /// Default message template; must contain `pin_placeholder`
    #[serde(default = "default_message_text")]
    pub message_text: String,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            message_type: PinType::default(),
            pin_type: PinType::default(),
            pin_attempts: default_pin_attempts(),
            pin_time_to_live: default_pin_time_to_live(),
            pin_length: default_pin_length(),
            pin_placeholder: default_pin_placeholder(),
            message_text: default_message_text(),
        }
    }
}

impl OtpPolicy {
    pub fn template_has_placeholder(&self, template: &str) -> bool {
        !self.pin_placeholder.is_empty() && template.contains(&self.pin_placeholder)
    }
}

fn validate_template_placeholder(policy: &OtpPolicy) -> Result<(), ValidationError> {
    if policy.pin_placeholder.is_empty() || policy.template_has_placeholder(&policy.message_text) {
        return Ok(());
    }
    let mut err = ValidationError::new("placeholder_missing");
    err.message = Some("message_text must contain pin_placeholder".into());
    Err(err)
}

/// Termii account configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermiiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: ApiKey,

    /// Approved sender id
    #[serde(default)]
    pub sender_id: String,

    #[serde(default)]
    pub channel: TermiiChannel,

    #[serde(default)]
    pub sms_type: SmsType,

    #[serde(default)]
    pub otp: OtpPolicy,
}

impl Default for TermiiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: ApiKey::default(),
            sender_id: String::new(),
            channel: TermiiChannel::default(),
            sms_type: SmsType::default(),
            otp: OtpPolicy::default(),
        }
    }
}

impl TermiiConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

/// Body of `POST /api/sms/send`
#[derive(Debug, Clone, Serialize)]
pub struct TermiiSmsRequest<'a> {
    pub to: &'a str,
    pub from: &'a str,
    pub sms: &'a str,
    #[serde(rename = "type")]
    pub sms_type: SmsType,
    pub channel: TermiiChannel,
    pub api_key: &'a ApiKey,
}

/// Body of `POST /api/sms/otp/send`
#[derive(Debug, Clone, Serialize)]
pub struct TermiiOtpRequest<'a> {
    pub message_type: PinType,
    pub to: &'a str,
    pub from: &'a str,
    pub channel: TermiiChannel,
    pub pin_attempts: u32,
    pub pin_time_to_live: u32,
    pub pin_length: u32,
    pub pin_placeholder: &'a str,
    pub message_text: &'a str,
    pub pin_type: PinType,
    pub api_key: &'a ApiKey,
}

/// Body of `POST /api/sms/otp/verify`
#[derive(Debug, Clone, Serialize)]
pub struct TermiiOtpVerifyRequest<'a> {
    pub api_key: &'a ApiKey,
    pub pin_id: &'a str,
    pub pin: &'a str,
}

/// Acknowledgement returned by the OTP send endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct OtpSendReceipt {
    #[serde(rename = "pinId")]
    pub pin_id: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(rename = "smsStatus", default)]
    pub sms_status: Option<String>,
}

/// Response of the OTP verify endpoint.
///
/// `verified` is `true` on success and a status string (e.g. `"Expired"`)
/// otherwise, so it is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpVerifyResponse {
    #[serde(rename = "pinId", default)]
    pub pin_id: Option<String>,
    #[serde(default)]
    pub verified: JsonValue,
    #[serde(default)]
    pub msisdn: Option<String>,
}

impl OtpVerifyResponse {
    pub fn is_verified(&self) -> bool {
        self.verified == JsonValue::Bool(true)
    }

    pub fn reason(&self) -> String {
        match &self.verified {
            JsonValue::String(s) => s.clone(),
            JsonValue::Null => "no verification status returned".to_string(),
            other => other.to_string(),
        }
    }
}

/// Outcome of an OTP verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpVerification {
    pub pin_id: String,
    /// Set only when Termii answered the JSON boolean `true`
    pub verified: bool,
    pub msisdn: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sms_request_field_set() {
        let key = ApiKey::new("test-key");
        let request = TermiiSmsRequest {
            to: "2348108394272",
            from: "FINTA",
            sms: "Hi there, testing FINTA ",
            sms_type: SmsType::Plain,
            channel: TermiiChannel::Generic,
            api_key: &key,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "to": "2348108394272",
                "from": "FINTA",
                "sms": "Hi there, testing FINTA ",
                "type": "plain",
                "channel": "generic",
                "api_key": "test-key",
            })
        );
    }

    #[test]
    fn test_otp_request_numbers_are_integers() {
        let key = ApiKey::new("test-key");
        let policy = OtpPolicy::default();
        let request = TermiiOtpRequest {
            message_type: policy.message_type,
            to: "2348108394272",
            from: "FINTA",
            channel: TermiiChannel::Generic,
            pin_attempts: policy.pin_attempts,
            pin_time_to_live: policy.pin_time_to_live,
            pin_length: policy.pin_length,
            pin_placeholder: &policy.pin_placeholder,
            message_text: &policy.message_text,
            pin_type: policy.pin_type,
            api_key: &key,
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["pin_length"], json!(6));
        assert_eq!(body["pin_attempts"], json!(3));
        assert_eq!(body["pin_time_to_live"], json!(5));
        assert!(body["pin_length"].is_u64());
        assert_eq!(body["message_type"], json!("NUMERIC"));
        assert_eq!(body["pin_type"], json!("NUMERIC"));
        assert_eq!(body.as_object().unwrap().len(), 11);
    }

    #[test]
    fn test_default_policy_is_valid() {
        assert!(OtpPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_policy_rejects_out_of_range_values() {
        let policy = OtpPolicy {
            pin_length: 12,
            pin_attempts: 0,
            pin_time_to_live: 90,
            ..OtpPolicy::default()
        };
        let errors = policy.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("pin_length"));
        assert!(fields.contains_key("pin_attempts"));
        assert!(fields.contains_key("pin_time_to_live"));
    }

    #[test]
    fn test_policy_rejects_template_without_placeholder() {
        let policy = OtpPolicy {
            message_text: "Your code is ready".to_string(),
            ..OtpPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_verify_response_states() {
        let ok: OtpVerifyResponse =
            serde_json::from_value(json!({"pinId": "p1", "verified": true, "msisdn": "234"}))
                .unwrap();
        assert!(ok.is_verified());

        let expired: OtpVerifyResponse =
            serde_json::from_value(json!({"pinId": "p1", "verified": "Expired"})).unwrap();
        assert!(!expired.is_verified());
        assert_eq!(expired.reason(), "Expired");

        let truthy_string: OtpVerifyResponse =
            serde_json::from_value(json!({"verified": "true"})).unwrap();
        assert!(!truthy_string.is_verified());
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = TermiiConfig {
            base_url: "https://api.termii.com/".to_string(),
            ..TermiiConfig::default()
        };
        assert_eq!(
            config.endpoint("/api/sms/send"),
            "https://api.termii.com/api/sms/send"
        );
    }
}
