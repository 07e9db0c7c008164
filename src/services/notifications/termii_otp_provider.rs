//! Termii OTP provider.
//!
//! Termii generates the pin and substitutes it for the configured placeholder
//! in the message template; the client never sees the code. The `pinId` from
//! the send acknowledgement is what `verify` needs later.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use validator::Validate;

use super::provider::{DispatchContext, NotificationProvider, masked_body, validate_account};
use crate::error::{AppError, AppResult};
use crate::external::client::post_json;
use crate::models::{
    DispatchResponse, OtpSendReceipt, OtpVerification, OtpVerifyResponse, OutboundMessage,
    ResponseBody, TermiiConfig, TermiiOtpRequest, TermiiOtpVerifyRequest,
};

const SEND_PATH: &str = "/api/sms/otp/send";
const VERIFY_PATH: &str = "/api/sms/otp/verify";

pub struct TermiiOtpProvider {
    context: DispatchContext,
    config: TermiiConfig,
}

impl TermiiOtpProvider {
    pub fn new(context: DispatchContext, config: TermiiConfig) -> Self {
        Self { context, config }
    }

    fn request<'a>(&'a self, to: &'a str, template: &'a str) -> TermiiOtpRequest<'a> {
        let policy = &self.config.otp;
        TermiiOtpRequest {
            message_type: policy.message_type,
            to,
            from: &self.config.sender_id,
            channel: self.config.channel,
            pin_attempts: policy.pin_attempts,
            pin_time_to_live: policy.pin_time_to_live,
            pin_length: policy.pin_length,
            pin_placeholder: &policy.pin_placeholder,
            message_text: template,
            pin_type: policy.pin_type,
            api_key: &self.config.api_key,
        }
    }

    fn check_template(&self, template: &str) -> AppResult<()> {
        if self.config.otp.template_has_placeholder(template) {
            return Ok(());
        }
        Err(AppError::validation(
            "message_text",
            format!(
                "OTP template must contain the placeholder '{}'",
                self.config.otp.pin_placeholder
            ),
        ))
    }

    /// Confirm a pin the recipient entered.
    ///
    /// Succeeds only when Termii answers `"verified": true`; any other value
    /// (such as `"Expired"`) is returned as `AppError::OtpRejected`.
    pub async fn verify(&self, pin_id: &str, pin: &str) -> AppResult<OtpVerification> {
        self.validate_config().await?;

        if pin_id.trim().is_empty() {
            return Err(AppError::validation("pin_id", "Pin id cannot be empty"));
        }
        if pin.trim().is_empty() {
            return Err(AppError::validation("pin", "Pin cannot be empty"));
        }

        let body = TermiiOtpVerifyRequest {
            api_key: &self.config.api_key,
            pin_id: pin_id.trim(),
            pin: pin.trim(),
        };

        let response = post_json(
            &self.context.client,
            self.name(),
            &self.config.endpoint(VERIFY_PATH),
            &body,
            &[],
            self.context.timeout,
        )
        .await?;

        let parsed: OtpVerifyResponse =
            serde_json::from_str(&response.body).map_err(|source| AppError::MalformedResponse {
                provider: self.name(),
                status: response.status,
                body: response.body.clone(),
                source,
            })?;

        if !parsed.is_verified() {
            tracing::warn!(pin_id, reason = %parsed.reason(), "OTP not verified");
            return Err(AppError::OtpRejected {
                pin_id: pin_id.to_string(),
                reason: parsed.reason(),
            });
        }

        tracing::info!(pin_id, duration_ms = response.duration_ms, "OTP verified");

        Ok(OtpVerification {
            verified: parsed.is_verified(),
            pin_id: parsed.pin_id.unwrap_or_else(|| pin_id.to_string()),
            msisdn: parsed.msisdn,
        })
    }

    /// The JSON body `verify` would POST, with the API key masked
    pub fn verify_preview(&self, pin_id: &str, pin: &str) -> AppResult<JsonValue> {
        let body = TermiiOtpVerifyRequest {
            api_key: &self.config.api_key,
            pin_id: pin_id.trim(),
            pin: pin.trim(),
        };
        masked_body(&body, &self.config.api_key)
    }
}

#[async_trait]
impl NotificationProvider for TermiiOtpProvider {
    async fn send(&self, message: &OutboundMessage) -> AppResult<DispatchResponse> {
        self.validate_config().await?;
        self.check_template(&message.text)?;

        let to = self.context.recipient(&message.recipient)?;
        let body = self.request(&to, &message.text);

        let response = post_json(
            &self.context.client,
            self.name(),
            &self.config.endpoint(SEND_PATH),
            &body,
            &[],
            self.context.timeout,
        )
        .await?;

        match serde_json::from_str::<OtpSendReceipt>(&response.body) {
            Ok(receipt) => tracing::info!(
                provider = self.name(),
                recipient = %to,
                pin_id = %receipt.pin_id,
                sms_status = receipt.sms_status.as_deref().unwrap_or("unknown"),
                duration_ms = response.duration_ms,
                "OTP dispatched"
            ),
            Err(_) => tracing::info!(
                provider = self.name(),
                recipient = %to,
                status = response.status,
                duration_ms = response.duration_ms,
                "OTP dispatched without pin id"
            ),
        }

        Ok(DispatchResponse {
            provider: self.name(),
            status_code: response.status,
            body: ResponseBody::Text(response.body),
            duration_ms: response.duration_ms,
        })
    }

    fn name(&self) -> &'static str {
        "termii-otp"
    }

    async fn validate_config(&self) -> AppResult<()> {
        validate_account(
            "termii",
            &self.config.api_key,
            "sender_id",
            &self.config.sender_id,
            &self.config.base_url,
        )?;
        self.config.otp.validate()?;
        Ok(())
    }

    fn preview(&self, message: &OutboundMessage) -> AppResult<JsonValue> {
        self.check_template(&message.text)?;
        let to = self.context.recipient(&message.recipient)?;
        masked_body(&self.request(&to, &message.text), &self.config.api_key)
    }
}
