//! Termii transactional SMS provider.
//!
//! Posts to `{base_url}/api/sms/send` with the API key in the JSON body.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::provider::{DispatchContext, NotificationProvider, masked_body, validate_account};
use crate::error::AppResult;
use crate::external::client::post_json;
use crate::models::{DispatchResponse, OutboundMessage, ResponseBody, TermiiConfig, TermiiSmsRequest};

const SEND_PATH: &str = "/api/sms/send";

pub struct TermiiSmsProvider {
    context: DispatchContext,
    config: TermiiConfig,
}

impl TermiiSmsProvider {
    pub fn new(context: DispatchContext, config: TermiiConfig) -> Self {
        Self { context, config }
    }

    fn request<'a>(&'a self, to: &'a str, message: &'a OutboundMessage) -> TermiiSmsRequest<'a> {
        TermiiSmsRequest {
            to,
            from: &self.config.sender_id,
            sms: &message.text,
            sms_type: self.config.sms_type,
            channel: self.config.channel,
            api_key: &self.config.api_key,
        }
    }
}

#[async_trait]
impl NotificationProvider for TermiiSmsProvider {
    async fn send(&self, message: &OutboundMessage) -> AppResult<DispatchResponse> {
        self.validate_config().await?;

        let to = self.context.recipient(&message.recipient)?;
        let url = self.config.endpoint(SEND_PATH);
        let body = self.request(&to, message);

        let response = post_json(
            &self.context.client,
            self.name(),
            &url,
            &body,
            &[],
            self.context.timeout,
        )
        .await?;

        tracing::info!(
            provider = self.name(),
            recipient = %to,
            status = response.status,
            duration_ms = response.duration_ms,
            "SMS dispatched"
        );

        Ok(DispatchResponse {
            provider: self.name(),
            status_code: response.status,
            body: ResponseBody::Text(response.body),
            duration_ms: response.duration_ms,
        })
    }

    fn name(&self) -> &'static str {
        "termii-sms"
    }

    async fn validate_config(&self) -> AppResult<()> {
        validate_account(
            "termii",
            &self.config.api_key,
            "sender_id",
            &self.config.sender_id,
            &self.config.base_url,
        )
    }

    fn preview(&self, message: &OutboundMessage) -> AppResult<JsonValue> {
        let to = self.context.recipient(&message.recipient)?;
        masked_body(&self.request(&to, message), &self.config.api_key)
    }
}
