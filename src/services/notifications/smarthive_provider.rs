//! SmartHive SMS provider.
//!
//! Authenticates with the `x-api-key` header and answers with JSON, which is
//! parsed and reported together with the HTTP status.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::provider::{DispatchContext, NotificationProvider, validate_account};
use crate::error::{AppError, AppResult};
use crate::external::client::post_json;
use crate::models::{
    DispatchResponse, OutboundMessage, ResponseBody, SmartHiveConfig, SmartHiveMessageType,
    SmartHiveRoute, SmartHiveSmsRequest,
};

const API_KEY_HEADER: &str = "x-api-key";

pub struct SmartHiveProvider {
    context: DispatchContext,
    config: SmartHiveConfig,
}

impl SmartHiveProvider {
    pub fn new(context: DispatchContext, config: SmartHiveConfig) -> Self {
        Self { context, config }
    }

    /// Override the configured message type (e.g. `--flash`)
    pub fn with_message_type(mut self, message_type: SmartHiveMessageType) -> Self {
        self.config.message_type = message_type;
        self
    }

    /// Override the configured route
    pub fn with_route(mut self, route: SmartHiveRoute) -> Self {
        self.config.route = route;
        self
    }

    fn request<'a>(&'a self, to: &'a str, message: &'a OutboundMessage) -> SmartHiveSmsRequest<'a> {
        SmartHiveSmsRequest {
            sender: &self.config.sender,
            recipients: to,
            msg: &message.text,
            message_type: self.config.message_type,
            route: self.config.route,
        }
    }
}

#[async_trait]
impl NotificationProvider for SmartHiveProvider {
    async fn send(&self, message: &OutboundMessage) -> AppResult<DispatchResponse> {
        self.validate_config().await?;

        let to = self.context.recipient(&message.recipient)?;
        let body = self.request(&to, message);

        let response = post_json(
            &self.context.client,
            self.name(),
            &self.config.send_url(),
            &body,
            &[(API_KEY_HEADER, self.config.api_key.expose())],
            self.context.timeout,
        )
        .await?;

        let parsed: JsonValue =
            serde_json::from_str(&response.body).map_err(|source| AppError::MalformedResponse {
                provider: self.name(),
                status: response.status,
                body: response.body.clone(),
                source,
            })?;

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
            body: ResponseBody::Json(parsed),
            duration_ms: response.duration_ms,
        })
    }

    fn name(&self) -> &'static str {
        "smarthive"
    }

    async fn validate_config(&self) -> AppResult<()> {
        validate_account(
            "smarthive",
            &self.config.api_key,
            "sender",
            &self.config.sender,
            &self.config.base_url,
        )
    }

    fn preview(&self, message: &OutboundMessage) -> AppResult<JsonValue> {
        let to = self.context.recipient(&message.recipient)?;
        serde_json::to_value(self.request(&to, message)).map_err(|e| AppError::Internal {
            source: anyhow::Error::new(e).context("Failed to serialize request body"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{DefaultsConfig, HttpConfig};
    use crate::external::client::build_http_client;
    use crate::models::ApiKey;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> SmartHiveProvider {
        let http = HttpConfig::default();
        let context = DispatchContext::new(
            build_http_client(&http).unwrap(),
            &http,
            &DefaultsConfig::default(),
        );
        let config = SmartHiveConfig {
            base_url: base_url.to_string(),
            api_key: ApiKey::new("hive-key-0001"),
            sender: "Finta".to_string(),
            ..SmartHiveConfig::default()
        };
        SmartHiveProvider::new(context, config)
    }

    #[tokio::test]
    async fn test_send_uses_header_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/sms/send"))
            .and(header("x-api-key", "hive-key-0001"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "sender": "Finta",
                "recipients": "2348108394272",
                "msg": "Hi there, testing FINTA",
                "type": 1,
                "route": "TRX"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": "success", "units": 1})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = provider(&server.uri())
            .send(&OutboundMessage::new("08108394272", "Hi there, testing FINTA"))
            .await
            .unwrap();

        assert_eq!(response.provider, "smarthive");
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body,
            ResponseBody::Json(json!({"status": "success", "units": 1}))
        );

        let requests = server.received_requests().await.unwrap();
        let body: JsonValue = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("api_key").is_none());
    }

    #[tokio::test]
    async fn test_flash_marketing_overrides() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({
                "sender": "Finta",
                "recipients": "2348108394272",
                "msg": "flash",
                "type": 0,
                "route": "MKT"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        provider(&server.uri())
            .with_message_type(SmartHiveMessageType::Flash)
            .with_route(SmartHiveRoute::Marketing)
            .send(&OutboundMessage::new("2348108394272", "flash"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_key_with_newline_fails_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .expect(0)
            .mount(&server)
            .await;

        let mut hive = provider(&server.uri());
        hive.config.api_key = ApiKey::new("hive-key\n0001");

        let err = hive
            .send(&OutboundMessage::new("08108394272", "hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "smarthive.api_key"));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .mount(&server)
            .await;

        let err = provider(&server.uri())
            .send(&OutboundMessage::new("08108394272", "hello"))
            .await
            .unwrap_err();

        match err {
            AppError::MalformedResponse { provider, status, body, .. } => {
                assert_eq!(provider, "smarthive");
                assert_eq!(status, 200);
                assert_eq!(body, "OK");
            }
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = provider(&server.uri())
            .send(&OutboundMessage::new("08108394272", "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::HttpStatus { status: 503, .. }));
    }

    #[test]
    fn test_preview_has_no_credential() {
        let preview = provider("https://api.smarthivesms.com")
            .preview(&OutboundMessage::new("08108394272", "hello"))
            .unwrap();
        assert_eq!(
            preview,
            json!({
                "sender": "Finta",
                "recipients": "2348108394272",
                "msg": "hello",
                "type": 1,
                "route": "TRX"
            })
        );
    }
}
