//! Dispatch command handler
//!
//! Runs the `sms`, `otp`, `verify-otp`, `smarthive` and `all` commands.
//! Provider output goes to stdout; failures are reported as one line on
//! stderr.

use serde_json::Value as JsonValue;

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::models::{
    DispatchResponse, OtpVerification, OutboundMessage, ResponseBody, SmartHiveMessageType,
    SmartHiveRoute,
};
use crate::services::{
    DispatchContext, NotificationProvider, SmartHiveProvider, TermiiOtpProvider, TermiiSmsProvider,
};

/// Handler for the dispatch commands
pub struct DispatchCommandHandler {
    settings: Settings,
    context: DispatchContext,
    dry_run: bool,
}

impl DispatchCommandHandler {
    pub fn new(settings: Settings, context: DispatchContext, dry_run: bool) -> Self {
        Self {
            settings,
            context,
            dry_run,
        }
    }

    /// `--to` if given, otherwise `defaults.recipient`
    pub fn resolve_recipient(&self, to: Option<&str>) -> AppResult<String> {
        let recipient = to
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.settings.defaults.recipient.trim());

        if recipient.is_empty() {
            return Err(AppError::validation(
                "to",
                "No recipient given; pass --to or set defaults.recipient",
            ));
        }

        Ok(recipient.to_string())
    }

    fn sms_provider(&self) -> TermiiSmsProvider {
        TermiiSmsProvider::new(self.context.clone(), self.settings.termii.clone())
    }

    fn otp_provider(&self) -> TermiiOtpProvider {
        TermiiOtpProvider::new(self.context.clone(), self.settings.termii.clone())
    }

    fn smarthive_provider(&self) -> SmartHiveProvider {
        SmartHiveProvider::new(self.context.clone(), self.settings.smarthive.clone())
    }

    pub async fn sms(&self, to: Option<&str>, message: &str) -> AppResult<()> {
        let message = OutboundMessage::new(self.resolve_recipient(to)?, message);
        self.dispatch(&self.sms_provider(), &message).await
    }

    pub async fn otp(&self, to: Option<&str>, template: Option<&str>) -> AppResult<()> {
        let template = template.unwrap_or(&self.settings.termii.otp.message_text);
        let message = OutboundMessage::new(self.resolve_recipient(to)?, template);
        self.dispatch(&self.otp_provider(), &message).await
    }

    pub async fn verify_otp(&self, pin_id: &str, pin: &str) -> AppResult<()> {
        let provider = self.otp_provider();

        if self.dry_run {
            provider.validate_config().await?;
            let body = provider.verify_preview(pin_id, pin)?;
            println!("{}", render_preview(provider.name(), &body)?);
            return Ok(());
        }

        let verification = provider.verify(pin_id, pin).await?;
        println!("{}", render_verification(&verification));
        Ok(())
    }

    pub async fn smarthive(
        &self,
        to: Option<&str>,
        message: &str,
        flash: bool,
        route: Option<SmartHiveRoute>,
    ) -> AppResult<()> {
        let mut provider = self.smarthive_provider();
        if flash {
            provider = provider.with_message_type(SmartHiveMessageType::Flash);
        }
        if let Some(route) = route {
            provider = provider.with_route(route);
        }

        let message = OutboundMessage::new(self.resolve_recipient(to)?, message);
        self.dispatch(&provider, &message).await
    }

    /// Send one message through each provider, one after another.
    ///
    /// Every dispatch runs and is reported even if an earlier one failed.
    pub async fn all(&self, to: Option<&str>) -> AppResult<()> {
        let recipient = self.resolve_recipient(to)?;
        let defaults = &self.settings.defaults;

        let steps: [(Box<dyn NotificationProvider>, OutboundMessage); 3] = [
            (
                Box::new(self.sms_provider()),
                OutboundMessage::new(recipient.as_str(), defaults.sms_text.as_str()),
            ),
            (
                Box::new(self.otp_provider()),
                OutboundMessage::new(
                    recipient.as_str(),
                    self.settings.termii.otp.message_text.as_str(),
                ),
            ),
            (
                Box::new(self.smarthive_provider()),
                OutboundMessage::new(recipient.as_str(), defaults.smarthive_text.as_str()),
            ),
        ];

        let total = steps.len();
        let mut failed = 0;

        for (provider, message) in &steps {
            println!("== {} ==", provider.name());
            if let Err(err) = self.dispatch(provider.as_ref(), message).await {
                eprintln!("{}", failure_line(Some(provider.name()), &err));
                failed += 1;
            }
        }

        tracing::info!(total, failed, "Batch dispatch finished");

        if failed > 0 {
            return Err(AppError::BatchFailed { failed, total });
        }
        Ok(())
    }

    async fn dispatch(
        &self,
        provider: &dyn NotificationProvider,
        message: &OutboundMessage,
    ) -> AppResult<()> {
        if self.dry_run {
            provider.validate_config().await?;
            let body = provider.preview(message)?;
            println!("{}", render_preview(provider.name(), &body)?);
            return Ok(());
        }

        let response = provider.send(message).await?;
        println!("{}", render_response(&response));
        Ok(())
    }
}

/// Termii responses are printed verbatim; JSON responses get the status line
pub fn render_response(response: &DispatchResponse) -> String {
    match response.body {
        ResponseBody::Text(ref text) => text.clone(),
        ResponseBody::Json(_) => format!("Status Code: {}\n{}", response.status_code, response.body),
    }
}

pub fn render_preview(provider: &str, body: &JsonValue) -> AppResult<String> {
    let pretty = serde_json::to_string_pretty(body).map_err(|e| AppError::Internal {
        source: anyhow::Error::new(e),
    })?;
    Ok(format!("[dry-run] {provider} would send:\n{pretty}"))
}

fn render_verification(verification: &OtpVerification) -> String {
    match verification.msisdn {
        Some(ref msisdn) => format!("Pin {} verified for {}", verification.pin_id, msisdn),
        None => format!("Pin {} verified", verification.pin_id),
    }
}

/// One-line failure report: the error followed by its source chain
///
/// `provider` tags the line unless the error already names its provider.
pub fn failure_line(provider: Option<&str>, error: &AppError) -> String {
    let mut line = match provider.filter(|_| error.provider().is_none()) {
        Some(name) => format!("error[{name}]: {error}"),
        None => format!("error: {error}"),
    };

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        line.push_str(": ");
        line.push_str(&cause.to_string());
        source = cause.source();
    }

    line.replace('\n', " ")
}
