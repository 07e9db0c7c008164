//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::DispatchCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::external::client::build_http_client;
use crate::services::DispatchContext;

/// Execute a CLI command with the given settings
///
/// Builds the shared HTTP client once and dispatches to the command handler.
/// With no subcommand the `all` command runs.
///
/// # Errors
/// Returns errors from command handlers; `AppError::exit_code` maps them to
/// the process exit status.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    let client = build_http_client(&settings.http)?;
    let context = DispatchContext::new(client, &settings.http, &settings.defaults);
    let handler = DispatchCommandHandler::new(settings, context, cli.dry_run);

    let command = cli.command_or_default();
    tracing::debug!(?command, dry_run = cli.dry_run, "Executing command");

    match command {
        Commands::Sms { to, message } => handler.sms(to.as_deref(), &message).await,
        Commands::Otp { to, template } => handler.otp(to.as_deref(), template.as_deref()).await,
        Commands::VerifyOtp { pin_id, pin } => handler.verify_otp(&pin_id, &pin).await,
        Commands::Smarthive {
            to,
            message,
            flash,
            route,
        } => {
            handler
                .smarthive(to.as_deref(), &message, flash, route.map(Into::into))
                .await
        }
        Commands::All { to } => handler.all(to.as_deref()).await,
    }
}
