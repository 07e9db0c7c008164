//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;
use crate::config::Environment as AppEnvironment;
use crate::models::SmartHiveRoute;

/// Send SMS and OTP messages through Termii and SmartHive
#[derive(Parser, Debug)]
#[command(name = "sms-dispatch")]
#[command(about = "Send SMS and OTP messages through Termii and SmartHive")]
#[command(long_about = "
sms-dispatch sends transactional SMS and one-time passwords through Termii and
plain SMS through SmartHive. Accounts, sender names and the default recipient
come from configuration; API keys are best supplied through
SMS_DISPATCH_TERMII__API_KEY and SMS_DISPATCH_SMARTHIVE__API_KEY.

EXAMPLES:
    # Send one message through each provider to the default recipient
    sms-dispatch

    # Transactional SMS through Termii
    sms-dispatch sms --to 08108394272 --message \"Hi there\"

    # Send an OTP, then verify the pin the recipient received
    sms-dispatch otp --to 08108394272
    sms-dispatch verify-otp --pin-id 29ea7c6f-1c2d --pin 195558

    # Flash message on the marketing route through SmartHive
    sms-dispatch smarthive --to 08108394272 --message \"Hi\" --flash --route mkt

    # Print the request bodies without sending anything
    sms-dispatch --dry-run all
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute (defaults to `all`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load a single TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/sms-dispatch/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` is layered on top of the
    /// defaults. Overrides SMS_DISPATCH_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the request bodies that would be sent, with API keys masked,
    /// and send nothing
    #[arg(long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Send a transactional SMS through Termii
    Sms {
        /// Recipient phone number (defaults to `defaults.recipient`)
        #[arg(long, value_name = "NUMBER", value_parser = super::validation::validate_phone_number)]
        to: Option<String>,

        /// Message text
        #[arg(short, long, value_name = "TEXT", value_parser = super::validation::validate_message_text)]
        message: String,
    },

    /// Send a one-time password through Termii
    ///
    /// Termii generates the pin and replaces the placeholder in the template.
    Otp {
        /// Recipient phone number (defaults to `defaults.recipient`)
        #[arg(long, value_name = "NUMBER", value_parser = super::validation::validate_phone_number)]
        to: Option<String>,

        /// Message template containing the pin placeholder
        /// (defaults to `termii.otp.message_text`)
        #[arg(long, value_name = "TEXT", value_parser = super::validation::validate_message_text)]
        template: Option<String>,
    },

    /// Verify a pin previously sent with `otp`
    VerifyOtp {
        /// The `pinId` returned when the OTP was sent
        #[arg(long, value_name = "ID", value_parser = super::validation::validate_pin_value)]
        pin_id: String,

        /// The pin the recipient received
        #[arg(long, value_name = "CODE", value_parser = super::validation::validate_pin_value)]
        pin: String,
    },

    /// Send an SMS through SmartHive
    Smarthive {
        /// Recipient phone number (defaults to `defaults.recipient`)
        #[arg(long, value_name = "NUMBER", value_parser = super::validation::validate_phone_number)]
        to: Option<String>,

        /// Message text
        #[arg(short, long, value_name = "TEXT", value_parser = super::validation::validate_message_text)]
        message: String,

        /// Send as a flash message instead of an inbox message
        #[arg(long)]
        flash: bool,

        /// Delivery route (defaults to `smarthive.route`)
        #[arg(long, value_enum)]
        route: Option<Route>,
    },

    /// Send an SMS, an OTP and a SmartHive SMS in sequence (default)
    ///
    /// Each dispatch is reported on its own; a failure does not stop the
    /// ones after it.
    All {
        /// Recipient phone number (defaults to `defaults.recipient`)
        #[arg(long, value_name = "NUMBER", value_parser = super::validation::validate_phone_number)]
        to: Option<String>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<Environment> for AppEnvironment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => AppEnvironment::Development,
            Environment::Test => AppEnvironment::Test,
            Environment::Staging => AppEnvironment::Staging,
            Environment::Production => AppEnvironment::Production,
        }
    }
}

/// SmartHive route options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Transactional traffic
    #[value(name = "trx")]
    Trx,
    /// Marketing traffic
    #[value(name = "mkt")]
    Mkt,
}

impl From<Route> for SmartHiveRoute {
    fn from(route: Route) -> Self {
        match route {
            Route::Trx => SmartHiveRoute::Transactional,
            Route::Mkt => SmartHiveRoute::Marketing,
        }
    }
}

impl Cli {
    /// The command to run, `all` when none was given
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::All { to: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["sms-dispatch", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["sms-dispatch", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["sms-dispatch"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.dry_run);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
        assert_eq!(cli.command_or_default(), Commands::All { to: None });
    }

    #[test]
    fn test_sms_command() {
        let cli = Cli::try_parse_from([
            "sms-dispatch",
            "sms",
            "--to",
            "08108394272",
            "--message",
            "Hi there, testing FINTA ",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Sms {
                to: Some("08108394272".to_string()),
                message: "Hi there, testing FINTA ".to_string(),
            })
        );
    }

    #[test]
    fn test_sms_requires_message() {
        let err = Cli::try_parse_from(["sms-dispatch", "sms", "--to", "08108394272"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_otp_command_defaults() {
        let cli = Cli::try_parse_from(["sms-dispatch", "otp"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Otp {
                to: None,
                template: None
            })
        );
    }

    #[test]
    fn test_verify_otp_command() {
        let cli = Cli::try_parse_from([
            "sms-dispatch",
            "verify-otp",
            "--pin-id",
            "29ea7c6f-1c2d",
            "--pin",
            "195558",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::VerifyOtp {
                pin_id: "29ea7c6f-1c2d".to_string(),
                pin: "195558".to_string(),
            })
        );
    }

    #[test]
    fn test_smarthive_command() {
        let cli = Cli::try_parse_from([
            "sms-dispatch",
            "smarthive",
            "--message",
            "hello",
            "--flash",
            "--route",
            "mkt",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Smarthive {
                to,
                message,
                flash,
                route,
            }) => {
                assert!(to.is_none());
                assert_eq!(message, "hello");
                assert!(flash);
                assert_eq!(route.map(SmartHiveRoute::from), Some(SmartHiveRoute::Marketing));
            }
            other => panic!("Expected Smarthive command, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_phone_rejected() {
        let err = Cli::try_parse_from(["sms-dispatch", "all", "--to", "call-me"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_dry_run_after_subcommand() {
        let cli = Cli::try_parse_from(["sms-dispatch", "all", "--dry-run"]).unwrap();
        assert!(cli.dry_run);
    }

    #[test]
    fn test_env_aliases() {
        let cli = Cli::try_parse_from(["sms-dispatch", "--env", "prod"]).unwrap();
        assert_eq!(
            cli.env.map(AppEnvironment::from),
            Some(AppEnvironment::Production)
        );
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["sms-dispatch", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
