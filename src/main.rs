use std::process::ExitCode;

use clap::Parser;
use sms_dispatch::cli::handlers::dispatch::failure_line;
use sms_dispatch::cli::{self, Cli, execute_command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match cli::load_and_merge_config(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{}", failure_line(None, &err));
            return ExitCode::from(err.exit_code());
        }
    };

    if let Err(err) = cli::init_logger_from_settings(&settings) {
        eprintln!("error: logger initialization failed: {err:#}");
        return ExitCode::from(2);
    }

    tracing::debug!(
        version = sms_dispatch::pkg_version(),
        dry_run = cli.dry_run,
        "Starting sms-dispatch"
    );

    match execute_command(&cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_line(None, &err));
            ExitCode::from(err.exit_code())
        }
    }
}
