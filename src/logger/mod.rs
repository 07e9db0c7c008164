//! Logger Module
//!
//! A logging system based on `tracing-subscriber` with support for:
//! - Console output on stderr with color control
//! - File output with multiple formats (Full, Compact, JSON)
//!
//! Stdout is reserved for provider responses, so nothing here writes to it.

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use self::config::*;
pub use self::error::LoggerError;

use std::io::IsTerminal;

use tracing::Dispatch;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use writer::LogFileWriter;

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    build_dispatch(&config)?.try_init()?;
    Ok(())
}

/// Build the subscriber for `config` without installing it
pub(crate) fn build_dispatch(config: &LoggerConfig) -> Result<Dispatch, LoggerError> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .parse_lossy("");

    match (&config.console, &config.file) {
        (Some(console), Some(file)) => with_both(console, file, filter),
        (Some(console), None) => Ok(console_only(console, filter)),
        (None, Some(file)) => file_only(file, filter),
        (None, None) => Err(LoggerError::NoOutput),
    }
}

fn console_uses_ansi(console: &ConsoleOutput) -> bool {
    console.colored && std::io::stderr().is_terminal()
}

fn console_only(console: &ConsoleOutput, filter: EnvFilter) -> Dispatch {
    Dispatch::new(
        tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .with_ansi(console_uses_ansi(console))
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr),
        ),
    )
}

fn file_only(file: &FileOutput, filter: EnvFilter) -> Result<Dispatch, LoggerError> {
    let writer = LogFileWriter::new(file)?;
    let registry = tracing_subscriber::registry().with(filter);

    let dispatch = match file.format {
        LogFormat::Full => Dispatch::new(
            registry.with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(writer),
            ),
        ),
        LogFormat::Compact => Dispatch::new(
            registry.with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .compact()
                    .with_writer(writer),
            ),
        ),
        LogFormat::Json => Dispatch::new(
            registry.with(fmt::layer().with_ansi(false).json().with_writer(writer)),
        ),
    };

    Ok(dispatch)
}

fn with_both(
    console: &ConsoleOutput,
    file: &FileOutput,
    filter: EnvFilter,
) -> Result<Dispatch, LoggerError> {
    let use_ansi = console_uses_ansi(console);
    let writer = LogFileWriter::new(file)?;
    fn console_layer<S>(use_ansi: bool) -> impl tracing_subscriber::Layer<S>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr)
    }

    // The file layer goes first so ANSI codes from the console layer do not
    // leak into span fields written to the file.
    let registry = tracing_subscriber::registry().with(filter);
    let dispatch = match file.format {
        LogFormat::Full => Dispatch::new(
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .with_writer(writer),
                )
                .with(console_layer(use_ansi)),
        ),
        LogFormat::Compact => Dispatch::new(
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .compact()
                        .with_writer(writer),
                )
                .with(console_layer(use_ansi)),
        ),
        LogFormat::Json => Dispatch::new(
            registry
                .with(fmt::layer().with_ansi(false).json().with_writer(writer))
                .with(console_layer(use_ansi)),
        ),
    };

    Ok(dispatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;
    use tracing::level_filters::LevelFilter;

    fn file_output(dir: &TempDir, format: LogFormat) -> FileOutput {
        FileOutput {
            path: dir.path().join("logs").join("dispatch.log"),
            append: false,
            format,
        }
    }

    fn read_log(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_file_only_json_lines() {
        let dir = TempDir::new().unwrap();
        let file = file_output(&dir, LogFormat::Json);
        let config = LoggerConfig::new(LevelFilter::INFO, None, Some(file.clone())).unwrap();

        let dispatch = build_dispatch(&config).unwrap();
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!(provider = "termii-sms", "SMS dispatched");
            tracing::debug!("below the configured level");
        });

        let content = read_log(&file.path);
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);

        let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(event["level"], "INFO");
        assert_eq!(event["fields"]["message"], "SMS dispatched");
        assert_eq!(event["fields"]["provider"], "termii-sms");
    }

    #[test]
    fn test_both_outputs_write_plain_file_lines() {
        let dir = TempDir::new().unwrap();
        let file = file_output(&dir, LogFormat::Compact);
        let config = LoggerConfig::new(
            LevelFilter::DEBUG,
            Some(ConsoleOutput { colored: true }),
            Some(file.clone()),
        )
        .unwrap();

        let dispatch = build_dispatch(&config).unwrap();
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::debug!(status = 200, "Received response");
        });

        let content = read_log(&file.path);
        assert!(content.contains("Received response"));
        assert!(content.contains("status=200"));
        assert!(!content.contains('\u{1b}'));
    }

    #[test]
    fn test_console_only_builds_without_files() {
        let config = LoggerConfig::default();
        assert!(build_dispatch(&config).is_ok());
    }

    #[test]
    fn test_unwritable_log_path_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let file = FileOutput {
            path: blocker.join("dispatch.log"),
            append: true,
            format: LogFormat::Full,
        };
        let config = LoggerConfig::new(LevelFilter::INFO, None, Some(file)).unwrap();

        assert!(matches!(
            build_dispatch(&config),
            Err(LoggerError::CreateDir { .. })
        ));
    }
}
