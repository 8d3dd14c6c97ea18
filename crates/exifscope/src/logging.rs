//! Logging initialization and configuration.
//!
//! Uses the `tracing` ecosystem for structured logging with support for
//! both human-readable and JSON output formats.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `level` - Default level directive when `RUST_LOG` is unset.
/// * `json_format` - If true, outputs structured JSON logs; otherwise pretty-printed.
///
/// Log output goes to stderr so stdout stays clean for the record.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` section, with CLI overrides.
pub fn init_from_config(
    config: &exifscope_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) {
    let json_format = json_logs_override || config.logging.format == "json";
    init(&effective_level(config, verbose_override), json_format);
}

/// `--verbose` raises the configured level to at least debug.
fn effective_level(config: &exifscope_core::Config, verbose: bool) -> String {
    match config.logging.level.as_str() {
        "trace" => "trace".to_string(),
        _ if verbose => "debug".to_string(),
        level => level.to_string(),
    }
}
