// Logging module - Logging infrastructure
use crate::domain::error::{HotloadError, HotloadResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map the configured level name and verbose flag onto a filter directive
pub fn filter_directive(log_level: &str, verbose: bool) -> String {
    let level = if verbose {
        "debug"
    } else {
        match log_level {
            "error" | "warn" | "info" | "debug" | "trace" => log_level,
            _ => "info",
        }
    };
    format!("hotload={}", level)
}

/// Initialize logging system
///
/// Diagnostics go to stderr so command output on stdout stays parseable.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(log_level: &str, verbose: bool) -> HotloadResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log_level, verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true)
                .with_file(false)
                .with_line_number(false),
        )
        .try_init()
        .map_err(|e| HotloadError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;

    tracing::debug!("Hotload logging system initialized");
    Ok(())
}
