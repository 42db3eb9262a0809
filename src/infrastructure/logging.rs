use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::domain::DomainError;

/// Parse a configured filter such as `info` or `user_registry=debug,warn`
pub fn parse_filter(level: &str) -> Result<EnvFilter, DomainError> {
    EnvFilter::try_new(level).map_err(|e| {
        DomainError::configuration(format!("Invalid log level '{}': {}", level, e))
    })
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to
/// stderr; stdout is reserved for command results.
pub fn init_logging(config: &LoggingConfig) -> Result<(), DomainError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.level)?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
    };

    installed.map_err(|e| {
        DomainError::configuration(format!("Failed to install log subscriber: {}", e))
    })?;

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");

    Ok(())
}
