//! Subscriber setup for the binary
//!
//! Output goes to stderr so `ask --json` keeps stdout machine-readable.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::domain::DomainError;

/// Install the global subscriber
///
/// A non-empty `RUST_LOG` wins over `config.level`. Fails on an invalid
/// directive or when a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), DomainError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(env.as_deref(), &config.level)?;

    let output: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()
        .map_err(|e| DomainError::configuration(format!("Logging already initialized: {}", e)))?;

    tracing::info!(level = %config.level, format = ?config.format, "Logging initialized");

    Ok(())
}

fn resolve_filter(env: Option<&str>, level: &str) -> Result<EnvFilter, DomainError> {
    let (source, directives) = match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => (EnvFilter::DEFAULT_ENV, directives),
        None => ("logging.level", level),
    };

    EnvFilter::try_new(directives).map_err(|e| {
        DomainError::configuration(format!("Invalid {} '{}': {}", source, directives, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_used_without_env() {
        let filter = resolve_filter(None, "info,localrag=debug").unwrap().to_string();

        assert!(filter.contains("localrag=debug"));
        assert!(filter.contains("info"));
    }

    #[test]
    fn test_env_overrides_configured_level() {
        let filter = resolve_filter(Some("warn"), "debug").unwrap();

        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_blank_env_falls_back_to_config() {
        let filter = resolve_filter(Some("  "), "error").unwrap();

        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn test_invalid_level_is_configuration_error() {
        let err = resolve_filter(None, "localrag=verbose").unwrap_err();

        assert!(matches!(err, DomainError::Configuration { .. }));
        assert!(err.to_string().contains("logging.level"));
    }
}
