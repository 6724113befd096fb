//! Logging bootstrap for host applications.
//!
//! Hosts that already install their own `tracing` subscriber can skip this
//! entirely; it exists so every desktop shell gets the same defaults.

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable format for development.
    #[default]
    Pretty,
    /// Compact single-line format for production.
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Custom filter directive string, e.g.
    /// `"core_catalog=debug,core_playback=trace"`. Falls back to `RUST_LOG`
    /// and then to `info`.
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Install the global `tracing` subscriber.
///
/// # Errors
///
/// Returns [`CoreError::InitializationFailed`](crate::CoreError) when a
/// global subscriber is already installed.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(config: &LoggingConfig) -> crate::Result<()> {
    let filter = match &config.filter {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| crate::CoreError::InitializationFailed(e.to_string()))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(true))
            .try_init(),
    };

    result.map_err(|e| crate::CoreError::InitializationFailed(e.to_string()))
}
