//! Subscriber installation

use crate::reload::ReloadHandle;
use headergen_core::LogLevel;
use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::reload;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("a global subscriber is already installed")]
    AlreadyInitialized,

    #[error("logging has not been initialized")]
    NotInitialized,

    #[error("failed to reload log filter: {0}")]
    Reload(String),
}

/// Parse one of `off`, `error`, `warn`, `info`, `debug`, `trace`
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

/// Filter letting through messages of `level` and above
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warning => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `level` when set. The filter stays
/// reloadable through [`ReloadHandle::global`].
pub fn init_logging(level: LevelFilter) -> Result<(), LoggingError> {
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    let (filter_layer, handle) = reload::Layer::new(filter);

    let subscriber = tracing_subscriber::registry().with(filter_layer).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| LoggingError::AlreadyInitialized)?;
    ReloadHandle::global().set_handle(handle);
    Ok(())
}
