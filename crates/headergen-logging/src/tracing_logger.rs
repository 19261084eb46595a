//! [`Logger`] forwarding to `tracing`

use headergen_core::{LogLevel, Logger};

/// Target of the events emitted by [`TracingLogger`]
pub const LOG_TARGET: &str = "headergen";

/// Logger turning every message into a `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: LOG_TARGET, "{message}"),
            LogLevel::Warning => tracing::warn!(target: LOG_TARGET, "{message}"),
            LogLevel::Error => tracing::error!(target: LOG_TARGET, "{message}"),
        }
    }
}
