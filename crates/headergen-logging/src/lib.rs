//! headergen-logging - Logging setup for headergen
//!
//! This crate provides:
//! - [`init_logging`] installing a `tracing` subscriber whose filter can be
//!   changed at runtime through the [`ReloadHandle`]
//! - [`TracingLogger`], forwarding [`Logger`](headergen_core::Logger)
//!   messages to `tracing`

mod layer;
mod reload;
mod tracing_logger;

pub use layer::{LoggingError, init_logging, level_filter, parse_level};
pub use reload::ReloadHandle;
pub use tracing_logger::{LOG_TARGET, TracingLogger};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ReloadHandle, TracingLogger, init_logging, parse_level};
}
