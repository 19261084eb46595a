//! Runtime log level changes

use crate::layer::LoggingError;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{Registry, reload};

/// Handle for replacing the filter of the installed subscriber
pub struct ReloadHandle {
    handle: Mutex<Option<reload::Handle<EnvFilter, Registry>>>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    /// Handle of the subscriber installed by [`init_logging`](crate::init_logging)
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    pub fn set_handle(&self, handle: reload::Handle<EnvFilter, Registry>) {
        *self.handle.lock() = Some(handle);
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Replace the filter with one letting through `level` and above
    pub fn reload_level(&self, level: LevelFilter) -> Result<(), LoggingError> {
        let guard = self.handle.lock();
        let handle = guard.as_ref().ok_or(LoggingError::NotInitialized)?;

        handle
            .reload(EnvFilter::default().add_directive(level.into()))
            .map_err(|e| LoggingError::Reload(e.to_string()))
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}
