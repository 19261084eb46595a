//! headergen-runtime - Fixed-size worker pool with task dependencies
//!
//! This crate provides:
//! - [`ThreadPool`] executing closures on a fixed set of worker threads
//! - [`TaskHandle`] to retrieve a task result, and [`TaskDependency`] to
//!   delay a task until others have finished
//! - pausable dispatch and two [`TerminationMode`]s for shutdown

mod error;
mod pool;
mod task;

pub use error::{PoolError, TaskError};
pub use pool::{TerminationMode, ThreadPool, ThreadPoolConfig};
pub use task::{TaskDependency, TaskHandle};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{TaskError, TaskHandle, TerminationMode, ThreadPool, ThreadPoolConfig};
}
