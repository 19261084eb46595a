//! Error types for the worker pool

use thiserror::Error;

/// Why a task produced no value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Dropped before execution when the pool shut down
    #[error("task cancelled before execution")]
    Cancelled,

    /// The task panicked; the worker survived
    #[error("task panicked: {0}")]
    Panicked(String),
}

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}
