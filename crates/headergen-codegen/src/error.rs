//! Generation error types

use crate::unit::CodeGenUnitState;
use headergen_core::SettingsError;
use std::path::PathBuf;
use thiserror::Error;

/// Generation of one file failed, or the run could not be set up
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Fatal for the whole run when raised before any file is dispatched
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    /// Fatal for the whole run when raised before any file is dispatched
    #[error("failed to create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("generator '{generator}' failed during {phase} of {file}")]
    Generator {
        generator: String,
        phase: CodeGenUnitState,
        file: PathBuf,
    },

    #[error("entity traversal of {0} aborted with failure")]
    Traversal(PathBuf),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid generation state transition from {from} to {to}")]
    InvalidTransition {
        from: CodeGenUnitState,
        to: CodeGenUnitState,
    },
}
