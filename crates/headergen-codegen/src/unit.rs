//! Per-file generation pipeline contract

use crate::error::GenerationError;
use headergen_core::{FileParsingResult, Settings};
use std::path::Path;

/// Step of the generation pipeline of one file
///
/// State transitions:
/// ```text
/// Idle → PreGenerate → InitialGenerate → PerEntityGenerate → FinalGenerate → PostGenerate → Done
///            ↑                                                                              │
///            └──────────────────────────── next file ───────────────────────────────────────┘
///        Any state → Failed (on error), Failed → PreGenerate (next file)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeGenUnitState {
    /// No file generated yet
    #[default]
    Idle,
    /// Validating settings and resetting per-file buffers
    PreGenerate,
    InitialGenerate,
    /// Walking the entity tree
    PerEntityGenerate,
    FinalGenerate,
    /// Writing generated files
    PostGenerate,
    Done,
    Failed,
}

impl CodeGenUnitState {
    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: CodeGenUnitState) -> bool {
        use CodeGenUnitState::*;
        matches!(
            (self, target),
            (Idle, PreGenerate)
                | (PreGenerate, InitialGenerate)
                | (InitialGenerate, PerEntityGenerate)
                | (PerEntityGenerate, FinalGenerate)
                | (FinalGenerate, PostGenerate)
                | (PostGenerate, Done)
                // Next file
                | (Done, PreGenerate)
                | (Failed, PreGenerate)
                | (Idle, Failed)
                | (PreGenerate, Failed)
                | (InitialGenerate, Failed)
                | (PerEntityGenerate, Failed)
                | (FinalGenerate, Failed)
                | (PostGenerate, Failed)
        )
    }

    /// Check if generation of the current file is over
    pub fn is_terminal(&self) -> bool {
        matches!(self, CodeGenUnitState::Done | CodeGenUnitState::Failed)
    }
}

impl std::fmt::Display for CodeGenUnitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeGenUnitState::Idle => write!(f, "Idle"),
            CodeGenUnitState::PreGenerate => write!(f, "PreGenerate"),
            CodeGenUnitState::InitialGenerate => write!(f, "InitialGenerate"),
            CodeGenUnitState::PerEntityGenerate => write!(f, "PerEntityGenerate"),
            CodeGenUnitState::FinalGenerate => write!(f, "FinalGenerate"),
            CodeGenUnitState::PostGenerate => write!(f, "PostGenerate"),
            CodeGenUnitState::Done => write!(f, "Done"),
            CodeGenUnitState::Failed => write!(f, "Failed"),
        }
    }
}

/// Generation strategy turning a [`FileParsingResult`] into generated files.
///
/// A manager run clones the unit once per worker task, so `Clone` must give
/// each copy its own generator instances.
pub trait CodeGenUnit: Send {
    fn settings(&self) -> &Settings;

    fn state(&self) -> CodeGenUnitState;

    /// Validate settings and make sure the output directory exists.
    ///
    /// Failures are fatal for the whole run.
    fn prepare_output(&self) -> Result<(), GenerationError>;

    /// Whether the files generated for `source` are newer than it
    fn is_up_to_date(&self, source: &Path) -> bool;

    /// Run the whole pipeline for one parsed file
    fn generate_code(&mut self, result: &FileParsingResult) -> Result<(), GenerationError>;
}
