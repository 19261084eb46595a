//! Front-end boundary: anything able to turn a header into an [`AstNode`] tree

use crate::ast::{AstNode, CursorKind, SourceLocation};
use crate::error::FrontEndError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Note,
    Warning,
    Error,
    Fatal,
}

/// A compiler diagnostic attached to a translation unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(location) = &self.location {
            write!(
                f,
                "{}:{}:{}: ",
                location.file.display(),
                location.line,
                location.column
            )?;
        }
        write!(f, "{:?}: {}", self.severity, self.message)
    }
}

/// Result of parsing one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Node of kind [`CursorKind::TranslationUnit`]
    pub root: AstNode,

    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl TranslationUnit {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        Self {
            root: AstNode::new(CursorKind::TranslationUnit, file.to_string_lossy()),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_declaration(mut self, declaration: AstNode) -> Self {
        self.root.children.push(declaration);
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}

/// Produces translation units.
///
/// Implementations must be shareable between worker threads; each call is an
/// independent parse.
pub trait FrontEnd: Send + Sync {
    fn parse_translation_unit(
        &self,
        path: &Path,
        compilation_args: &[String],
    ) -> Result<TranslationUnit, FrontEndError>;
}

/// Front-end serving prebuilt translation units
#[derive(Debug, Default)]
pub struct MemoryFrontEnd {
    units: HashMap<PathBuf, TranslationUnit>,
    last_args: Mutex<Vec<String>>,
}

impl MemoryFrontEnd {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the translation unit returned for `path`
    pub fn with_unit(mut self, path: impl Into<PathBuf>, unit: TranslationUnit) -> Self {
        self.insert(path, unit);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, unit: TranslationUnit) {
        self.units.insert(path.into(), unit);
    }

    /// Compilation arguments received by the last parse
    pub fn last_args(&self) -> Vec<String> {
        self.last_args.lock().clone()
    }
}

impl FrontEnd for MemoryFrontEnd {
    fn parse_translation_unit(
        &self,
        path: &Path,
        compilation_args: &[String],
    ) -> Result<TranslationUnit, FrontEndError> {
        *self.last_args.lock() = compilation_args.to_vec();

        self.units
            .get(path)
            .cloned()
            .ok_or_else(|| FrontEndError::MissingTranslationUnit(path.to_path_buf()))
    }
}

/// Front-end reading cursor trees dumped by an external driver.
///
/// The dump of `Include/Foo.h` is expected at `<dump_dir>/Foo.h.ast.json`.
#[derive(Debug, Clone)]
pub struct JsonDumpFrontEnd {
    dump_dir: PathBuf,
}

impl JsonDumpFrontEnd {
    pub const DUMP_EXTENSION: &'static str = "ast.json";

    pub fn new(dump_dir: impl Into<PathBuf>) -> Self {
        Self {
            dump_dir: dump_dir.into(),
        }
    }

    pub fn dump_path(&self, source: &Path) -> PathBuf {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.dump_dir
            .join(format!("{file_name}.{}", Self::DUMP_EXTENSION))
    }
}

impl FrontEnd for JsonDumpFrontEnd {
    fn parse_translation_unit(
        &self,
        path: &Path,
        compilation_args: &[String],
    ) -> Result<TranslationUnit, FrontEndError> {
        let dump = self.dump_path(path);
        tracing::debug!(
            source = %path.display(),
            dump = %dump.display(),
            args = compilation_args.len(),
            "Loading AST dump"
        );

        let content = std::fs::read_to_string(&dump).map_err(|source| FrontEndError::Io {
            path: dump.clone(),
            source,
        })?;

        let unit: TranslationUnit =
            serde_json::from_str(&content).map_err(|source| FrontEndError::Json {
                path: dump.clone(),
                source,
            })?;

        if unit.root.kind != CursorKind::TranslationUnit {
            return Err(FrontEndError::Rejected {
                path: path.to_path_buf(),
                reason: format!("dump root is {:?}, not a translation unit", unit.root.kind),
            });
        }

        Ok(unit)
    }
}
