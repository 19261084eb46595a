//! Whole-file parsing over a [`FrontEnd`]

use crate::ast::AstNode;
use crate::compilation_args::{compilation_arguments, discover_system_include_dirs};
use crate::entity_parser::{EntityParser, ParsingContext};
use crate::error::FileParsingFailure;
use crate::front_end::{DiagnosticSeverity, FrontEnd, TranslationUnit};
use headergen_core::{FileParsingResult, LogLevel, Logger, Settings};
use std::path::Path;
use std::sync::Arc;

/// Parses headers into [`FileParsingResult`]s.
///
/// Cloning is cheap; each worker of a run parses with its own clone.
#[derive(Clone)]
pub struct FileParser {
    front_end: Arc<dyn FrontEnd>,
    settings: Arc<Settings>,
    logger: Option<Arc<dyn Logger>>,
    compilation_args: Arc<Vec<String>>,
}

impl std::fmt::Debug for FileParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileParser")
            .field("compilation_args", &self.compilation_args)
            .field("has_logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

impl FileParser {
    /// Create a parser, querying the configured compiler for its system
    /// include directories once.
    pub fn new(front_end: Arc<dyn FrontEnd>, settings: Arc<Settings>) -> Self {
        let compiler = &settings.parsing.compiler_exe_name;
        let system_include_dirs = discover_system_include_dirs(compiler).unwrap_or_else(|e| {
            tracing::warn!(compiler = %compiler, error = %e, "Could not query system include directories");
            Vec::new()
        });
        let compilation_args = compilation_arguments(&settings.parsing, &system_include_dirs);

        Self {
            front_end,
            settings,
            logger: None,
            compilation_args: Arc::new(compilation_args),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn compilation_args(&self) -> &[String] {
        &self.compilation_args
    }

    /// Parse `path` into its entity tree.
    ///
    /// Only declarations located in `path` itself are collected. Entity errors
    /// fail the parse when parsing aborts on the first error, otherwise they are
    /// returned in [`FileParsingResult::errors`].
    pub fn parse(&self, path: &Path) -> Result<FileParsingResult, FileParsingFailure> {
        tracing::debug!(file = %path.display(), "Parsing file");

        let unit = self
            .front_end
            .parse_translation_unit(path, &self.compilation_args)
            .map_err(|source| {
                self.log(
                    LogLevel::Error,
                    &format!("Failed to parse {}: {source}", path.display()),
                );
                FileParsingFailure::FrontEnd {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        self.report_diagnostics(&unit);

        let mut result = FileParsingResult::new(path);
        let mut parser = EntityParser::new(&self.settings.parsing, path, &unit.root);
        let scope = parser.parse_scope(
            unit.root
                .children
                .iter()
                .filter(|node| is_in_main_file(node, path)),
            &ParsingContext::root(),
            &mut result.errors,
        );
        result.struct_class_tree = parser.into_struct_class_tree();

        result.namespaces = scope.namespaces;
        result.structs = scope.structs;
        result.classes = scope.classes;
        result.enums = scope.enums;
        result.functions = scope.functions;
        result.variables = scope.variables;
        result.refresh_outer_entities();

        for error in &result.errors {
            self.log(LogLevel::Error, &error.to_string());
        }

        if self.settings.parsing.should_abort_parsing_on_first_error && !result.errors.is_empty() {
            return Err(FileParsingFailure::Entities {
                path: path.to_path_buf(),
                errors: result.errors,
            });
        }

        tracing::info!(
            file = %path.display(),
            errors = result.errors.len(),
            "Parsed file"
        );
        Ok(result)
    }

    fn report_diagnostics(&self, unit: &TranslationUnit) {
        for diagnostic in &unit.diagnostics {
            tracing::debug!(diagnostic = %diagnostic, "Front-end diagnostic");
            if self.settings.parsing.should_log_diagnostic {
                let level = match diagnostic.severity {
                    DiagnosticSeverity::Note => LogLevel::Info,
                    _ => LogLevel::Warning,
                };
                self.log(level, &diagnostic.to_string());
            }
        }
    }

    fn log(&self, level: LogLevel, message: &str) {
        if let Some(logger) = &self.logger {
            logger.log(level, message);
        }
    }
}

/// Declarations without a location are attributed to the parsed file
fn is_in_main_file(node: &AstNode, path: &Path) -> bool {
    node.location
        .as_ref()
        .is_none_or(|location| location.file == path)
}
