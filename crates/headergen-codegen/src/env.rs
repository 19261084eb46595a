//! Per-file generation environment handed to every generator callback

use headergen_core::{FileParsingResult, LogLevel, Logger, Settings};

/// Injection point of the generated header and source files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CodeGenLocation {
    /// Plain code at the top of the generated header
    HeaderFileHeader,

    /// Body of the footer macro expanded at the end of a struct/class
    ClassFooter,

    /// Body of the footer macro expanded at the end of the parsed header
    HeaderFileFooter,

    /// Plain code at the top of the generated source file
    SourceFileHeader,
}

impl CodeGenLocation {
    /// Every location, in generation order
    pub const ALL: [CodeGenLocation; 4] = [
        CodeGenLocation::HeaderFileHeader,
        CodeGenLocation::ClassFooter,
        CodeGenLocation::HeaderFileFooter,
        CodeGenLocation::SourceFileHeader,
    ];

    /// Locations receiving the output of the initial and final callbacks
    pub const FILE_LEVEL: [CodeGenLocation; 3] = [
        CodeGenLocation::HeaderFileHeader,
        CodeGenLocation::HeaderFileFooter,
        CodeGenLocation::SourceFileHeader,
    ];

    /// Whether code emitted here ends up inside a `#define`
    pub fn is_macro_body(&self) -> bool {
        matches!(
            self,
            CodeGenLocation::ClassFooter | CodeGenLocation::HeaderFileFooter
        )
    }

    /// Line separator generators must use at this location
    pub fn separator(&self) -> &'static str {
        if self.is_macro_body() { "\\\n" } else { "\n" }
    }
}

impl std::fmt::Display for CodeGenLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeGenLocation::HeaderFileHeader => write!(f, "HeaderFileHeader"),
            CodeGenLocation::ClassFooter => write!(f, "ClassFooter"),
            CodeGenLocation::HeaderFileFooter => write!(f, "HeaderFileFooter"),
            CodeGenLocation::SourceFileHeader => write!(f, "SourceFileHeader"),
        }
    }
}

/// Read-only context shared by the generators of one file
pub trait GenerationEnvironment {
    fn file_parsing_result(&self) -> &FileParsingResult;

    fn settings(&self) -> &Settings;

    fn logger(&self) -> Option<&dyn Logger>;

    /// Forward a message to the logger, if any
    fn log(&self, level: LogLevel, message: &str) {
        if let Some(logger) = self.logger() {
            logger.log(level, message);
        }
    }
}

/// Environment of the macro-emitting generation strategy.
///
/// The unit moves it through every [`CodeGenLocation`] and iteration index;
/// generators read both to decide what to emit.
#[derive(Clone, Copy)]
pub struct MacroCodeGenEnv<'a> {
    file_parsing_result: &'a FileParsingResult,
    settings: &'a Settings,
    logger: Option<&'a dyn Logger>,
    location: CodeGenLocation,
    iteration: u32,
}

impl std::fmt::Debug for MacroCodeGenEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroCodeGenEnv")
            .field("file", &self.file_parsing_result.parsed_file)
            .field("location", &self.location)
            .field("iteration", &self.iteration)
            .finish_non_exhaustive()
    }
}

impl<'a> MacroCodeGenEnv<'a> {
    pub fn new(
        file_parsing_result: &'a FileParsingResult,
        settings: &'a Settings,
        logger: Option<&'a dyn Logger>,
    ) -> Self {
        Self {
            file_parsing_result,
            settings,
            logger,
            location: CodeGenLocation::HeaderFileHeader,
            iteration: 0,
        }
    }

    /// The same environment positioned at `location`
    pub fn at(mut self, location: CodeGenLocation) -> Self {
        self.location = location;
        self
    }

    /// The same environment positioned at iteration `iteration`
    pub fn with_iteration(mut self, iteration: u32) -> Self {
        self.iteration = iteration;
        self
    }

    /// Parsing result with the lifetime of the file being generated
    pub fn result(&self) -> &'a FileParsingResult {
        self.file_parsing_result
    }

    pub fn location(&self) -> CodeGenLocation {
        self.location
    }

    pub fn separator(&self) -> &'static str {
        self.location.separator()
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Macro to prefix exported declarations with, empty when not configured
    pub fn export_symbol_macro(&self) -> &'a str {
        &self.settings.codegen.export_symbol_macro_name
    }

    /// Macro to prefix internal declarations with, empty when not configured
    pub fn internal_symbol_macro(&self) -> &'a str {
        &self.settings.codegen.internal_symbol_macro_name
    }
}

impl GenerationEnvironment for MacroCodeGenEnv<'_> {
    fn file_parsing_result(&self) -> &FileParsingResult {
        self.file_parsing_result
    }

    fn settings(&self) -> &Settings {
        self.settings
    }

    fn logger(&self) -> Option<&dyn Logger> {
        self.logger
    }
}

#[cfg(test)]
#[path = "env/env_tests.rs"]
mod env_tests;
