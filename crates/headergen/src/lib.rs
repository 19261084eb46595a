//! # headergen
//!
//! A code generator for annotated C++ headers.
//!
//! headergen parses headers through a pluggable front-end, keeps the entities
//! tagged with annotation macros, and lets generator modules emit code into
//! generated headers:
//! - a macro per struct/class, expanded at the end of its body
//! - a macro per file, expanded at the end of the header
//! - a generated source file included once per project
//!
//! ## Running a project
//!
//! ```ignore
//! use headergen::prelude::*;
//! use std::sync::Arc;
//!
//! let settings = Arc::new(Settings::from_file("headergen.toml")?);
//! let front_end = Arc::new(JsonDumpFrontEnd::new("build/ast"));
//! let parser = FileParser::new(front_end, Arc::clone(&settings));
//!
//! let mut unit = MacroCodeGenUnit::new(Arc::clone(&settings))
//!     .with_module(|| Box::new(ReflectionModule::new()));
//!
//! let run = CodeGenManager::new(settings)
//!     .with_logger(Arc::new(TracingLogger))
//!     .run(&parser, &mut unit, false);
//! println!("{run}");
//! ```
//!
//! ## Writing a module
//!
//! ```ignore
//! use headergen::prelude::*;
//!
//! struct TypeNameModule;
//!
//! impl CodeGenModule for TypeNameModule {
//!     fn name(&self) -> &str {
//!         "TypeName"
//!     }
//!
//!     fn generate_code_for_entity(
//!         &mut self,
//!         entity: EntityRef<'_>,
//!         env: &MacroCodeGenEnv<'_>,
//!         out: &mut String,
//!     ) -> VisitControl {
//!         if env.location() == CodeGenLocation::ClassFooter && entity.as_struct_class().is_some() {
//!             out.push_str(&format!(
//!                 "static constexpr char const* typeName() {{ return \"{}\"; }}{}",
//!                 entity.full_name(),
//!                 env.separator()
//!             ));
//!         }
//!         VisitControl::Recurse
//!     }
//! }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`headergen_core`] - Entity model, property parser, settings
//! - [`headergen_parser`] - Front-end boundary and entity parsers
//! - [`headergen_codegen`] - Traversal, generators, code-gen unit and manager
//! - [`headergen_runtime`] - Worker pool
//! - [`headergen_logging`] - Subscriber setup and `tracing` bridge

// Re-export core types
pub use headergen_core::{
    AccessSpecifier, CollectingLogger, EntityInfo, EntityKind, EntityRef, EnumInfo,
    FileParsingResult, LogLevel, Logger, Property, PropertyParser, Settings, SettingsError,
    StructClassInfo, VisitControl,
};

// Re-export parsing
pub use headergen_parser::{
    AstNode, AstType, CursorKind, FileParser, FileParsingFailure, FrontEnd, JsonDumpFrontEnd,
    MemoryFrontEnd, TranslationUnit,
};

// Re-export generation
pub use headergen_codegen::{
    CodeGenLocation, CodeGenManager, CodeGenModule, CodeGenUnit, CodeGenUnitState,
    GenerationError, MacroCodeGenEnv, MacroCodeGenUnit, PropertyCodeGen, ReflectionModule,
    RunResult,
};

pub use headergen_logging::{TracingLogger, init_logging};
pub use headergen_runtime::{ThreadPool, ThreadPoolConfig};

pub use headergen_codegen;
pub use headergen_core;
pub use headergen_logging;
pub use headergen_parser;
pub use headergen_runtime;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use headergen::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Entity model: `EntityRef`, `EntityKind`, `Property`, `FileParsingResult`
/// - Parsing: `FileParser`, `FrontEnd`, `MemoryFrontEnd`, `JsonDumpFrontEnd`
/// - Generation: `CodeGenModule`, `PropertyCodeGen`, `MacroCodeGenUnit`, `CodeGenManager`
/// - Configuration and logging: `Settings`, `Logger`, `TracingLogger`
pub mod prelude {
    // Entity model
    pub use crate::{EntityKind, EntityRef, FileParsingResult, Property, VisitControl};

    // Parsing
    pub use crate::{FileParser, FrontEnd, JsonDumpFrontEnd, MemoryFrontEnd};

    // Generation
    pub use crate::{
        CodeGenLocation, CodeGenManager, CodeGenModule, CodeGenUnit, MacroCodeGenEnv,
        MacroCodeGenUnit, PropertyCodeGen, ReflectionModule, RunResult,
    };

    // Configuration and logging
    pub use crate::{LogLevel, Logger, Settings, TracingLogger};
}
