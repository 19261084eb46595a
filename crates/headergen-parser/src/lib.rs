//! headergen-parser - Builds the entity model of C++ headers
//!
//! This crate provides:
//! - the [`FrontEnd`] boundary and its [`AstNode`] cursor tree, with
//!   [`MemoryFrontEnd`] and [`JsonDumpFrontEnd`] implementations
//! - the per-kind [`EntityParser`] and the selection policy shared by every kind
//! - the [`FileParser`] turning one header into a
//!   [`FileParsingResult`](headergen_core::FileParsingResult)
//! - compilation argument construction and system include discovery

mod ast;
mod compilation_args;
mod entity_parser;
mod error;
mod file_parser;
mod front_end;

pub use ast::{AstAccess, AstNode, AstType, CursorKind, Descendants, SourceLocation, TypeKind};
pub use compilation_args::{
    compilation_arguments, discover_system_include_dirs, parse_include_search_list,
};
pub use entity_parser::{EntityParser, ParsingContext, ParsingResult, ScopeEntities};
pub use error::{FileParsingFailure, FrontEndError};
pub use file_parser::FileParser;
pub use front_end::{
    Diagnostic, DiagnosticSeverity, FrontEnd, JsonDumpFrontEnd, MemoryFrontEnd, TranslationUnit,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AstNode, AstType, CursorKind, FileParser, FileParsingFailure, FrontEnd, MemoryFrontEnd,
        TranslationUnit,
    };
}
