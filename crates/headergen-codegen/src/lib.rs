//! headergen-codegen - Turns parsed headers into generated code
//!
//! This crate provides:
//! - the [`traverse`] walk driving generators over a file's entities
//! - the [`CodeGenModule`] and [`PropertyCodeGen`] generator contracts
//! - the [`CodeGenUnit`] pipeline and its macro-emitting implementation,
//!   [`MacroCodeGenUnit`]
//! - the bundled [`ReflectionModule`] with its `Get`/`Set` accessors
//! - the [`CodeGenManager`] running a whole project, on a worker pool

mod accessors;
mod discovery;
mod env;
mod error;
mod generator;
mod macro_unit;
mod manager;
mod reflection;
mod shim;
mod traversal;
mod unit;

#[cfg(test)]
mod test_support;

pub use accessors::{GET_PROPERTY, GetPropertyCodeGen, SET_PROPERTY, SetPropertyCodeGen};
pub use discovery::identify_files;
pub use env::{CodeGenLocation, GenerationEnvironment, MacroCodeGenEnv};
pub use error::GenerationError;
pub use generator::{
    CodeGenModule, ModuleFactory, PropertyCodeGen, RegisteredGenerator, module_iteration_count,
    sort_by_generation_order,
};
pub use headergen_core::VisitControl;
pub use macro_unit::MacroCodeGenUnit;
pub use manager::{CodeGenManager, RunResult};
pub use reflection::ReflectionModule;
pub use shim::{entity_macros_content, write_entity_macros};
pub use traversal::traverse;
pub use unit::{CodeGenUnit, CodeGenUnitState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CodeGenLocation, CodeGenManager, CodeGenModule, CodeGenUnit, GenerationError,
        MacroCodeGenEnv, MacroCodeGenUnit, PropertyCodeGen, ReflectionModule, RunResult,
        VisitControl,
    };
}
