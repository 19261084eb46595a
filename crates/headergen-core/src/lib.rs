//! headergen-core - Entity model, property parsing and settings
//!
//! This crate provides the data shared by every stage of the header tool:
//! - the entity model ([`NamespaceInfo`], [`StructClassInfo`], [`EnumInfo`], ...)
//!   collected into a [`FileParsingResult`]
//! - the [`PropertyParser`] splitting annotation strings into [`Property`] lists
//! - the [`Settings`] document configuring parsing and generation
//! - the injectable [`Logger`] abstraction
//! - [`VisitControl`], the signal steering every walk over the entity tree

mod entity;
mod entity_ref;
mod enums;
mod error;
mod file_parsing_result;
mod function;
mod logger;
mod namespace;
mod property;
mod settings;
mod struct_class;
mod struct_class_tree;
mod types;
mod variable;
mod visit_control;

pub use entity::{AccessSpecifier, EntityHandle, EntityInfo, EntityKind};
pub use entity_ref::EntityRef;
pub use enums::{EnumInfo, EnumValueInfo, NestedEnumInfo};
pub use error::{ParsingError, PropertyParsingError, SettingsError};
pub use file_parsing_result::FileParsingResult;
pub use function::{FunctionInfo, FunctionParamInfo, MethodInfo, MethodQualifiers};
pub use logger::{CollectingLogger, LogLevel, Logger};
pub use namespace::NamespaceInfo;
pub use property::{Property, PropertyParser, PropertySyntax, serialize_properties};
pub use settings::{
    CLASS_FULL_NAME_TOKEN, CodeGenSettings, FILENAME_TOKEN, LoggingSettings, ManagerSettings,
    ParsingSettings, PropertyParsingSettings, SINGLE_ENTITY_KINDS, Settings, annotation_tag,
    to_identifier,
};
pub use struct_class::{NestedStructClassInfo, ParentInfo, StructClassInfo, StructClassQualifiers};
pub use struct_class_tree::{InheritanceLink, StructClassTree};
pub use types::{TemplateParamInfo, TemplateParamKind, TypeDescriptor, TypeInfo, TypePart};
pub use variable::{FieldInfo, FieldQualifiers, VariableInfo};
pub use visit_control::VisitControl;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AccessSpecifier, EntityInfo, EntityKind, EntityRef, FileParsingResult, LogLevel, Logger,
        Property, PropertyParser, Settings, StructClassInfo, VisitControl,
    };
}
