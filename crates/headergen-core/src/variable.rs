//! Variables and fields

use crate::entity::{AccessSpecifier, EntityInfo};
use crate::types::TypeInfo;

/// A namespace-level or translation-unit-level variable
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableInfo {
    pub entity: EntityInfo,
    pub ty: TypeInfo,
    pub is_static: bool,
}

/// Qualifiers of a data member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldQualifiers {
    pub is_static: bool,
    pub is_mutable: bool,
}

/// A data member of a struct or class
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldInfo {
    pub entity: EntityInfo,
    pub ty: TypeInfo,
    pub access: AccessSpecifier,
    pub qualifiers: FieldQualifiers,

    /// Byte offset inside the enclosing type, 0 for static fields
    pub memory_offset: usize,
}
