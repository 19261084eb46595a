//! Enums and their enumerators

use crate::entity::{AccessSpecifier, EntityInfo};
use crate::types::TypeInfo;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumValueInfo {
    pub entity: EntityInfo,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumInfo {
    pub entity: EntityInfo,

    /// The enum type itself
    pub ty: TypeInfo,
    pub underlying_type: TypeInfo,

    /// Enumerators in declaration order
    pub values: Vec<EnumValueInfo>,
}

/// An enum declared inside a struct or class
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedEnumInfo {
    pub info: EnumInfo,
    pub access: AccessSpecifier,
}
