//! Structs and classes

use crate::entity::{AccessSpecifier, EntityInfo};
use crate::enums::NestedEnumInfo;
use crate::function::MethodInfo;
use crate::types::TypeInfo;
use crate::variable::FieldInfo;

/// A direct base of a struct or class
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParentInfo {
    pub inheritance_access: AccessSpecifier,
    pub ty: TypeInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StructClassQualifiers {
    pub is_final: bool,
}

/// A struct or class definition (or forward declaration)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructClassInfo {
    pub entity: EntityInfo,

    /// Forward declarations never own nested entities
    pub is_forward_declaration: bool,
    pub qualifiers: StructClassQualifiers,
    pub ty: TypeInfo,
    pub parents: Vec<ParentInfo>,
    pub nested_structs: Vec<NestedStructClassInfo>,
    pub nested_classes: Vec<NestedStructClassInfo>,
    pub nested_enums: Vec<NestedEnumInfo>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
}

impl StructClassInfo {
    pub fn is_struct(&self) -> bool {
        self.entity.kind == crate::EntityKind::STRUCT
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.entity.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.entity.name == name)
    }

    /// Whether no nested entity of any kind was collected
    pub fn has_no_nested_entities(&self) -> bool {
        self.nested_structs.is_empty()
            && self.nested_classes.is_empty()
            && self.nested_enums.is_empty()
            && self.fields.is_empty()
            && self.methods.is_empty()
    }
}

/// A struct or class declared inside another struct or class
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedStructClassInfo {
    pub info: StructClassInfo,
    pub access: AccessSpecifier,
}
