//! Free functions and methods

use crate::entity::{AccessSpecifier, EntityInfo};
use crate::types::TypeInfo;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionParamInfo {
    pub ty: TypeInfo,

    /// Empty for unnamed parameters
    pub name: String,
}

/// A free function
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionInfo {
    pub entity: EntityInfo,

    /// Function type spelling, e.g. `void (int, float)`
    pub prototype: String,
    pub return_type: TypeInfo,
    pub parameters: Vec<FunctionParamInfo>,
    pub is_inline: bool,
    pub is_static: bool,
}

impl FunctionInfo {
    /// Comma separated parameter list as written in a declaration
    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| {
                if p.name.is_empty() {
                    p.ty.full_name.clone()
                } else {
                    format!("{} {}", p.ty.full_name, p.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MethodQualifiers {
    pub is_static: bool,
    pub is_const: bool,
    pub is_virtual: bool,
    pub is_pure_virtual: bool,
    pub is_override: bool,
    pub is_final: bool,
    pub is_default: bool,
    pub is_inline: bool,
}

/// A member function of a struct or class
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodInfo {
    pub entity: EntityInfo,
    pub prototype: String,
    pub return_type: TypeInfo,
    pub parameters: Vec<FunctionParamInfo>,
    pub access: AccessSpecifier,
    pub qualifiers: MethodQualifiers,
}
