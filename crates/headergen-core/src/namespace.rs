//! Namespaces

use crate::entity::EntityInfo;
use crate::enums::EnumInfo;
use crate::function::FunctionInfo;
use crate::struct_class::StructClassInfo;
use crate::variable::VariableInfo;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamespaceInfo {
    pub entity: EntityInfo,
    pub namespaces: Vec<NamespaceInfo>,
    pub structs: Vec<StructClassInfo>,
    pub classes: Vec<StructClassInfo>,
    pub enums: Vec<EnumInfo>,
    pub functions: Vec<FunctionInfo>,
    pub variables: Vec<VariableInfo>,
}
