//! Leaf entities: fields, methods, free functions and variables

use super::{EntityParser, ParsingContext, ParsingResult};
use crate::ast::{AstNode, CursorKind};
use headergen_core::{
    AccessSpecifier, EntityKind, FieldInfo, FieldQualifiers, FunctionInfo, FunctionParamInfo,
    MethodInfo, MethodQualifiers, TypeInfo, VariableInfo, VisitControl,
};

impl EntityParser<'_> {
    /// Parse a data member. Static members come from variable declarations
    /// nested in the record and have no offset.
    pub fn parse_field(
        &mut self,
        node: &AstNode,
        context: &ParsingContext,
        access: AccessSpecifier,
        is_static: bool,
    ) -> (VisitControl, ParsingResult<FieldInfo>) {
        let mut result = ParsingResult::default();

        match self.select(node, EntityKind::FIELD, context) {
            Ok(Some(properties)) => {
                let is_static = is_static || node.is_static;
                let memory_offset = if is_static {
                    0
                } else {
                    usize::try_from(node.field_offset_bits / 8).unwrap_or(0)
                };

                result.parsed_entity = Some(FieldInfo {
                    entity: self.entity_info(node, EntityKind::FIELD, context, properties),
                    ty: declared_type(node),
                    access,
                    qualifiers: FieldQualifiers {
                        is_static,
                        is_mutable: node.is_mutable,
                    },
                    memory_offset,
                });
            }
            Ok(None) => {}
            Err(error) => result.errors.push(error),
        }

        (self.control_for(&result.errors), result)
    }

    pub fn parse_method(
        &mut self,
        node: &AstNode,
        context: &ParsingContext,
        access: AccessSpecifier,
    ) -> (VisitControl, ParsingResult<MethodInfo>) {
        let mut result = ParsingResult::default();

        match self.select(node, EntityKind::METHOD, context) {
            Ok(Some(properties)) => {
                result.parsed_entity = Some(MethodInfo {
                    entity: self.entity_info(node, EntityKind::METHOD, context, properties),
                    prototype: prototype(node),
                    return_type: return_type(node),
                    parameters: parameters(node),
                    access,
                    qualifiers: MethodQualifiers {
                        is_static: node.is_static,
                        is_const: node.is_const,
                        is_virtual: node.is_virtual,
                        is_pure_virtual: node.is_pure_virtual,
                        is_override: node.has_child_of_kind(CursorKind::CxxOverrideAttr),
                        is_final: node.has_child_of_kind(CursorKind::CxxFinalAttr),
                        is_default: node.is_defaulted,
                        is_inline: node.is_inline,
                    },
                });
            }
            Ok(None) => {}
            Err(error) => result.errors.push(error),
        }

        (self.control_for(&result.errors), result)
    }

    pub fn parse_function(
        &mut self,
        node: &AstNode,
        context: &ParsingContext,
    ) -> (VisitControl, ParsingResult<FunctionInfo>) {
        let mut result = ParsingResult::default();

        match self.select(node, EntityKind::FUNCTION, context) {
            Ok(Some(properties)) => {
                result.parsed_entity = Some(FunctionInfo {
                    entity: self.entity_info(node, EntityKind::FUNCTION, context, properties),
                    prototype: prototype(node),
                    return_type: return_type(node),
                    parameters: parameters(node),
                    is_inline: node.is_inline,
                    is_static: node.is_static,
                });
            }
            Ok(None) => {}
            Err(error) => result.errors.push(error),
        }

        (self.control_for(&result.errors), result)
    }

    pub fn parse_variable(
        &mut self,
        node: &AstNode,
        context: &ParsingContext,
    ) -> (VisitControl, ParsingResult<VariableInfo>) {
        let mut result = ParsingResult::default();

        match self.select(node, EntityKind::VARIABLE, context) {
            Ok(Some(properties)) => {
                result.parsed_entity = Some(VariableInfo {
                    entity: self.entity_info(node, EntityKind::VARIABLE, context, properties),
                    ty: declared_type(node),
                    is_static: node.is_static,
                });
            }
            Ok(None) => {}
            Err(error) => result.errors.push(error),
        }

        (self.control_for(&result.errors), result)
    }
}

fn declared_type(node: &AstNode) -> TypeInfo {
    node.ty.as_ref().map(|ty| ty.to_type_info()).unwrap_or_default()
}

fn prototype(node: &AstNode) -> String {
    node.ty
        .as_ref()
        .map(|ty| ty.spelling.clone())
        .unwrap_or_default()
}

fn return_type(node: &AstNode) -> TypeInfo {
    node.result_type
        .as_ref()
        .map(|ty| ty.to_type_info())
        .unwrap_or_else(|| TypeInfo::value("void", 0))
}

fn parameters(node: &AstNode) -> Vec<FunctionParamInfo> {
    node.children
        .iter()
        .filter(|child| child.kind == CursorKind::ParmDecl)
        .map(|child| FunctionParamInfo {
            ty: declared_type(child),
            name: child.spelling.clone(),
        })
        .collect()
}
