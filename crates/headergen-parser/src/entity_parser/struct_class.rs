use super::{EntityParser, ParsingContext, ParsingResult};
use crate::ast::{AstNode, CursorKind};
use headergen_core::{
    AccessSpecifier, EntityKind, NestedEnumInfo, NestedStructClassInfo, ParentInfo,
    StructClassInfo, TypeInfo, VisitControl,
};

impl EntityParser<'_> {
    /// Parse a struct, class or class template with its members.
    ///
    /// Base specifiers are recorded in the struct/class tree whether or not
    /// the record is selected.
    pub fn parse_struct_class(
        &mut self,
        node: &AstNode,
        context: &ParsingContext,
    ) -> (VisitControl, ParsingResult<StructClassInfo>) {
        let kind = record_kind(node);
        let mut result = ParsingResult::default();

        let properties = match self.select(node, kind, context) {
            Ok(properties) => properties,
            Err(error) => {
                result.errors.push(error);
                return (self.control_for(&result.errors), result);
            }
        };
        let is_selected = properties.is_some();

        let entity = self.entity_info(node, kind, context, properties.unwrap_or_default());
        let mut ty = node
            .ty
            .as_ref()
            .map(|ty| ty.to_type_info())
            .unwrap_or_else(|| TypeInfo::value(entity.full_name.as_str(), 0));
        ty.template_params = node.template_params();

        let mut record = StructClassInfo {
            entity,
            is_forward_declaration: !node.is_definition,
            ty,
            ..StructClassInfo::default()
        };

        if !record.is_forward_declaration {
            self.parse_record_body(node, &mut record, &mut result.errors);
        }

        if is_selected {
            tracing::trace!(record = %record.entity.full_name, "Parsed {}", kind);
            result.parsed_entity = Some(record);
        }

        (self.control_for(&result.errors), result)
    }

    fn parse_record_body(
        &mut self,
        node: &AstNode,
        record: &mut StructClassInfo,
        errors: &mut Vec<headergen_core::ParsingError>,
    ) {
        let nested_context = ParsingContext::nested(&record.entity, self.settings);
        let mut access = if record.is_struct() {
            AccessSpecifier::Public
        } else {
            AccessSpecifier::Private
        };

        for child in node.body() {
            let member_access = match AccessSpecifier::from(child.access) {
                AccessSpecifier::Invalid => access,
                explicit => explicit,
            };

            let control = match child.kind {
                CursorKind::CxxAccessSpecifier => {
                    access = member_access;
                    VisitControl::Continue
                }
                CursorKind::CxxBaseSpecifier => {
                    self.parse_base(child, record);
                    VisitControl::Continue
                }
                CursorKind::CxxFinalAttr => {
                    record.qualifiers.is_final = true;
                    VisitControl::Continue
                }
                CursorKind::FieldDecl | CursorKind::VarDecl => {
                    let is_static = child.kind == CursorKind::VarDecl;
                    let (control, result) =
                        self.parse_field(child, &nested_context, member_access, is_static);
                    record.fields.extend(result.take(errors));
                    control
                }
                CursorKind::CxxMethod => {
                    let (control, result) = self.parse_method(child, &nested_context, member_access);
                    record.methods.extend(result.take(errors));
                    control
                }
                kind if kind.is_record() => {
                    let (control, result) = self.parse_struct_class(child, &nested_context);
                    if let Some(info) = result.take(errors) {
                        let nested = NestedStructClassInfo {
                            info,
                            access: member_access,
                        };
                        if nested.info.is_struct() {
                            record.nested_structs.push(nested);
                        } else {
                            record.nested_classes.push(nested);
                        }
                    }
                    control
                }
                CursorKind::EnumDecl => {
                    let (control, result) = self.parse_enum(child, &nested_context);
                    if let Some(info) = result.take(errors) {
                        record.nested_enums.push(NestedEnumInfo {
                            info,
                            access: member_access,
                        });
                    }
                    control
                }
                _ => VisitControl::Continue,
            };

            if control >= VisitControl::Break {
                break;
            }
        }
    }

    /// Record a direct base and every base reachable from it
    fn parse_base(&mut self, base: &AstNode, record: &mut StructClassInfo) {
        let access = match AccessSpecifier::from(base.access) {
            AccessSpecifier::Invalid if record.is_struct() => AccessSpecifier::Public,
            AccessSpecifier::Invalid => AccessSpecifier::Private,
            explicit => explicit,
        };
        let ty = base_type(base);
        let parent_name = ty.canonical_full_name.clone();

        record.parents.push(ParentInfo {
            inheritance_access: access,
            ty,
        });

        if self
            .struct_class_tree
            .add_link(&record.entity.full_name, &parent_name, access)
        {
            self.register_base_chain(&base.referenced_usr, &parent_name);
        }
    }

    /// Revisit the declaration of a base to capture its own bases, which the
    /// linear walk of this file may never reach
    fn register_base_chain(&mut self, usr: &str, full_name: &str) {
        // Links already recorded for this base mean its chain is complete
        if self.struct_class_tree.contains(full_name) {
            return;
        }
        let Some(declaration) = self.declarations.get(usr).copied() else {
            return;
        };
        let is_struct = record_kind(declaration) == EntityKind::STRUCT;

        for base in declaration
            .children
            .iter()
            .filter(|child| child.kind == CursorKind::CxxBaseSpecifier)
        {
            let access = match AccessSpecifier::from(base.access) {
                AccessSpecifier::Invalid if is_struct => AccessSpecifier::Public,
                AccessSpecifier::Invalid => AccessSpecifier::Private,
                explicit => explicit,
            };
            let parent_name = base_type(base).canonical_full_name;

            if self.struct_class_tree.add_link(full_name, &parent_name, access) {
                self.register_base_chain(&base.referenced_usr, &parent_name);
            }
        }
    }
}

/// Struct or class, class templates resolved through their templated kind
fn record_kind(node: &AstNode) -> EntityKind {
    match (node.kind, node.template_cursor_kind) {
        (CursorKind::StructDecl, _) | (CursorKind::ClassTemplate, Some(CursorKind::StructDecl)) => {
            EntityKind::STRUCT
        }
        _ => EntityKind::CLASS,
    }
}

fn base_type(base: &AstNode) -> TypeInfo {
    base.ty
        .as_ref()
        .map(|ty| ty.to_type_info())
        .unwrap_or_else(|| TypeInfo::value(base.spelling.as_str(), 0))
}
