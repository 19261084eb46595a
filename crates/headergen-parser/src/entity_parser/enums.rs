use super::{EntityParser, ParsingContext, ParsingResult};
use crate::ast::{AstNode, CursorKind};
use headergen_core::{EntityKind, EnumInfo, EnumValueInfo, TypeInfo, VisitControl};

impl EntityParser<'_> {
    /// Parse an enum and its enumerators. Values are taken as reported by the
    /// front-end.
    pub fn parse_enum(
        &mut self,
        node: &AstNode,
        context: &ParsingContext,
    ) -> (VisitControl, ParsingResult<EnumInfo>) {
        let mut result = ParsingResult::default();

        let properties = match self.select(node, EntityKind::ENUM, context) {
            Ok(properties) => properties,
            Err(error) => {
                result.errors.push(error);
                return (self.control_for(&result.errors), result);
            }
        };
        let is_selected = properties.is_some();

        let entity = self.entity_info(node, EntityKind::ENUM, context, properties.unwrap_or_default());
        let nested_context = ParsingContext::nested(&entity, self.settings);

        let mut values = Vec::new();
        for child in node
            .body()
            .iter()
            .filter(|child| child.kind == CursorKind::EnumConstantDecl)
        {
            let (control, value) = self.parse_enum_value(child, &nested_context);
            values.extend(value.take(&mut result.errors));
            if control >= VisitControl::Break {
                break;
            }
        }

        if is_selected {
            let ty = node
                .ty
                .as_ref()
                .map(|ty| ty.to_type_info())
                .unwrap_or_else(|| TypeInfo::value(entity.full_name.as_str(), 0));
            let underlying_type = node
                .underlying_type
                .as_ref()
                .map(|ty| ty.to_type_info())
                .unwrap_or_default();

            result.parsed_entity = Some(EnumInfo {
                entity,
                ty,
                underlying_type,
                values,
            });
        }

        (self.control_for(&result.errors), result)
    }

    pub fn parse_enum_value(
        &mut self,
        node: &AstNode,
        context: &ParsingContext,
    ) -> (VisitControl, ParsingResult<EnumValueInfo>) {
        let mut result = ParsingResult::default();

        match self.select(node, EntityKind::ENUM_VALUE, context) {
            Ok(Some(properties)) => {
                result.parsed_entity = Some(EnumValueInfo {
                    entity: self.entity_info(node, EntityKind::ENUM_VALUE, context, properties),
                    value: node.enum_value,
                });
            }
            Ok(None) => {}
            Err(error) => result.errors.push(error),
        }

        (self.control_for(&result.errors), result)
    }
}
