use super::{EntityParser, ParsingContext, ParsingResult};
use crate::ast::AstNode;
use headergen_core::{EntityKind, NamespaceInfo, VisitControl};

impl EntityParser<'_> {
    /// Parse a namespace and every declaration it contains
    pub fn parse_namespace(
        &mut self,
        node: &AstNode,
        context: &ParsingContext,
    ) -> (VisitControl, ParsingResult<NamespaceInfo>) {
        let mut result = ParsingResult::default();

        let properties = match self.select(node, EntityKind::NAMESPACE, context) {
            Ok(properties) => properties,
            Err(error) => {
                result.errors.push(error);
                return (self.control_for(&result.errors), result);
            }
        };
        let is_selected = properties.is_some();

        let entity = self.entity_info(
            node,
            EntityKind::NAMESPACE,
            context,
            properties.unwrap_or_default(),
        );
        let nested_context = ParsingContext::nested(&entity, self.settings);
        let scope = self.parse_scope(node.body(), &nested_context, &mut result.errors);

        if is_selected {
            tracing::trace!(namespace = %entity.full_name, "Parsed namespace");
            result.parsed_entity = Some(NamespaceInfo {
                entity,
                namespaces: scope.namespaces,
                structs: scope.structs,
                classes: scope.classes,
                enums: scope.enums,
                functions: scope.functions,
                variables: scope.variables,
            });
        }

        (self.control_for(&result.errors), result)
    }
}
