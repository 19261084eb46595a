//! Per-kind entity parsers
//!
//! Every kind follows the same shape: decide whether the cursor is selected
//! (leading annotation, parse-all flag or parse-all-nested parent), then walk
//! the remaining children, dispatching sub-declarations to their own parser.
//! Errors of nested parsers always bubble up, entities only when their parent
//! was selected.

mod enums;
mod members;
mod namespace;
mod struct_class;

use crate::ast::{AstNode, CursorKind};
use headergen_core::{
    EntityInfo, EntityKind, EnumInfo, FunctionInfo, NamespaceInfo, ParsingError, ParsingSettings,
    Property, PropertyParser, StructClassInfo, StructClassTree, VariableInfo, VisitControl,
    annotation_tag,
};
use std::collections::HashMap;
use std::path::Path;

/// State inherited by the parsers of nested declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsingContext {
    /// Full name of the enclosing entity, empty at translation-unit level
    pub outer_full_name: String,

    /// Whether the enclosing entity forces the selection of its direct children
    pub should_parse_all_nested: bool,
}

impl ParsingContext {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn full_name_of(&self, name: &str) -> String {
        if self.outer_full_name.is_empty() {
            name.to_string()
        } else {
            format!("{}::{}", self.outer_full_name, name)
        }
    }

    /// Context for the children of `entity`
    pub fn nested(entity: &EntityInfo, settings: &ParsingSettings) -> Self {
        Self {
            outer_full_name: entity.full_name.clone(),
            should_parse_all_nested: entity
                .has_property(&settings.properties.parse_all_nested_property),
        }
    }
}

/// Entity built by a per-kind parser and the errors raised while building it
#[derive(Debug)]
pub struct ParsingResult<T> {
    /// `None` when the cursor was not selected or was rejected
    pub parsed_entity: Option<T>,
    pub errors: Vec<ParsingError>,
}

impl<T> Default for ParsingResult<T> {
    fn default() -> Self {
        Self {
            parsed_entity: None,
            errors: Vec::new(),
        }
    }
}

impl<T> ParsingResult<T> {
    /// Move the errors into `errors` and return the entity
    pub fn take(self, errors: &mut Vec<ParsingError>) -> Option<T> {
        errors.extend(self.errors);
        self.parsed_entity
    }
}

/// Declarations found directly inside a namespace or a translation unit
#[derive(Debug, Default)]
pub struct ScopeEntities {
    pub namespaces: Vec<NamespaceInfo>,
    pub structs: Vec<StructClassInfo>,
    pub classes: Vec<StructClassInfo>,
    pub enums: Vec<EnumInfo>,
    pub functions: Vec<FunctionInfo>,
    pub variables: Vec<VariableInfo>,
}

/// Builds entities out of the cursors of one translation unit
pub struct EntityParser<'a> {
    settings: &'a ParsingSettings,
    property_parser: PropertyParser,
    parsed_file: &'a Path,

    /// Declarations of the whole translation unit by USR, definitions preferred
    declarations: HashMap<&'a str, &'a AstNode>,
    struct_class_tree: StructClassTree,
}

impl<'a> EntityParser<'a> {
    pub fn new(settings: &'a ParsingSettings, parsed_file: &'a Path, root: &'a AstNode) -> Self {
        let mut declarations: HashMap<&'a str, &'a AstNode> = HashMap::new();
        for node in root.descendants().filter(|n| !n.usr.is_empty()) {
            let known_definition = declarations
                .get(node.usr.as_str())
                .is_some_and(|known| known.is_definition);
            if !known_definition {
                declarations.insert(node.usr.as_str(), node);
            }
        }

        Self {
            settings,
            property_parser: PropertyParser::new(settings.properties.syntax.clone()),
            parsed_file,
            declarations,
            struct_class_tree: StructClassTree::new(),
        }
    }

    pub fn struct_class_tree(&self) -> &StructClassTree {
        &self.struct_class_tree
    }

    pub fn into_struct_class_tree(self) -> StructClassTree {
        self.struct_class_tree
    }

    /// Parse a sequence of namespace-level declarations.
    ///
    /// Stops at the first declaration whose parser asks to skip its siblings.
    pub fn parse_scope<'n>(
        &mut self,
        nodes: impl IntoIterator<Item = &'n AstNode>,
        context: &ParsingContext,
        errors: &mut Vec<ParsingError>,
    ) -> ScopeEntities {
        let mut scope = ScopeEntities::default();

        for node in nodes {
            let control = match node.kind {
                CursorKind::Namespace => {
                    let (control, result) = self.parse_namespace(node, context);
                    scope.namespaces.extend(result.take(errors));
                    control
                }
                kind if kind.is_record() => {
                    let (control, result) = self.parse_struct_class(node, context);
                    if let Some(record) = result.take(errors) {
                        if record.is_struct() {
                            scope.structs.push(record);
                        } else {
                            scope.classes.push(record);
                        }
                    }
                    control
                }
                CursorKind::EnumDecl => {
                    let (control, result) = self.parse_enum(node, context);
                    scope.enums.extend(result.take(errors));
                    control
                }
                CursorKind::VarDecl => {
                    let (control, result) = self.parse_variable(node, context);
                    scope.variables.extend(result.take(errors));
                    control
                }
                CursorKind::FunctionDecl => {
                    let (control, result) = self.parse_function(node, context);
                    scope.functions.extend(result.take(errors));
                    control
                }
                _ => VisitControl::Continue,
            };

            if control >= VisitControl::Break {
                break;
            }
        }

        scope
    }

    /// Properties of `node` when it is selected as an entity of `kind`.
    ///
    /// A leading annotation written for another kind is ignored; a malformed
    /// one rejects the entity.
    fn select(
        &self,
        node: &AstNode,
        kind: EntityKind,
        context: &ParsingContext,
    ) -> Result<Option<Vec<Property>>, ParsingError> {
        if let Some(annotation) = node.leading_annotation() {
            match self
                .property_parser
                .parse_properties(annotation, annotation_tag(kind))
            {
                Ok(Some(properties)) => return Ok(Some(properties)),
                Ok(None) => {}
                Err(error) => {
                    return Err(self.error_at(
                        node,
                        format!("invalid annotation on {kind} '{}': {error}", node.spelling),
                    ));
                }
            }
        }

        if self.settings.should_parse_all(kind) || context.should_parse_all_nested {
            Ok(Some(Vec::new()))
        } else {
            Ok(None)
        }
    }

    fn entity_info(
        &self,
        node: &AstNode,
        kind: EntityKind,
        context: &ParsingContext,
        properties: Vec<Property>,
    ) -> EntityInfo {
        let mut entity = EntityInfo::new(kind, node.spelling.as_str(), context.full_name_of(&node.spelling));
        if !node.usr.is_empty() {
            entity = entity.with_id(node.usr.as_str());
        }
        entity.properties = properties;
        entity
    }

    fn error_at(&self, node: &AstNode, description: String) -> ParsingError {
        let error = ParsingError::new(description);
        match &node.location {
            Some(location) => error.at(&location.file, location.line, location.column),
            None => error.at(self.parsed_file, 0, 0),
        }
    }

    /// Signal returned once a cursor is done
    fn control_for(&self, errors: &[ParsingError]) -> VisitControl {
        if self.settings.should_abort_parsing_on_first_error && !errors.is_empty() {
            VisitControl::Break
        } else {
            VisitControl::Continue
        }
    }
}
