//! Whole-file parsing result

use crate::entity::{EntityHandle, EntityInfo};
use crate::entity_ref::{EntityRef, nth};
use crate::enums::EnumInfo;
use crate::error::ParsingError;
use crate::function::FunctionInfo;
use crate::namespace::NamespaceInfo;
use crate::struct_class::StructClassInfo;
use crate::struct_class_tree::StructClassTree;
use crate::variable::VariableInfo;
use std::path::PathBuf;

/// Every entity selected in one translation unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileParsingResult {
    pub parsed_file: PathBuf,
    pub namespaces: Vec<NamespaceInfo>,
    pub structs: Vec<StructClassInfo>,
    pub classes: Vec<StructClassInfo>,
    pub enums: Vec<EnumInfo>,
    pub functions: Vec<FunctionInfo>,
    pub variables: Vec<VariableInfo>,
    pub struct_class_tree: StructClassTree,
    pub errors: Vec<ParsingError>,
}

impl FileParsingResult {
    pub fn new(parsed_file: impl Into<PathBuf>) -> Self {
        Self {
            parsed_file: parsed_file.into(),
            ..Self::default()
        }
    }

    /// Top-level entities in traversal order: namespaces, structs, classes,
    /// enums, variables, functions
    pub fn top_level_entities(&self) -> Vec<EntityRef<'_>> {
        self.namespaces
            .iter()
            .map(EntityRef::Namespace)
            .chain(self.structs.iter().map(EntityRef::StructClass))
            .chain(self.classes.iter().map(EntityRef::StructClass))
            .chain(self.enums.iter().map(EntityRef::Enum))
            .chain(self.variables.iter().map(EntityRef::Variable))
            .chain(self.functions.iter().map(EntityRef::Function))
            .collect()
    }

    /// Top-level entity at `index` in [`FileParsingResult::top_level_entities`] order
    pub fn top_level_entity(&self, index: usize) -> Option<EntityRef<'_>> {
        let mut index = index;
        nth(&self.namespaces, &mut index, EntityRef::Namespace)
            .or_else(|| nth(&self.structs, &mut index, EntityRef::StructClass))
            .or_else(|| nth(&self.classes, &mut index, EntityRef::StructClass))
            .or_else(|| nth(&self.enums, &mut index, EntityRef::Enum))
            .or_else(|| nth(&self.variables, &mut index, EntityRef::Variable))
            .or_else(|| nth(&self.functions, &mut index, EntityRef::Function))
    }

    /// Whether no entity was selected
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
            && self.structs.is_empty()
            && self.classes.is_empty()
            && self.enums.is_empty()
            && self.functions.is_empty()
            && self.variables.is_empty()
    }

    /// Visit every entity depth first, passing its structural parent
    pub fn for_each_entity<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(EntityRef<'a>, Option<EntityRef<'a>>),
    {
        fn walk<'a, F>(entity: EntityRef<'a>, parent: Option<EntityRef<'a>>, visit: &mut F)
        where
            F: FnMut(EntityRef<'a>, Option<EntityRef<'a>>),
        {
            visit(entity, parent);
            for child in entity.children() {
                walk(child, Some(entity), visit);
            }
        }

        for entity in self.top_level_entities() {
            walk(entity, None, &mut visit);
        }
    }

    /// Visit every struct and class, nested ones included
    pub fn for_each_struct_class<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a StructClassInfo),
    {
        self.for_each_entity(|entity, _| {
            if let EntityRef::StructClass(sc) = entity {
                visit(sc);
            }
        });
    }

    /// Find the entity designated by `handle`.
    ///
    /// Follows the handle's position, so the cost only depends on nesting depth.
    /// `None` when the position is unset or no longer holds an entity of the
    /// handle's kind and id.
    pub fn resolve(&self, handle: &EntityHandle) -> Option<EntityRef<'_>> {
        let (first, rest) = handle.position.split_first()?;
        let mut entity = self.top_level_entity(*first)?;
        for index in rest {
            entity = entity.child(*index)?;
        }

        (entity.kind() == handle.kind && entity.entity().id == handle.id).then_some(entity)
    }

    /// Lexically enclosing entity of `entity`
    pub fn outer_entity_of(&self, entity: &EntityInfo) -> Option<EntityRef<'_>> {
        entity.outer_entity.as_ref().and_then(|h| self.resolve(h))
    }

    /// Stamp the position and `outer_entity` back-reference of every entity.
    ///
    /// Run once after collection: an entity's final container is only known
    /// once all its siblings have been collected.
    pub fn refresh_outer_entities(&mut self) {
        let mut positions = Positions::top_level();

        for ns in &mut self.namespaces {
            positions.stamp(&mut ns.entity);
            refresh_namespace(ns);
        }
        for sc in self.structs.iter_mut().chain(self.classes.iter_mut()) {
            positions.stamp(&mut sc.entity);
            refresh_struct_class(sc);
        }
        for e in &mut self.enums {
            positions.stamp(&mut e.entity);
            refresh_enum(e);
        }
        for v in &mut self.variables {
            positions.stamp(&mut v.entity);
        }
        for f in &mut self.functions {
            positions.stamp(&mut f.entity);
        }
    }
}

/// Sibling positions handed out in [`EntityRef::children`] order
struct Positions {
    outer: Option<EntityHandle>,
    base: Vec<usize>,
    next: usize,
}

impl Positions {
    fn top_level() -> Self {
        Self {
            outer: None,
            base: Vec::new(),
            next: 0,
        }
    }

    fn children_of(entity: &EntityInfo) -> Self {
        Self {
            outer: Some(entity.handle()),
            base: entity.position.clone(),
            next: 0,
        }
    }

    fn stamp(&mut self, entity: &mut EntityInfo) {
        entity.outer_entity = self.outer.clone();
        entity.position = self.base.iter().copied().chain([self.next]).collect();
        self.next += 1;
    }
}

fn refresh_namespace(ns: &mut NamespaceInfo) {
    let mut positions = Positions::children_of(&ns.entity);

    for nested in &mut ns.namespaces {
        positions.stamp(&mut nested.entity);
        refresh_namespace(nested);
    }
    for sc in ns.structs.iter_mut().chain(ns.classes.iter_mut()) {
        positions.stamp(&mut sc.entity);
        refresh_struct_class(sc);
    }
    for e in &mut ns.enums {
        positions.stamp(&mut e.entity);
        refresh_enum(e);
    }
    for v in &mut ns.variables {
        positions.stamp(&mut v.entity);
    }
    for f in &mut ns.functions {
        positions.stamp(&mut f.entity);
    }
}

fn refresh_struct_class(sc: &mut StructClassInfo) {
    let mut positions = Positions::children_of(&sc.entity);

    for nested in sc.nested_structs.iter_mut().chain(sc.nested_classes.iter_mut()) {
        positions.stamp(&mut nested.info.entity);
        refresh_struct_class(&mut nested.info);
    }
    for nested in &mut sc.nested_enums {
        positions.stamp(&mut nested.info.entity);
        refresh_enum(&mut nested.info);
    }
    for field in &mut sc.fields {
        positions.stamp(&mut field.entity);
    }
    for method in &mut sc.methods {
        positions.stamp(&mut method.entity);
    }
}

fn refresh_enum(e: &mut EnumInfo) {
    let mut positions = Positions::children_of(&e.entity);
    for value in &mut e.values {
        positions.stamp(&mut value.entity);
    }
}
