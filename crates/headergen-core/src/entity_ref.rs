//! Borrowed, kind-tagged view over any entity of the model

use crate::entity::{EntityInfo, EntityKind};
use crate::enums::{EnumInfo, EnumValueInfo};
use crate::function::{FunctionInfo, MethodInfo};
use crate::namespace::NamespaceInfo;
use crate::struct_class::StructClassInfo;
use crate::variable::{FieldInfo, VariableInfo};

/// Reference to one entity of a parsed file
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Namespace(&'a NamespaceInfo),
    /// Struct or class, see [`StructClassInfo::is_struct`]
    StructClass(&'a StructClassInfo),
    Enum(&'a EnumInfo),
    EnumValue(&'a EnumValueInfo),
    Variable(&'a VariableInfo),
    Field(&'a FieldInfo),
    Function(&'a FunctionInfo),
    Method(&'a MethodInfo),
}

impl<'a> EntityRef<'a> {
    pub fn entity(&self) -> &'a EntityInfo {
        match *self {
            EntityRef::Namespace(e) => &e.entity,
            EntityRef::StructClass(e) => &e.entity,
            EntityRef::Enum(e) => &e.entity,
            EntityRef::EnumValue(e) => &e.entity,
            EntityRef::Variable(e) => &e.entity,
            EntityRef::Field(e) => &e.entity,
            EntityRef::Function(e) => &e.entity,
            EntityRef::Method(e) => &e.entity,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.entity().kind
    }

    pub fn name(&self) -> &'a str {
        &self.entity().name
    }

    pub fn full_name(&self) -> &'a str {
        &self.entity().full_name
    }

    /// Direct children in traversal order.
    ///
    /// Namespace: namespaces, structs, classes, enums, variables, functions.
    /// Struct/class: nested structs, nested classes, nested enums, fields, methods.
    /// Enum: enumerators.
    pub fn children(&self) -> Vec<EntityRef<'a>> {
        match *self {
            EntityRef::Namespace(ns) => ns
                .namespaces
                .iter()
                .map(EntityRef::Namespace)
                .chain(ns.structs.iter().map(EntityRef::StructClass))
                .chain(ns.classes.iter().map(EntityRef::StructClass))
                .chain(ns.enums.iter().map(EntityRef::Enum))
                .chain(ns.variables.iter().map(EntityRef::Variable))
                .chain(ns.functions.iter().map(EntityRef::Function))
                .collect(),
            EntityRef::StructClass(sc) => sc
                .nested_structs
                .iter()
                .map(|n| EntityRef::StructClass(&n.info))
                .chain(sc.nested_classes.iter().map(|n| EntityRef::StructClass(&n.info)))
                .chain(sc.nested_enums.iter().map(|n| EntityRef::Enum(&n.info)))
                .chain(sc.fields.iter().map(EntityRef::Field))
                .chain(sc.methods.iter().map(EntityRef::Method))
                .collect(),
            EntityRef::Enum(e) => e.values.iter().map(EntityRef::EnumValue).collect(),
            EntityRef::EnumValue(_)
            | EntityRef::Variable(_)
            | EntityRef::Field(_)
            | EntityRef::Function(_)
            | EntityRef::Method(_) => Vec::new(),
        }
    }

    /// Child at `index` in [`EntityRef::children`] order, without collecting
    /// the siblings
    pub fn child(&self, index: usize) -> Option<EntityRef<'a>> {
        let mut index = index;
        match *self {
            EntityRef::Namespace(ns) => nth(&ns.namespaces, &mut index, EntityRef::Namespace)
                .or_else(|| nth(&ns.structs, &mut index, EntityRef::StructClass))
                .or_else(|| nth(&ns.classes, &mut index, EntityRef::StructClass))
                .or_else(|| nth(&ns.enums, &mut index, EntityRef::Enum))
                .or_else(|| nth(&ns.variables, &mut index, EntityRef::Variable))
                .or_else(|| nth(&ns.functions, &mut index, EntityRef::Function)),
            EntityRef::StructClass(sc) => {
                nth(&sc.nested_structs, &mut index, |n| EntityRef::StructClass(&n.info))
                    .or_else(|| {
                        nth(&sc.nested_classes, &mut index, |n| EntityRef::StructClass(&n.info))
                    })
                    .or_else(|| nth(&sc.nested_enums, &mut index, |n| EntityRef::Enum(&n.info)))
                    .or_else(|| nth(&sc.fields, &mut index, EntityRef::Field))
                    .or_else(|| nth(&sc.methods, &mut index, EntityRef::Method))
            }
            EntityRef::Enum(e) => e.values.get(index).map(EntityRef::EnumValue),
            EntityRef::EnumValue(_)
            | EntityRef::Variable(_)
            | EntityRef::Field(_)
            | EntityRef::Function(_)
            | EntityRef::Method(_) => None,
        }
    }

    pub fn as_struct_class(&self) -> Option<&'a StructClassInfo> {
        match *self {
            EntityRef::StructClass(sc) => Some(sc),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&'a FieldInfo> {
        match *self {
            EntityRef::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&'a EnumInfo> {
        match *self {
            EntityRef::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Whether both references designate the same entity object.
    ///
    /// Identity, not id equality: two blocks of a reopened namespace share an id.
    pub fn same_entity(&self, other: &EntityRef<'_>) -> bool {
        std::ptr::eq(self.entity(), other.entity())
    }
}

/// Item `index` of `items`, or shift `index` past them
pub(crate) fn nth<'a, T>(
    items: &'a [T],
    index: &mut usize,
    wrap: impl Fn(&'a T) -> EntityRef<'a>,
) -> Option<EntityRef<'a>> {
    match items.get(*index) {
        Some(item) => Some(wrap(item)),
        None => {
            *index -= items.len();
            None
        }
    }
}
