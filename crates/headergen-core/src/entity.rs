//! Common entity data shared by every parsed construct

use crate::property::Property;
use bitflags::bitflags;

bitflags! {
    /// Kind of a parsed entity.
    ///
    /// Kinds are orthogonal bits so that generators can declare the set of
    /// entity kinds they are interested in as a single mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntityKind: u16 {
        const NAMESPACE = 1 << 0;
        const CLASS = 1 << 1;
        const STRUCT = 1 << 2;
        const ENUM = 1 << 3;
        const ENUM_VALUE = 1 << 4;
        const VARIABLE = 1 << 5;
        const FIELD = 1 << 6;
        const FUNCTION = 1 << 7;
        const METHOD = 1 << 8;

        /// Struct or class
        const STRUCT_OR_CLASS = Self::CLASS.bits() | Self::STRUCT.bits();
    }
}

impl EntityKind {
    /// Human readable name of a single kind
    pub fn name(&self) -> &'static str {
        const NAMES: [(EntityKind, &str); 9] = [
            (EntityKind::NAMESPACE, "namespace"),
            (EntityKind::CLASS, "class"),
            (EntityKind::STRUCT, "struct"),
            (EntityKind::ENUM, "enum"),
            (EntityKind::ENUM_VALUE, "enum value"),
            (EntityKind::VARIABLE, "variable"),
            (EntityKind::FIELD, "field"),
            (EntityKind::FUNCTION, "function"),
            (EntityKind::METHOD, "method"),
        ];

        NAMES
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("mixed")
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// C++ access specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessSpecifier {
    #[default]
    Invalid,
    Public,
    Protected,
    Private,
}

impl AccessSpecifier {
    /// Keyword as written in C++ source, empty for [`AccessSpecifier::Invalid`]
    pub fn keyword(&self) -> &'static str {
        match self {
            AccessSpecifier::Invalid => "",
            AccessSpecifier::Public => "public",
            AccessSpecifier::Protected => "protected",
            AccessSpecifier::Private => "private",
        }
    }
}

/// Non-owning reference to an entity of a [`FileParsingResult`](crate::FileParsingResult).
///
/// Ids are not unique within a file: a reopened namespace or a forward
/// declaration shares the id of its other occurrences. The handle therefore
/// designates its entity by position, `kind` and `id` only guarding against
/// a stale position.
///
/// Resolved with [`FileParsingResult::resolve`](crate::FileParsingResult::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    pub kind: EntityKind,
    pub id: String,
    /// Child indices from [`FileParsingResult::top_level_entities`](crate::FileParsingResult::top_level_entities)
    pub position: Vec<usize>,
}

/// Data common to all entities
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityInfo {
    pub kind: EntityKind,

    /// Unqualified name
    pub name: String,

    /// Name qualified with every enclosing namespace and class
    pub full_name: String,

    /// Stable unique identifier, derived from the USR when one is available
    pub id: String,

    /// Lexically enclosing entity, `None` for translation-unit level entities.
    ///
    /// Stamped once parsing completes, see [`FileParsingResult::refresh_outer_entities`](crate::FileParsingResult::refresh_outer_entities).
    pub outer_entity: Option<EntityHandle>,

    /// Child indices leading to this entity, empty until stamped by
    /// [`FileParsingResult::refresh_outer_entities`](crate::FileParsingResult::refresh_outer_entities).
    pub position: Vec<usize>,

    /// Properties in annotation order. Duplicated names are allowed.
    pub properties: Vec<Property>,
}

impl EntityInfo {
    /// Create a new entity with no properties and no outer entity
    pub fn new(kind: EntityKind, name: impl Into<String>, full_name: impl Into<String>) -> Self {
        let name = name.into();
        let full_name = full_name.into();
        Self {
            kind,
            id: full_name.clone(),
            name,
            full_name,
            outer_entity: None,
            position: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Handle referencing this entity at its stamped position
    pub fn handle(&self) -> EntityHandle {
        EntityHandle {
            kind: self.kind,
            id: self.id.clone(),
            position: self.position.clone(),
        }
    }

    /// First property with the given name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Whether at least one property has the given name
    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }
}
