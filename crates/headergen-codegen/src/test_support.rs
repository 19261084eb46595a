//! Shared fixtures for the unit tests of this crate

use crate::env::MacroCodeGenEnv;
use crate::generator::{CodeGenModule, PropertyCodeGen};
use headergen_core::{
    AccessSpecifier, EntityInfo, EntityKind, EntityRef, EnumInfo, EnumValueInfo, FieldInfo,
    FileParsingResult, NamespaceInfo, Property, StructClassInfo, TypeDescriptor, TypeInfo,
    TypePart, VisitControl,
};
use parking_lot::Mutex;
use std::sync::Arc;

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Module recording every entity it sees as `<name>:<full name>`
pub struct RecordingModule {
    pub name: String,
    pub order: i32,
    pub iterations: u32,
    pub log: CallLog,
    pub fail_on: Option<String>,
    pub on_entity: VisitControl,
}

impl RecordingModule {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            order: 0,
            iterations: 1,
            log: Arc::clone(log),
            fail_on: None,
            on_entity: VisitControl::Recurse,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn failing_on(mut self, full_name: &str) -> Self {
        self.fail_on = Some(full_name.to_string());
        self
    }

    pub fn returning(mut self, control: VisitControl) -> Self {
        self.on_entity = control;
        self
    }
}

impl CodeGenModule for RecordingModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn generation_order(&self) -> i32 {
        self.order
    }

    fn iteration_count(&self) -> u32 {
        self.iterations
    }

    fn generate_code_for_entity(
        &mut self,
        entity: EntityRef<'_>,
        env: &MacroCodeGenEnv<'_>,
        out: &mut String,
    ) -> VisitControl {
        self.log
            .lock()
            .push(format!("{}:{}", self.name, entity.full_name()));
        out.push_str(&format!("// {} {}{}", self.name, entity.full_name(), env.separator()));

        if self.fail_on.as_deref() == Some(entity.full_name()) {
            VisitControl::AbortWithFailure
        } else {
            self.on_entity
        }
    }
}

/// Property generator recording `<property>:<full name>:<index>`
pub struct RecordingPropertyGen {
    pub property: String,
    pub mask: EntityKind,
    pub log: CallLog,
}

impl RecordingPropertyGen {
    pub fn new(property: &str, mask: EntityKind, log: &CallLog) -> Self {
        Self {
            property: property.to_string(),
            mask,
            log: Arc::clone(log),
        }
    }
}

impl PropertyCodeGen for RecordingPropertyGen {
    fn property_name(&self) -> &str {
        &self.property
    }

    fn eligible_entity_mask(&self) -> EntityKind {
        self.mask
    }

    fn generate_code_for_entity(
        &mut self,
        entity: EntityRef<'_>,
        property: &Property,
        property_index: usize,
        _env: &MacroCodeGenEnv<'_>,
        _out: &mut String,
    ) -> VisitControl {
        self.log.lock().push(format!(
            "{}:{}:{}",
            property.name,
            entity.full_name(),
            property_index
        ));
        VisitControl::Recurse
    }
}

pub fn int_type() -> TypeInfo {
    TypeInfo::value("int", 4)
}

pub fn const_int_type() -> TypeInfo {
    TypeInfo {
        full_name: "const int".to_string(),
        canonical_full_name: "const int".to_string(),
        type_parts: vec![TypePart::new(TypeDescriptor::VALUE | TypeDescriptor::CONST)],
        size_in_bytes: 4,
        template_params: Vec::new(),
    }
}

pub fn field(name: &str, owner: &str, properties: Vec<Property>) -> FieldInfo {
    let mut entity = EntityInfo::new(EntityKind::FIELD, name, format!("{owner}::{name}"));
    entity.properties = properties;
    FieldInfo {
        entity,
        ty: int_type(),
        access: AccessSpecifier::Private,
        ..FieldInfo::default()
    }
}

pub fn class(kind: EntityKind, full_name: &str, fields: Vec<FieldInfo>) -> StructClassInfo {
    let name = full_name.rsplit("::").next().unwrap_or(full_name);
    StructClassInfo {
        entity: EntityInfo::new(kind, name, full_name),
        ty: TypeInfo::value(full_name, 4 * fields.len()),
        fields,
        ..StructClassInfo::default()
    }
}

/// ```text
/// namespace ns {
///     class Foo { int bar; /* Get */ int baz; };
///     enum Color { Red, Green };
/// }
/// struct Bar { int x; /* Set, Get(const) */ };
/// ```
pub fn sample_result() -> FileParsingResult {
    let foo = class(
        EntityKind::CLASS,
        "ns::Foo",
        vec![
            field("bar", "ns::Foo", vec![Property::new("Get")]),
            field("baz", "ns::Foo", Vec::new()),
        ],
    );
    let color = EnumInfo {
        entity: EntityInfo::new(EntityKind::ENUM, "Color", "ns::Color"),
        ty: TypeInfo::value("ns::Color", 4),
        underlying_type: int_type(),
        values: vec![
            EnumValueInfo {
                entity: EntityInfo::new(EntityKind::ENUM_VALUE, "Red", "ns::Color::Red"),
                value: 0,
            },
            EnumValueInfo {
                entity: EntityInfo::new(EntityKind::ENUM_VALUE, "Green", "ns::Color::Green"),
                value: 1,
            },
        ],
    };
    let ns = NamespaceInfo {
        entity: EntityInfo::new(EntityKind::NAMESPACE, "ns", "ns"),
        classes: vec![foo],
        enums: vec![color],
        ..NamespaceInfo::default()
    };
    let bar = class(
        EntityKind::STRUCT,
        "Bar",
        vec![field(
            "x",
            "Bar",
            vec![
                Property::new("Set"),
                Property::with_arguments("Get", ["const"]),
            ],
        )],
    );

    let mut result = FileParsingResult::new("Sample.h");
    result.namespaces.push(ns);
    result.structs.push(bar);
    result.refresh_outer_entities();
    result
}

/// Full names of `result` in traversal order
pub fn traversal_order(result: &FileParsingResult) -> Vec<String> {
    let mut names = Vec::new();
    result.for_each_entity(|entity, _| names.push(entity.full_name().to_string()));
    names
}
