//! `Get` and `Set` field accessor generators

use crate::env::{CodeGenLocation, GenerationEnvironment, MacroCodeGenEnv};
use crate::generator::PropertyCodeGen;
use headergen_core::{EntityKind, EntityRef, FieldInfo, LogLevel, Property, VisitControl};

pub const GET_PROPERTY: &str = "Get";
pub const SET_PROPERTY: &str = "Set";

/// Argument making an accessor a declaration whose body the user writes
const EXPLICIT: &str = "explicit";

/// Emits a getter in the footer of the class owning a `Get` field.
///
/// Arguments: `const` returns a const view, `&` a reference, `*` a pointer,
/// `explicit` only declares the getter.
#[derive(Debug, Default)]
pub struct GetPropertyCodeGen;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct GetterFlags {
    is_const: bool,
    is_reference: bool,
    is_pointer: bool,
    is_explicit: bool,
}

impl GetPropertyCodeGen {
    pub fn new() -> Self {
        Self
    }

    fn parse_flags(property: &Property) -> Result<GetterFlags, String> {
        let mut flags = GetterFlags::default();
        for argument in &property.arguments {
            match argument.as_str() {
                "const" => flags.is_const = true,
                "&" => flags.is_reference = true,
                "*" => flags.is_pointer = true,
                EXPLICIT => flags.is_explicit = true,
                other => return Err(format!("unknown {GET_PROPERTY} argument '{other}'")),
            }
        }

        if flags.is_reference && flags.is_pointer {
            return Err(format!("{GET_PROPERTY} cannot return both a reference and a pointer"));
        }
        Ok(flags)
    }

    fn getter(field: &FieldInfo, flags: GetterFlags, sep: &str) -> String {
        let ty = field.ty.full_name.as_str();
        let name = &field.entity.name;
        let is_static = field.qualifiers.is_static;

        let constness = if flags.is_const { " const" } else { "" };
        let (return_type, value) = if flags.is_reference {
            (format!("{ty}{constness}&"), name.to_string())
        } else if flags.is_pointer {
            (format!("{ty}{constness}*"), format!("&{name}"))
        } else {
            (ty.to_string(), name.to_string())
        };

        let returns_view = flags.is_reference || flags.is_pointer;
        let method_qualifier = if !is_static && (flags.is_const || !returns_view) {
            " const"
        } else {
            ""
        };

        let declaration = format!(
            "public: {}{return_type} get{}(){method_qualifier} noexcept",
            if is_static { "static " } else { "" },
            accessor_suffix(name)
        );

        if flags.is_explicit {
            format!("{declaration};{sep}")
        } else {
            format!("{declaration} {{ return {value}; }}{sep}")
        }
    }
}

impl PropertyCodeGen for GetPropertyCodeGen {
    fn property_name(&self) -> &str {
        GET_PROPERTY
    }

    fn eligible_entity_mask(&self) -> EntityKind {
        EntityKind::FIELD
    }

    fn generate_code_for_entity(
        &mut self,
        entity: EntityRef<'_>,
        property: &Property,
        _property_index: usize,
        env: &MacroCodeGenEnv<'_>,
        out: &mut String,
    ) -> VisitControl {
        let Some(field) = entity.as_field() else {
            return VisitControl::Recurse;
        };

        let flags = match Self::parse_flags(property) {
            Ok(flags) => flags,
            Err(reason) => {
                env.log(
                    LogLevel::Error,
                    &format!("{}: {reason}", field.entity.full_name),
                );
                return VisitControl::AbortWithFailure;
            }
        };

        if env.location() == CodeGenLocation::ClassFooter {
            out.push_str(&Self::getter(field, flags, env.separator()));
        }
        VisitControl::Recurse
    }
}

/// Emits a setter in the footer of the class owning a `Set` field.
///
/// Const fields cannot have a setter and fail the generation. `explicit`
/// only declares the setter.
#[derive(Debug, Default)]
pub struct SetPropertyCodeGen;

impl SetPropertyCodeGen {
    pub fn new() -> Self {
        Self
    }

    fn setter(field: &FieldInfo, is_explicit: bool, sep: &str) -> String {
        let name = &field.entity.name;
        let declaration = format!(
            "public: {}void set{}({} const& value) noexcept",
            if field.qualifiers.is_static { "static " } else { "" },
            accessor_suffix(name),
            field.ty.unqualified_name()
        );

        if is_explicit {
            format!("{declaration};{sep}")
        } else {
            format!("{declaration} {{ {name} = value; }}{sep}")
        }
    }
}

impl PropertyCodeGen for SetPropertyCodeGen {
    fn property_name(&self) -> &str {
        SET_PROPERTY
    }

    fn eligible_entity_mask(&self) -> EntityKind {
        EntityKind::FIELD
    }

    fn generate_code_for_entity(
        &mut self,
        entity: EntityRef<'_>,
        property: &Property,
        _property_index: usize,
        env: &MacroCodeGenEnv<'_>,
        out: &mut String,
    ) -> VisitControl {
        let Some(field) = entity.as_field() else {
            return VisitControl::Recurse;
        };

        if field.ty.is_const() {
            env.log(
                LogLevel::Error,
                &format!(
                    "{}: {SET_PROPERTY} cannot be applied to a const field",
                    field.entity.full_name
                ),
            );
            return VisitControl::AbortWithFailure;
        }

        if let Some(other) = property.arguments.iter().find(|a| a.as_str() != EXPLICIT) {
            env.log(
                LogLevel::Error,
                &format!(
                    "{}: unknown {SET_PROPERTY} argument '{other}'",
                    field.entity.full_name
                ),
            );
            return VisitControl::AbortWithFailure;
        }

        if env.location() == CodeGenLocation::ClassFooter {
            out.push_str(&Self::setter(
                field,
                property.has_argument(EXPLICIT),
                env.separator(),
            ));
        }
        VisitControl::Recurse
    }
}

/// `bar` → `Bar`, `m_bar` → `Bar`, `_bar` → `Bar`
fn accessor_suffix(field_name: &str) -> String {
    let trimmed = field_name.strip_prefix("m_").unwrap_or(field_name);
    let trimmed = trimmed.trim_start_matches('_');
    let trimmed = if trimmed.is_empty() { field_name } else { trimmed };

    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "accessors/accessors_tests.rs"]
mod accessors_tests;
