//! Reflection metadata module

use crate::accessors::{GetPropertyCodeGen, SetPropertyCodeGen};
use crate::env::{CodeGenLocation, MacroCodeGenEnv};
use crate::generator::{CodeGenModule, PropertyCodeGen};
use headergen_core::{
    EntityKind, EntityRef, EnumInfo, FileParsingResult, StructClassInfo, VisitControl,
    to_identifier,
};
use std::collections::HashSet;

/// Emits, for every struct/class, its archetype name, field names and
/// transitive bases in its footer; for every enum an `enumToString`
/// specialization; and per file a function listing the file's archetypes.
///
/// Bundles the [`GetPropertyCodeGen`] and [`SetPropertyCodeGen`] accessors.
#[derive(Debug, Default)]
pub struct ReflectionModule {
    /// Full names of the structs/classes generated for the current file
    archetypes: Vec<String>,
}

impl ReflectionModule {
    pub fn new() -> Self {
        Self::default()
    }

    fn class_footer(sc: &StructClassInfo, result: &FileParsingResult, sep: &str) -> String {
        let mut out = format!("public:{sep}");
        out.push_str(&format!(
            "static constexpr char const* staticGetArchetypeName() noexcept {{ return \"{}\"; }}{sep}",
            sc.entity.full_name
        ));

        out.push_str(&format!(
            "static constexpr std::size_t fieldCount = {};{sep}",
            sc.fields.len()
        ));
        if !sc.fields.is_empty() {
            out.push_str(&format!(
                "static constexpr char const* fieldNames[] = {{ {} }};{sep}",
                quoted(sc.fields.iter().map(|f| f.entity.name.as_str()))
            ));
        }

        let bases = result.struct_class_tree.all_bases(&sc.entity.full_name);
        out.push_str(&format!(
            "static constexpr std::size_t baseCount = {};{sep}",
            bases.len()
        ));
        if !bases.is_empty() {
            out.push_str(&format!(
                "static constexpr char const* baseNames[] = {{ {} }};{sep}",
                quoted(bases.iter().map(String::as_str))
            ));
        }
        out
    }

    fn enum_to_string_declaration(e: &EnumInfo, sep: &str) -> String {
        let name = &e.entity.full_name;
        format!("template <> char const* enumToString<{name}>({name} value) noexcept;{sep}")
    }

    fn enum_to_string_definition(e: &EnumInfo) -> String {
        let name = &e.entity.full_name;
        let mut out = format!(
            "template <>\nchar const* enumToString<{name}>({name} value) noexcept\n{{\n\tswitch (value)\n\t{{\n"
        );

        let mut seen = HashSet::new();
        for value in e.values.iter().filter(|v| seen.insert(v.value)) {
            out.push_str(&format!(
                "\t\tcase {name}::{0}: return \"{0}\";\n",
                value.entity.name
            ));
        }

        out.push_str("\t\tdefault: break;\n\t}\n\n\treturn \"\";\n}\n\n");
        out
    }

    fn archetypes_function(result: &FileParsingResult) -> String {
        let stem = result
            .parsed_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("headergenArchetypes_{}", to_identifier(&stem))
    }
}

impl CodeGenModule for ReflectionModule {
    fn name(&self) -> &str {
        "reflection"
    }

    fn create_property_code_gens(&self) -> Vec<Box<dyn PropertyCodeGen>> {
        vec![
            Box::new(GetPropertyCodeGen::new()),
            Box::new(SetPropertyCodeGen::new()),
        ]
    }

    fn initial_generate_code(&mut self, env: &MacroCodeGenEnv<'_>, out: &mut String) -> bool {
        if env.location() == CodeGenLocation::HeaderFileHeader {
            self.archetypes.clear();
            out.push_str("#include <cstddef>\n\n");
            out.push_str("#ifndef HEADERGEN_ENUM_TO_STRING\n#define HEADERGEN_ENUM_TO_STRING\n");
            out.push_str("template <typename T> char const* enumToString(T value) noexcept;\n");
            out.push_str("#endif\n");
        }
        true
    }

    fn generate_code_for_entity(
        &mut self,
        entity: EntityRef<'_>,
        env: &MacroCodeGenEnv<'_>,
        out: &mut String,
    ) -> VisitControl {
        match (entity, env.location()) {
            (EntityRef::StructClass(sc), _) if sc.is_forward_declaration => {
                return VisitControl::Continue;
            }
            (EntityRef::StructClass(sc), CodeGenLocation::ClassFooter) => {
                self.archetypes.push(sc.entity.full_name.clone());
                out.push_str(&Self::class_footer(sc, env.result(), env.separator()));
            }
            (EntityRef::Enum(e), CodeGenLocation::HeaderFileFooter) => {
                out.push_str(&Self::enum_to_string_declaration(e, env.separator()));
            }
            (EntityRef::Enum(e), CodeGenLocation::SourceFileHeader) => {
                out.push_str(&Self::enum_to_string_definition(e));
            }
            _ => {}
        }

        if entity.kind().intersects(EntityKind::ENUM_VALUE | EntityKind::METHOD) {
            VisitControl::Continue
        } else {
            VisitControl::Recurse
        }
    }

    fn final_generate_code(&mut self, env: &MacroCodeGenEnv<'_>, out: &mut String) -> bool {
        let function = Self::archetypes_function(env.result());
        let export = match env.export_symbol_macro() {
            "" => String::new(),
            name => format!("{name} "),
        };

        match env.location() {
            CodeGenLocation::HeaderFileFooter => {
                out.push_str(&format!(
                    "{export}char const* const* {function}(std::size_t& count) noexcept;{}",
                    env.separator()
                ));
            }
            CodeGenLocation::SourceFileHeader => {
                let mut names: Vec<String> =
                    self.archetypes.iter().map(|a| format!("\"{a}\"")).collect();
                names.push("nullptr".to_string());

                out.push_str(&format!(
                    "char const* const* {function}(std::size_t& count) noexcept\n{{\n"
                ));
                out.push_str(&format!(
                    "\tstatic char const* const names[] = {{ {} }};\n",
                    names.join(", ")
                ));
                out.push_str(&format!(
                    "\tcount = {};\n\treturn names;\n}}\n",
                    self.archetypes.len()
                ));
            }
            _ => {}
        }
        true
    }
}

fn quoted<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "reflection/reflection_tests.rs"]
mod reflection_tests;
