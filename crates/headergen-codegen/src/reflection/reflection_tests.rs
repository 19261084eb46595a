#![allow(non_snake_case)]

use super::*;
use crate::macro_unit::MacroCodeGenUnit;
use crate::test_support::{const_int_type, sample_result};
use crate::unit::CodeGenUnit;
use headergen_core::{AccessSpecifier, EnumValueInfo, EntityInfo, Settings};
use std::sync::Arc;
use tempfile::TempDir;

fn generate(result: &FileParsingResult, location: CodeGenLocation) -> String {
    let settings = Settings::default();
    let env = MacroCodeGenEnv::new(result, &settings, None).at(location);
    let mut module = ReflectionModule::new();
    let mut out = String::new();
    result.for_each_entity(|entity, _| {
        module.generate_code_for_entity(entity, &env, &mut out);
    });
    out
}

fn reflection_unit(dir: &TempDir) -> MacroCodeGenUnit {
    let mut settings = Settings::default();
    settings.codegen.output_directory = dir.path().join("Generated");
    settings.codegen.export_symbol_macro_name = "SAMPLE_API".to_string();
    MacroCodeGenUnit::new(Arc::new(settings)).with_module(|| Box::new(ReflectionModule::new()))
}

#[test]
fn ReflectionModule___class_footer___archetype_fields_and_bases() {
    let mut result = sample_result();
    result
        .struct_class_tree
        .add_link("ns::Foo", "ns::Base", AccessSpecifier::Public);
    result
        .struct_class_tree
        .add_link("ns::Base", "ns::Root", AccessSpecifier::Public);

    let out = generate(&result, CodeGenLocation::ClassFooter);

    assert!(out.contains("staticGetArchetypeName() noexcept { return \"ns::Foo\"; }\\\n"));
    assert!(out.contains("fieldCount = 2;\\\n"));
    assert!(out.contains("fieldNames[] = { \"bar\", \"baz\" };\\\n"));
    assert!(out.contains("baseNames[] = { \"ns::Base\", \"ns::Root\" };\\\n"));
    assert!(out.contains("return \"Bar\"; }"));
}

#[test]
fn ReflectionModule___class_without_bases___no_base_table() {
    let result = sample_result();

    let out = generate(&result, CodeGenLocation::ClassFooter);

    assert!(out.contains("baseCount = 0;\\\n"));
    assert!(!out.contains("baseNames"));
}

#[test]
fn ReflectionModule___enum___declared_in_footer_defined_in_source() {
    let result = sample_result();

    let declaration = generate(&result, CodeGenLocation::HeaderFileFooter);
    let definition = generate(&result, CodeGenLocation::SourceFileHeader);

    assert_eq!(
        declaration,
        "template <> char const* enumToString<ns::Color>(ns::Color value) noexcept;\\\n"
    );
    assert!(definition.contains("case ns::Color::Red: return \"Red\";"));
    assert!(definition.contains("case ns::Color::Green: return \"Green\";"));
}

#[test]
fn ReflectionModule___aliased_enum_values___single_case_per_value() {
    let mut result = sample_result();
    result.namespaces[0].enums[0].values.push(EnumValueInfo {
        entity: EntityInfo::new(EntityKind::ENUM_VALUE, "Crimson", "ns::Color::Crimson"),
        value: 0,
    });

    let definition = generate(&result, CodeGenLocation::SourceFileHeader);

    assert_eq!(definition.matches("case ").count(), 2);
    assert!(!definition.contains("Crimson"));
}

#[test]
fn ReflectionModule___forward_declaration___skipped() {
    let mut result = sample_result();
    result.structs[0].is_forward_declaration = true;

    let out = generate(&result, CodeGenLocation::ClassFooter);

    assert!(!out.contains("\"Bar\""));
}

#[test]
fn ReflectionModule___property_code_gens___get_and_set() {
    let gens = ReflectionModule::new().create_property_code_gens();

    let names: Vec<&str> = gens.iter().map(|g| g.property_name()).collect();
    assert_eq!(names, vec!["Get", "Set"]);
}

#[test]
fn ReflectionModule___full_pipeline___accessors_and_archetypes_generated() {
    let dir = TempDir::new().unwrap();
    let mut unit = reflection_unit(&dir);
    let result = sample_result();

    unit.generate_code(&result).unwrap();
    let header = unit.render_header(&result);
    let source = unit.render_source(&result);

    let foo_footer = header
        .split("#define ns_Foo_GENERATED")
        .nth(1)
        .and_then(|rest| rest.split("#define").next())
        .unwrap();
    assert!(foo_footer.contains("getBar() const noexcept { return bar; }"));
    assert!(!foo_footer.contains("getBaz"));

    let bar_footer = header
        .split("#define Bar_GENERATED")
        .nth(1)
        .and_then(|rest| rest.split("#define").next())
        .unwrap();
    assert!(bar_footer.contains("void setX(int const& value) noexcept { x = value; }"));
    assert!(bar_footer.contains("getX() const noexcept { return x; }"));

    assert!(header.contains(
        "SAMPLE_API char const* const* headergenArchetypes_Sample(std::size_t& count) noexcept;"
    ));
    assert!(source.contains("static char const* const names[] = { \"ns::Foo\", \"Bar\", nullptr };"));
    assert!(source.contains("count = 2;"));
    assert!(header.contains("template <typename T> char const* enumToString(T value) noexcept;"));
}

#[test]
fn ReflectionModule___set_on_const_field___generation_fails() {
    let dir = TempDir::new().unwrap();
    let mut unit = reflection_unit(&dir);
    let mut result = sample_result();
    result.structs[0].fields[0].ty = const_int_type();

    let error = unit.generate_code(&result).unwrap_err();

    assert!(matches!(error, crate::GenerationError::Traversal(_)));
}

#[test]
fn ReflectionModule___regenerated_file___archetypes_reset() {
    let dir = TempDir::new().unwrap();
    let mut unit = reflection_unit(&dir);
    let result = sample_result();

    unit.generate_code(&result).unwrap();
    unit.generate_code(&result).unwrap();

    assert!(unit.render_source(&result).contains("count = 2;"));
}
