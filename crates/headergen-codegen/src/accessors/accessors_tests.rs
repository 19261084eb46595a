#![allow(non_snake_case)]

use super::*;
use crate::test_support::{const_int_type, field, sample_result};
use headergen_core::{CollectingLogger, FileParsingResult, Settings};
use test_case::test_case;

fn run_get(field: &FieldInfo, property: &Property, location: CodeGenLocation) -> (VisitControl, String) {
    let result = FileParsingResult::new("Foo.h");
    let settings = Settings::default();
    let env = MacroCodeGenEnv::new(&result, &settings, None).at(location);
    let mut out = String::new();
    let control = GetPropertyCodeGen::new().generate_code_for_entity(
        EntityRef::Field(field),
        property,
        0,
        &env,
        &mut out,
    );
    (control, out)
}

fn run_set(
    field: &FieldInfo,
    property: &Property,
    logger: &CollectingLogger,
) -> (VisitControl, String) {
    let result = FileParsingResult::new("Foo.h");
    let settings = Settings::default();
    let env = MacroCodeGenEnv::new(&result, &settings, Some(logger)).at(CodeGenLocation::ClassFooter);
    let mut out = String::new();
    let control = SetPropertyCodeGen::new().generate_code_for_entity(
        EntityRef::Field(field),
        property,
        0,
        &env,
        &mut out,
    );
    (control, out)
}

#[test_case(&[], "public: int getBar() const noexcept { return bar; }\\\n" ; "by value")]
#[test_case(&["&"], "public: int& getBar() noexcept { return bar; }\\\n" ; "reference")]
#[test_case(&["const", "&"], "public: int const& getBar() const noexcept { return bar; }\\\n" ; "const reference")]
#[test_case(&["*"], "public: int* getBar() noexcept { return &bar; }\\\n" ; "pointer")]
#[test_case(&["const", "*"], "public: int const* getBar() const noexcept { return &bar; }\\\n" ; "const pointer")]
#[test_case(&["explicit"], "public: int getBar() const noexcept;\\\n" ; "explicit")]
fn GetPropertyCodeGen___arguments___shape_getter(arguments: &[&str], expected: &str) {
    let bar = field("bar", "Foo", Vec::new());
    let property = Property::with_arguments("Get", arguments.iter().copied());

    let (control, out) = run_get(&bar, &property, CodeGenLocation::ClassFooter);

    assert_eq!(control, VisitControl::Recurse);
    assert_eq!(out, expected);
}

#[test]
fn GetPropertyCodeGen___static_field___static_getter() {
    let mut counter = field("m_counter", "Foo", Vec::new());
    counter.qualifiers.is_static = true;

    let (_, out) = run_get(&counter, &Property::new("Get"), CodeGenLocation::ClassFooter);

    assert_eq!(out, "public: static int getCounter() noexcept { return m_counter; }\\\n");
}

#[test]
fn GetPropertyCodeGen___outside_class_footer___emits_nothing() {
    let bar = field("bar", "Foo", Vec::new());

    let (control, out) = run_get(&bar, &Property::new("Get"), CodeGenLocation::HeaderFileHeader);

    assert_eq!(control, VisitControl::Recurse);
    assert!(out.is_empty());
}

#[test_case(&["volatile"] ; "unknown argument")]
#[test_case(&["&", "*"] ; "reference and pointer")]
fn GetPropertyCodeGen___invalid_arguments___fails(arguments: &[&str]) {
    let bar = field("bar", "Foo", Vec::new());
    let property = Property::with_arguments("Get", arguments.iter().copied());

    let (control, out) = run_get(&bar, &property, CodeGenLocation::HeaderFileHeader);

    assert_eq!(control, VisitControl::AbortWithFailure);
    assert!(out.is_empty());
}

#[test]
fn GetPropertyCodeGen___non_field___ignored() {
    let result = sample_result();
    let settings = Settings::default();
    let env = MacroCodeGenEnv::new(&result, &settings, None).at(CodeGenLocation::ClassFooter);
    let mut out = String::new();

    let control = GetPropertyCodeGen::new().generate_code_for_entity(
        EntityRef::StructClass(&result.structs[0]),
        &Property::new("Get"),
        0,
        &env,
        &mut out,
    );

    assert_eq!(control, VisitControl::Recurse);
    assert!(out.is_empty());
}

#[test]
fn SetPropertyCodeGen___mutable_field___emits_setter() {
    let logger = CollectingLogger::new();
    let bar = field("_bar", "Foo", Vec::new());

    let (control, out) = run_set(&bar, &Property::new("Set"), &logger);

    assert_eq!(control, VisitControl::Recurse);
    assert_eq!(
        out,
        "public: void setBar(int const& value) noexcept { _bar = value; }\\\n"
    );
}

#[test]
fn SetPropertyCodeGen___explicit___declaration_only() {
    let logger = CollectingLogger::new();
    let bar = field("bar", "Foo", Vec::new());

    let (_, out) = run_set(&bar, &Property::with_arguments("Set", ["explicit"]), &logger);

    assert_eq!(out, "public: void setBar(int const& value) noexcept;\\\n");
}

#[test]
fn SetPropertyCodeGen___const_field___logs_error_and_fails() {
    let logger = CollectingLogger::new();
    let mut bar = field("bar", "Foo", Vec::new());
    bar.ty = const_int_type();

    let (control, out) = run_set(&bar, &Property::new("Set"), &logger);

    assert_eq!(control, VisitControl::AbortWithFailure);
    assert!(out.is_empty());
    let errors = logger.messages(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Foo::bar"));
    assert!(errors[0].contains("const field"));
}

#[test]
fn SetPropertyCodeGen___unknown_argument___fails() {
    let logger = CollectingLogger::new();
    let bar = field("bar", "Foo", Vec::new());

    let (control, _) = run_set(&bar, &Property::with_arguments("Set", ["&"]), &logger);

    assert_eq!(control, VisitControl::AbortWithFailure);
    assert_eq!(logger.messages(LogLevel::Error).len(), 1);
}

#[test_case("bar", "Bar")]
#[test_case("m_bar", "Bar")]
#[test_case("__bar", "Bar")]
#[test_case("_", "_")]
#[test_case("x", "X")]
fn accessor_suffix___field_names___capitalized_without_prefix(name: &str, expected: &str) {
    assert_eq!(accessor_suffix(name), expected);
}
