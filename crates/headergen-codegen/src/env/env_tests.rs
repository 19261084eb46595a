#![allow(non_snake_case)]

use super::*;
use headergen_core::CollectingLogger;
use test_case::test_case;

#[test_case(CodeGenLocation::HeaderFileHeader, "\n" ; "header top")]
#[test_case(CodeGenLocation::ClassFooter, "\\\n" ; "class footer")]
#[test_case(CodeGenLocation::HeaderFileFooter, "\\\n" ; "header footer")]
#[test_case(CodeGenLocation::SourceFileHeader, "\n" ; "source top")]
fn CodeGenLocation___separator___continues_lines_inside_macros(
    location: CodeGenLocation,
    expected: &str,
) {
    assert_eq!(location.separator(), expected);
}

#[test]
fn CodeGenLocation___file_level___excludes_class_footer() {
    assert!(!CodeGenLocation::FILE_LEVEL.contains(&CodeGenLocation::ClassFooter));
    assert_eq!(CodeGenLocation::ALL.len(), CodeGenLocation::FILE_LEVEL.len() + 1);
}

#[test]
fn MacroCodeGenEnv___new___starts_at_header_top_first_iteration() {
    let result = FileParsingResult::new("Foo.h");
    let settings = Settings::default();

    let env = MacroCodeGenEnv::new(&result, &settings, None);

    assert_eq!(env.location(), CodeGenLocation::HeaderFileHeader);
    assert_eq!(env.iteration(), 0);
    assert_eq!(env.separator(), "\n");
}

#[test]
fn MacroCodeGenEnv___at_and_with_iteration___reposition_copy() {
    let result = FileParsingResult::new("Foo.h");
    let settings = Settings::default();
    let env = MacroCodeGenEnv::new(&result, &settings, None);

    let moved = env.at(CodeGenLocation::ClassFooter).with_iteration(2);

    assert_eq!(moved.location(), CodeGenLocation::ClassFooter);
    assert_eq!(moved.iteration(), 2);
    assert_eq!(env.location(), CodeGenLocation::HeaderFileHeader);
}

#[test]
fn MacroCodeGenEnv___symbol_macros___come_from_settings() {
    let result = FileParsingResult::new("Foo.h");
    let mut settings = Settings::default();
    settings.codegen.export_symbol_macro_name = "MY_API".to_string();

    let env = MacroCodeGenEnv::new(&result, &settings, None);

    assert_eq!(env.export_symbol_macro(), "MY_API");
    assert_eq!(env.internal_symbol_macro(), "");
}

#[test]
fn MacroCodeGenEnv___log___forwards_to_logger() {
    let result = FileParsingResult::new("Foo.h");
    let settings = Settings::default();
    let logger = CollectingLogger::new();
    let env = MacroCodeGenEnv::new(&result, &settings, Some(&logger));

    env.log(LogLevel::Warning, "careful");

    assert_eq!(logger.messages(LogLevel::Warning), vec!["careful".to_string()]);
}

#[test]
fn MacroCodeGenEnv___log_without_logger___is_silent() {
    let result = FileParsingResult::new("Foo.h");
    let settings = Settings::default();
    let env = MacroCodeGenEnv::new(&result, &settings, None);

    env.log(LogLevel::Error, "dropped");
}
