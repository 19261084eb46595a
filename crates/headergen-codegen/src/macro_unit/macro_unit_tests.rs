#![allow(non_snake_case)]

use super::*;
use crate::generator::PropertyCodeGen;
use crate::test_support::{
    CallLog, RecordingModule, RecordingPropertyGen, call_log, class, field, sample_result,
};
use headergen_core::{CollectingLogger, EntityInfo, EntityKind, NamespaceInfo};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

fn settings_in(dir: &TempDir) -> Arc<Settings> {
    let mut settings = Settings::default();
    settings.codegen.output_directory = dir.path().join("Generated");
    Arc::new(settings)
}

fn recording_unit(settings: Arc<Settings>, log: &CallLog) -> MacroCodeGenUnit {
    let log = Arc::clone(log);
    MacroCodeGenUnit::new(settings)
        .with_module(move || Box::new(RecordingModule::new("m", &log)) as Box<dyn CodeGenModule>)
}

fn set_modified(path: &Path, time: SystemTime) {
    std::fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

struct FailingPhase {
    fail_initial: bool,
}

impl CodeGenModule for FailingPhase {
    fn name(&self) -> &str {
        "failing"
    }

    fn initial_generate_code(&mut self, _env: &MacroCodeGenEnv<'_>, _out: &mut String) -> bool {
        !self.fail_initial
    }

    fn generate_code_for_entity(
        &mut self,
        _entity: EntityRef<'_>,
        _env: &MacroCodeGenEnv<'_>,
        _out: &mut String,
    ) -> VisitControl {
        VisitControl::Recurse
    }

    fn final_generate_code(&mut self, _env: &MacroCodeGenEnv<'_>, _out: &mut String) -> bool {
        self.fail_initial
    }
}

/// Module emitting only in class footers, one line per field
struct FieldLister;

impl CodeGenModule for FieldLister {
    fn name(&self) -> &str {
        "fields"
    }

    fn generate_code_for_entity(
        &mut self,
        entity: EntityRef<'_>,
        env: &MacroCodeGenEnv<'_>,
        out: &mut String,
    ) -> VisitControl {
        if env.location() == CodeGenLocation::ClassFooter {
            if let Some(field) = entity.as_field() {
                out.push_str(&format!("FIELD({}){}", field.entity.name, env.separator()));
            }
        }
        VisitControl::Recurse
    }
}

struct WithPropertyGens;

impl CodeGenModule for WithPropertyGens {
    fn name(&self) -> &str {
        "owner"
    }

    fn generation_order(&self) -> i32 {
        2
    }

    fn create_property_code_gens(&self) -> Vec<Box<dyn PropertyCodeGen>> {
        let log = call_log();
        vec![
            Box::new(RecordingPropertyGen::new("Get", EntityKind::FIELD, &log)),
            Box::new(RecordingPropertyGen::new("Deep", EntityKind::FIELD, &log)),
        ]
    }

    fn generate_code_for_entity(
        &mut self,
        _entity: EntityRef<'_>,
        _env: &MacroCodeGenEnv<'_>,
        _out: &mut String,
    ) -> VisitControl {
        VisitControl::Recurse
    }
}

#[test]
fn MacroCodeGenUnit___generate_code___writes_header_and_source() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let log = call_log();
    let mut unit = recording_unit(Arc::clone(&settings), &log);
    let result = sample_result();

    unit.generate_code(&result).unwrap();

    assert_eq!(unit.state(), CodeGenUnitState::Done);
    let header = std::fs::read_to_string(dir.path().join("Generated/Sample.h.h")).unwrap();
    let source = std::fs::read_to_string(dir.path().join("Generated/Sample.src.h")).unwrap();
    assert!(header.starts_with("#pragma once\n\n#include \"EntityMacros.h\"\n"));
    assert!(header.contains("#define ns_Foo_GENERATED\\\n// m ns::Foo\\\n"));
    assert!(header.contains("#define Bar_GENERATED\\\n"));
    assert!(header.contains("#define File_Sample_GENERATED\\\n// m ns\\\n"));
    assert!(source.contains("#include \"Sample.h.h\""));
    assert!(source.contains("// m ns::Color::Red\n"));
}

#[test]
fn MacroCodeGenUnit___class_footer_code___routed_to_owning_class() {
    let dir = TempDir::new().unwrap();
    let mut unit = MacroCodeGenUnit::new(settings_in(&dir)).with_module(|| Box::new(FieldLister));
    let result = sample_result();

    unit.generate_code(&result).unwrap();
    let header = unit.render_header(&result);

    assert!(header.contains("#define ns_Foo_GENERATED\\\nFIELD(bar)\\\nFIELD(baz)\\\n\n"));
    assert!(header.contains("#define Bar_GENERATED\\\nFIELD(x)\\\n\n"));
    assert!(header.contains("#define File_Sample_GENERATED\n"));
}

#[test]
fn MacroCodeGenUnit___class_without_generated_code___still_gets_footer_macro() {
    let dir = TempDir::new().unwrap();
    let unit = MacroCodeGenUnit::new(settings_in(&dir));
    let result = sample_result();

    let header = unit.render_header(&result);

    assert!(header.contains("#define ns_Foo_GENERATED\n"));
    assert!(header.contains("#define Bar_GENERATED\n"));
}

#[test]
fn MacroCodeGenUnit___forward_declaration___no_duplicate_footer() {
    let dir = TempDir::new().unwrap();
    let unit = MacroCodeGenUnit::new(settings_in(&dir));
    let mut result = sample_result();
    let mut forward = result.structs[0].clone();
    forward.is_forward_declaration = true;
    forward.fields.clear();
    result.structs.insert(0, forward);

    let header = unit.render_header(&result);

    assert_eq!(header.matches("#define Bar_GENERATED").count(), 1);
}

#[test]
fn MacroCodeGenUnit___reopened_namespace___footer_code_stays_with_its_class() {
    let dir = TempDir::new().unwrap();
    let mut unit = MacroCodeGenUnit::new(settings_in(&dir)).with_module(|| Box::new(FieldLister));
    let block = |class_name: &str, field_name: &str| {
        let owner = format!("ns::{class_name}");
        let mut sc = class(EntityKind::CLASS, &owner, vec![field(field_name, &owner, Vec::new())]);
        sc.entity.id = format!("c:@N@ns@S@{class_name}");
        NamespaceInfo {
            entity: EntityInfo::new(EntityKind::NAMESPACE, "ns", "ns").with_id("c:@N@ns"),
            classes: vec![sc],
            ..NamespaceInfo::default()
        }
    };
    let mut result = FileParsingResult::new("Reopened.h");
    result.namespaces.push(block("A", "a"));
    result.namespaces.push(block("B", "b"));
    result.refresh_outer_entities();

    unit.generate_code(&result).unwrap();
    let header = unit.render_header(&result);

    assert!(header.contains("#define ns_A_GENERATED\\\nFIELD(a)\\\n\n"), "{header}");
    assert!(header.contains("#define ns_B_GENERATED\\\nFIELD(b)\\\n\n"), "{header}");
}

#[test]
fn MacroCodeGenUnit___footer_macro_collision___first_kept_and_warning_logged() {
    let dir = TempDir::new().unwrap();
    let logger = Arc::new(CollectingLogger::new());
    let mut unit = MacroCodeGenUnit::new(settings_in(&dir))
        .with_logger(logger.clone())
        .with_module(|| Box::new(FieldLister));
    let mut result = FileParsingResult::new("Clash.h");
    result.namespaces.push(NamespaceInfo {
        entity: EntityInfo::new(EntityKind::NAMESPACE, "a", "a"),
        classes: vec![class(EntityKind::CLASS, "a::B", vec![field("nested", "a::B", Vec::new())])],
        ..NamespaceInfo::default()
    });
    result
        .classes
        .push(class(EntityKind::CLASS, "a_B", vec![field("flat", "a_B", Vec::new())]));
    result.refresh_outer_entities();

    unit.generate_code(&result).unwrap();
    let header = unit.render_header(&result);

    assert_eq!(header.matches("#define a_B_GENERATED").count(), 1);
    assert!(header.contains("FIELD(nested)"));
    assert!(!header.contains("FIELD(flat)"));
    let warnings = logger.messages(LogLevel::Warning);
    assert!(
        warnings
            .iter()
            .any(|m| m.contains("a_B_GENERATED") && m.contains("a::B") && m.contains("a_B ")),
        "{warnings:?}"
    );
}

#[test]
fn MacroCodeGenUnit___initial_failure___failed_and_nothing_written() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let mut unit = MacroCodeGenUnit::new(Arc::clone(&settings))
        .with_module(|| Box::new(FailingPhase { fail_initial: true }));
    let result = sample_result();

    let error = unit.generate_code(&result).unwrap_err();

    assert!(matches!(
        error,
        GenerationError::Generator { phase: CodeGenUnitState::InitialGenerate, .. }
    ));
    assert_eq!(unit.state(), CodeGenUnitState::Failed);
    assert!(!settings.codegen.generated_source_path(&result.parsed_file).exists());
}

#[test]
fn MacroCodeGenUnit___final_failure___reports_final_phase() {
    let dir = TempDir::new().unwrap();
    let mut unit = MacroCodeGenUnit::new(settings_in(&dir))
        .with_module(|| Box::new(FailingPhase { fail_initial: false }));

    let error = unit.generate_code(&sample_result()).unwrap_err();

    assert!(matches!(
        error,
        GenerationError::Generator { phase: CodeGenUnitState::FinalGenerate, .. }
    ));
}

#[test]
fn MacroCodeGenUnit___traversal_failure___previous_output_untouched() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let result = sample_result();
    let header_path = settings.codegen.generated_header_path(&result.parsed_file);
    std::fs::create_dir_all(header_path.parent().unwrap()).unwrap();
    std::fs::write(&header_path, "previous run").unwrap();
    let log = call_log();
    let logger = Arc::new(CollectingLogger::new());
    let failing_log = Arc::clone(&log);
    let mut unit = MacroCodeGenUnit::new(settings)
        .with_logger(logger.clone())
        .with_module(move || {
            Box::new(RecordingModule::new("m", &failing_log).failing_on("ns::Foo::bar"))
        });

    let error = unit.generate_code(&result).unwrap_err();

    assert!(matches!(error, GenerationError::Traversal(_)));
    assert_eq!(std::fs::read_to_string(&header_path).unwrap(), "previous run");
    assert_eq!(logger.messages(LogLevel::Error).len(), 1);
}

#[test]
fn MacroCodeGenUnit___abort_with_success___still_finalizes_and_writes() {
    let dir = TempDir::new().unwrap();
    let log = call_log();
    let module_log = Arc::clone(&log);
    let mut unit = MacroCodeGenUnit::new(settings_in(&dir)).with_module(move || {
        Box::new(RecordingModule::new("m", &module_log).returning(VisitControl::AbortWithSuccess))
    });

    unit.generate_code(&sample_result()).unwrap();

    assert_eq!(unit.state(), CodeGenUnitState::Done);
    assert_eq!(*log.lock(), vec!["m:ns".to_string()]);
}

#[test]
fn MacroCodeGenUnit___sequential_files___state_restarts_per_file() {
    let dir = TempDir::new().unwrap();
    let log = call_log();
    let mut unit = recording_unit(settings_in(&dir), &log);
    let first = sample_result();
    let mut second = sample_result();
    second.parsed_file = "Other.h".into();

    unit.generate_code(&first).unwrap();
    unit.generate_code(&second).unwrap();

    assert_eq!(unit.state(), CodeGenUnitState::Done);
    assert!(dir.path().join("Generated/Other.h.h").exists());
}

#[test]
fn MacroCodeGenUnit___clone___builds_fresh_modules() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let log = call_log();
    let dir = TempDir::new().unwrap();
    let unit = MacroCodeGenUnit::new(settings_in(&dir)).with_module(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::new(RecordingModule::new("m", &log))
    });

    let copy = unit.clone();

    assert_eq!(built.load(Ordering::SeqCst), 2);
    assert_eq!(copy.generator_names(), vec!["m"]);
    assert_eq!(copy.state(), CodeGenUnitState::Idle);
}

#[test]
fn MacroCodeGenUnit___module_with_property_gens___all_registered_sorted() {
    let log = call_log();
    let dir = TempDir::new().unwrap();
    let unit = MacroCodeGenUnit::new(settings_in(&dir))
        .with_module(|| Box::new(WithPropertyGens))
        .with_module(move || Box::new(RecordingModule::new("first", &log).with_order(-1)));

    assert_eq!(unit.generator_names(), vec!["first", "Get", "Deep", "owner"]);
}

#[test]
fn MacroCodeGenUnit___overall_iteration_count___max_of_modules() {
    let log = call_log();
    let dir = TempDir::new().unwrap();
    let unit = MacroCodeGenUnit::new(settings_in(&dir))
        .with_module(move || {
            let mut module = RecordingModule::new("thrice", &log);
            module.iterations = 3;
            Box::new(module)
        })
        .with_module(|| Box::new(FieldLister));

    assert_eq!(unit.overall_iteration_count(), 3);
    assert_eq!(MacroCodeGenUnit::new(settings_in(&dir)).overall_iteration_count(), 1);
}

#[test]
fn MacroCodeGenUnit___is_up_to_date___missing_header_creates_placeholder() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let unit = MacroCodeGenUnit::new(Arc::clone(&settings));
    let source = dir.path().join("Foo.h");
    std::fs::write(&source, "class Foo {};").unwrap();

    assert!(!unit.is_up_to_date(&source));

    let header = settings.codegen.generated_header_path(&source);
    assert_eq!(std::fs::read_to_string(header).unwrap(), "");
}

#[test]
fn MacroCodeGenUnit___is_up_to_date___after_generation_then_touch() {
    let dir = TempDir::new().unwrap();
    let log = call_log();
    let mut unit = recording_unit(settings_in(&dir), &log);
    let source = dir.path().join("Sample.h");
    std::fs::write(&source, "class Foo {};").unwrap();
    set_modified(&source, SystemTime::now() - Duration::from_secs(60));
    let mut result = sample_result();
    result.parsed_file = source.clone();

    unit.generate_code(&result).unwrap();
    assert!(unit.is_up_to_date(&source));

    set_modified(&source, SystemTime::now() + Duration::from_secs(60));
    assert!(!unit.is_up_to_date(&source));
}

#[test]
fn MacroCodeGenUnit___is_up_to_date___stale_generated_source_is_not_up_to_date() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let log = call_log();
    let mut unit = recording_unit(Arc::clone(&settings), &log);
    let source = dir.path().join("Sample.h");
    std::fs::write(&source, "class Foo {};").unwrap();
    set_modified(&source, SystemTime::now() - Duration::from_secs(60));
    let mut result = sample_result();
    result.parsed_file = source.clone();
    unit.generate_code(&result).unwrap();

    set_modified(
        &settings.codegen.generated_source_path(&source),
        SystemTime::now() - Duration::from_secs(120),
    );

    assert!(!unit.is_up_to_date(&source));
}

#[test]
fn MacroCodeGenUnit___prepare_output___invalid_settings_rejected() {
    let mut settings = Settings::default();
    settings.codegen.generated_source_file_name_pattern =
        settings.codegen.generated_header_file_name_pattern.clone();
    let unit = MacroCodeGenUnit::new(Arc::new(settings));

    let error = unit.prepare_output().unwrap_err();

    assert!(matches!(error, GenerationError::Settings(_)));
}

#[test]
fn MacroCodeGenUnit___prepare_output___creates_output_directory() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);
    let unit = MacroCodeGenUnit::new(Arc::clone(&settings));

    unit.prepare_output().unwrap();

    assert!(settings.codegen.output_directory.is_dir());
}

#[test]
fn MacroCodeGenUnit___generate_twice___identical_output() {
    let dir = TempDir::new().unwrap();
    let log = call_log();
    let mut unit = recording_unit(settings_in(&dir), &log);
    let result = sample_result();

    unit.generate_code(&result).unwrap();
    let first = unit.render_header(&result);
    unit.generate_code(&result).unwrap();

    assert_eq!(unit.render_header(&result), first);
}
