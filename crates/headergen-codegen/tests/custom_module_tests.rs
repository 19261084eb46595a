#![allow(non_snake_case)]

use headergen_codegen::{
    CodeGenLocation, CodeGenModule, CodeGenUnit, CodeGenUnitState, MacroCodeGenEnv,
    MacroCodeGenUnit, PropertyCodeGen, VisitControl,
};
use headergen_core::{EntityKind, EntityRef, Property, Settings};
use headergen_parser::{AstNode, AstType, CursorKind, FileParser, MemoryFrontEnd, TranslationUnit};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Emits a `typeName()` accessor in every struct and class footer
struct TypeNameModule;

impl CodeGenModule for TypeNameModule {
    fn name(&self) -> &str {
        "TypeName"
    }

    fn create_property_code_gens(&self) -> Vec<Box<dyn PropertyCodeGen>> {
        vec![Box::new(DocPropertyCodeGen)]
    }

    fn generate_code_for_entity(
        &mut self,
        entity: EntityRef<'_>,
        env: &MacroCodeGenEnv<'_>,
        out: &mut String,
    ) -> VisitControl {
        if env.location() == CodeGenLocation::ClassFooter && entity.as_struct_class().is_some() {
            out.push_str(&format!(
                "static constexpr char const* typeName() noexcept {{ return \"{}\"; }}{}",
                entity.full_name(),
                env.separator()
            ));
        }
        VisitControl::Recurse
    }
}

/// `Doc("...")` on a field becomes a `doc_<field>()` accessor
struct DocPropertyCodeGen;

impl PropertyCodeGen for DocPropertyCodeGen {
    fn property_name(&self) -> &str {
        "Doc"
    }

    fn eligible_entity_mask(&self) -> EntityKind {
        EntityKind::FIELD
    }

    fn generation_order(&self) -> i32 {
        1
    }

    fn generate_code_for_entity(
        &mut self,
        entity: EntityRef<'_>,
        property: &Property,
        _property_index: usize,
        env: &MacroCodeGenEnv<'_>,
        out: &mut String,
    ) -> VisitControl {
        if env.location() != CodeGenLocation::ClassFooter {
            return VisitControl::Continue;
        }
        let Some(text) = property.arguments.first() else {
            return VisitControl::AbortWithFailure;
        };
        out.push_str(&format!(
            "static constexpr char const* doc_{}() noexcept {{ return {text}; }}{}",
            entity.entity().name,
            env.separator()
        ));
        VisitControl::Continue
    }
}

fn widget_parser(field_annotation: &str) -> FileParser {
    let unit = TranslationUnit::new("Widget.h").with_declaration(
        AstNode::new(CursorKind::Namespace, "ui").with_child(
            AstNode::new(CursorKind::StructDecl, "Widget")
                .annotated("KGS:")
                .with_child(
                    AstNode::new(CursorKind::FieldDecl, "width")
                        .annotated(field_annotation)
                        .with_type(AstType::builtin("float", 4))
                        .with_field_offset_bits(0),
                ),
        ),
    );
    FileParser::new(
        Arc::new(MemoryFrontEnd::new().with_unit("Widget.h", unit)),
        Arc::new(Settings::default()),
    )
}

fn unit_writing_to(dir: &TempDir) -> MacroCodeGenUnit {
    let mut settings = Settings::default();
    settings.codegen.output_directory = dir.path().to_path_buf();
    MacroCodeGenUnit::new(Arc::new(settings)).with_module(|| Box::new(TypeNameModule))
}

#[test]
fn MacroCodeGenUnit___user_module___fills_struct_footer() {
    let out = TempDir::new().unwrap();
    let result = widget_parser("KGF:Doc(\"Width in pixels\")")
        .parse(Path::new("Widget.h"))
        .unwrap();
    let mut unit = unit_writing_to(&out);

    unit.generate_code(&result).unwrap();

    let header = std::fs::read_to_string(out.path().join("Widget.h.h")).unwrap();
    assert!(header.contains(
        "#define ui_Widget_GENERATED\\\n\
         static constexpr char const* typeName() noexcept { return \"ui::Widget\"; }\\\n\
         static constexpr char const* doc_width() noexcept { return \"Width in pixels\"; }\\\n"
    ));
    assert!(header.contains("#define File_Widget_GENERATED\n"));
    assert_eq!(unit.state(), CodeGenUnitState::Done);
}

#[test]
fn MacroCodeGenUnit___property_generator_aborts___unit_fails() {
    let out = TempDir::new().unwrap();
    let result = widget_parser("KGF:Doc").parse(Path::new("Widget.h")).unwrap();
    let mut unit = unit_writing_to(&out);

    let outcome = unit.generate_code(&result);

    assert!(outcome.is_err());
    assert_eq!(unit.state(), CodeGenUnitState::Failed);
    assert!(!out.path().join("Widget.h.h").exists());
}

#[test]
fn MacroCodeGenUnit___user_module___registered_before_its_property_generator() {
    let out = TempDir::new().unwrap();

    let unit = unit_writing_to(&out);

    assert_eq!(unit.generator_names(), vec!["TypeName", "Doc"]);
}
