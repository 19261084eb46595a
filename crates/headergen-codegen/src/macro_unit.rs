//! Code-gen unit emitting generated code through footer macros

use crate::env::{CodeGenLocation, MacroCodeGenEnv};
use crate::error::GenerationError;
use crate::generator::{
    CodeGenModule, ModuleFactory, RegisteredGenerator, module_iteration_count,
    sort_by_generation_order,
};
use crate::traversal::traverse;
use crate::unit::{CodeGenUnit, CodeGenUnitState};
use headergen_core::{EntityRef, FileParsingResult, LogLevel, Logger, Settings, VisitControl};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

/// Text accumulated for one file, per location
#[derive(Debug, Default)]
struct GeneratedCode {
    header_file_header: String,
    /// Keyed by struct/class position, ids being shared by redeclarations
    class_footers: HashMap<Vec<usize>, String>,
    header_file_footer: String,
    source_file_header: String,
}

impl GeneratedCode {
    fn file_level_mut(&mut self, location: CodeGenLocation) -> Option<&mut String> {
        match location {
            CodeGenLocation::HeaderFileHeader => Some(&mut self.header_file_header),
            CodeGenLocation::HeaderFileFooter => Some(&mut self.header_file_footer),
            CodeGenLocation::SourceFileHeader => Some(&mut self.source_file_header),
            CodeGenLocation::ClassFooter => None,
        }
    }

    /// Route code emitted for `entity` at `location`
    fn push(
        &mut self,
        location: CodeGenLocation,
        result: &FileParsingResult,
        entity: EntityRef<'_>,
        code: &str,
    ) {
        if let Some(buffer) = self.file_level_mut(location) {
            buffer.push_str(code);
            return;
        }

        match footer_owner(result, entity) {
            Some(owner) => self
                .class_footers
                .entry(owner.to_vec())
                .or_default()
                .push_str(code),
            None => tracing::debug!(
                entity = entity.full_name(),
                "Class footer code emitted outside of any struct or class, dropped"
            ),
        }
    }
}

/// Position of the struct/class whose footer receives the code of `entity`.
///
/// Each step resolves a positional handle, so the walk costs the nesting
/// depth squared whatever the size of the file.
fn footer_owner<'a>(result: &'a FileParsingResult, entity: EntityRef<'a>) -> Option<&'a [usize]> {
    let mut current = entity;
    loop {
        if let Some(sc) = current.as_struct_class() {
            return Some(&sc.entity.position);
        }
        current = result.outer_entity_of(current.entity())?;
    }
}

/// Generation strategy writing, for each parsed header, a generated header
/// holding one footer macro per struct/class plus a file footer macro, and a
/// generated source file including it.
pub struct MacroCodeGenUnit {
    settings: Arc<Settings>,
    logger: Option<Arc<dyn Logger>>,
    factories: Vec<ModuleFactory>,
    generators: Vec<RegisteredGenerator>,
    overall_iteration_count: u32,
    state: CodeGenUnitState,
    code: GeneratedCode,
}

impl std::fmt::Debug for MacroCodeGenUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroCodeGenUnit")
            .field("generators", &self.generators)
            .field("overall_iteration_count", &self.overall_iteration_count)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Clone for MacroCodeGenUnit {
    /// Copies configuration only: every module is built anew from its factory
    fn clone(&self) -> Self {
        let mut unit = Self::new(Arc::clone(&self.settings));
        unit.logger = self.logger.clone();
        for factory in &self.factories {
            unit.add_module(Arc::clone(factory));
        }
        unit
    }
}

impl MacroCodeGenUnit {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            logger: None,
            factories: Vec::new(),
            generators: Vec::new(),
            overall_iteration_count: 1,
            state: CodeGenUnitState::Idle,
            code: GeneratedCode::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Register a module built by `factory`
    pub fn with_module<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn CodeGenModule> + Send + Sync + 'static,
    {
        self.add_module(Arc::new(factory));
        self
    }

    /// Register a module along with its property generators
    pub fn add_module(&mut self, factory: ModuleFactory) {
        let module = factory();
        let property_code_gens = module.create_property_code_gens();
        self.overall_iteration_count = self
            .overall_iteration_count
            .max(module_iteration_count(module.as_ref(), &property_code_gens));

        tracing::debug!(
            module = module.name(),
            property_code_gens = property_code_gens.len(),
            "Registered code-gen module"
        );

        self.generators.push(RegisteredGenerator::Module(module));
        self.generators.extend(
            property_code_gens
                .into_iter()
                .map(RegisteredGenerator::Property),
        );
        sort_by_generation_order(&mut self.generators);
        self.factories.push(factory);
    }

    /// Highest iteration count of the registered modules, at least 1
    pub fn overall_iteration_count(&self) -> u32 {
        self.overall_iteration_count
    }

    /// Names of the registered generators in execution order
    pub fn generator_names(&self) -> Vec<&str> {
        self.generators.iter().map(RegisteredGenerator::name).collect()
    }

    /// Content of the generated header for the last generated `result`
    pub fn render_header(&self, result: &FileParsingResult) -> String {
        let codegen = &self.settings.codegen;
        let mut out = String::from("#pragma once\n\n");
        out.push_str(&format!(
            "#include \"{}\"\n\n",
            codegen.entity_macros_file_name
        ));

        if !self.code.header_file_header.is_empty() {
            out.push_str(&self.code.header_file_header);
            if !self.code.header_file_header.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
        }

        // Footer macro name to the full name of the class it was emitted for
        let mut emitted: HashMap<String, String> = HashMap::new();
        result.for_each_struct_class(|sc| {
            if sc.is_forward_declaration {
                return;
            }
            let name = codegen.class_footer_macro(&sc.entity.full_name);
            if let Some(first) = emitted.get(&name) {
                if *first != sc.entity.full_name {
                    let message = format!(
                        "Footer macro {name} of {} already defined for {first}, its generated code is dropped",
                        sc.entity.full_name
                    );
                    tracing::warn!(
                        file = %result.parsed_file.display(),
                        class = %sc.entity.full_name,
                        other = %first,
                        "Footer macro name collision"
                    );
                    self.log(LogLevel::Warning, &message);
                }
                return;
            }
            emitted.insert(name.clone(), sc.entity.full_name.clone());

            let body = self
                .code
                .class_footers
                .get(&sc.entity.position)
                .map(String::as_str)
                .unwrap_or_default();
            out.push_str(&define(&name, body));
        });

        out.push_str(&define(
            &codegen.header_file_footer_macro(&result.parsed_file),
            &self.code.header_file_footer,
        ));
        out
    }

    /// Content of the generated source file for the last generated `result`
    pub fn render_source(&self, result: &FileParsingResult) -> String {
        let header = self
            .settings
            .codegen
            .generated_header_path(&result.parsed_file);
        let header_name = header
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut out = format!("#pragma once\n\n#include \"{header_name}\"\n\n");
        out.push_str(&self.code.source_file_header);
        out
    }

    fn transition(&mut self, target: CodeGenUnitState) -> Result<(), GenerationError> {
        if !self.state.can_transition_to(target) {
            return Err(GenerationError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }
        self.state = target;
        Ok(())
    }

    fn log(&self, level: LogLevel, message: &str) {
        if let Some(logger) = &self.logger {
            logger.log(level, message);
        }
    }

    fn run_pipeline(&mut self, result: &FileParsingResult) -> Result<(), GenerationError> {
        self.transition(CodeGenUnitState::PreGenerate)?;
        self.prepare_output()?;
        self.code = GeneratedCode::default();

        let settings = Arc::clone(&self.settings);
        let logger = self.logger.clone();
        let env = MacroCodeGenEnv::new(result, &settings, logger.as_deref());

        self.transition(CodeGenUnitState::InitialGenerate)?;
        self.run_file_level(&env, CodeGenUnitState::InitialGenerate)?;

        self.transition(CodeGenUnitState::PerEntityGenerate)?;
        'locations: for location in CodeGenLocation::ALL {
            for iteration in 0..self.overall_iteration_count {
                let env = env.at(location).with_iteration(iteration);
                let code = &mut self.code;
                let control = traverse(&mut self.generators, &env, &mut |entity, text| {
                    code.push(location, result, entity, &text);
                });

                match control {
                    VisitControl::AbortWithFailure => {
                        return Err(GenerationError::Traversal(result.parsed_file.clone()));
                    }
                    VisitControl::AbortWithSuccess => break 'locations,
                    _ => {}
                }
            }
        }

        self.transition(CodeGenUnitState::FinalGenerate)?;
        self.run_file_level(&env, CodeGenUnitState::FinalGenerate)?;

        self.transition(CodeGenUnitState::PostGenerate)?;
        self.write_files(result)?;

        self.transition(CodeGenUnitState::Done)
    }

    /// Initial or final callbacks of every generator, once per file-level location
    fn run_file_level(
        &mut self,
        env: &MacroCodeGenEnv<'_>,
        phase: CodeGenUnitState,
    ) -> Result<(), GenerationError> {
        for location in CodeGenLocation::FILE_LEVEL {
            let env = env.at(location);
            let Some(buffer) = self.code.file_level_mut(location) else {
                continue;
            };

            for generator in &mut self.generators {
                let succeeded = if phase == CodeGenUnitState::InitialGenerate {
                    generator.initial_generate_code(&env, buffer)
                } else {
                    generator.final_generate_code(&env, buffer)
                };

                if !succeeded {
                    return Err(GenerationError::Generator {
                        generator: generator.name().to_string(),
                        phase,
                        file: env.result().parsed_file.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn write_files(&self, result: &FileParsingResult) -> Result<(), GenerationError> {
        let codegen = &self.settings.codegen;
        let outputs = [
            (
                codegen.generated_header_path(&result.parsed_file),
                self.render_header(result),
            ),
            (
                codegen.generated_source_path(&result.parsed_file),
                self.render_source(result),
            ),
        ];

        for (path, content) in outputs {
            std::fs::write(&path, content)
                .map_err(|source| GenerationError::Io { path: path.clone(), source })?;
            tracing::debug!(path = %path.display(), "Wrote generated file");
        }
        Ok(())
    }
}

impl CodeGenUnit for MacroCodeGenUnit {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn state(&self) -> CodeGenUnitState {
        self.state
    }

    fn prepare_output(&self) -> Result<(), GenerationError> {
        self.settings.validate()?;

        let dir = &self.settings.codegen.output_directory;
        std::fs::create_dir_all(dir).map_err(|source| GenerationError::OutputDirectory {
            path: dir.clone(),
            source,
        })
    }

    /// Generated header and source must both be strictly newer than `source`.
    ///
    /// A missing generated header is created empty, since `source` may include
    /// it, and the file is reported stale.
    fn is_up_to_date(&self, source: &Path) -> bool {
        let codegen = &self.settings.codegen;
        let header = codegen.generated_header_path(source);

        if !header.exists() {
            if let Err(e) = create_placeholder(&header) {
                tracing::warn!(path = %header.display(), error = %e, "Could not create generated header placeholder");
            }
            return false;
        }

        let Some(source_time) = modified(source) else {
            return false;
        };
        let is_newer = |path: &Path| modified(path).is_some_and(|time| time > source_time);

        is_newer(&header) && is_newer(&codegen.generated_source_path(source))
    }

    fn generate_code(&mut self, result: &FileParsingResult) -> Result<(), GenerationError> {
        tracing::debug!(file = %result.parsed_file.display(), "Generating code");

        match self.run_pipeline(result) {
            Ok(()) => {
                tracing::info!(file = %result.parsed_file.display(), "Generated code");
                Ok(())
            }
            Err(e) => {
                tracing::error!(file = %result.parsed_file.display(), error = %e, "Code generation failed");
                self.log(LogLevel::Error, &e.to_string());
                self.state = CodeGenUnitState::Failed;
                Err(e)
            }
        }
    }
}

fn define(name: &str, body: &str) -> String {
    if body.is_empty() {
        format!("#define {name}\n\n")
    } else {
        format!("#define {name}\\\n{body}\n")
    }
}

fn create_placeholder(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, "")
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
#[path = "macro_unit/macro_unit_tests.rs"]
mod macro_unit_tests;
