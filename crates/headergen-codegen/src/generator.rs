//! Code generator contracts

use crate::env::MacroCodeGenEnv;
use headergen_core::{EntityKind, EntityRef, Property, VisitControl};
use std::sync::Arc;

/// Generator invoked on every entity of a file.
///
/// A module may bundle [`PropertyCodeGen`]s, which the unit registers next to
/// it. Callbacks append to `out`; `false` or [`VisitControl::AbortWithFailure`]
/// fails the generation of the file.
pub trait CodeGenModule: Send {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Sort key, lower runs first
    fn generation_order(&self) -> i32 {
        0
    }

    fn iteration_count(&self) -> u32 {
        1
    }

    /// Property generators owned by this module, built fresh for each instance
    fn create_property_code_gens(&self) -> Vec<Box<dyn PropertyCodeGen>> {
        Vec::new()
    }

    fn initial_generate_code(&mut self, _env: &MacroCodeGenEnv<'_>, _out: &mut String) -> bool {
        true
    }

    fn generate_code_for_entity(
        &mut self,
        entity: EntityRef<'_>,
        env: &MacroCodeGenEnv<'_>,
        out: &mut String,
    ) -> VisitControl;

    fn final_generate_code(&mut self, _env: &MacroCodeGenEnv<'_>, _out: &mut String) -> bool {
        true
    }
}

/// Generator invoked once per matching property of an eligible entity
pub trait PropertyCodeGen: Send {
    /// Name of the property this generator reacts to
    fn property_name(&self) -> &str;

    /// Entity kinds this generator accepts
    fn eligible_entity_mask(&self) -> EntityKind;

    fn generation_order(&self) -> i32 {
        0
    }

    fn iteration_count(&self) -> u32 {
        1
    }

    fn initial_generate_code(&mut self, _env: &MacroCodeGenEnv<'_>, _out: &mut String) -> bool {
        true
    }

    /// Called with the matching `property` and its index in the entity's properties
    fn generate_code_for_entity(
        &mut self,
        entity: EntityRef<'_>,
        property: &Property,
        property_index: usize,
        env: &MacroCodeGenEnv<'_>,
        out: &mut String,
    ) -> VisitControl;

    fn final_generate_code(&mut self, _env: &MacroCodeGenEnv<'_>, _out: &mut String) -> bool {
        true
    }
}

/// Builds a fresh module instance for each code-gen unit
pub type ModuleFactory = Arc<dyn Fn() -> Box<dyn CodeGenModule> + Send + Sync>;

/// Effective iteration count of a module: its own or the highest of its
/// property generators
pub fn module_iteration_count(
    module: &dyn CodeGenModule,
    property_code_gens: &[Box<dyn PropertyCodeGen>],
) -> u32 {
    property_code_gens
        .iter()
        .map(|code_gen| code_gen.iteration_count())
        .fold(module.iteration_count(), u32::max)
        .max(1)
}

/// A generator registered in a code-gen unit
pub enum RegisteredGenerator {
    Module(Box<dyn CodeGenModule>),
    Property(Box<dyn PropertyCodeGen>),
}

impl std::fmt::Debug for RegisteredGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisteredGenerator::Module(_) => f.debug_tuple("Module").field(&self.name()).finish(),
            RegisteredGenerator::Property(_) => {
                f.debug_tuple("Property").field(&self.name()).finish()
            }
        }
    }
}

impl RegisteredGenerator {
    pub fn name(&self) -> &str {
        match self {
            RegisteredGenerator::Module(module) => module.name(),
            RegisteredGenerator::Property(code_gen) => code_gen.property_name(),
        }
    }

    pub fn generation_order(&self) -> i32 {
        match self {
            RegisteredGenerator::Module(module) => module.generation_order(),
            RegisteredGenerator::Property(code_gen) => code_gen.generation_order(),
        }
    }

    pub fn iteration_count(&self) -> u32 {
        match self {
            RegisteredGenerator::Module(module) => module.iteration_count(),
            RegisteredGenerator::Property(code_gen) => code_gen.iteration_count(),
        }
        .max(1)
    }

    pub fn initial_generate_code(&mut self, env: &MacroCodeGenEnv<'_>, out: &mut String) -> bool {
        match self {
            RegisteredGenerator::Module(module) => module.initial_generate_code(env, out),
            RegisteredGenerator::Property(code_gen) => code_gen.initial_generate_code(env, out),
        }
    }

    pub fn final_generate_code(&mut self, env: &MacroCodeGenEnv<'_>, out: &mut String) -> bool {
        match self {
            RegisteredGenerator::Module(module) => module.final_generate_code(env, out),
            RegisteredGenerator::Property(code_gen) => code_gen.final_generate_code(env, out),
        }
    }

    /// Run the generator on one entity.
    ///
    /// Modules see every entity. Property generators are called once per
    /// property named after them when the entity kind is eligible; the
    /// results are combined and [`VisitControl::Recurse`] is returned when
    /// nothing matched, so that nested eligible entities are still reached.
    pub fn call_visitor_on_entity(
        &mut self,
        entity: EntityRef<'_>,
        env: &MacroCodeGenEnv<'_>,
        out: &mut String,
    ) -> VisitControl {
        match self {
            RegisteredGenerator::Module(module) => module.generate_code_for_entity(entity, env, out),
            RegisteredGenerator::Property(code_gen) => {
                if !code_gen.eligible_entity_mask().intersects(entity.kind()) {
                    return VisitControl::Recurse;
                }

                let mut result = VisitControl::Recurse;
                for (index, property) in entity.entity().properties.iter().enumerate() {
                    if property.name != code_gen.property_name() {
                        continue;
                    }
                    result = result
                        .combine(code_gen.generate_code_for_entity(entity, property, index, env, out));
                    if result.is_abort() {
                        break;
                    }
                }
                result
            }
        }
    }
}

/// Sort generators by generation order, keeping registration order on ties
pub fn sort_by_generation_order(generators: &mut [RegisteredGenerator]) {
    generators.sort_by_key(RegisteredGenerator::generation_order);
}
