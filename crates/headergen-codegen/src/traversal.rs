//! Walk of a file's entity tree driving every registered generator

use crate::env::MacroCodeGenEnv;
use crate::generator::RegisteredGenerator;
use headergen_core::{EntityRef, VisitControl};

/// Run every generator over the entities of `env`'s file.
///
/// Generators run one after the other, each over the whole tree: top-level
/// namespaces, structs, classes, enums, variables then functions, children
/// visited right after their parent when the generator asks to
/// [`VisitControl::Recurse`]. Generators whose iteration count does not cover
/// `env.iteration()` are skipped. Every entity a generator visits hands the
/// code it emitted to `sink`.
///
/// Returns the first abort encountered, [`VisitControl::Continue`] when the
/// walk completed.
pub fn traverse<'a, S>(
    generators: &mut [RegisteredGenerator],
    env: &MacroCodeGenEnv<'a>,
    sink: &mut S,
) -> VisitControl
where
    S: FnMut(EntityRef<'a>, String),
{
    let top_level = env.result().top_level_entities();

    for generator in generators
        .iter_mut()
        .filter(|generator| env.iteration() < generator.iteration_count())
    {
        let result = visit_siblings(generator, &top_level, env, sink);
        if result.is_abort() {
            tracing::debug!(
                generator = generator.name(),
                result = ?result,
                location = %env.location(),
                "Traversal aborted"
            );
            return result;
        }
    }

    VisitControl::Continue
}

fn visit_siblings<'a, S>(
    generator: &mut RegisteredGenerator,
    entities: &[EntityRef<'a>],
    env: &MacroCodeGenEnv<'a>,
    sink: &mut S,
) -> VisitControl
where
    S: FnMut(EntityRef<'a>, String),
{
    for entity in entities {
        let mut out = String::new();
        let result = generator.call_visitor_on_entity(*entity, env, &mut out);
        if !out.is_empty() {
            sink(*entity, out);
        }

        match result {
            VisitControl::Recurse => {
                let nested = visit_siblings(generator, &entity.children(), env, sink);
                if nested.is_abort() {
                    return nested;
                }
            }
            VisitControl::Continue => {}
            VisitControl::Break => break,
            VisitControl::AbortWithSuccess | VisitControl::AbortWithFailure => return result,
        }
    }

    VisitControl::Continue
}
