//! Entity macros header letting annotated headers compile without the tool

use crate::error::GenerationError;
use headergen_core::Settings;
use std::path::PathBuf;

/// Content of the entity macros header.
///
/// Outside of a parsing pass every annotation macro expands to nothing.
pub fn entity_macros_content(settings: &Settings) -> String {
    let parsing_macro = &settings.parsing.parsing_macro;
    let mut out = String::from("#pragma once\n\n");
    out.push_str(&format!("#ifndef {parsing_macro}\n\n"));

    for (macro_name, _) in settings.parsing.properties.markup_macros() {
        out.push_str(&format!("#define {macro_name}(...)\n"));
    }

    out.push_str(&format!("\n#endif // {parsing_macro}\n"));
    out
}

/// Write the entity macros header into the output directory
pub fn write_entity_macros(settings: &Settings) -> Result<PathBuf, GenerationError> {
    let path = settings.codegen.entity_macros_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| GenerationError::OutputDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(&path, entity_macros_content(settings)).map_err(|source| {
        GenerationError::Io {
            path: path.clone(),
            source,
        }
    })?;

    tracing::debug!(path = %path.display(), "Wrote entity macros");
    Ok(path)
}
