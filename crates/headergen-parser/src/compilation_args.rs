//! Arguments forwarded to the front-end and system include discovery

use headergen_core::{ParsingSettings, SINGLE_ENTITY_KINDS, annotation_tag};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const SEARCH_LIST_START: &str = "#include <...> search starts here:";
const SEARCH_LIST_END: &str = "End of search list.";

/// Build the compilation arguments for every translation unit of a run.
///
/// Each markup macro is defined to expand into an `annotate` attribute whose
/// text is the kind tag followed by the stringified macro arguments.
pub fn compilation_arguments(settings: &ParsingSettings, system_include_dirs: &[PathBuf]) -> Vec<String> {
    let mut args = vec![
        "-xc++".to_string(),
        format!("-std=c++{}", settings.cpp_version),
        format!("-D{}", settings.parsing_macro),
    ];

    for kind in SINGLE_ENTITY_KINDS {
        args.push(format!(
            "-D{}(...)=__attribute__((annotate(\"{}\" #__VA_ARGS__)))",
            settings.properties.macro_name(kind),
            annotation_tag(kind)
        ));
    }

    for dir in settings
        .project_include_directories
        .iter()
        .chain(system_include_dirs)
    {
        args.push(format!("-I{}", dir.display()));
    }

    args
}

/// Ask `compiler` for its system include search list.
///
/// An empty compiler name skips discovery.
pub fn discover_system_include_dirs(compiler: &str) -> std::io::Result<Vec<PathBuf>> {
    if compiler.trim().is_empty() {
        return Ok(Vec::new());
    }

    let output = Command::new(compiler)
        .args(["-x", "c++", "-E", "-v", "-"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()?;

    let dirs = parse_include_search_list(&String::from_utf8_lossy(&output.stderr));
    tracing::debug!(compiler, count = dirs.len(), "Discovered system include directories");
    Ok(dirs)
}

/// Extract the directories listed between the search list markers of a
/// verbose preprocessor run
pub fn parse_include_search_list(verbose_output: &str) -> Vec<PathBuf> {
    verbose_output
        .lines()
        .skip_while(|line| line.trim() != SEARCH_LIST_START)
        .skip(1)
        .take_while(|line| line.trim() != SEARCH_LIST_END)
        .map(|line| {
            let line = line.trim();
            line.strip_suffix("(framework directory)")
                .map(str::trim_end)
                .unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
        .map(|line| Path::new(line).to_path_buf())
        .collect()
}
