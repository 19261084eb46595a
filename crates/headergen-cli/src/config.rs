//! Settings loading for the CLI commands

use anyhow::{Context, Result};
use headergen::Settings;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "headergen.toml";

/// Command-line values taking precedence over the settings file
#[derive(Debug, Default)]
pub struct Overrides {
    pub thread_count: Option<usize>,
    pub log_level: Option<String>,
}

/// Settings file to use, defaulting to `headergen.toml` in the working directory
pub fn config_path(config: Option<String>) -> PathBuf {
    PathBuf::from(config.unwrap_or_else(|| DEFAULT_CONFIG.to_string()))
}

/// Load, override and validate the settings at `path`
pub fn load(path: &Path, overrides: Overrides) -> Result<Settings> {
    let mut settings = Settings::from_file(path)
        .with_context(|| format!("Failed to load settings: {}", path.display()))?;

    if let Some(thread_count) = overrides.thread_count {
        settings.manager.thread_count = thread_count;
    }
    if let Some(level) = overrides.log_level {
        settings.logging.level = level;
    }

    settings
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(settings)
}

/// Directory holding the AST dumps, `ast/` next to the settings file by default
pub fn ast_dir(config_path: &Path, ast_dir: Option<String>) -> PathBuf {
    match ast_dir {
        Some(dir) => PathBuf::from(dir),
        None => config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("ast"),
    }
}
