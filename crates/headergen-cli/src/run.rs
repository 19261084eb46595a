//! The `run` command

use crate::config::{self, Overrides};
use anyhow::{Context, Result};
use headergen::headergen_logging::parse_level;
use headergen::prelude::*;
use headergen::init_logging;
use std::sync::Arc;

pub fn run(
    config: Option<String>,
    ast_dir: Option<String>,
    force: bool,
    overrides: Overrides,
) -> Result<()> {
    let path = config::config_path(config);
    let settings = config::load(&path, overrides)?;

    let level = parse_level(&settings.logging.level).context("Invalid logging.level")?;
    init_logging(level).context("Failed to initialize logging")?;

    let ast_dir = config::ast_dir(&path, ast_dir);
    tracing::info!(
        settings = %path.display(),
        ast_dir = %ast_dir.display(),
        force,
        "Starting code generation"
    );

    let settings = Arc::new(settings);
    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
    let parser = FileParser::new(
        Arc::new(JsonDumpFrontEnd::new(ast_dir)),
        Arc::clone(&settings),
    )
    .with_logger(Arc::clone(&logger));
    let mut unit = MacroCodeGenUnit::new(Arc::clone(&settings))
        .with_logger(Arc::clone(&logger))
        .with_module(|| Box::new(ReflectionModule::new()));

    let result = CodeGenManager::new(settings)
        .with_logger(logger)
        .run(&parser, &mut unit, force);

    for file in &result.failed_files {
        println!("✗ {}", file.display());
    }
    println!("{result}");

    if !result.completed {
        anyhow::bail!("Code generation did not complete");
    }
    Ok(())
}
