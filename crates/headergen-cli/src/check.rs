//! The `check` command

use crate::config::{self, Overrides};
use anyhow::Result;
use headergen::CodeGenManager;
use std::sync::Arc;

pub fn run(config: Option<String>) -> Result<()> {
    let path = config::config_path(config);

    println!("Checking settings: {}", path.display());

    let settings = config::load(&path, Overrides::default())?;
    let output_directory = settings.codegen.output_directory.clone();
    let thread_count = settings.manager.effective_thread_count();
    let files = CodeGenManager::new(Arc::new(settings)).identify_files();

    println!("✓ Output directory: {}", output_directory.display());
    println!("✓ Worker threads: {thread_count}");
    println!("✓ Headers: {}", files.len());
    for file in &files {
        println!("  {}", file.display());
    }
    println!("\nSettings are valid!");

    Ok(())
}
