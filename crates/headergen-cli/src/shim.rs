//! The `shim` command

use crate::config::{self, Overrides};
use anyhow::{Context, Result};
use headergen::headergen_codegen::write_entity_macros;

pub fn run(config: Option<String>) -> Result<()> {
    let path = config::config_path(config);
    let settings = config::load(&path, Overrides::default())?;

    let written = write_entity_macros(&settings).context("Failed to write the entity macros")?;
    println!("✓ Wrote {}", written.display());

    Ok(())
}
