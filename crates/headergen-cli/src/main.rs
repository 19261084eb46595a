//! headergen CLI - Code generator for annotated C++ headers
//!
//! Commands:
//! - `headergen run` - Parse the project and write generated files
//! - `headergen check` - Validate a settings file and list the files it selects
//! - `headergen shim` - Write the entity macros header only

use clap::{Parser, Subcommand};

mod check;
mod config;
mod run;
mod shim;

#[derive(Parser)]
#[command(name = "headergen")]
#[command(author, version, about = "Code generator for annotated C++ headers", long_about = None)]
struct Cli {
    /// Path to the settings file (default: ./headergen.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every selected header and generate code for it
    Run {
        /// Directory holding the AST dumps (default: ast/ next to the settings file)
        #[arg(short, long)]
        ast_dir: Option<String>,

        /// Regenerate files even when their output is up to date
        #[arg(short, long)]
        force: bool,

        /// Worker thread count, 0 for one per core
        #[arg(short, long)]
        threads: Option<usize>,

        /// Log level (trace, debug, info, warn, error)
        #[arg(short, long)]
        log_level: Option<String>,
    },

    /// Validate the settings and list the headers they select
    Check,

    /// Write the entity macros header into the output directory
    Shim,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            ast_dir,
            force,
            threads,
            log_level,
        } => {
            let overrides = config::Overrides {
                thread_count: threads,
                log_level,
            };
            run::run(cli.config, ast_dir, force, overrides)?;
        }
        Commands::Check => {
            check::run(cli.config)?;
        }
        Commands::Shim => {
            shim::run(cli.config)?;
        }
    }

    Ok(())
}
