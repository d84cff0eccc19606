use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{load_or_default, resolve_config_path, GenConfig, StorageKind};
use crate::emit::{FileStorage, MemoryStorage, StorageStrategy};
use crate::processor::{Processor, RoundReport};
use crate::symbols::load_symbols;
use crate::watch::watch_and_rerun;

/// Command-line interface for tsgen
///
/// Reads a symbol export of annotated controllers and data types and
/// generates TypeScript interfaces, enums and Angular services.
#[derive(Parser)]
#[command(name = "tsgen")]
#[command(about = "TypeScript client generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate TypeScript from a symbol export
    Generate {
        /// Symbol export (YAML or JSON)
        #[arg(short, long)]
        symbols: PathBuf,

        /// Generator config; defaults to a tsgen.toml next to the export or above it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory the configured output folder is relative to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Perform a dry run: list the artifacts without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Regenerate whenever the export or the config changes
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    /// Print the resolved model as JSON
    Inspect {
        /// Symbol export (YAML or JSON)
        #[arg(short, long)]
        symbols: PathBuf,

        /// Generator config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Parse the process arguments and execute the command
///
/// # Errors
///
/// Returns an error if:
/// - The symbol export or the config cannot be loaded
/// - A round aborts or reports errors
/// - Writing the artifacts fails
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Execute an already parsed command line
///
/// # Errors
///
/// See [`run_cli`].
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            symbols,
            config,
            output,
            dry_run,
            watch,
        } => {
            let processor = Processor::new();
            let generate = || generate_once(&processor, &symbols, config.as_deref(), &output, dry_run);
            generate()?;
            if watch {
                let mut watched = vec![symbols.clone()];
                if let Some(path) = resolve_config_path(config.as_deref(), &symbols) {
                    watched.push(path);
                }
                watch_and_rerun(&watched, || {
                    processor.reset();
                    generate().map(|_| ())
                })?;
            }
            Ok(())
        }
        Commands::Inspect { symbols, config } => {
            let provider = load_symbols(&symbols)?;
            let gen_config = load_or_default(config.as_deref(), &symbols)?;
            let processor = Processor::new();
            let report = processor.process_round(&provider, &gen_config)?;
            print_diagnostics(&report);
            let json = serde_json::to_string_pretty(&processor.snapshot())
                .context("Failed to serialize the model")?;
            println!("{}", json);
            Ok(())
        }
    }
}

fn generate_once(
    processor: &Processor,
    symbols: &Path,
    config: Option<&Path>,
    output: &Path,
    dry_run: bool,
) -> anyhow::Result<RoundReport> {
    let provider = load_symbols(symbols)?;
    let gen_config: GenConfig = load_or_default(config, symbols)?;

    let in_memory = dry_run || gen_config.storage == StorageKind::Memory;
    let memory = MemoryStorage::new();
    let files = FileStorage::new(output);
    let storage: &dyn StorageStrategy = if in_memory { &memory } else { &files };

    let report = processor.generate(&provider, &gen_config, storage)?;
    print_diagnostics(&report);

    if in_memory {
        for path in memory.paths() {
            println!("{}", path);
        }
    }
    info!(
        artifacts = report.written.len(),
        endpoints = report.endpoints.len(),
        dry_run = in_memory,
        "Generation finished"
    );

    let errors = report
        .diagnostics
        .iter()
        .filter(|d| d.severity == crate::diagnostics::Severity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("Generation finished with {} error(s)", errors);
    }
    Ok(report)
}

// each diagnostic was already logged when reported
fn print_diagnostics(report: &RoundReport) {
    if report.warnings() > 0 {
        warn!(warnings = report.warnings(), "Round finished with warnings");
    }
}
