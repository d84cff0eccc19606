//! # CLI Module
//!
//! Command line front end of the generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Build the model from a symbol export and write the TypeScript
//! artifacts:
//!
//! ```bash
//! tsgen generate --symbols build/symbols.yaml --output web/
//! ```
//!
//! Options:
//! - `--symbols <FILE>` - symbol export, YAML or JSON (required)
//! - `--config <FILE>` - generator config, auto-detected as `tsgen.toml` otherwise
//! - `--output <DIR>` - directory the configured output folder is relative to
//! - `--dry-run` - list the artifacts instead of writing them
//! - `--watch` - regenerate whenever the export or the config changes
//!
//! ### `inspect`
//!
//! Print the resolved type graph and endpoints as JSON:
//!
//! ```bash
//! tsgen inspect --symbols build/symbols.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use tsgen::cli::{run, Cli};
//! use clap::Parser;
//!
//! run(Cli::parse())?;
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands};
