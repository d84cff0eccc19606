//! # tsgen
//!
//! **tsgen** builds a structural model of annotated service controllers and
//! the data types they expose, and generates TypeScript client code from
//! it: one interface or enum per data type and one Angular service per
//! controller.
//!
//! ## Overview
//!
//! The hard part is the model, not the text. An object-oriented,
//! generics-bearing type system is re-projected onto structural types
//! (interfaces, primitive unions, index signatures) while handling
//! bounded type variables, wildcards, raw collections, recursive generic
//! definitions and several competing ideas of what a "property" is.
//!
//! ## Architecture
//!
//! - **[`symbols`]** - the [`SymbolProvider`] seam plus a provider backed by
//!   a YAML/JSON symbol export, and meta-annotation aliasing
//! - **[`graph`]** - the [`TypeGraph`]: one definition per qualified name,
//!   built on first use, cycle safe, shared across worker threads
//! - **[`properties`]** - pluggable property locators and nullability
//!   classifiers
//! - **[`endpoint`]** - controller to [`Endpoint`](model::Endpoint) builder
//!   and its registry
//! - **[`naming`]** - artifact placement and import resolution
//! - **[`emit`]** - askama based TypeScript emitter and storage backends
//! - **[`processor`]** - rounds, the error boundary and reset
//! - **[`config`]**, **[`logging`]**, **[`diagnostics`]**, **[`watch`]**,
//!   **[`cli`]** - the ambient pieces around the core
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(tsgen)
//!     participant Symbols as symbols::load_symbols
//!     participant Proc as processor::Processor
//!     participant Graph as graph::TypeGraph
//!     participant Emit as emit::TypeScriptEmitter
//!     participant FS as Storage
//!
//!     CLI->>Symbols: load_symbols("symbols.yaml")
//!     Symbols-->>CLI: SchemaSymbolProvider
//!     CLI->>Proc: generate(provider, config, storage)
//!     Proc->>Graph: build_endpoint(controller) for each controller
//!     Graph->>Graph: get_or_define / resolve, recursively
//!     Proc->>Emit: emit_all(endpoints)
//!     Emit->>FS: interfaces, enums, services, modules
//!     Proc-->>CLI: RoundReport (endpoints, artifacts, diagnostics)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tsgen::config::GenConfig;
//! use tsgen::emit::MemoryStorage;
//! use tsgen::processor::Processor;
//! use tsgen::symbols::load_symbols;
//!
//! let provider = load_symbols("build/symbols.yaml".as_ref())?;
//! let config = GenConfig::default().finish()?;
//! let storage = MemoryStorage::new();
//!
//! let processor = Processor::new();
//! let report = processor.generate(&provider, &config, &storage)?;
//! for path in &report.written {
//!     println!("{}", path);
//! }
//! ```
//!
//! ## Concurrency
//!
//! The graph and the endpoint registry may be driven from several threads
//! at once. Lookups go through concurrent maps and every build of a
//! qualified name is serialised by its own lock, so unrelated types never
//! wait on each other and no name is ever built twice.

pub mod cli;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod emit;
pub mod endpoint;
pub mod error;
pub mod graph;
pub mod logging;
pub mod model;
pub mod naming;
pub mod processor;
pub mod properties;
pub mod symbols;
pub mod watch;

pub use config::GenConfig;
pub use context::ProcessingContext;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use endpoint::EndpointRegistry;
pub use error::{BuildError, BuildResult};
pub use graph::TypeGraph;
pub use processor::{ModelSnapshot, Processor, RoundReport};
pub use symbols::{load_symbols, SchemaSymbolProvider, SymbolProvider};
