//! # Round Processor
//!
//! Owns the long-lived state (type graph and endpoint registry) and runs
//! rounds against it. A round builds the endpoint of every controller the
//! symbol provider exposes, which in turn pulls every reachable type into
//! the graph, and optionally emits the resulting model.
//!
//! ## Error boundary
//!
//! * A type-scoped failure (a controller without the endpoint marker) is
//!   reported as an error diagnostic and the round carries on.
//! * Any other build failure aborts the round. It is reported as an error
//!   diagnostic and returned as an [`anyhow::Error`].
//!
//! In both cases the graph keeps whatever was registered; types that did
//! resolve stay valid for the next round. [`Processor::reset`] drops all
//! state.

use anyhow::anyhow;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::{error, info, info_span};

use crate::config::GenConfig;
use crate::context::ProcessingContext;
use crate::diagnostics::{Diagnostic, Severity};
use crate::emit::{StorageStrategy, TypeScriptEmitter};
use crate::endpoint::EndpointRegistry;
use crate::graph::TypeGraph;
use crate::model::{Endpoint, TypeDefinition};
use crate::properties::PropertyPipeline;
use crate::symbols::SymbolProvider;

/// Outcome of one round
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundReport {
    /// Controllers whose endpoints were built or found in this round
    pub endpoints: Vec<String>,
    /// Artifact paths written, empty when nothing was emitted
    pub written: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RoundReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

fn controller_names(provider: &dyn SymbolProvider) -> Vec<String> {
    provider
        .controllers()
        .into_iter()
        .map(|c| c.name.clone())
        .collect()
}

/// Serializable view of the whole model
#[derive(Debug, Clone, Serialize)]
pub struct ModelSnapshot {
    pub types: Vec<TypeDefinition>,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Default)]
pub struct Processor {
    graph: TypeGraph,
    endpoints: EndpointRegistry,
    pipeline: PropertyPipeline,
    last_diagnostics: Mutex<Vec<Diagnostic>>,
}

impl Processor {
    /// Processor with the standard property pipeline
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pipeline(pipeline: PropertyPipeline) -> Self {
        Processor {
            pipeline,
            ..Self::default()
        }
    }

    pub fn graph(&self) -> &TypeGraph {
        &self.graph
    }

    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    pub fn pipeline(&self) -> &PropertyPipeline {
        &self.pipeline
    }

    /// Build the model for every controller of `provider`
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or a build
    /// failure aborts the round.
    pub fn process_round(
        &self,
        provider: &dyn SymbolProvider,
        config: &GenConfig,
    ) -> anyhow::Result<RoundReport> {
        let controllers = controller_names(provider);
        self.round(provider, config, &controllers, None)
    }

    /// Build the endpoints of the named controllers only
    ///
    /// Names without the endpoint marker are reported as errors and
    /// skipped.
    ///
    /// # Errors
    ///
    /// As [`process_round`](Self::process_round).
    pub fn process_controllers(
        &self,
        provider: &dyn SymbolProvider,
        config: &GenConfig,
        controllers: &[String],
    ) -> anyhow::Result<RoundReport> {
        self.round(provider, config, controllers, None)
    }

    /// Build the model, then emit every artifact into `storage`
    ///
    /// # Errors
    ///
    /// As [`process_round`](Self::process_round), plus rendering and
    /// storage failures.
    pub fn generate(
        &self,
        provider: &dyn SymbolProvider,
        config: &GenConfig,
        storage: &dyn StorageStrategy,
    ) -> anyhow::Result<RoundReport> {
        let controllers = controller_names(provider);
        self.round(provider, config, &controllers, Some(storage))
    }

    fn round(
        &self,
        provider: &dyn SymbolProvider,
        config: &GenConfig,
        controllers: &[String],
        storage: Option<&dyn StorageStrategy>,
    ) -> anyhow::Result<RoundReport> {
        let span = info_span!("round", controllers = tracing::field::Empty);
        let _enter = span.enter();

        let ctx = ProcessingContext::new(
            &self.graph,
            &self.endpoints,
            provider,
            config,
            &self.pipeline,
        )?;
        span.record("controllers", controllers.len());

        let mut report = RoundReport::default();
        for controller in controllers {
            match ctx.build_endpoint(controller) {
                Ok(endpoint) => report.endpoints.push(endpoint.controller_type),
                Err(e) if e.is_type_scoped() => {
                    ctx.diagnostics.error(format!("endpoint:{}", controller), e.to_string());
                }
                Err(e) => {
                    let location = format!("endpoint:{}", controller);
                    ctx.diagnostics
                        .error(&location, format!("Round aborted: {}", e));
                    self.store_diagnostics(ctx.diagnostics.take());
                    error!(controller = %controller, error = %e, "Round aborted");
                    return Err(anyhow!(e).context(format!("Failed to process {}", location)));
                }
            }
        }

        if let Some(storage) = storage {
            let endpoints = self.endpoints.all();
            let emitter = TypeScriptEmitter::new(&self.graph, config, &ctx.diagnostics);
            report.written = emitter.emit_all(&endpoints, storage)?.written;
        }

        report.diagnostics = ctx.diagnostics.take();
        self.store_diagnostics(report.diagnostics.clone());
        info!(
            endpoints = report.endpoints.len(),
            types = self.graph.len(),
            warnings = report.warnings(),
            "Round complete"
        );
        Ok(report)
    }

    fn store_diagnostics(&self, diagnostics: Vec<Diagnostic>) {
        *self
            .last_diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = diagnostics;
    }

    /// Diagnostics of the most recent round, including an aborted one
    pub fn last_diagnostics(&self) -> Vec<Diagnostic> {
        self.last_diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every definition and endpoint currently known
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            types: self.graph.definitions(),
            endpoints: self.endpoints.all(),
        }
    }

    /// Drop all types and endpoints
    pub fn reset(&self) {
        self.graph.clear();
        self.endpoints.clear();
        self.store_diagnostics(Vec::new());
        info!("Processor state reset");
    }
}
