use crate::config::{ExclusionRules, GenConfig};
use crate::diagnostics::Diagnostics;
use crate::endpoint::EndpointRegistry;
use crate::graph::TypeGraph;
use crate::properties::PropertyPipeline;
use crate::symbols::SymbolProvider;

/// Everything a builder needs during one round
///
/// Constructed once per round and passed by reference to every builder.
/// The graph and the endpoint registry outlive the context; the compiled
/// exclusion rules and the diagnostics belong to the round.
pub struct ProcessingContext<'a> {
    pub graph: &'a TypeGraph,
    pub endpoints: &'a EndpointRegistry,
    pub provider: &'a dyn SymbolProvider,
    pub config: &'a GenConfig,
    pub pipeline: &'a PropertyPipeline,
    pub exclusions: ExclusionRules,
    pub diagnostics: Diagnostics,
}

impl<'a> ProcessingContext<'a> {
    /// Create a context and seed the graph's predefined types
    ///
    /// Fails when an `exclude_classes` pattern does not compile.
    pub fn new(
        graph: &'a TypeGraph,
        endpoints: &'a EndpointRegistry,
        provider: &'a dyn SymbolProvider,
        config: &'a GenConfig,
        pipeline: &'a PropertyPipeline,
    ) -> anyhow::Result<Self> {
        let exclusions = ExclusionRules::compile(&config.exclude_classes)?;
        graph.seed(config);
        Ok(ProcessingContext {
            graph,
            endpoints,
            provider,
            config,
            pipeline,
            exclusions,
            diagnostics: Diagnostics::new(),
        })
    }
}
