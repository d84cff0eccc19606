use crate::context::ProcessingContext;
use crate::symbols::DeclaredType;

use super::{is_ignored, PropertyCandidate, PropertyLocator};

/// Record components, named by the component, in declaration order
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordLocator;

impl PropertyLocator for RecordLocator {
    fn name(&self) -> &'static str {
        "record"
    }

    fn locate<'t>(
        &self,
        ctx: &ProcessingContext<'_>,
        declared: &'t DeclaredType,
    ) -> Vec<PropertyCandidate<'t>> {
        declared
            .record_components
            .iter()
            .filter(|c| !is_ignored(ctx.provider, &c.annotations))
            .map(|c| PropertyCandidate {
                name: c.name.clone(),
                ty: &c.ty,
                annotations: &c.annotations,
                source: self.name(),
            })
            .collect()
    }
}
