use crate::context::ProcessingContext;
use crate::symbols::annotations::collect_all;
use crate::symbols::markers;

use super::{PropertyCandidate, PropertyClassifier};

/// Not-null when a validation marker is present, directly or as a meta-annotation
#[derive(Debug, Clone)]
pub struct ValidationClassifier {
    markers: Vec<String>,
}

impl ValidationClassifier {
    pub fn new(markers: Vec<String>) -> Self {
        ValidationClassifier { markers }
    }

    /// `@NotNull` and `@NotEmpty` from `jakarta.validation`
    pub fn jakarta() -> Self {
        Self::new(vec![
            markers::NOT_NULL.to_string(),
            markers::NOT_EMPTY.to_string(),
        ])
    }
}

impl PropertyClassifier for ValidationClassifier {
    fn is_not_null(&self, ctx: &ProcessingContext<'_>, candidate: &PropertyCandidate<'_>) -> bool {
        collect_all(ctx.provider, candidate.annotations)
            .iter()
            .any(|a| self.markers.contains(&a.name))
    }
}
