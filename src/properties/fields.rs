use crate::context::ProcessingContext;
use crate::symbols::annotations::resolve_annotation;
use crate::symbols::{markers, DeclaredType, FieldSymbol};

use super::{is_ignored, PropertyCandidate, PropertyLocator};

/// Instance fields whose accessors are generated at compile time
///
/// A type marked `@Data` or `@Value`, or carrying a class-level `@Getter`,
/// exposes every own instance field. Otherwise only fields marked
/// `@Getter` individually are exposed. Static, transient and ignored
/// fields never are.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldLocator;

impl FieldLocator {
    fn exposes_all_fields(ctx: &ProcessingContext<'_>, declared: &DeclaredType) -> bool {
        [markers::LOMBOK_DATA, markers::LOMBOK_VALUE, markers::LOMBOK_GETTER]
            .iter()
            .any(|marker| resolve_annotation(ctx.provider, &declared.annotations, marker).is_some())
    }

    fn is_instance_field(field: &FieldSymbol) -> bool {
        !field.has_modifier("static") && !field.has_modifier("transient")
    }
}

impl PropertyLocator for FieldLocator {
    fn name(&self) -> &'static str {
        "field"
    }

    fn locate<'t>(
        &self,
        ctx: &ProcessingContext<'_>,
        declared: &'t DeclaredType,
    ) -> Vec<PropertyCandidate<'t>> {
        let all_fields = Self::exposes_all_fields(ctx, declared);
        declared
            .fields
            .iter()
            .filter(|f| Self::is_instance_field(f))
            .filter(|f| !is_ignored(ctx.provider, &f.annotations))
            .filter(|f| {
                all_fields
                    || resolve_annotation(ctx.provider, &f.annotations, markers::LOMBOK_GETTER)
                        .is_some()
            })
            .map(|f| PropertyCandidate {
                name: f.name.clone(),
                ty: &f.ty,
                annotations: &f.annotations,
                source: self.name(),
            })
            .collect()
    }
}
