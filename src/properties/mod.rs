//! # Property Discovery
//!
//! Decides what the properties of a declared type are. Several naming
//! conventions compete, so discovery is split into two strategy chains:
//!
//! - **Locators** enumerate candidate properties under one convention
//!   (accessor methods, record components, fields with generated
//!   accessors).
//! - **Classifiers** decide whether a property is guaranteed non-null.
//!
//! ## Merge Rule
//!
//! Locators run in a fixed order and the first one to produce a given
//! property name wins; insertion order is kept. The accessor locator runs
//! first, so a getter shadows a field exposing the same property.
//!
//! ## Nullability
//!
//! A property whose declared type is primitive is never nullable.
//! Otherwise it is non-null when any classifier says so.

mod accessor;
mod classifier;
mod fields;
mod record;

pub use accessor::AccessorLocator;
pub use classifier::ValidationClassifier;
pub use fields::FieldLocator;
pub use record::RecordLocator;

use indexmap::IndexMap;
use tracing::trace;

use crate::context::ProcessingContext;
use crate::error::BuildResult;
use crate::graph::display_name_override;
use crate::model::PropertyDefinition;
use crate::symbols::annotations::resolve_annotation;
use crate::symbols::{markers, Annotation, DeclaredType, SymbolProvider, TypeRef};

/// A property found by a locator, before its type is resolved
#[derive(Debug, Clone)]
pub struct PropertyCandidate<'t> {
    /// Convention-derived name, before display-name overrides
    pub name: String,
    pub ty: &'t TypeRef,
    /// Annotations of the member that exposes the property
    pub annotations: &'t [Annotation],
    /// Locator that produced the candidate
    pub source: &'static str,
}

/// Strategy enumerating candidate properties of a declared type
pub trait PropertyLocator: Send + Sync {
    fn name(&self) -> &'static str;

    fn locate<'t>(
        &self,
        ctx: &ProcessingContext<'_>,
        declared: &'t DeclaredType,
    ) -> Vec<PropertyCandidate<'t>>;
}

/// Strategy deciding whether a candidate is guaranteed non-null
pub trait PropertyClassifier: Send + Sync {
    fn is_not_null(&self, ctx: &ProcessingContext<'_>, candidate: &PropertyCandidate<'_>) -> bool;
}

/// `true` when the ignore marker (or an alias of it) is present
pub(crate) fn is_ignored(provider: &dyn SymbolProvider, annotations: &[Annotation]) -> bool {
    resolve_annotation(provider, annotations, markers::IGNORE).is_some()
}

/// Ordered locator and classifier chains
pub struct PropertyPipeline {
    locators: Vec<Box<dyn PropertyLocator>>,
    classifiers: Vec<Box<dyn PropertyClassifier>>,
}

impl std::fmt::Debug for PropertyPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyPipeline")
            .field("locators", &self.locator_names())
            .field("classifiers", &self.classifiers.len())
            .finish()
    }
}

impl Default for PropertyPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl PropertyPipeline {
    pub fn new(
        locators: Vec<Box<dyn PropertyLocator>>,
        classifiers: Vec<Box<dyn PropertyClassifier>>,
    ) -> Self {
        PropertyPipeline {
            locators,
            classifiers,
        }
    }

    /// Accessor, record and field locators with the validation classifier
    pub fn standard() -> Self {
        PropertyPipeline::new(
            vec![
                Box::new(AccessorLocator),
                Box::new(RecordLocator),
                Box::new(FieldLocator),
            ],
            vec![Box::new(ValidationClassifier::jakarta())],
        )
    }

    pub fn locator_names(&self) -> Vec<&'static str> {
        self.locators.iter().map(|l| l.name()).collect()
    }

    /// Properties of `declared`, merged first-locator-wins
    pub fn discover(
        &self,
        ctx: &ProcessingContext<'_>,
        declared: &DeclaredType,
    ) -> BuildResult<Vec<PropertyDefinition>> {
        let mut merged: IndexMap<String, PropertyCandidate<'_>> = IndexMap::new();
        for locator in &self.locators {
            for candidate in locator.locate(ctx, declared) {
                let name = display_name_override(ctx.provider, candidate.annotations)
                    .unwrap_or_else(|| candidate.name.clone());
                if merged.contains_key(&name) {
                    trace!(type_name = %declared.name, property = %name, source = candidate.source, "Property shadowed");
                    continue;
                }
                merged.insert(name, candidate);
            }
        }

        let mut properties = Vec::with_capacity(merged.len());
        for (name, candidate) in merged {
            let ty = match ctx.resolve(candidate.ty)? {
                Some(ty) => ty,
                None => ctx.any_instance(),
            };
            let not_null = candidate.ty.is_primitive()
                || self
                    .classifiers
                    .iter()
                    .any(|c| c.is_not_null(ctx, &candidate));
            properties.push(PropertyDefinition {
                name,
                ty,
                nullable: !not_null,
            });
        }
        Ok(properties)
    }
}
