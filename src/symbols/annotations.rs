//! # Annotation aliasing
//!
//! Resolves a target annotation on an element the way Spring does:
//!
//! 1. Collect the element's annotations followed by their
//!    meta-annotations, recursively. The `java.lang.annotation` namespace
//!    is never entered.
//! 2. A collected annotation of the target type contributes its own
//!    values. A value that is already present is kept (first wins).
//! 3. Any other annotation contributes the values of attributes declared
//!    `alias_for { annotation: <target> }`.
//! 4. Every newly set value is mirrored onto local aliases declared on the
//!    target type (`value` <-> `path`).
//!
//! `@GetMapping("item")` therefore resolves to a `RequestMapping` with
//! `path = "item"` and `method = GET`.

use std::collections::{BTreeMap, HashSet};

use super::builtin;
use super::markers;
use super::types::{Annotation, AnnotationAttribute, AnnotationType, AnnotationValue};
use super::SymbolProvider;

/// Values of a target annotation after alias resolution
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedAnnotation {
    pub name: String,
    pub values: BTreeMap<String, AnnotationValue>,
}

impl ResolvedAnnotation {
    pub fn value(&self, key: &str) -> Option<&AnnotationValue> {
        self.values.get(key)
    }

    /// All string values for `key`
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.values.get(key).map(AnnotationValue::strings).unwrap_or_default()
    }

    /// First string value for `key`
    pub fn string(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(|v| v.as_str()).map(str::to_string)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(AnnotationValue::as_bool)
    }
}

/// Look up an annotation type declaration, falling back to the built-in catalog
pub fn annotation_type<'a>(
    provider: &'a dyn SymbolProvider,
    name: &str,
) -> Option<&'a AnnotationType> {
    provider
        .annotation_type(name)
        .or_else(|| builtin::annotation_type(name))
}

/// Direct annotations followed by all transitive meta-annotations
pub fn collect_all(provider: &dyn SymbolProvider, annotations: &[Annotation]) -> Vec<Annotation> {
    let mut visited = HashSet::new();
    let mut result = Vec::new();
    collect_into(provider, annotations, &mut visited, &mut result);
    result
}

fn collect_into(
    provider: &dyn SymbolProvider,
    direct: &[Annotation],
    visited: &mut HashSet<String>,
    out: &mut Vec<Annotation>,
) {
    out.extend(direct.iter().cloned());
    for annotation in direct {
        if annotation.name.starts_with(markers::META_ANNOTATION_NAMESPACE) {
            continue;
        }
        if !visited.insert(annotation.name.clone()) {
            continue;
        }
        if let Some(declaration) = annotation_type(provider, &annotation.name) {
            collect_into(provider, &declaration.annotations, visited, out);
        }
    }
}

/// Resolve `target` on an element carrying `annotations`
///
/// Returns `None` when neither the target nor any alias of it is present.
pub fn resolve_annotation(
    provider: &dyn SymbolProvider,
    annotations: &[Annotation],
    target: &str,
) -> Option<ResolvedAnnotation> {
    let all = collect_all(provider, annotations);
    if all.is_empty() {
        return None;
    }

    let target_type = annotation_type(provider, target);
    let mut result = ResolvedAnnotation {
        name: target.to_string(),
        values: BTreeMap::new(),
    };
    let mut found = false;

    for annotation in &all {
        if annotation.name == target {
            found = true;
            for (key, value) in &annotation.values {
                set_with_aliases(&mut result, key, value, target_type);
            }
            continue;
        }

        let Some(declaration) = annotation_type(provider, &annotation.name) else {
            continue;
        };
        for (key, value) in &annotation.values {
            let Some(alias) = attribute(declaration, key).and_then(|a| a.alias_for.as_ref()) else {
                continue;
            };
            if alias.annotation.as_deref() == Some(target) {
                let name = alias.attribute.as_deref().unwrap_or(key);
                set_with_aliases(&mut result, name, value, target_type);
                found = true;
            }
        }
    }

    found.then_some(result)
}

fn attribute<'a>(declaration: &'a AnnotationType, name: &str) -> Option<&'a AnnotationAttribute> {
    declaration.attributes.iter().find(|a| a.name == name)
}

fn set_with_aliases(
    result: &mut ResolvedAnnotation,
    key: &str,
    value: &AnnotationValue,
    target_type: Option<&AnnotationType>,
) {
    if result.values.contains_key(key) {
        return;
    }
    result.values.insert(key.to_string(), value.clone());

    let Some(declaration) = target_type else {
        return;
    };
    let Some(alias) = attribute(declaration, key).and_then(|a| a.alias_for.as_ref()) else {
        return;
    };
    let local = match alias.annotation.as_deref() {
        None => true,
        Some(name) => name == declaration.name,
    };
    if local {
        if let Some(other) = alias.attribute.as_deref() {
            set_with_aliases(result, other, value, target_type);
        }
    }
}
