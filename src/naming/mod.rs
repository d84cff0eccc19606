//! # Naming and Imports
//!
//! Decides which named types a generated artifact must import and where
//! every artifact lives.
//!
//! Imports are collected by a depth-first walk over every type instance a
//! declaration mentions (property types, supertypes, generic bounds, and
//! for endpoints the parameter and return types), including nested
//! generic arguments. The walk keeps only interface and enum definitions
//! that are not predefined and not the declaration itself, deduplicates by
//! definition, and sorts by generated name.

mod paths;

pub use paths::{relative_path, NamingStrategy};

use indexmap::IndexSet;

use crate::graph::TypeGraph;
use crate::model::{Endpoint, TypeDefinition, TypeId, TypeInstance};

/// One import line: generated name and module path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub name: String,
    pub path: String,
}

fn visit_all<'i>(roots: impl IntoIterator<Item = &'i TypeInstance>) -> IndexSet<TypeId> {
    let mut seen = IndexSet::new();
    for root in roots {
        root.visit(&mut |instance| {
            seen.insert(instance.definition);
        });
    }
    seen
}

fn importable(graph: &TypeGraph, ids: IndexSet<TypeId>, exclude: Option<TypeId>) -> Vec<TypeDefinition> {
    let mut imports: Vec<TypeDefinition> = ids
        .into_iter()
        .filter(|id| Some(*id) != exclude)
        .filter_map(|id| graph.definition(id))
        .filter(|d| !d.predefined && d.kind.is_importable())
        .collect();
    imports.sort_by(|a, b| {
        a.ts_name
            .cmp(&b.ts_name)
            .then_with(|| a.full_name.cmp(&b.full_name))
    });
    imports
}

/// Definitions a type's artifact must import
pub fn type_imports(graph: &TypeGraph, declaration: &TypeDefinition) -> Vec<TypeDefinition> {
    let bounds: Vec<TypeInstance> = declaration
        .generic_params
        .iter()
        .filter_map(|p| graph.with_definition(*p, |d| d.super_types.clone()))
        .flatten()
        .collect();
    let roots = declaration
        .properties
        .iter()
        .map(|p| &p.ty)
        .chain(declaration.super_types.iter())
        .chain(bounds.iter());
    importable(graph, visit_all(roots), Some(declaration.id))
}

/// Definitions an endpoint's artifact must import
pub fn endpoint_imports(graph: &TypeGraph, endpoint: &Endpoint) -> Vec<TypeDefinition> {
    let roots = endpoint.methods.iter().flat_map(|m| {
        m.params
            .iter()
            .map(|p| &p.ty)
            .chain(m.return_type.iter())
    });
    importable(graph, visit_all(roots), None)
}

/// Import lines of a type's artifact
pub fn imports_for_type(
    graph: &TypeGraph,
    naming: &NamingStrategy,
    declaration: &TypeDefinition,
) -> Vec<ImportEntry> {
    type_imports(graph, declaration)
        .iter()
        .map(|to| ImportEntry {
            name: to.ts_name.clone(),
            path: naming.type_import(declaration, to),
        })
        .collect()
}

/// Import lines of an endpoint's artifact
pub fn imports_for_endpoint(
    graph: &TypeGraph,
    naming: &NamingStrategy,
    endpoint: &Endpoint,
) -> Vec<ImportEntry> {
    endpoint_imports(graph, endpoint)
        .iter()
        .map(|to| ImportEntry {
            name: to.ts_name.clone(),
            path: naming.endpoint_type_import(endpoint, to),
        })
        .collect()
}
