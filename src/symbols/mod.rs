//! # Symbol Provider
//!
//! The only input source of the generator. A provider answers questions
//! about declared types: their members, supertypes, generic parameters and
//! annotations. The builders never read source code themselves.
//!
//! [`SchemaSymbolProvider`] is the shipped adapter. It reads a JSON or
//! YAML symbol export produced by the host toolchain.

pub mod annotations;
pub mod builtin;
mod load;
pub mod markers;
mod types;

use std::collections::{HashSet, VecDeque};

pub use load::{load_symbols, SchemaSymbolProvider, SymbolExport};
pub use types::{
    AliasFor, Annotated, Annotation, AnnotationAttribute, AnnotationType, AnnotationValue,
    DeclaredKind, DeclaredType, FieldSymbol, GenericOwner, MethodSymbol, ParameterSymbol,
    RecordComponent, TypeParameter, TypeRef,
};

/// Read-only view of the host program's declared types
///
/// Implementations must be shareable across the worker threads that call
/// into the graph.
pub trait SymbolProvider: Send + Sync {
    /// Declared type by qualified name
    fn declared_type(&self, name: &str) -> Option<&DeclaredType>;

    /// User annotation type declaration by qualified name
    fn annotation_type(&self, name: &str) -> Option<&AnnotationType>;

    /// Qualified names of every declared type, in export order
    fn type_names(&self) -> Vec<&str>;

    /// Generic parameter declaration for a type variable
    fn type_parameter(&self, owner: &GenericOwner, name: &str) -> Option<&TypeParameter> {
        match owner {
            GenericOwner::Type(type_name) => self.declared_type(type_name)?.type_parameter(name),
            GenericOwner::Method {
                declaring_type,
                method,
                overload,
            } => self
                .declared_type(declaring_type)?
                .method_overload(method, *overload)?
                .type_parameters
                .iter()
                .find(|p| p.name == name),
        }
    }

    /// Whether `name` is `target` or inherits from it
    ///
    /// Follows declared superclasses and interfaces, then the built-in
    /// library hierarchy for standard collection and map types.
    fn is_assignable_to(&self, name: &str, target: &str) -> bool {
        let mut stack = vec![name.to_string()];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(declared) = self.declared_type(&current) {
                stack.extend(
                    declared
                        .superclass
                        .iter()
                        .chain(declared.interfaces.iter())
                        .filter_map(|t| t.name().map(str::to_string)),
                );
            }
            stack.extend(
                builtin::library_supertypes(&current)
                    .iter()
                    .map(|s| s.to_string()),
            );
        }
        false
    }

    /// Methods of `declared` followed by the ones it inherits
    ///
    /// Supertypes are visited breadth first, superclass before interfaces.
    /// A method hides an inherited one with the same name and arity.
    /// Inherited signatures have the supertype's variables bound to the
    /// arguments the subtype passes; a raw supertype binds each variable to
    /// its first bound, or to an unbounded wildcard.
    fn all_methods(&self, declared: &DeclaredType) -> Vec<MethodSymbol> {
        let mut methods: Vec<MethodSymbol> = Vec::new();
        let mut visited = HashSet::new();
        let mut queue: VecDeque<(&DeclaredType, Vec<(String, TypeRef)>)> =
            VecDeque::from([(declared, Vec::new())]);
        while let Some((current, bindings)) = queue.pop_front() {
            if !visited.insert(current.name.clone()) {
                continue;
            }
            let inherited_from = methods.len();
            for method in &current.methods {
                if methods[..inherited_from].iter().any(|m| m.overrides(method)) {
                    continue;
                }
                methods.push(method.substituted(&current.name, &bindings));
            }
            for supertype in current.superclass.iter().chain(current.interfaces.iter()) {
                let TypeRef::Declared { name, args } = supertype.substitute(&current.name, &bindings)
                else {
                    continue;
                };
                let Some(parent) = self.declared_type(&name) else {
                    continue;
                };
                let parent_bindings: Vec<(String, TypeRef)> = parent
                    .type_parameters
                    .iter()
                    .enumerate()
                    .map(|(i, param)| {
                        let bound = args
                            .get(i)
                            .or_else(|| param.bounds.first())
                            .cloned()
                            .unwrap_or(TypeRef::Wildcard {
                                extends: None,
                                super_bound: None,
                            });
                        (param.name.clone(), bound)
                    })
                    .collect();
                queue.push_back((parent, parent_bindings));
            }
        }
        methods
    }

    /// Declared types carrying the endpoint marker
    fn controllers(&self) -> Vec<&DeclaredType> {
        self.type_names()
            .into_iter()
            .filter_map(|n| self.declared_type(n))
            .filter(|t| t.has_annotation(markers::ENDPOINT))
            .collect()
    }
}
