use std::sync::PoisonError;

use tracing::{debug, trace};

use crate::context::ProcessingContext;
use crate::error::BuildResult;
use crate::model::{EnumConstant, TypeDefinition, TypeId, TypeInstance, TypeKind};
use crate::symbols::annotations::resolve_annotation;
use crate::symbols::{markers, Annotation, DeclaredKind, DeclaredType, SymbolProvider, TypeRef};

use super::scope::container_of;

/// Non-blank `value` of the display-name marker
pub(crate) fn display_name_override(
    provider: &dyn SymbolProvider,
    annotations: &[Annotation],
) -> Option<String> {
    resolve_annotation(provider, annotations, markers::NAME)
        .and_then(|a| a.string("value"))
        .filter(|name| !name.trim().is_empty())
}

fn kind_of(declared: &DeclaredType) -> TypeKind {
    match declared.kind {
        DeclaredKind::Class | DeclaredKind::Interface | DeclaredKind::Record => TypeKind::Interface,
        DeclaredKind::Enum => TypeKind::Enum,
        DeclaredKind::Annotation => TypeKind::Unknown,
    }
}

impl ProcessingContext<'_> {
    /// Definition for a qualified name, building it on first use
    ///
    /// Order of checks: exclusion rules (resolve to `any`), the graph
    /// itself, collection and map assignability (resolve to the synthetic
    /// markers), then a fresh build from the symbol provider. Names the
    /// provider does not know resolve to `any` with a warning.
    pub fn get_or_define(&self, name: &str) -> BuildResult<TypeId> {
        if let Some(rule) = self.exclusions.matching_rule(name) {
            trace!(type_name = name, rule, "Type excluded");
            return Ok(self.graph.any());
        }
        if let Some(id) = self.graph.id_of(name) {
            return Ok(id);
        }
        if self.provider.is_assignable_to(name, markers::COLLECTION_ROOT) {
            return Ok(self.graph.collection());
        }
        if self.provider.is_assignable_to(name, markers::MAP_ROOT) {
            return Ok(self.graph.map());
        }
        match self.provider.declared_type(name) {
            Some(declared) => self.define(declared),
            None => {
                self.diagnostics.warning(
                    format!("type:{}", name),
                    "Type is not part of the symbol export, generating 'any'",
                );
                Ok(self.graph.any())
            }
        }
    }

    /// Build and register the definition of a declared type
    fn define(&self, declared: &DeclaredType) -> BuildResult<TypeId> {
        let lock = self.graph.build_lock(&declared.name);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = self.graph.id_of(&declared.name) {
            return Ok(id);
        }

        let kind = kind_of(declared);
        let ts_name = display_name_override(self.provider, &declared.annotations)
            .unwrap_or_else(|| declared.simple_name().to_string());
        let definition = TypeDefinition::new(&declared.name, declared.simple_name(), kind)
            .with_ts_name(ts_name)
            .with_container(Some(container_of(self.provider, declared)));
        // visible before populated: cycles resolve to this entry
        let id = self.graph.register(definition);
        debug!(type_name = %declared.name, %kind, %id, "Defining type");

        match kind {
            TypeKind::Interface => self.populate_interface(id, declared)?,
            TypeKind::Enum => {
                let constants = declared
                    .enum_constants
                    .iter()
                    .map(|name| EnumConstant { name: name.clone() })
                    .collect();
                self.graph.update(id, |d| d.enum_constants = constants);
            }
            _ => {}
        }

        self.graph.update(id, |d| d.initialized = true);
        Ok(id)
    }

    fn populate_interface(&self, id: TypeId, declared: &DeclaredType) -> BuildResult<()> {
        // placeholders are attached before their bounds resolve so that a
        // bound mentioning its own variable (T extends Node<T>) finds them
        let placeholders: Vec<TypeId> = declared
            .type_parameters
            .iter()
            .map(|param| {
                let full_name = format!("{}#{}", declared.name, param.name);
                self.graph.register(TypeDefinition::new(
                    full_name,
                    &param.name,
                    TypeKind::GenericPlaceholder,
                ))
            })
            .collect();
        let generic_params = placeholders.clone();
        self.graph.update(id, |d| d.generic_params = generic_params);

        for (param, placeholder) in declared.type_parameters.iter().zip(placeholders) {
            let bounds = self.resolve_all(&param.bounds)?;
            self.graph.update(placeholder, |d| {
                d.super_types = bounds;
                d.initialized = true;
            });
        }

        let properties = self.pipeline.discover(self, declared)?;
        self.graph.update(id, |d| d.properties = properties);

        let mut super_types = Vec::new();
        for supertype in declared.superclass.iter().chain(declared.interfaces.iter()) {
            if supertype.name() == Some(markers::OBJECT) {
                continue;
            }
            if let Some(instance) = self.resolve(supertype)? {
                super_types.push(instance);
            }
        }
        self.graph.update(id, |d| d.super_types = super_types);
        Ok(())
    }

    /// Resolve a list of references, dropping the ones that resolve to nothing
    pub(crate) fn resolve_all(&self, refs: &[TypeRef]) -> BuildResult<Vec<TypeInstance>> {
        let mut resolved = Vec::with_capacity(refs.len());
        for r in refs {
            if let Some(instance) = self.resolve(r)? {
                resolved.push(instance);
            }
        }
        Ok(resolved)
    }
}
