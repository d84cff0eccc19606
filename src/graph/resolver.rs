use crate::context::ProcessingContext;
use crate::error::{BuildError, BuildResult};
use crate::model::{TypeId, TypeInstance};
use crate::symbols::{GenericOwner, TypeRef};

impl ProcessingContext<'_> {
    /// Turn a source-level reference into a type instance
    ///
    /// Returns `Ok(None)` when a type variable names a slot its owner does
    /// not have; callers drop such results from argument lists.
    pub fn resolve(&self, type_ref: &TypeRef) -> BuildResult<Option<TypeInstance>> {
        match type_ref {
            TypeRef::Primitive { name } => Ok(Some(TypeInstance::new(self.get_or_define(name)?))),
            TypeRef::Declared { name, args } => {
                let id = self.get_or_define(name)?;
                let takes_args = self
                    .graph
                    .kind(id)
                    .map(|k| k.has_type_params())
                    .unwrap_or(false);
                if !takes_args || args.is_empty() {
                    return Ok(Some(TypeInstance::new(id)));
                }
                Ok(Some(TypeInstance::with_arguments(id, self.resolve_all(args)?)))
            }
            TypeRef::TypeVar { name, owner } => self.resolve_type_var(name, owner),
            TypeRef::Wildcard { extends, .. } => match extends {
                Some(bound) => self.resolve(bound),
                // unbounded and lower-bounded wildcards have no structural equivalent
                None => Ok(Some(self.any_instance())),
            },
            TypeRef::Array { component } => {
                let arguments = self.resolve(component)?.into_iter().collect();
                Ok(Some(TypeInstance::with_arguments(
                    self.graph.collection(),
                    arguments,
                )))
            }
        }
    }

    /// Instance of the `any` escape type
    pub fn any_instance(&self) -> TypeInstance {
        TypeInstance::new(self.graph.any())
    }

    fn resolve_type_var(&self, name: &str, owner: &GenericOwner) -> BuildResult<Option<TypeInstance>> {
        match owner {
            GenericOwner::Type(owner_name) => {
                if self.provider.declared_type(owner_name).is_none()
                    && self.graph.id_of(owner_name).is_none()
                {
                    return Err(BuildError::UnknownGenericOwner {
                        variable: name.to_string(),
                        owner: owner.to_string(),
                    });
                }
                let owner_id = self.get_or_define(owner_name)?;
                Ok(self.placeholder(owner_id, name).map(TypeInstance::new))
            }
            GenericOwner::Method { .. } => {
                let param = self.provider.type_parameter(owner, name).ok_or_else(|| {
                    BuildError::UnknownGenericOwner {
                        variable: name.to_string(),
                        owner: owner.to_string(),
                    }
                })?;
                // method generics have no named slot in the target model
                match param.bounds.as_slice() {
                    [single] => self.resolve(single),
                    [] => Ok(Some(self.any_instance())),
                    _ => {
                        self.diagnostics.warning(
                            format!("type_var:{}:{}", owner, name),
                            format!(
                                "Method type variable '{}' has {} bounds, generating 'any'",
                                name,
                                param.bounds.len()
                            ),
                        );
                        Ok(Some(self.any_instance()))
                    }
                }
            }
        }
    }

    /// Generic placeholder of `owner` with the given short name
    fn placeholder(&self, owner: TypeId, name: &str) -> Option<TypeId> {
        let params = self.graph.with_definition(owner, |d| d.generic_params.clone())?;
        params
            .into_iter()
            .find(|p| self.graph.with_definition(*p, |d| d.short_name == name) == Some(true))
    }
}
