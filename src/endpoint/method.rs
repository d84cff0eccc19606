use crate::context::ProcessingContext;
use crate::error::BuildResult;
use crate::graph::display_name_override;
use crate::model::{
    BindingLocation, EndpointMethod, MappingDefinition, MethodParameter, ParameterBinding,
};
use crate::symbols::annotations::resolve_annotation;
use crate::symbols::{markers, DeclaredType, MethodSymbol, ParameterSymbol};

const BINDINGS: [(&str, BindingLocation); 3] = [
    (markers::REQUEST_PARAM, BindingLocation::Query),
    (markers::PATH_VARIABLE, BindingLocation::Path),
    (markers::REQUEST_BODY, BindingLocation::Body),
];

impl ProcessingContext<'_> {
    /// Endpoint method for a controller method, `None` when it has no mapping
    pub(crate) fn build_method(
        &self,
        controller: &DeclaredType,
        method: &MethodSymbol,
        default_mapping: Option<&MappingDefinition>,
    ) -> BuildResult<Option<EndpointMethod>> {
        let location = format!("endpoint:{}#{}", controller.name, method.name);
        let Some(mut mapping) = self.resolve_mapping(&method.annotations, &location)? else {
            return Ok(None);
        };
        if mapping.verb.is_none() {
            mapping.verb = default_mapping.and_then(|m| m.verb.clone());
        }

        let name = display_name_override(self.provider, &method.annotations)
            .unwrap_or_else(|| method.name.clone());

        let mut params = Vec::with_capacity(method.parameters.len());
        for parameter in &method.parameters {
            if let Some(param) = self.build_parameter(parameter, &location)? {
                params.push(param);
            }
        }

        let return_type = match &method.return_type {
            Some(r) => self.resolve(r)?,
            None => None,
        };

        Ok(Some(EndpointMethod {
            name,
            mapping,
            params,
            return_type,
        }))
    }

    /// Parameter with a request binding; unbound parameters are framework-injected and dropped
    fn build_parameter(
        &self,
        parameter: &ParameterSymbol,
        location: &str,
    ) -> BuildResult<Option<MethodParameter>> {
        let mut bindings = BINDINGS.iter().filter_map(|(marker, binding_location)| {
            resolve_annotation(self.provider, &parameter.annotations, marker)
                .map(|resolved| (*binding_location, resolved))
        });
        let Some((binding_location, resolved)) = bindings.next() else {
            return Ok(None);
        };
        if let Some((other, _)) = bindings.next() {
            self.diagnostics.warning(
                location,
                format!(
                    "Parameter '{}' is bound as both {} and {}, using {}",
                    parameter.name, binding_location, other, binding_location
                ),
            );
        }

        let binding = ParameterBinding {
            location: binding_location,
            name: resolved
                .string("name")
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| parameter.name.clone()),
            required: resolved.bool("required").unwrap_or(true),
        };
        let ty = match self.resolve(&parameter.ty)? {
            Some(ty) => ty,
            None => self.any_instance(),
        };

        Ok(Some(MethodParameter {
            name: parameter.name.clone(),
            ty,
            binding,
        }))
    }
}
