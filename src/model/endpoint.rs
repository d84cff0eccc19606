use http::Method;
use serde::{Serialize, Serializer};
use std::fmt;

use super::types::{TypeContainer, TypeInstance};

fn serialize_verb<S: Serializer>(verb: &Option<Method>, s: S) -> Result<S::Ok, S::Error> {
    match verb {
        Some(m) => s.serialize_some(m.as_str()),
        None => s.serialize_none(),
    }
}

/// Resolved HTTP mapping of a controller or method
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MappingDefinition {
    /// URL template, relative to the controller mapping for methods;
    /// `None` when the mapping declares no path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,
    /// HTTP verb; `None` on a method means "inherit from the controller"
    #[serde(serialize_with = "serialize_verb")]
    pub verb: Option<Method>,
}

impl MappingDefinition {
    pub fn new(url_template: Option<String>, verb: Option<Method>) -> Self {
        MappingDefinition { url_template, verb }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingLocation {
    Query,
    Path,
    Body,
}

impl fmt::Display for BindingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingLocation::Query => write!(f, "query"),
            BindingLocation::Path => write!(f, "path"),
            BindingLocation::Body => write!(f, "body"),
        }
    }
}

/// How a method parameter travels in the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterBinding {
    pub location: BindingLocation,
    /// Request-side name; defaults to the parameter name
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInstance,
    pub binding: ParameterBinding,
}

impl MethodParameter {
    pub fn location(&self) -> BindingLocation {
        self.binding.location
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointMethod {
    pub name: String,
    pub mapping: MappingDefinition,
    pub params: Vec<MethodParameter>,
    pub return_type: Option<TypeInstance>,
}

/// Client-side model of one controller type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Qualified controller type name, the registry key
    pub controller_type: String,
    /// Display name of the generated service
    pub name: String,
    pub module_name: Option<String>,
    pub default_mapping: Option<MappingDefinition>,
    pub methods: Vec<EndpointMethod>,
    pub container: Option<TypeContainer>,
}

impl Endpoint {
    pub fn package_name(&self) -> &str {
        self.container
            .as_ref()
            .map(TypeContainer::package_name)
            .unwrap_or("")
    }

    pub fn method(&self, name: &str) -> Option<&EndpointMethod> {
        self.methods.iter().find(|m| m.name == name)
    }
}
