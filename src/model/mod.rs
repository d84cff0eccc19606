//! Resolved model: type definitions, type instances and endpoints.
//!
//! Everything here is plain data produced by the builders and consumed by
//! the emitters. Definitions are owned by the [`TypeGraph`](crate::graph::TypeGraph)
//! and referenced by [`TypeId`]; endpoints are owned by the
//! [`EndpointRegistry`](crate::endpoint::EndpointRegistry).

mod endpoint;
mod types;

pub use endpoint::{
    BindingLocation, Endpoint, EndpointMethod, MappingDefinition, MethodParameter,
    ParameterBinding,
};
pub use types::{
    EnumConstant, PropertyDefinition, TypeContainer, TypeDefinition, TypeId, TypeInstance,
    TypeKind,
};
