//! # Endpoint Model Builder
//!
//! One [`Endpoint`] per controller type. Building runs linearly:
//!
//! 1. class-level mapping (optional URL template and default verb)
//! 2. scope chain, display name and module name from the endpoint marker
//! 3. every method with a mapping, declared or inherited, becomes an
//!    endpoint method; the rest are not exposed
//! 4. a method without a verb inherits the controller's
//! 5. parameters bound as query, path or body are kept, others dropped
//! 6. parameter and return types go through the instance resolver
//!
//! Endpoints are memoized by controller name in the [`EndpointRegistry`].
//! Concurrent builds of the same controller are serialised by a per-name
//! lock and the loser observes the winner's result.

mod mapping;
mod method;

pub use mapping::parse_verb;

use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::context::ProcessingContext;
use crate::error::{BuildError, BuildResult};
use crate::graph::container_of;
use crate::model::Endpoint;
use crate::symbols::annotations::resolve_annotation;
use crate::symbols::markers;

/// Process-wide store of built endpoints
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: DashMap<String, Endpoint>,
    build_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, controller_type: &str) -> Option<Endpoint> {
        self.endpoints.get(controller_type).map(|e| e.clone())
    }

    pub fn contains(&self, controller_type: &str) -> bool {
        self.endpoints.contains_key(controller_type)
    }

    /// Store an endpoint unless one exists for the controller; returns the stored one
    pub fn insert_if_absent(&self, endpoint: Endpoint) -> Endpoint {
        self.endpoints
            .entry(endpoint.controller_type.clone())
            .or_insert(endpoint)
            .clone()
    }

    /// All endpoints, ordered by controller name
    pub fn all(&self) -> Vec<Endpoint> {
        let mut all: Vec<Endpoint> = self.endpoints.iter().map(|e| e.clone()).collect();
        all.sort_by(|a, b| a.controller_type.cmp(&b.controller_type));
        all
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn clear(&self) {
        self.endpoints.clear();
        self.build_locks.clear();
    }

    fn build_lock(&self, controller_type: &str) -> Arc<Mutex<()>> {
        let entry = self
            .build_locks
            .entry(controller_type.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(entry.value())
    }
}

impl ProcessingContext<'_> {
    /// Build (or fetch) the endpoint of a controller type
    ///
    /// # Errors
    ///
    /// * [`BuildError::MissingType`] - the provider does not know the type
    /// * [`BuildError::NotAController`] - the type lacks the endpoint marker
    /// * any resolution error from the method and parameter types
    pub fn build_endpoint(&self, controller_type: &str) -> BuildResult<Endpoint> {
        if let Some(existing) = self.endpoints.get(controller_type) {
            return Ok(existing);
        }
        let declared = self
            .provider
            .declared_type(controller_type)
            .ok_or_else(|| BuildError::MissingType {
                type_name: controller_type.to_string(),
            })?;
        let marker = resolve_annotation(self.provider, &declared.annotations, markers::ENDPOINT)
            .ok_or_else(|| BuildError::NotAController {
                type_name: controller_type.to_string(),
            })?;

        let lock = self.endpoints.build_lock(controller_type);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = self.endpoints.get(controller_type) {
            return Ok(existing);
        }

        let location = format!("endpoint:{}", controller_type);
        let default_mapping = self.resolve_mapping(&declared.annotations, &location)?;

        let mut methods = Vec::new();
        for method in &self.provider.all_methods(declared) {
            if let Some(built) = self.build_method(declared, method, default_mapping.as_ref())? {
                methods.push(built);
            }
        }

        let endpoint = Endpoint {
            controller_type: controller_type.to_string(),
            name: marker
                .string("name")
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| declared.simple_name().to_string()),
            module_name: marker
                .string("module_name")
                .filter(|n| !n.trim().is_empty()),
            default_mapping,
            methods,
            container: Some(container_of(self.provider, declared)),
        };
        debug!(
            controller = controller_type,
            methods = endpoint.methods.len(),
            "Built endpoint"
        );
        Ok(self.endpoints.insert_if_absent(endpoint))
    }
}
