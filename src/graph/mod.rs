//! # Type Graph
//!
//! The canonical registry of resolved named types. There is exactly one
//! [`TypeDefinition`] per qualified name for the lifetime of the graph.
//!
//! ## Storage
//!
//! Definitions live in an arena keyed by [`TypeId`]; a second map indexes
//! them by qualified name. Cross references between definitions (bounds,
//! supertypes, property types) are [`TypeInstance`]s holding ids, so cyclic
//! shapes need no shared ownership.
//!
//! ## Concurrency
//!
//! Both maps are [`DashMap`]s, so unrelated lookups never contend. Building
//! a definition takes a per-name mutex from `build_locks`; a builder
//! registers its (empty) definition right after acquiring the lock and
//! before resolving anything else. Self-references and mutual references
//! therefore find the registered definition instead of recursing, and at
//! most one build runs per name.
//!
//! Accessors return clones. No map guard is held across a call back into
//! the graph.
//!
//! [`TypeInstance`]: crate::model::TypeInstance

mod definition;
mod predefined;
mod resolver;
mod scope;

pub use predefined::{ANY, COLLECTION};
pub(crate) use definition::display_name_override;
pub use scope::container_of;

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::GenConfig;
use crate::model::{TypeDefinition, TypeId, TypeKind};
use crate::symbols::markers;

#[derive(Debug, Default)]
pub struct TypeGraph {
    names: DashMap<String, TypeId>,
    definitions: DashMap<TypeId, TypeDefinition>,
    next_id: AtomicU32,
    build_locks: DashMap<String, Arc<Mutex<()>>>,
    seeded: AtomicBool,
    seed_lock: Mutex<()>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition unless one with the same name exists
    ///
    /// The first writer wins: a later definition for a known name is
    /// discarded and the existing id is returned.
    pub fn register(&self, mut definition: TypeDefinition) -> TypeId {
        match self.names.entry(definition.full_name.clone()) {
            dashmap::mapref::entry::Entry::Occupied(existing) => *existing.get(),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let id = TypeId(self.next_id.fetch_add(1, Ordering::Relaxed));
                definition.id = id;
                // arena first, so a visible name always has a definition
                self.definitions.insert(id, definition);
                slot.insert(id);
                id
            }
        }
    }

    /// Id registered for `full_name`
    pub fn id_of(&self, full_name: &str) -> Option<TypeId> {
        self.names.get(full_name).map(|id| *id)
    }

    /// Definition registered for `full_name`
    pub fn get(&self, full_name: &str) -> Option<TypeDefinition> {
        let id = self.id_of(full_name)?;
        self.definition(id)
    }

    pub fn definition(&self, id: TypeId) -> Option<TypeDefinition> {
        self.definitions.get(&id).map(|d| d.clone())
    }

    /// Read a definition in place
    ///
    /// The closure runs under the arena shard's read guard and must not
    /// call back into the graph.
    pub fn with_definition<R>(&self, id: TypeId, f: impl FnOnce(&TypeDefinition) -> R) -> Option<R> {
        self.definitions.get(&id).map(|d| f(&d))
    }

    pub fn kind(&self, id: TypeId) -> Option<TypeKind> {
        self.with_definition(id, |d| d.kind)
    }

    pub fn ts_name(&self, id: TypeId) -> Option<String> {
        self.with_definition(id, |d| d.ts_name.clone())
    }

    /// Mutate a registered definition; the closure must not call back into the graph
    pub(crate) fn update(&self, id: TypeId, f: impl FnOnce(&mut TypeDefinition)) {
        if let Some(mut def) = self.definitions.get_mut(&id) {
            f(&mut def);
        }
    }

    /// Per-name mutex serialising builds of one type
    pub(crate) fn build_lock(&self, full_name: &str) -> Arc<Mutex<()>> {
        let entry = self
            .build_locks
            .entry(full_name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(entry.value())
    }

    /// Seed predefined types once; repeated calls are no-ops until [`clear`](Self::clear)
    pub fn seed(&self, config: &GenConfig) {
        if self.seeded.load(Ordering::Acquire) {
            return;
        }
        let _guard = self.seed_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.seeded.load(Ordering::Acquire) {
            return;
        }
        let count = predefined::seed(self, config);
        tracing::debug!(count, "Seeded predefined types");
        self.seeded.store(true, Ordering::Release);
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded.load(Ordering::Acquire)
    }

    /// The `any` escape type
    pub fn any(&self) -> TypeId {
        self.builtin(markers::OBJECT, "Object", ANY, TypeKind::Primitive)
    }

    /// The synthetic collection marker, target of every collection and array
    pub fn collection(&self) -> TypeId {
        self.builtin(COLLECTION, COLLECTION, COLLECTION, TypeKind::Collection)
    }

    /// The synthetic map marker, target of every map type
    pub fn map(&self) -> TypeId {
        self.builtin(markers::MAP_ROOT, "Map", "Map", TypeKind::Map)
    }

    fn builtin(&self, full_name: &str, short_name: &str, ts_name: &str, kind: TypeKind) -> TypeId {
        if let Some(id) = self.id_of(full_name) {
            return id;
        }
        self.register(TypeDefinition::predefined(full_name, short_name, ts_name, kind))
    }

    /// Every definition, ordered by registration
    pub fn definitions(&self) -> Vec<TypeDefinition> {
        let mut all: Vec<TypeDefinition> = self.definitions.iter().map(|d| d.clone()).collect();
        all.sort_by_key(|d| d.id);
        all
    }

    /// Non-predefined interface and enum definitions, the emitter's input
    pub fn emittable(&self) -> Vec<TypeDefinition> {
        self.definitions()
            .into_iter()
            .filter(|d| !d.predefined && d.kind.is_importable())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Drop every definition and allow predefined seeding again
    ///
    /// Ids keep counting up, so an instance held across a reset never
    /// aliases a new definition.
    pub fn clear(&self) {
        let _guard = self.seed_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.names.clear();
        self.definitions.clear();
        self.build_locks.clear();
        self.seeded.store(false, Ordering::Release);
    }
}
