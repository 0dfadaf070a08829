//! Named entity collections.
//!
//! An `EntitySet` is a named, mutable list of entity IDs of one kind. The
//! state layer uses cell sets to record which cells a material occupies;
//! since both the mesh's set registry and the state registry need to see the
//! same underlying set, sets are handed out as shared [`SetHandle`]s.

use crate::topology::entity::{EntityId, EntityKind};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a named entity collection.
///
/// The mesh's registry and any state manager built over the mesh hold the
/// same handle, so additions through either are visible to both.
pub type SetHandle = Rc<RefCell<EntitySet>>;

/// A named, ordered collection of entity IDs of one kind.
///
/// Entities are kept in insertion order and are not deduplicated; callers
/// that add an entity twice will see it twice.
#[derive(Clone, Debug)]
pub struct EntitySet {
    name: String,
    kind: EntityKind,
    entities: Vec<EntityId>,
}

impl EntitySet {
    /// Creates an empty set.
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            entities: Vec::new(),
        }
    }

    /// Name of the set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of entity the set collects.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Number of entities in the set.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Appends `entities` to the set, preserving their order.
    pub fn add_entities(&mut self, entities: &[EntityId]) {
        self.entities.extend_from_slice(entities);
    }
}

/// Find-or-create store for named entity sets.
///
/// A mesh implementation embeds one of these to satisfy the named-collection
/// half of [`MeshTopology`](crate::topology::mesh::MeshTopology). Lookup is
/// by (name, kind); creation appends, so handle identity is stable for the
/// life of the registry.
#[derive(Clone, Debug, Default)]
pub struct SetRegistry {
    sets: RefCell<Vec<SetHandle>>,
}

impl SetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set named `name` over `kind` entities, if present.
    pub fn find(&self, name: &str, kind: EntityKind) -> Option<SetHandle> {
        self.sets
            .borrow()
            .iter()
            .find(|s| {
                let s = s.borrow();
                s.name() == name && s.kind() == kind
            })
            .cloned()
    }

    /// Returns the set named `name` over `kind` entities, creating an empty
    /// one if absent.
    pub fn find_or_create(&self, name: &str, kind: EntityKind) -> SetHandle {
        if let Some(existing) = self.find(name, kind) {
            return existing;
        }
        let created: SetHandle = Rc::new(RefCell::new(EntitySet::new(name, kind)));
        self.sets.borrow_mut().push(Rc::clone(&created));
        created
    }

    /// Number of registered sets.
    pub fn len(&self) -> usize {
        self.sets.borrow().len()
    }

    /// Whether the registry holds no sets.
    pub fn is_empty(&self) -> bool {
        self.sets.borrow().is_empty()
    }
}
