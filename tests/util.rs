//! Shared test fixture: a structured quad-grid mesh implementing
//! `MeshTopology` with threshold-based ownership, an embedded set registry
//! and an in-memory field store.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use mesh_state::prelude::*;

/// nx x ny quad grid in 2-D.
///
/// Numbering: cell (i, j) = j*nx + i; node (i, j) = j*(nx+1) + i; horizontal
/// edge (i, j) = j*nx + i, vertical edge (i, j) = nx*(ny+1) + j*(nx+1) + i.
/// Faces share the edge ID space (codimension 1 in 2-D). Each cell owns 8
/// wedges (c*8+k) and 4 corners (c*4+k).
///
/// Ownership is a per-kind threshold: entity `id` is owned iff
/// `id < owned[kind]`. Everything is owned by default.
pub struct GridMesh {
    nx: usize,
    ny: usize,
    owned: BTreeMap<EntityKind, usize>,
    sets: SetRegistry,
    fields: RefCell<BTreeMap<(EntityKind, String), FieldBuffer>>,
    refuse_writes: RefCell<HashSet<String>>,
}

impl GridMesh {
    pub fn new(nx: usize, ny: usize) -> Self {
        let mut mesh = Self {
            nx,
            ny,
            owned: BTreeMap::new(),
            sets: SetRegistry::new(),
            fields: RefCell::new(BTreeMap::new()),
            refuse_writes: RefCell::new(HashSet::new()),
        };
        for kind in EntityKind::ALL {
            mesh.owned.insert(kind, mesh.total(kind));
        }
        mesh
    }

    pub fn total(&self, kind: EntityKind) -> usize {
        let (nx, ny) = (self.nx, self.ny);
        match kind {
            EntityKind::Node => (nx + 1) * (ny + 1),
            EntityKind::Edge | EntityKind::Face => nx * (ny + 1) + (nx + 1) * ny,
            EntityKind::Wedge => nx * ny * 8,
            EntityKind::Corner => nx * ny * 4,
            EntityKind::Cell => nx * ny,
        }
    }

    /// Marks entities of `kind` with `id >= count` as ghosts.
    pub fn set_owned(&mut self, kind: EntityKind, count: usize) {
        assert!(count <= self.total(kind));
        self.owned.insert(kind, count);
    }

    /// Seeds the mesh field store (and thereby the catalog).
    pub fn add_mesh_field(&self, name: &str, kind: EntityKind, data: FieldBuffer) {
        assert_eq!(data.len(), self.total(kind));
        self.fields
            .borrow_mut()
            .insert((kind, name.to_string()), data);
    }

    /// Snapshot of a stored field, if present.
    pub fn stored_field(&self, name: &str, kind: EntityKind) -> Option<FieldBuffer> {
        self.fields.borrow().get(&(kind, name.to_string())).cloned()
    }

    /// Makes `field_write` reject the named field.
    pub fn refuse_writes_for(&self, name: &str) {
        self.refuse_writes.borrow_mut().insert(name.to_string());
    }

    fn node(&self, i: usize, j: usize) -> EntityId {
        EntityId::new((j * (self.nx + 1) + i) as u64)
    }

    fn hedge(&self, i: usize, j: usize) -> EntityId {
        EntityId::new((j * self.nx + i) as u64)
    }

    fn vedge(&self, i: usize, j: usize) -> EntityId {
        EntityId::new((self.nx * (self.ny + 1) + j * (self.nx + 1) + i) as u64)
    }

    fn class_of(tag: FieldTag) -> FieldClass {
        match tag {
            FieldTag::Int => FieldClass::Int,
            FieldTag::Double => FieldClass::Double,
            FieldTag::Vector2 | FieldTag::Vector3 => FieldClass::Vector,
            FieldTag::Tensor2 | FieldTag::Tensor3 => FieldClass::Tensor,
        }
    }
}

impl MeshTopology for GridMesh {
    fn space_dimension(&self) -> usize {
        2
    }

    fn entity_count(&self, kind: EntityKind, class: ParallelClass) -> usize {
        let total = self.total(kind);
        let owned = self.owned[&kind];
        match class {
            ParallelClass::All => total,
            ParallelClass::Owned => owned,
            ParallelClass::Ghost => total - owned,
        }
    }

    fn cell_subentities(&self, cell: EntityId, kind: EntityKind) -> Vec<EntityId> {
        let c = cell.idx();
        let (i, j) = (c % self.nx, c / self.nx);
        match kind {
            EntityKind::Cell => vec![cell],
            EntityKind::Node => vec![
                self.node(i, j),
                self.node(i + 1, j),
                self.node(i + 1, j + 1),
                self.node(i, j + 1),
            ],
            EntityKind::Edge | EntityKind::Face => vec![
                self.hedge(i, j),
                self.vedge(i + 1, j),
                self.hedge(i, j + 1),
                self.vedge(i, j),
            ],
            EntityKind::Wedge => (0..8).map(|k| EntityId::new((c * 8 + k) as u64)).collect(),
            EntityKind::Corner => (0..4).map(|k| EntityId::new((c * 4 + k) as u64)).collect(),
        }
    }

    fn is_owned(&self, kind: EntityKind, id: EntityId) -> bool {
        id.idx() < self.owned[&kind]
    }

    fn find_set(&self, name: &str, kind: EntityKind) -> Option<SetHandle> {
        self.sets.find(name, kind)
    }

    fn find_or_create_set(&self, name: &str, kind: EntityKind) -> SetHandle {
        self.sets.find_or_create(name, kind)
    }

    fn field_catalog(&self, kind: EntityKind) -> Vec<FieldInfo> {
        self.fields
            .borrow()
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|((_, name), buf)| FieldInfo {
                name: name.clone(),
                class: Self::class_of(buf.tag()),
            })
            .collect()
    }

    fn field_read(&self, name: &str, kind: EntityKind, out: &mut FieldBuffer) -> bool {
        let fields = self.fields.borrow();
        let Some(src) = fields.get(&(kind, name.to_string())) else {
            return false;
        };
        out.copy_from(src).is_ok()
    }

    fn field_write(&self, name: &str, kind: EntityKind, data: &FieldBuffer) -> bool {
        if self.refuse_writes.borrow().contains(name) {
            return false;
        }
        self.fields
            .borrow_mut()
            .insert((kind, name.to_string()), data.clone());
        true
    }
}

/// Shorthand for building entity IDs in tests.
pub fn e(raw: u64) -> EntityId {
    EntityId::new(raw)
}
