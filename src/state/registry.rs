//! StateRegistry: owner of all state vectors and the material list.
//!
//! The registry is constructed once per mesh. It accumulates state vectors
//! through registration, tracks which materials occupy which cells, and
//! orchestrates material mutations so that every multi-material vector's
//! per-material block stays sized to that material's cell count.
//!
//! Material mutations are multi-step (named set, membership map, then every
//! dependent vector) with no atomicity guard: they are non-reentrant with
//! respect to one registry instance, and a panic mid-sequence leaves the
//! registry partially updated. There is no rollback by design.

use std::collections::HashMap;
use std::fmt;

use crate::mesh_error::MeshStateError;
use crate::state::field::{FieldBuffer, FieldTag};
use crate::state::materials::CellMaterialMap;
use crate::state::vector::{MaterialVector, StateVector, UniformVector};
use crate::topology::entity::{EntityId, EntityKind, ParallelClass};
use crate::topology::entity_set::SetHandle;
use crate::topology::mesh::{FieldClass, MeshTopology};

/// State manager for one mesh: all registered state vectors, the material
/// list, and the cell-material membership map.
///
/// Material identity is a position in the material list: 0-based, contiguous,
/// renumbered downward on removal. Indices cached across a removal refer to a
/// different material afterwards; re-resolve with
/// [`material_index`](Self::material_index).
pub struct StateRegistry<'m, M: MeshTopology> {
    mesh: &'m M,
    vectors: Vec<StateVector>,
    names: HashMap<String, usize>,
    materials: Vec<SetHandle>,
    cell_materials: CellMaterialMap,
}

impl<'m, M: MeshTopology> StateRegistry<'m, M> {
    /// Creates an empty registry over `mesh`.
    pub fn new(mesh: &'m M) -> Self {
        Self {
            mesh,
            vectors: Vec::new(),
            names: HashMap::new(),
            materials: Vec::new(),
            cell_materials: CellMaterialMap::new(),
        }
    }

    /// The mesh this registry manages state for.
    pub fn mesh(&self) -> &'m M {
        self.mesh
    }

    // --- Materials -------------------------------------------------------

    /// Number of registered materials.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Current index of the material named `name`, if registered.
    ///
    /// This is the supported way to re-resolve a material after a removal
    /// has renumbered the list.
    pub fn material_index(&self, name: &str) -> Option<usize> {
        self.materials
            .iter()
            .position(|s| s.borrow().name() == name)
    }

    /// Handle to material `m`'s cell set.
    pub fn material(&self, m: usize) -> Option<SetHandle> {
        self.materials.get(m).cloned()
    }

    /// Cells occupied by material `m`, in set order.
    pub fn material_cells(&self, m: usize) -> Option<Vec<EntityId>> {
        self.materials.get(m).map(|s| s.borrow().entities().to_vec())
    }

    /// Material indices occupying `cell`, in assignment order.
    pub fn materials_of_cell(&self, cell: EntityId) -> &[usize] {
        self.cell_materials.materials_of(cell)
    }

    /// Registers a new material occupying `cells`.
    ///
    /// If the name is already used the call is a no-op, reported through a
    /// log message only; callers that need to tell the two outcomes apart
    /// probe [`material_index`](Self::material_index) first.
    ///
    /// Otherwise this finds or creates the persistent named cell set in the
    /// mesh's registry, appends `cells` to it, appends the set to the
    /// material list (new index = previous count), records the new index for
    /// every cell in `cells`, and grows every multi-material vector with a
    /// default-filled block of `cells.len()` slots for callers to populate.
    ///
    /// A persistent set that survived an earlier removal may already hold
    /// cells; those are not re-registered here, so in that one scenario the
    /// new block is sized to `cells.len()` while the set is larger. Callers
    /// re-adding a removed material pass its full cell list to keep block
    /// lengths and set sizes in step.
    pub fn add_material(&mut self, name: &str, cells: &[EntityId]) {
        if self.material_index(name).is_some() {
            log::warn!("material name `{name}` already used");
            return;
        }

        let set = self.mesh.find_or_create_set(name, EntityKind::Cell);
        set.borrow_mut().add_entities(cells);
        self.materials.push(set);
        let matid = self.materials.len() - 1;

        self.cell_materials
            .ensure_cell_count(self.mesh.entity_count(EntityKind::Cell, ParallelClass::All));
        for &c in cells {
            self.cell_materials.assign(c, matid);
        }

        for vec in &mut self.vectors {
            if let StateVector::MultiMaterial(mv) = vec {
                mv.add_material(cells.len());
            }
        }
    }

    /// Removes material `m`. Out-of-range indices are a no-op.
    ///
    /// Every membership entry equal to `m` on the material's cells is
    /// removed, the material list is compacted (indices above `m` shift down
    /// by one), and every multi-material vector drops its block for `m`.
    /// The named cell set persists in the mesh's registry. Stale indices
    /// held by callers are not fixed up; re-resolve by name.
    pub fn remove_material(&mut self, m: usize) {
        if m >= self.materials.len() {
            return;
        }

        let cells = self.materials[m].borrow().entities().to_vec();
        for c in cells {
            self.cell_materials.unassign_all(c, m);
        }
        self.materials.remove(m);

        for vec in &mut self.vectors {
            if let StateVector::MultiMaterial(mv) = vec {
                mv.remove_material(m);
            }
        }
    }

    /// Extends material `m` with `cells`.
    ///
    /// The index is validated before anything is mutated; an invalid index
    /// fails the call and leaves the registry untouched. New multi-material
    /// slots are default-filled, for callers to populate.
    pub fn add_cells_to_material(
        &mut self,
        m: usize,
        cells: &[EntityId],
    ) -> Result<(), MeshStateError> {
        let Some(set) = self.materials.get(m) else {
            return Err(MeshStateError::InvalidMaterialIndex {
                index: m,
                count: self.materials.len(),
            });
        };
        set.borrow_mut().add_entities(cells);

        for &c in cells {
            self.cell_materials.assign(c, m);
        }

        for vec in &mut self.vectors {
            if let StateVector::MultiMaterial(mv) = vec {
                let size = mv.size(m);
                mv.resize(m, size + cells.len());
            }
        }
        Ok(())
    }

    /// Unsupported: removing cells from a material.
    ///
    /// Always fails fatally. Shrinking a material requires compacting every
    /// dependent multi-material block and the persistent named set in an
    /// index-consistent way; no safe partial behavior exists, so the gap is
    /// explicit rather than guessed at.
    pub fn remove_cells_from_material(&mut self, _m: usize, _cells: &[EntityId]) {
        unimplemented!("remove_cells_from_material: no index-consistent compaction is defined")
    }

    // --- State vectors ---------------------------------------------------

    /// Registers a uniform state vector wrapping `data`.
    ///
    /// Names are unique per registry; the buffer length must equal the mesh
    /// entity count for `(kind, class)`.
    pub fn add_field(
        &mut self,
        name: &str,
        kind: EntityKind,
        class: ParallelClass,
        data: FieldBuffer,
    ) -> Result<(), MeshStateError> {
        if self.names.contains_key(name) {
            return Err(MeshStateError::DuplicateField(name.to_string()));
        }
        let expected = self.mesh.entity_count(kind, class);
        if data.len() != expected {
            return Err(MeshStateError::FieldLengthMismatch {
                name: name.to_string(),
                kind,
                expected,
                found: data.len(),
            });
        }
        self.push_vector(StateVector::Uniform(UniformVector::new(
            name, kind, class, data,
        )));
        Ok(())
    }

    /// Registers a multi-material state vector over cells.
    ///
    /// One default-filled block is created per existing material, sized to
    /// that material's current cell count; blocks for materials added later
    /// are created by [`add_material`](Self::add_material).
    pub fn add_material_field(&mut self, name: &str, tag: FieldTag) -> Result<(), MeshStateError> {
        if self.names.contains_key(name) {
            return Err(MeshStateError::DuplicateField(name.to_string()));
        }
        let sizes: Vec<usize> = self.materials.iter().map(|s| s.borrow().len()).collect();
        self.push_vector(StateVector::MultiMaterial(MaterialVector::new(
            name, tag, &sizes,
        )));
        Ok(())
    }

    /// Looks up a state vector by name.
    pub fn field(&self, name: &str) -> Option<&StateVector> {
        self.names.get(name).map(|&i| &self.vectors[i])
    }

    /// Looks up a state vector by name, mutably.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut StateVector> {
        match self.names.get(name) {
            Some(&i) => self.vectors.get_mut(i),
            None => None,
        }
    }

    /// All state vectors, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &StateVector> {
        self.vectors.iter()
    }

    /// Number of registered state vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether no state vectors are registered.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn push_vector(&mut self, vec: StateVector) {
        self.names.insert(vec.name().to_string(), self.vectors.len());
        self.vectors.push(vec);
    }

    // --- Mesh field exchange ---------------------------------------------

    /// Imports every field the mesh can supply on node, face and cell
    /// entities as a uniform state vector over the ALL range.
    ///
    /// Vector and tensor catalog entries are resolved against the mesh's
    /// space dimension (2 or 3 components for vectors; 3 or 6 for the lower
    /// triangle plus diagonal of a symmetric tensor). Fields that cannot be
    /// resolved, read or registered are logged and skipped; the import
    /// continues. Returns the number of vectors imported.
    pub fn import_from_mesh(&mut self) -> usize {
        let mut imported = 0;
        for kind in [EntityKind::Node, EntityKind::Face, EntityKind::Cell] {
            let dim = self.mesh.space_dimension();
            for info in self.mesh.field_catalog(kind) {
                let tag = match (info.class, dim) {
                    (FieldClass::Int, _) => FieldTag::Int,
                    (FieldClass::Double, _) => FieldTag::Double,
                    (FieldClass::Vector, 2) => FieldTag::Vector2,
                    (FieldClass::Vector, 3) => FieldTag::Vector3,
                    (FieldClass::Tensor, 2) => FieldTag::Tensor2,
                    (FieldClass::Tensor, 3) => FieldTag::Tensor3,
                    (class, dim) => {
                        log::warn!(
                            "cannot import field `{}`: {class:?} undefined in {dim}-D",
                            info.name
                        );
                        continue;
                    }
                };
                let nent = self.mesh.entity_count(kind, ParallelClass::All);
                let mut data = FieldBuffer::with_len(tag, nent);
                if !self.mesh.field_read(&info.name, kind, &mut data) {
                    log::warn!("mesh could not supply field `{}` on {kind:?}", info.name);
                    continue;
                }
                match self.add_field(&info.name, kind, ParallelClass::All, data) {
                    Ok(()) => imported += 1,
                    Err(err) => log::warn!("skipping field `{}`: {err}", info.name),
                }
            }
        }
        imported
    }

    /// Pushes every exportable state vector back to the mesh's field store.
    ///
    /// Only uniform vectors are exportable. A vector that is multi-material,
    /// or whose value type the mesh rejects, is logged and skipped; the pass
    /// continues over the remaining vectors in registration order. Partial
    /// export is an accepted terminal state. Returns the number exported.
    pub fn export_to_mesh(&self) -> usize {
        let mut exported = 0;
        for vec in &self.vectors {
            let ok = match vec {
                StateVector::Uniform(v) => self.mesh.field_write(v.name(), v.kind(), v.data()),
                StateVector::MultiMaterial(_) => false,
            };
            if ok {
                exported += 1;
            } else {
                log::warn!("could not export vector `{}` to mesh", vec.name());
            }
        }
        exported
    }
}

impl<M: MeshTopology> fmt::Display for StateRegistry<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vec in &self.vectors {
            writeln!(f, "{vec}")?;
        }
        Ok(())
    }
}
