//! The external mesh contract.
//!
//! Mesh construction, numbering, geometry, I/O and ghost exchange all live in
//! an external topology framework. This module pins down the narrow trait the
//! data layer consumes: entity counts, cell-adjacency queries, ownership,
//! access to the mesh's named-set registry, and a flat field store.

use crate::state::field::FieldBuffer;
use crate::topology::entity::{EntityId, EntityKind, ParallelClass};
use crate::topology::entity_set::SetHandle;

/// Abstract value class of a mesh-held field, as reported by the catalog.
///
/// The catalog is dimension-agnostic: `Vector` and `Tensor` entries are
/// resolved to a concrete [`FieldTag`](crate::state::field::FieldTag) against
/// the mesh's space dimension when the field is imported (2 or 3 components
/// for vectors; 3 or 6 for the lower triangle plus diagonal of a symmetric
/// tensor).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FieldClass {
    /// Integer scalar per entity.
    Int,
    /// Double scalar per entity.
    Double,
    /// Spatial vector per entity.
    Vector,
    /// Symmetric tensor per entity.
    Tensor,
}

/// One entry of a mesh's field catalog.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldInfo {
    /// Field name, unique per entity kind.
    pub name: String,
    /// Abstract value class; see [`FieldClass`].
    pub class: FieldClass,
}

/// Topology, ownership, set-registry and field-store queries the data layer
/// needs from a mesh.
///
/// Implementations are read-only from this crate's perspective: nothing here
/// mutates mesh topology. `find_or_create_set` and `field_write` take `&self`
/// because set registries and field stores are bookkeeping attached to the
/// mesh, not topology; implementations use interior mutability for them.
pub trait MeshTopology {
    /// Spatial dimension of the mesh (2 or 3).
    fn space_dimension(&self) -> usize;

    /// Number of entities of `kind` in the given parallel class, mesh-wide.
    fn entity_count(&self, kind: EntityKind, class: ParallelClass) -> usize;

    /// Sub-entities of `kind` adjacent to `cell`, in the mesh's canonical
    /// order. For `kind == Cell` the result is the cell itself.
    fn cell_subentities(&self, cell: EntityId, kind: EntityKind) -> Vec<EntityId>;

    /// Whether the entity is authoritative on the local process.
    fn is_owned(&self, kind: EntityKind, id: EntityId) -> bool;

    /// Looks up a named entity set, if present.
    fn find_set(&self, name: &str, kind: EntityKind) -> Option<SetHandle>;

    /// Looks up a named entity set, creating an empty persistent one if
    /// absent. The returned handle stays valid for the life of the mesh.
    fn find_or_create_set(&self, name: &str, kind: EntityKind) -> SetHandle;

    /// Fields the mesh can supply for entities of `kind`.
    fn field_catalog(&self, kind: EntityKind) -> Vec<FieldInfo>;

    /// Fills `out` with the named field's values, one per entity of `kind`
    /// in the ALL ordering. Returns `false` if the mesh cannot supply the
    /// field into a buffer of that tag and length.
    fn field_read(&self, name: &str, kind: EntityKind, out: &mut FieldBuffer) -> bool;

    /// Stores `data` as the named field over entities of `kind`. Returns
    /// `false` if the mesh does not recognize the buffer's value type.
    fn field_write(&self, name: &str, kind: EntityKind, data: &FieldBuffer) -> bool;
}
