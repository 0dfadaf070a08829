//! # mesh-state
//!
//! mesh-state is the data layer of an unstructured-mesh simulation stack: it
//! models meshes as collections of typed geometric entities (nodes, edges,
//! faces, cells and their sub-cell decompositions), groups cells into tiles
//! for node-local parallel work, and manages simulation field data, including
//! fields that exist only for the subset of materials occupying a cell
//! (multi-material state).
//!
//! The crate deliberately excludes mesh construction, geometry, file I/O and
//! MPI-level distribution: it consumes a mesh through the
//! [`MeshTopology`](crate::topology::mesh::MeshTopology) trait and operates
//! purely on entity-ID lists already assigned to the local process.
//!
//! ## Subsystems
//! - [`topology`]: entity identifiers and tags, the external mesh contract,
//!   named entity collections, and the [`Tile`](crate::topology::tile::Tile)
//!   entity-partition cache.
//! - [`state`]: tagged field buffers, uniform and multi-material state
//!   vectors, cell-material membership, and the
//!   [`StateRegistry`](crate::state::registry::StateRegistry) that keeps them
//!   consistent as materials change.
//!
//! ## Concurrency
//! No internal locking is provided. All operations are single-threaded within
//! one `Tile` or `StateRegistry` instance; the parent mesh is a read-only
//! shared resource, so multiple tiles may reference the same mesh
//! concurrently for reads.

pub mod mesh_error;
pub mod state;
pub mod topology;

/// A convenient prelude importing the most-used traits and types.
pub mod prelude {
    pub use crate::mesh_error::MeshStateError;
    pub use crate::state::field::{FieldBuffer, FieldTag};
    pub use crate::state::registry::StateRegistry;
    pub use crate::state::vector::{MaterialVector, StateVector, UniformVector};
    pub use crate::topology::entity::{EntityId, EntityKind, ParallelClass};
    pub use crate::topology::entity_set::{EntitySet, SetHandle, SetRegistry};
    pub use crate::topology::mesh::{FieldClass, FieldInfo, MeshTopology};
    pub use crate::topology::tile::{Tile, TileOptions};
}
