//! Topology-facing types: entity identifiers and tags, the external mesh
//! contract, named entity collections, and the tile partition cache.

pub mod entity;
pub mod entity_set;
pub mod mesh;
pub mod tile;

pub use entity::{EntityId, EntityKind, ParallelClass};
pub use entity_set::{EntitySet, SetHandle, SetRegistry};
pub use mesh::MeshTopology;
pub use tile::{Tile, TileOptions};
