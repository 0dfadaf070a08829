//! State management: tagged field buffers, uniform and multi-material state
//! vectors, cell-material membership, and the registry that keeps them
//! consistent as materials change.

pub mod field;
pub mod materials;
pub mod registry;
pub mod vector;

pub use field::{FieldBuffer, FieldTag};
pub use materials::CellMaterialMap;
pub use registry::StateRegistry;
pub use vector::{MaterialVector, StateVector, UniformVector};
