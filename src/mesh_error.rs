//! MeshStateError: unified error type for mesh-state public APIs.
//!
//! Only structural precondition violations surface as errors; the soft
//! failure paths the data layer is designed to tolerate (duplicate material
//! names, per-vector export mismatches) are logged and skipped instead.

use crate::state::field::FieldTag;
use crate::topology::entity::EntityKind;
use thiserror::Error;

/// Unified error type for mesh-state operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshStateError {
    /// A state vector with this name is already registered.
    #[error("state vector `{0}` is already registered")]
    DuplicateField(String),
    /// A registered buffer's length does not match the entity count it covers.
    #[error("field `{name}` on {kind:?} entities has length {found}, expected {expected}")]
    FieldLengthMismatch {
        /// Name of the offending state vector.
        name: String,
        /// Entity kind the vector is defined over.
        kind: EntityKind,
        /// Length implied by the mesh entity count.
        expected: usize,
        /// Length of the supplied buffer.
        found: usize,
    },
    /// A material index outside the current material list was supplied.
    #[error("material index {index} out of range (material count is {count})")]
    InvalidMaterialIndex {
        /// Offending index.
        index: usize,
        /// Number of materials currently registered.
        count: usize,
    },
    /// Two tagged buffers with different value types were combined.
    #[error("field tag mismatch: expected {expected:?}, found {found:?}")]
    TagMismatch {
        /// Tag of the destination buffer.
        expected: FieldTag,
        /// Tag of the source buffer.
        found: FieldTag,
    },
    /// Two buffers of the same tag but different lengths were combined.
    #[error("buffer length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Length of the destination buffer.
        expected: usize,
        /// Length of the source buffer.
        found: usize,
    },
}
