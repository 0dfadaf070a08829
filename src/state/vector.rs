//! State vectors: field containers over mesh entities.
//!
//! Two cardinalities exist. A [`UniformVector`] holds one value per entity of
//! its kind. A [`MaterialVector`] holds one value per occupied (cell,
//! material) pair, laid out as one contiguous block per material index whose
//! length always equals that material's current cell count; the registry
//! re-establishes that equality immediately after every material mutation.

use std::fmt;

use crate::state::field::{FieldBuffer, FieldTag};
use crate::topology::entity::{EntityKind, ParallelClass};

/// One value per entity of one kind.
#[derive(Clone, Debug)]
pub struct UniformVector {
    name: String,
    kind: EntityKind,
    class: ParallelClass,
    data: FieldBuffer,
}

impl UniformVector {
    /// Wraps a buffer as a named uniform vector.
    pub fn new(
        name: impl Into<String>,
        kind: EntityKind,
        class: ParallelClass,
        data: FieldBuffer,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            class,
            data,
        }
    }

    /// Vector name, unique within its registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entity kind the vector is defined over.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Parallel class the vector's entity range covers.
    pub fn class(&self) -> ParallelClass {
        self.class
    }

    /// Value-type tag.
    pub fn tag(&self) -> FieldTag {
        self.data.tag()
    }

    /// The underlying values, one per entity index.
    pub fn data(&self) -> &FieldBuffer {
        &self.data
    }

    /// Mutable access to the underlying values.
    pub fn data_mut(&mut self) -> &mut FieldBuffer {
        &mut self.data
    }

    /// Number of values (the entity count of the covered range).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector holds no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One value per occupied (cell, material) pair, blocked by material index.
///
/// Only meaningful for cell entities. Blocks are indexed by material-list
/// position and renumber with it: removing material `m` shifts every block
/// above `m` down by one, exactly as the registry's material list does.
///
/// The three mutation methods are the narrow interface the registry uses to
/// keep blocks sized to material cell counts; nothing else should call them.
#[derive(Clone, Debug)]
pub struct MaterialVector {
    name: String,
    tag: FieldTag,
    blocks: Vec<FieldBuffer>,
}

impl MaterialVector {
    /// Creates a vector with one default-filled block per entry of
    /// `block_sizes` (one entry per existing material, in index order).
    pub fn new(name: impl Into<String>, tag: FieldTag, block_sizes: &[usize]) -> Self {
        Self {
            name: name.into(),
            tag,
            blocks: block_sizes
                .iter()
                .map(|&n| FieldBuffer::with_len(tag, n))
                .collect(),
        }
    }

    /// Vector name, unique within its registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value-type tag shared by every block.
    pub fn tag(&self) -> FieldTag {
        self.tag
    }

    /// Number of material blocks.
    pub fn material_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of values in material `m`'s block, 0 if out of range.
    pub fn size(&self, m: usize) -> usize {
        self.blocks.get(m).map_or(0, FieldBuffer::len)
    }

    /// Values for material `m`.
    pub fn block(&self, m: usize) -> Option<&FieldBuffer> {
        self.blocks.get(m)
    }

    /// Mutable values for material `m`.
    pub fn block_mut(&mut self, m: usize) -> Option<&mut FieldBuffer> {
        self.blocks.get_mut(m)
    }

    /// Appends a default-filled block for a newly added material occupying
    /// `ncells` cells. The new block's index is the previous block count.
    pub fn add_material(&mut self, ncells: usize) {
        self.blocks.push(FieldBuffer::with_len(self.tag, ncells));
    }

    /// Drops material `m`'s block; blocks above shift down by one. Out of
    /// range is a no-op.
    pub fn remove_material(&mut self, m: usize) {
        if m < self.blocks.len() {
            self.blocks.remove(m);
        }
    }

    /// Resizes material `m`'s block to `len` values, default-filling new
    /// slots. Out of range is a no-op.
    pub fn resize(&mut self, m: usize, len: usize) {
        if let Some(block) = self.blocks.get_mut(m) {
            block.resize(len);
        }
    }
}

/// A registered state vector of either cardinality.
#[derive(Clone, Debug)]
pub enum StateVector {
    /// One value per entity.
    Uniform(UniformVector),
    /// One value per occupied (cell, material) pair.
    MultiMaterial(MaterialVector),
}

impl StateVector {
    /// Vector name, unique within its registry.
    pub fn name(&self) -> &str {
        match self {
            StateVector::Uniform(v) => v.name(),
            StateVector::MultiMaterial(v) => v.name(),
        }
    }

    /// Value-type tag.
    pub fn tag(&self) -> FieldTag {
        match self {
            StateVector::Uniform(v) => v.tag(),
            StateVector::MultiMaterial(v) => v.tag(),
        }
    }

    /// The uniform variant, if this is one.
    pub fn as_uniform(&self) -> Option<&UniformVector> {
        match self {
            StateVector::Uniform(v) => Some(v),
            StateVector::MultiMaterial(_) => None,
        }
    }

    /// The uniform variant, mutably.
    pub fn as_uniform_mut(&mut self) -> Option<&mut UniformVector> {
        match self {
            StateVector::Uniform(v) => Some(v),
            StateVector::MultiMaterial(_) => None,
        }
    }

    /// The multi-material variant, if this is one.
    pub fn as_multimaterial(&self) -> Option<&MaterialVector> {
        match self {
            StateVector::Uniform(_) => None,
            StateVector::MultiMaterial(v) => Some(v),
        }
    }

    /// The multi-material variant, mutably.
    pub fn as_multimaterial_mut(&mut self) -> Option<&mut MaterialVector> {
        match self {
            StateVector::Uniform(_) => None,
            StateVector::MultiMaterial(v) => Some(v),
        }
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateVector::Uniform(v) => write!(
                f,
                "uniform vector `{}` ({}) over {:?}/{:?}, {} entries",
                v.name(),
                v.tag().as_str(),
                v.kind(),
                v.class(),
                v.len()
            ),
            StateVector::MultiMaterial(v) => write!(
                f,
                "multi-material vector `{}` ({}), {} materials, {} pairs",
                v.name(),
                v.tag().as_str(),
                v.material_count(),
                (0..v.material_count()).map(|m| v.size(m)).sum::<usize>()
            ),
        }
    }
}
