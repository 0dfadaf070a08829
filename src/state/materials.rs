//! Cell-material membership bookkeeping.
//!
//! Sparse mapping from cell ID to the ordered list of material indices
//! occupying that cell. Indices are material-list positions; the map does not
//! renumber entries when a material below them is removed; after a removal,
//! callers re-resolve indices by material name through the registry.

use crate::topology::entity::EntityId;

/// Cell -> ordered material-index list.
///
/// Sized to the mesh's total cell count once any material exists; entries
/// default to empty. Assignment order is insertion order; duplicates are
/// possible only if a caller double-assigns and are not deduplicated here.
#[derive(Clone, Debug, Default)]
pub struct CellMaterialMap {
    cells: Vec<Vec<usize>>,
}

impl CellMaterialMap {
    /// Creates an empty, zero-cell map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grows the map to cover `ncells` cells. Never shrinks.
    pub fn ensure_cell_count(&mut self, ncells: usize) {
        if self.cells.len() < ncells {
            self.cells.resize_with(ncells, Vec::new);
        }
    }

    /// Number of cell slots currently covered.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Material indices occupying `cell`, in assignment order. Empty for
    /// cells out of the covered range.
    pub fn materials_of(&self, cell: EntityId) -> &[usize] {
        self.cells.get(cell.idx()).map_or(&[], Vec::as_slice)
    }

    /// Appends material `m` to `cell`'s list.
    ///
    /// The cell must be inside the covered range; the registry sizes the map
    /// before assigning.
    pub fn assign(&mut self, cell: EntityId, m: usize) {
        debug_assert!(cell.idx() < self.cells.len());
        if let Some(mats) = self.cells.get_mut(cell.idx()) {
            mats.push(m);
        }
    }

    /// Removes every occurrence of material `m` from `cell`'s list.
    ///
    /// All occurrences, not just the first: a cell cannot legitimately carry
    /// the same material twice, but the bookkeeping stays robust to a
    /// double-add.
    pub fn unassign_all(&mut self, cell: EntityId, m: usize) {
        if let Some(mats) = self.cells.get_mut(cell.idx()) {
            mats.retain(|&x| x != m);
        }
    }
}
