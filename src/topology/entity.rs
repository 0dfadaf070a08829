//! `EntityId`: a strong, zero-cost handle for mesh entities, plus the closed
//! kind and parallel-class tags.
//!
//! Every mesh element (node, edge, face, wedge, corner, cell) is identified
//! by a 0-based integer assigned by the external mesh framework. `EntityId`
//! wraps that integer in a `repr(transparent)` newtype so the different
//! ID spaces cannot be mixed up with loop counters, while still indexing
//! arrays directly via [`EntityId::idx`].

use std::fmt;

/// Identifier of one mesh entity within its kind's ID space.
///
/// IDs are 0-based and contiguous per kind (the ID spaces of different kinds
/// overlap; an `EntityId` is only meaningful next to an [`EntityKind`]).
///
/// # Memory layout
/// `repr(transparent)`: same ABI and alignment as a bare `u64`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an `EntityId` from a raw index.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        EntityId(raw)
    }

    /// Returns the raw integer value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the value as a `usize` for direct array indexing.
    #[inline]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityId").field(&self.0).finish()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    #[inline]
    fn from(raw: u64) -> Self {
        EntityId(raw)
    }
}

/// Kind of a mesh entity.
///
/// Wedges and corners are sub-cell decomposition entities: a wedge is the
/// fragment of a cell associated with one (node, edge, face) incidence, a
/// corner the union of the wedges meeting at one node of the cell.
#[derive(
    Copy, Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, serde::Serialize, serde::Deserialize,
)]
pub enum EntityKind {
    /// 0-dimensional mesh point.
    Node,
    /// 1-dimensional connection between two nodes.
    Edge,
    /// Codimension-1 entity bounding a cell.
    Face,
    /// Sub-cell fragment tied to a (node, edge, face) triple.
    Wedge,
    /// Union of the wedges of one cell meeting at one node.
    Corner,
    /// Full-dimensional mesh element.
    Cell,
}

impl EntityKind {
    /// All kinds, in a fixed order suitable for per-kind table iteration.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Node,
        EntityKind::Edge,
        EntityKind::Face,
        EntityKind::Wedge,
        EntityKind::Corner,
        EntityKind::Cell,
    ];
}

/// Ownership qualifier for entity queries.
///
/// An entity is *owned* by the local process if it is authoritative there,
/// and a *ghost* if it is a read-only copy needed for local computation but
/// owned elsewhere. For every kind the `All` view is the owned entries
/// followed by the ghost entries; the two sets are disjoint.
#[derive(
    Copy, Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, serde::Serialize, serde::Deserialize,
)]
pub enum ParallelClass {
    /// Entities authoritative on the local process.
    Owned,
    /// Read-only copies owned by another process.
    Ghost,
    /// Owned entities followed by ghost entities.
    All,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_get_idx() {
        let e = EntityId::new(42);
        assert_eq!(e.get(), 42);
        assert_eq!(e.idx(), 42usize);
        assert_eq!(EntityId::new(0).idx(), 0);
    }

    #[test]
    fn debug_and_display() {
        let e = EntityId::new(7);
        assert_eq!(format!("{:?}", e), "EntityId(7)");
        assert_eq!(format!("{}", e), "7");
    }

    #[test]
    fn ordering_and_hash() {
        use std::collections::HashSet;
        let a = EntityId::new(1);
        let b = EntityId::new(2);
        assert!(a < b);
        let set: HashSet<_> = [a, b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn all_kinds_are_distinct() {
        use std::collections::HashSet;
        let set: HashSet<_> = EntityKind::ALL.into_iter().collect();
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn serde_roundtrip() {
        let e = EntityId::new(123);
        let s = serde_json::to_string(&e).unwrap();
        let back: EntityId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, e);

        let k = serde_json::to_string(&EntityKind::Wedge).unwrap();
        assert_eq!(
            serde_json::from_str::<EntityKind>(&k).unwrap(),
            EntityKind::Wedge
        );
        let c = serde_json::to_string(&ParallelClass::Ghost).unwrap();
        assert_eq!(
            serde_json::from_str::<ParallelClass>(&c).unwrap(),
            ParallelClass::Ghost
        );
    }
}
