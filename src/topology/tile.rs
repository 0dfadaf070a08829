//! Tile: an ownership-qualified entity partition of a mesh.
//!
//! Tiles are small groupings of mesh cells on a compute node, typically
//! obtained by partitioning the full local mesh. They are lightweight
//! structures, little more than lists of entity IDs, that let work on a mesh be broken into
//! manageable, independently schedulable chunks. A tile includes ghost entities at
//! the process level for the sub-entity kinds, but the cells handed to it are
//! classified as given.
//!
//! Lists for faces, edges, wedges and corners are only materialized if
//! requested at construction, and lazily on first access at that: the
//! classification walks every cell's adjacency, which is wasted work for the
//! common tile that only ever asks for nodes and cells. Once computed a list
//! never changes for the life of the tile, so the caches are plain
//! [`OnceCell`]s and the query interface takes `&self`.

use itertools::Itertools;
use once_cell::sync::OnceCell;

use crate::topology::entity::{EntityId, EntityKind, ParallelClass};
use crate::topology::mesh::MeshTopology;

const EMPTY: &[EntityId] = &[];

/// Which sub-entity kinds a tile should materialize lists for.
///
/// Faces are requested by default; edges, wedges and corners are opt-in.
/// Node and cell lists are always available.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TileOptions {
    /// Materialize face lists.
    pub faces: bool,
    /// Materialize edge lists.
    pub edges: bool,
    /// Materialize wedge lists.
    pub wedges: bool,
    /// Materialize corner lists.
    pub corners: bool,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            faces: true,
            edges: false,
            wedges: false,
            corners: false,
        }
    }
}

/// Owned/ghost/all ID lists for one entity kind.
///
/// Invariants: `owned` and `ghost` are disjoint and duplicate-free; the `all`
/// view is always the concatenation `owned ++ ghost`, memoized on first
/// access rather than derived independently.
#[derive(Debug, Default)]
struct EntityLists {
    owned: Vec<EntityId>,
    ghost: Vec<EntityId>,
    all: OnceCell<Vec<EntityId>>,
}

impl EntityLists {
    /// Splits an already-deduplicated ID stream by ownership.
    fn classify<M, I>(mesh: &M, kind: EntityKind, ids: I) -> Self
    where
        M: MeshTopology,
        I: IntoIterator<Item = EntityId>,
    {
        let mut owned = Vec::new();
        let mut ghost = Vec::new();
        for id in ids {
            if mesh.is_owned(kind, id) {
                owned.push(id);
            } else {
                ghost.push(id);
            }
        }
        Self {
            owned,
            ghost,
            all: OnceCell::new(),
        }
    }

    fn count(&self, class: ParallelClass) -> usize {
        match class {
            ParallelClass::Owned => self.owned.len(),
            ParallelClass::Ghost => self.ghost.len(),
            // Sum, not the memoized list: counting must not force it.
            ParallelClass::All => self.owned.len() + self.ghost.len(),
        }
    }

    fn list(&self, class: ParallelClass) -> &[EntityId] {
        match class {
            ParallelClass::Owned => &self.owned,
            ParallelClass::Ghost => &self.ghost,
            ParallelClass::All => self.all.get_or_init(|| {
                let mut all = Vec::with_capacity(self.owned.len() + self.ghost.len());
                all.extend_from_slice(&self.owned);
                all.extend_from_slice(&self.ghost);
                all
            }),
        }
    }
}

/// A work partition of a mesh: a cell list plus ownership-qualified entity
/// lists for every requested kind.
///
/// The tile borrows its parent mesh; the mesh must outlive every tile derived
/// from it. Construction classifies cells and nodes eagerly; the opt-in kinds
/// are classified on first query. Repeated queries return the same lists in
/// the same order; the order is only stable for the life of one tile, not
/// across reconstruction.
pub struct Tile<'m, M: MeshTopology> {
    mesh: &'m M,
    opts: TileOptions,
    cells: EntityLists,
    nodes: EntityLists,
    faces: OnceCell<EntityLists>,
    edges: OnceCell<EntityLists>,
    wedges: OnceCell<EntityLists>,
    corners: OnceCell<EntityLists>,
}

impl<'m, M: MeshTopology> Tile<'m, M> {
    /// Builds a tile over the given cells.
    ///
    /// Duplicate cell IDs are dropped (first occurrence wins). Sub-entity
    /// lists for kinds not enabled in `opts` stay empty and their queries
    /// return zero for every parallel class.
    pub fn new(mesh: &'m M, cells: &[EntityId], opts: TileOptions) -> Self {
        let cell_ids: Vec<EntityId> = cells.iter().copied().unique().collect();
        let nodes = Self::classify_subentities(mesh, &cell_ids, EntityKind::Node);
        let cells = EntityLists::classify(mesh, EntityKind::Cell, cell_ids);
        Self {
            mesh,
            opts,
            cells,
            nodes,
            faces: OnceCell::new(),
            edges: OnceCell::new(),
            wedges: OnceCell::new(),
            corners: OnceCell::new(),
        }
    }

    /// The mesh this tile belongs to.
    pub fn mesh(&self) -> &'m M {
        self.mesh
    }

    /// The options the tile was constructed with.
    pub fn options(&self) -> TileOptions {
        self.opts
    }

    /// Number of entities of `kind` in the given parallel class.
    pub fn count(&self, kind: EntityKind, class: ParallelClass) -> usize {
        self.lists(kind).map_or(0, |l| l.count(class))
    }

    /// Entity IDs of `kind` in the given parallel class.
    ///
    /// For `ParallelClass::All` the result is the owned entries followed by
    /// the ghost entries. Kinds not requested at construction yield an empty
    /// slice for every class.
    pub fn list(&self, kind: EntityKind, class: ParallelClass) -> &[EntityId] {
        self.lists(kind).map_or(EMPTY, |l| l.list(class))
    }

    /// Node IDs in the given parallel class.
    pub fn nodes(&self, class: ParallelClass) -> &[EntityId] {
        self.list(EntityKind::Node, class)
    }

    /// Edge IDs in the given parallel class.
    pub fn edges(&self, class: ParallelClass) -> &[EntityId] {
        self.list(EntityKind::Edge, class)
    }

    /// Face IDs in the given parallel class.
    pub fn faces(&self, class: ParallelClass) -> &[EntityId] {
        self.list(EntityKind::Face, class)
    }

    /// Wedge IDs in the given parallel class.
    pub fn wedges(&self, class: ParallelClass) -> &[EntityId] {
        self.list(EntityKind::Wedge, class)
    }

    /// Corner IDs in the given parallel class.
    pub fn corners(&self, class: ParallelClass) -> &[EntityId] {
        self.list(EntityKind::Corner, class)
    }

    /// Cell IDs in the given parallel class.
    pub fn cells(&self, class: ParallelClass) -> &[EntityId] {
        self.list(EntityKind::Cell, class)
    }

    /// Gathers the deduplicated sub-entities of the tile's cells and splits
    /// them by ownership. First occurrence order is kept within each class.
    fn classify_subentities(mesh: &M, cells: &[EntityId], kind: EntityKind) -> EntityLists {
        let ids = cells
            .iter()
            .flat_map(|&c| mesh.cell_subentities(c, kind))
            .unique();
        EntityLists::classify(mesh, kind, ids)
    }

    fn lists(&self, kind: EntityKind) -> Option<&EntityLists> {
        let (requested, cache) = match kind {
            EntityKind::Node => return Some(&self.nodes),
            EntityKind::Cell => return Some(&self.cells),
            EntityKind::Face => (self.opts.faces, &self.faces),
            EntityKind::Edge => (self.opts.edges, &self.edges),
            EntityKind::Wedge => (self.opts.wedges, &self.wedges),
            EntityKind::Corner => (self.opts.corners, &self.corners),
        };
        if !requested {
            // Kept permissive: a query for an unrequested kind is not an
            // error, it just has nothing to report.
            log::debug!("tile holds no {kind:?} lists; not requested at construction");
            return None;
        }
        Some(cache.get_or_init(|| {
            Self::classify_subentities(self.mesh, self.cells.list(ParallelClass::All), kind)
        }))
    }
}
