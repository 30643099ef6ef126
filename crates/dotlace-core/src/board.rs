//! The part graph: an arena of corners, edges, and regions.

use std::collections::HashMap;

use tinyvec::ArrayVec;

use crate::{Orientation, Part, PartId, PartKind, PlayerId, Point};

/// Errors reported by [`Board`] operations.
///
/// These are caller errors: the board never retries or silently ignores an
/// invalid request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The two endpoints do not delimit a unit lattice segment.
    #[display("edge endpoints {a} and {b} are not adjacent lattice points")]
    InvalidEndpoints {
        /// First endpoint as given by the caller.
        a: Point,
        /// Second endpoint as given by the caller.
        b: Point,
    },
    /// The edge would fall outside the corner lattice.
    #[display("edge endpoints {a} and {b} fall outside the board")]
    OutOfBounds {
        /// First endpoint as given by the caller.
        a: Point,
        /// Second endpoint as given by the caller.
        b: Point,
    },
    /// No live part has this id.
    #[display("{id} not found")]
    PartNotFound {
        /// The offending id.
        id: PartId,
    },
    /// The operation requires an edge but the id names another kind.
    #[display("{id} is not an edge")]
    NotAnEdge {
        /// The offending id.
        id: PartId,
    },
    /// The edge was already turned on; edges turn on at most once per game.
    #[display("{id} is already turned on")]
    EdgeAlreadyOn {
        /// The offending id.
        id: PartId,
    },
    /// The edge is not on, so it cannot be turned off.
    #[display("{id} is not turned on")]
    EdgeNotOn {
        /// The offending id.
        id: PartId,
    },
}

/// Coordinate lookup key for the arena index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PartKey {
    kind: PartKind,
    row: u8,
    col: u8,
    orientation: Option<Orientation>,
}

impl PartKey {
    fn of(part: &Part) -> Self {
        Self {
            kind: part.kind(),
            row: part.row(),
            col: part.col(),
            orientation: part.orientation(),
        }
    }
}

/// The board graph of a dots-and-boxes game.
///
/// Owns every [`Part`] in a flat arena indexed by [`PartId`] and keeps a
/// coordinate index for lookups. Ids are never reused while a part is
/// alive: removing a part leaves a tombstone slot behind, and fresh ids are
/// always taken from the end of the arena.
///
/// The board is the authoritative object graph; the
/// [`ShadowBoard`](crate::ShadowBoard) mirrors its edge and region state
/// for fast queries and must be mutated in lock-step by the caller.
///
/// # Examples
///
/// ```
/// use dotlace_core::{Board, Orientation, PlayerId};
///
/// let mut board = Board::new(1, 1);
/// let player = PlayerId::new(1).unwrap();
///
/// // A 1x1 board has four edges around its single region.
/// let top = board.edge_at(1, 1, Orientation::Horizontal).unwrap();
/// let completed = board.turn_on(top, player).unwrap();
/// assert!(completed.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u8,
    cols: u8,
    parts: Vec<Option<Part>>,
    index: HashMap<PartKey, PartId>,
}

impl Board {
    /// Creates a fully wired board with `rows` x `cols` regions.
    ///
    /// Every edge, corner, and region part is materialized through
    /// [`Board::add_edge`], so the resulting graph is exactly the one
    /// incremental construction would build.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero or exceeds 254.
    #[must_use]
    pub fn new(rows: u8, cols: u8) -> Self {
        assert!(
            (1..u8::MAX).contains(&rows) && (1..u8::MAX).contains(&cols),
            "board size must be at least 1x1: {rows}x{cols}",
        );
        let mut board = Self {
            rows,
            cols,
            parts: Vec::new(),
            index: HashMap::new(),
        };
        for row in 1..=rows + 1 {
            for col in 1..=cols {
                board
                    .add_edge(Point::new(row, col), Point::new(row, col + 1))
                    .expect("constructed horizontal edge is in bounds");
            }
        }
        for row in 1..=rows {
            for col in 1..=cols + 1 {
                board
                    .add_edge(Point::new(row, col), Point::new(row + 1, col))
                    .expect("constructed vertical edge is in bounds");
            }
        }
        board
    }

    /// Returns the number of region rows.
    #[must_use]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Returns the number of region columns.
    #[must_use]
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Adds an edge between two adjacent corners, or returns the existing
    /// edge with these endpoints.
    ///
    /// New corners and bordering regions are created on demand, and
    /// adjacency is registered symmetrically in both directions: the edge
    /// learns about its two corners and one or two regions, and each of
    /// them learns about the edge.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidEndpoints`] if the points are not unit
    /// lattice neighbors, or [`BoardError::OutOfBounds`] if the segment
    /// leaves the corner lattice.
    pub fn add_edge(&mut self, a: Point, b: Point) -> Result<PartId, BoardError> {
        let (origin, end) = if (a.row(), a.col()) <= (b.row(), b.col()) {
            (a, b)
        } else {
            (b, a)
        };
        let row_step = end.row() - origin.row();
        let col_step = end.col() - origin.col();
        let orientation = match (row_step, col_step) {
            (0, 1) => Orientation::Horizontal,
            (1, 0) => Orientation::Vertical,
            _ => return Err(BoardError::InvalidEndpoints { a, b }),
        };
        if end.row() > self.rows + 1 || end.col() > self.cols + 1 {
            return Err(BoardError::OutOfBounds { a, b });
        }

        let key = PartKey {
            kind: PartKind::Edge,
            row: origin.row(),
            col: origin.col(),
            orientation: Some(orientation),
        };
        if let Some(&existing) = self.index.get(&key) {
            return Ok(existing);
        }

        let edge = self.alloc_with(|id| Part::new_edge(id, origin, end));
        let corner_a = self.ensure_corner(origin);
        let corner_b = self.ensure_corner(end);
        self.connect(edge, corner_a);
        self.connect(edge, corner_b);
        for region_origin in self.bordering_regions(origin, orientation) {
            let region = self.ensure_region(region_origin);
            self.connect(edge, region);
        }
        Ok(edge)
    }

    /// Region origins bordering an edge: up to two for an interior edge,
    /// one for a boundary edge.
    fn bordering_regions(&self, origin: Point, orientation: Orientation) -> Vec<Point> {
        let (row, col) = (origin.row(), origin.col());
        let mut regions = Vec::with_capacity(2);
        match orientation {
            Orientation::Horizontal => {
                if row > 1 {
                    regions.push(Point::new(row - 1, col));
                }
                if row <= self.rows {
                    regions.push(Point::new(row, col));
                }
            }
            Orientation::Vertical => {
                if col > 1 {
                    regions.push(Point::new(row, col - 1));
                }
                if col <= self.cols {
                    regions.push(Point::new(row, col));
                }
            }
        }
        regions
    }

    fn ensure_corner(&mut self, at: Point) -> PartId {
        let key = PartKey {
            kind: PartKind::Corner,
            row: at.row(),
            col: at.col(),
            orientation: None,
        };
        match self.index.get(&key) {
            Some(&id) => id,
            None => self.alloc_with(|id| Part::new_corner(id, at)),
        }
    }

    fn ensure_region(&mut self, at: Point) -> PartId {
        let key = PartKey {
            kind: PartKind::Region,
            row: at.row(),
            col: at.col(),
            orientation: None,
        };
        match self.index.get(&key) {
            Some(&id) => id,
            None => self.alloc_with(|id| Part::new_region(id, at)),
        }
    }

    fn alloc_with(&mut self, build: impl FnOnce(PartId) -> Part) -> PartId {
        let raw = u32::try_from(self.parts.len()).expect("arena size fits in u32");
        let id = PartId::from_index(raw);
        let part = build(id);
        self.index.insert(PartKey::of(&part), id);
        self.parts.push(Some(part));
        id
    }

    fn connect(&mut self, a: PartId, b: PartId) {
        self.part_mut(a).connect(b);
        self.part_mut(b).connect(a);
    }

    fn part_mut(&mut self, id: PartId) -> &mut Part {
        self.parts
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .unwrap_or_else(|| panic!("{id} is not live in the arena"))
    }

    /// Returns the part with the given id, if it is alive.
    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.index()).and_then(Option::as_ref)
    }

    /// Looks up a part by kind and coordinates.
    ///
    /// Edges additionally require their orientation; passing `None` for an
    /// edge, or `Some` for a corner or region, finds nothing.
    #[must_use]
    pub fn find_part(
        &self,
        kind: PartKind,
        row: u8,
        col: u8,
        orientation: Option<Orientation>,
    ) -> Option<PartId> {
        match (kind, orientation) {
            (PartKind::Edge, Some(_)) | (PartKind::Corner | PartKind::Region, None) => self
                .index
                .get(&PartKey {
                    kind,
                    row,
                    col,
                    orientation,
                })
                .copied(),
            _ => None,
        }
    }

    /// Looks up an edge by its origin coordinates and orientation.
    #[must_use]
    pub fn edge_at(&self, row: u8, col: u8, orientation: Orientation) -> Option<PartId> {
        self.find_part(PartKind::Edge, row, col, Some(orientation))
    }

    /// Looks up a region by its top-left coordinates.
    #[must_use]
    pub fn region_at(&self, row: u8, col: u8) -> Option<PartId> {
        self.find_part(PartKind::Region, row, col, None)
    }

    /// Looks up a corner by its coordinates.
    #[must_use]
    pub fn corner_at(&self, row: u8, col: u8) -> Option<PartId> {
        self.find_part(PartKind::Corner, row, col, None)
    }

    /// Iterates over all live parts in id order.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter().filter_map(Option::as_ref)
    }

    /// Turns an edge on for `player` and reports the regions this closes.
    ///
    /// Closing an interior edge can complete the regions on both of its
    /// sides in the same call, so the result carries up to two region ids.
    /// Completed regions are stamped with the closing player.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PartNotFound`] for a dead id,
    /// [`BoardError::NotAnEdge`] for a corner or region id, and
    /// [`BoardError::EdgeAlreadyOn`] if the edge was turned on before.
    pub fn turn_on(
        &mut self,
        id: PartId,
        player: PlayerId,
    ) -> Result<ArrayVec<[PartId; 2]>, BoardError> {
        let part = self.part(id).ok_or(BoardError::PartNotFound { id })?;
        if part.kind() != PartKind::Edge {
            return Err(BoardError::NotAnEdge { id });
        }
        if part.is_on() {
            return Err(BoardError::EdgeAlreadyOn { id });
        }
        let mut regions = ArrayVec::<[PartId; 2]>::new();
        for &adjacent in part.connected() {
            if self.part(adjacent).is_some_and(|p| p.kind() == PartKind::Region) {
                regions.push(adjacent);
            }
        }

        let edge = self.part_mut(id);
        edge.set_on(true);
        edge.set_owner(Some(player));

        let mut completed = ArrayVec::<[PartId; 2]>::new();
        for region in regions {
            if self.is_complete(region) {
                self.part_mut(region).set_owner(Some(player));
                completed.push(region);
            }
        }
        Ok(completed)
    }

    /// Turns an edge off again; the inverse of [`Board::turn_on`].
    ///
    /// This exists solely so undo can restore prior state; edges are never
    /// turned off in forward play. Bordering regions lose their owner,
    /// since a region with a missing edge cannot be complete.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PartNotFound`] for a dead id,
    /// [`BoardError::NotAnEdge`] for a corner or region id, and
    /// [`BoardError::EdgeNotOn`] if the edge is not on.
    pub fn turn_off(&mut self, id: PartId) -> Result<(), BoardError> {
        let part = self.part(id).ok_or(BoardError::PartNotFound { id })?;
        if part.kind() != PartKind::Edge {
            return Err(BoardError::NotAnEdge { id });
        }
        if !part.is_on() {
            return Err(BoardError::EdgeNotOn { id });
        }
        let mut regions = ArrayVec::<[PartId; 2]>::new();
        for &adjacent in part.connected() {
            if self.part(adjacent).is_some_and(|p| p.kind() == PartKind::Region) {
                regions.push(adjacent);
            }
        }

        let edge = self.part_mut(id);
        edge.set_on(false);
        edge.set_owner(None);
        for region in regions {
            self.part_mut(region).set_owner(None);
        }
        Ok(())
    }

    /// Sets or clears the selection flag of a part.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PartNotFound`] if the id is not live.
    pub fn set_selected(&mut self, id: PartId, selected: bool) -> Result<(), BoardError> {
        let part = self
            .parts
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(BoardError::PartNotFound { id })?;
        part.set_selected(selected);
        Ok(())
    }

    /// Returns whether the region with this id is complete.
    ///
    /// A region is complete when all four of its bordering edges are on.
    /// Dead ids and non-region parts are never complete.
    #[must_use]
    pub fn is_complete(&self, id: PartId) -> bool {
        let Some(region) = self.part(id) else {
            return false;
        };
        if region.kind() != PartKind::Region {
            return false;
        }
        let mut edges = 0;
        for &adjacent in region.connected() {
            let Some(part) = self.part(adjacent) else {
                return false;
            };
            if part.kind() == PartKind::Edge {
                if !part.is_on() {
                    return false;
                }
                edges += 1;
            }
        }
        edges == 4
    }

    /// Inserts a part into the arena, replacing any part with the same id.
    ///
    /// This is the restore path for history replay: the command log stores
    /// full part copies and swaps them back wholesale.
    ///
    /// # Panics
    ///
    /// Panics if the part's id lies beyond the end of the arena; a log
    /// entry referencing such an id is malformed.
    pub fn insert_part(&mut self, part: Part) {
        let id = part.id();
        let idx = id.index();
        assert!(
            idx <= self.parts.len(),
            "{id} is outside the arena; malformed history entry",
        );
        self.index.insert(PartKey::of(&part), id);
        if idx == self.parts.len() {
            self.parts.push(Some(part));
        } else {
            self.parts[idx] = Some(part);
        }
    }

    /// Removes a part, leaving a tombstone so its id is never reused.
    ///
    /// Returns the removed part, or `None` if the id was not live. The
    /// caller is responsible for restoring the adjacency sets of former
    /// neighbors; history replay does this by replacing every touched part.
    pub fn remove_part(&mut self, id: PartId) -> Option<Part> {
        let part = self.parts.get_mut(id.index())?.take()?;
        self.index.remove(&PartKey::of(&part));
        Some(part)
    }
}
