//! Board parts: corners, edges, and regions.
//!
//! Every object on the board is a [`Part`] stored in the board's arena and
//! addressed by a [`PartId`]. Adjacency between parts is kept as id sets
//! rather than references, so the graph has no ownership cycles: an edge is
//! connected to its two corners and its one or two bordering regions, a
//! region to its four edges, and a corner to the edges that meet it.

use std::{
    collections::BTreeSet,
    fmt::{self, Display},
};

use crate::PlayerId;

/// Identifier of a [`Part`] within one board's arena.
///
/// Ids are assigned in creation order and never reused while the part is
/// alive; removing a part leaves a tombstone behind in the arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartId(u32);

impl PartId {
    /// Creates a part id from its raw arena index.
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// Returns the arena index of this id.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part #{}", self.0)
    }
}

/// A point on the corner lattice, in 1-based board coordinates.
///
/// A board with `r` rows and `c` columns of regions has corners at rows
/// `1..=r + 1` and columns `1..=c + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    row: u8,
    col: u8,
}

impl Point {
    /// Creates a point from 1-based coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is zero.
    #[must_use]
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row > 0 && col > 0, "point coordinates are 1-based: ({row}, {col})");
        Self { row, col }
    }

    /// Returns the 1-based row coordinate.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the 1-based column coordinate.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orientation of an edge, derived from its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    /// An edge joining two corners in the same row.
    Horizontal,
    /// An edge joining two corners in the same column.
    Vertical,
}

impl Orientation {
    /// Both orientations, horizontal first.
    ///
    /// The order matters: move enumeration yields horizontal lines before
    /// vertical ones at each lattice point, and tests rely on it.
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];
}

impl Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

/// The kind of a [`Part`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartKind {
    /// A corner of the lattice.
    Corner,
    /// A line segment between two adjacent corners.
    Edge,
    /// A scoring square bounded by four edges.
    Region,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corner => write!(f, "corner"),
            Self::Edge => write!(f, "edge"),
            Self::Region => write!(f, "region"),
        }
    }
}

/// Geometry of a part, beyond the origin point every part carries.
///
/// An edge stores only its second endpoint; its orientation is always
/// recomputed from the endpoints so the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A corner occupies exactly its origin point.
    Corner,
    /// An edge runs from its origin to `end`, one lattice step away.
    Edge {
        /// The second endpoint; always below or to the right of the origin.
        end: Point,
    },
    /// A region occupies the square whose top-left corner is the origin.
    Region,
}

/// One object of the board graph.
///
/// A part couples its geometry with the mutable play state (`selected`,
/// `turned_on`, owning player) and its adjacency set. Parts are plain
/// values: the command log snapshots them wholesale with [`Clone`], and
/// history replay swaps entire parts back into the arena.
///
/// # Examples
///
/// ```
/// use dotlace_core::{Orientation, Part, PartId, PartKind, Point};
///
/// let edge = Part::new_edge(PartId::from_index(0), Point::new(1, 1), Point::new(1, 2));
/// assert_eq!(edge.kind(), PartKind::Edge);
/// assert_eq!(edge.orientation(), Some(Orientation::Horizontal));
/// assert!(!edge.is_on());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    id: PartId,
    origin: Point,
    shape: Shape,
    selected: bool,
    turned_on: bool,
    owner: Option<PlayerId>,
    connected: BTreeSet<PartId>,
}

impl Part {
    fn new(id: PartId, origin: Point, shape: Shape) -> Self {
        Self {
            id,
            origin,
            shape,
            selected: false,
            turned_on: false,
            owner: None,
            connected: BTreeSet::new(),
        }
    }

    /// Creates a corner at the given lattice point.
    #[must_use]
    pub fn new_corner(id: PartId, at: Point) -> Self {
        Self::new(id, at, Shape::Corner)
    }

    /// Creates an edge between two adjacent lattice points.
    ///
    /// The endpoints may be given in either order; the origin is normalized
    /// to the upper or left endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the endpoints are not exactly one lattice step apart in a
    /// single direction.
    #[must_use]
    pub fn new_edge(id: PartId, a: Point, b: Point) -> Self {
        let (origin, end) = if (a.row, a.col) <= (b.row, b.col) {
            (a, b)
        } else {
            (b, a)
        };
        let row_step = end.row - origin.row;
        let col_step = end.col - origin.col;
        assert!(
            (row_step == 0 && col_step == 1) || (row_step == 1 && col_step == 0),
            "edge endpoints must be lattice neighbors: {a} and {b}",
        );
        Self::new(id, origin, Shape::Edge { end })
    }

    /// Creates a region whose top-left corner is the given lattice point.
    #[must_use]
    pub fn new_region(id: PartId, at: Point) -> Self {
        Self::new(id, at, Shape::Region)
    }

    /// Returns the id of this part.
    #[must_use]
    pub fn id(&self) -> PartId {
        self.id
    }

    /// Returns the kind of this part.
    #[must_use]
    pub fn kind(&self) -> PartKind {
        match self.shape {
            Shape::Corner => PartKind::Corner,
            Shape::Edge { .. } => PartKind::Edge,
            Shape::Region => PartKind::Region,
        }
    }

    /// Returns the origin point (for an edge, its upper/left endpoint).
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the 1-based row of the origin point.
    #[must_use]
    pub fn row(&self) -> u8 {
        self.origin.row
    }

    /// Returns the 1-based column of the origin point.
    #[must_use]
    pub fn col(&self) -> u8 {
        self.origin.col
    }

    /// Returns the geometry of this part.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns both endpoints of an edge, or `None` for other kinds.
    #[must_use]
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        match self.shape {
            Shape::Edge { end } => Some((self.origin, end)),
            Shape::Corner | Shape::Region => None,
        }
    }

    /// Returns the orientation of an edge, or `None` for other kinds.
    ///
    /// The orientation is derived from the endpoints on every call; it is
    /// deliberately not stored.
    #[must_use]
    pub fn orientation(&self) -> Option<Orientation> {
        match self.shape {
            Shape::Edge { end } => Some(if end.row == self.origin.row {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            }),
            Shape::Corner | Shape::Region => None,
        }
    }

    /// Returns whether this part is currently selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Sets the selection flag.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Returns whether this part has been turned on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.turned_on
    }

    pub(crate) fn set_on(&mut self, on: bool) {
        self.turned_on = on;
    }

    /// Returns the player who turned this part on or closed this region.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<PlayerId>) {
        self.owner = owner;
    }

    /// Returns the ids of the parts adjacent to this one.
    #[must_use]
    pub fn connected(&self) -> &BTreeSet<PartId> {
        &self.connected
    }

    /// Returns whether `other` is adjacent to this part.
    #[must_use]
    pub fn is_connected_to(&self, other: PartId) -> bool {
        self.connected.contains(&other)
    }

    pub(crate) fn connect(&mut self, other: PartId) {
        self.connected.insert(other);
    }
}
