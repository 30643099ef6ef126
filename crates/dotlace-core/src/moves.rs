//! Candidate moves and the bounded move list.

use std::fmt::{self, Display};

use rand::{Rng, RngExt as _};

use crate::Orientation;

/// A candidate move: the coordinates and orientation of a line to draw.
///
/// Coordinates address the origin (upper or left endpoint) of the line on
/// the corner lattice, 1-based, exactly as [`Board`](crate::Board) and
/// [`ShadowBoard`](crate::ShadowBoard) do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    row: u8,
    col: u8,
    orientation: Orientation,
}

impl Move {
    /// Creates a move at the given lattice coordinates.
    #[must_use]
    pub const fn new(row: u8, col: u8, orientation: Orientation) -> Self {
        Self {
            row,
            col,
            orientation,
        }
    }

    /// Returns the 1-based row of the line origin.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the 1-based column of the line origin.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the orientation of the line.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        self.orientation
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ({}, {})", self.orientation, self.row, self.col)
    }
}

/// A fixed-capacity list of candidate moves.
///
/// The capacity is set at construction, usually from the number of open
/// lines, and the list never grows past it: exceeding the capacity is a
/// caller bug, not a runtime condition. Lists are created fresh per query
/// and discarded after use.
///
/// # Examples
///
/// ```
/// use dotlace_core::{Move, MoveList, Orientation};
///
/// let mut list = MoveList::with_capacity(2);
/// list.push(Move::new(1, 1, Orientation::Horizontal));
/// list.push(Move::new(1, 1, Orientation::Vertical));
/// assert_eq!(list.len(), 2);
///
/// let horizontal = list.filter(|mv| mv.orientation() == Orientation::Horizontal);
/// assert_eq!(horizontal.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
    capacity: usize,
}

impl MoveList {
    /// Creates an empty list that can hold at most `capacity` moves.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            moves: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the fixed capacity of this list.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of moves currently in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns whether the list holds no moves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Appends a move.
    ///
    /// # Panics
    ///
    /// Panics if the list is already at capacity. Callers size the list
    /// from an upper bound they computed themselves, so overflowing it
    /// indicates a bug on their side.
    pub fn push(&mut self, mv: Move) {
        assert!(
            self.moves.len() < self.capacity,
            "move list capacity {} exceeded",
            self.capacity,
        );
        self.moves.push(mv);
    }

    /// Returns the move at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Move> {
        self.moves.get(index).copied()
    }

    /// Returns the moves as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Iterates over the moves in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().copied()
    }

    /// Picks a move uniformly at random, or `None` if the list is empty.
    ///
    /// Callers that need reproducible play pass a seeded generator such as
    /// `rand_pcg::Pcg64Mcg`; enumeration order is deterministic, so a fixed
    /// seed yields a fixed move sequence.
    pub fn rand_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Move> {
        if self.moves.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.moves.len());
        Some(self.moves[index])
    }

    /// Returns the moves satisfying `predicate`, in order.
    ///
    /// The new list's capacity is the current length of this one, the
    /// tightest bound available without running the predicate twice.
    #[must_use]
    pub fn filter(&self, mut predicate: impl FnMut(Move) -> bool) -> Self {
        let mut filtered = Self::with_capacity(self.moves.len());
        for &mv in &self.moves {
            if predicate(mv) {
                filtered.push(mv);
            }
        }
        filtered
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = Move;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Move>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter().copied()
    }
}
