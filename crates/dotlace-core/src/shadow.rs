//! The shadow board: a flat-array mirror of edge and region state.
//!
//! The [`Board`](crate::Board) part graph is convenient for wiring and
//! snapshotting but slow to scan. The shadow board mirrors just the facts
//! move queries need into dense arrays: who owns each line, who closed
//! each region, and how many lines are still open. It is rebuilt whenever
//! the board dimensions change and mutated in lock-step with every edge
//! turn-on and turn-off; the two representations must never diverge.

use crate::{Move, MoveList, Orientation, PlayerId};

/// Array mirror of one board's edge and region state.
///
/// Every cell holds `None` while open and the id of the player who closed
/// it afterwards. `open_line_count` is maintained exactly: it always
/// equals the number of line cells still `None`, which makes "are there
/// any moves left" an O(1) query.
///
/// # Examples
///
/// ```
/// use dotlace_core::{Orientation, PlayerId, ShadowBoard};
///
/// let mut shadow = ShadowBoard::new(1, 1);
/// assert_eq!(shadow.num_legal_moves(), 4);
///
/// let player = PlayerId::new(1).unwrap();
/// shadow.turn_on(1, 1, Orientation::Horizontal, player);
/// assert_eq!(shadow.num_legal_moves(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowBoard {
    rows: u8,
    cols: u8,
    horizontal: Vec<Option<PlayerId>>,
    vertical: Vec<Option<PlayerId>>,
    regions: Vec<Option<PlayerId>>,
    open_line_count: usize,
}

impl ShadowBoard {
    /// Creates an all-open shadow for a board of `rows` x `cols` regions.
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
        let rows_u = usize::from(rows);
        let cols_u = usize::from(cols);
        let horizontal = vec![None; (rows_u + 1) * cols_u];
        let vertical = vec![None; rows_u * (cols_u + 1)];
        let regions = vec![None; rows_u * cols_u];
        let open_line_count = horizontal.len() + vertical.len();
        Self {
            rows,
            cols,
            horizontal,
            vertical,
            regions,
            open_line_count,
        }
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

    /// Returns whether a line cell exists at these coordinates.
    #[must_use]
    pub fn is_valid_line(&self, row: u8, col: u8, orientation: Orientation) -> bool {
        if row == 0 || col == 0 {
            return false;
        }
        match orientation {
            Orientation::Horizontal => row <= self.rows + 1 && col <= self.cols,
            Orientation::Vertical => row <= self.rows && col <= self.cols + 1,
        }
    }

    fn line_index(&self, row: u8, col: u8, orientation: Orientation) -> usize {
        assert!(
            self.is_valid_line(row, col, orientation),
            "no {orientation} line at ({row}, {col}) on a {}x{} board",
            self.rows,
            self.cols,
        );
        let row = usize::from(row) - 1;
        let col = usize::from(col) - 1;
        match orientation {
            Orientation::Horizontal => row * usize::from(self.cols) + col,
            Orientation::Vertical => row * (usize::from(self.cols) + 1) + col,
        }
    }

    fn line(&self, row: u8, col: u8, orientation: Orientation) -> Option<PlayerId> {
        let index = self.line_index(row, col, orientation);
        match orientation {
            Orientation::Horizontal => self.horizontal[index],
            Orientation::Vertical => self.vertical[index],
        }
    }

    fn line_mut(&mut self, row: u8, col: u8, orientation: Orientation) -> &mut Option<PlayerId> {
        let index = self.line_index(row, col, orientation);
        match orientation {
            Orientation::Horizontal => &mut self.horizontal[index],
            Orientation::Vertical => &mut self.vertical[index],
        }
    }

    fn region_index(&self, row: u8, col: u8) -> usize {
        assert!(
            (1..=self.rows).contains(&row) && (1..=self.cols).contains(&col),
            "no region at ({row}, {col}) on a {}x{} board",
            self.rows,
            self.cols,
        );
        (usize::from(row) - 1) * usize::from(self.cols) + usize::from(col) - 1
    }

    /// Returns the player who drew this line, or `None` while it is open.
    ///
    /// # Panics
    ///
    /// Panics if no line cell exists at these coordinates.
    #[must_use]
    pub fn line_owner(&self, row: u8, col: u8, orientation: Orientation) -> Option<PlayerId> {
        self.line(row, col, orientation)
    }

    /// Returns whether this line has been drawn.
    ///
    /// # Panics
    ///
    /// Panics if no line cell exists at these coordinates.
    #[must_use]
    pub fn is_on(&self, row: u8, col: u8, orientation: Orientation) -> bool {
        self.line(row, col, orientation).is_some()
    }

    /// Returns the player who closed this region, or `None` while open.
    ///
    /// # Panics
    ///
    /// Panics if no region exists at these coordinates.
    #[must_use]
    pub fn region_owner(&self, row: u8, col: u8) -> Option<PlayerId> {
        self.regions[self.region_index(row, col)]
    }

    /// The four lines bordering the region at `(row, col)`.
    fn region_lines(row: u8, col: u8) -> [(u8, u8, Orientation); 4] {
        [
            (row, col, Orientation::Horizontal),
            (row + 1, col, Orientation::Horizontal),
            (row, col, Orientation::Vertical),
            (row, col + 1, Orientation::Vertical),
        ]
    }

    /// Region origins adjacent to a line: the regions above and below a
    /// horizontal line, or left and right of a vertical one.
    fn adjacent_regions(&self, row: u8, col: u8, orientation: Orientation) -> [Option<(u8, u8)>; 2]
    {
        match orientation {
            Orientation::Horizontal => [
                (row > 1).then(|| (row - 1, col)),
                (row <= self.rows).then_some((row, col)),
            ],
            Orientation::Vertical => [
                (col > 1).then(|| (row, col - 1)),
                (col <= self.cols).then_some((row, col)),
            ],
        }
    }

    fn is_region_closed(&self, row: u8, col: u8) -> bool {
        Self::region_lines(row, col)
            .into_iter()
            .all(|(r, c, o)| self.is_on(r, c, o))
    }

    /// Mirrors an edge turn-on into the arrays.
    ///
    /// Any adjacent region this closes gets stamped with `player`. Must be
    /// called exactly once for every [`Board::turn_on`](crate::Board::turn_on)
    /// in the same transaction.
    ///
    /// # Panics
    ///
    /// Panics if the line does not exist or is already on; the latter
    /// means the mirror and the part graph have diverged, which is a bug
    /// in the pairing discipline, not a recoverable condition.
    pub fn turn_on(&mut self, row: u8, col: u8, orientation: Orientation, player: PlayerId) {
        let cell = self.line_mut(row, col, orientation);
        assert!(
            cell.is_none(),
            "{orientation} line at ({row}, {col}) is already on; shadow out of sync",
        );
        *cell = Some(player);
        self.open_line_count -= 1;
        for (r, c) in self
            .adjacent_regions(row, col, orientation)
            .into_iter()
            .flatten()
        {
            if self.is_region_closed(r, c) {
                let index = self.region_index(r, c);
                self.regions[index] = Some(player);
            }
        }
    }

    /// Mirrors an edge turn-off into the arrays; the undo-only inverse of
    /// [`ShadowBoard::turn_on`].
    ///
    /// Adjacent region cells reopen, since a region missing an edge cannot
    /// be complete.
    ///
    /// # Panics
    ///
    /// Panics if the line does not exist or is not on.
    pub fn turn_off(&mut self, row: u8, col: u8, orientation: Orientation) {
        let cell = self.line_mut(row, col, orientation);
        assert!(
            cell.is_some(),
            "{orientation} line at ({row}, {col}) is not on; shadow out of sync",
        );
        *cell = None;
        self.open_line_count += 1;
        for (r, c) in self
            .adjacent_regions(row, col, orientation)
            .into_iter()
            .flatten()
        {
            let index = self.region_index(r, c);
            self.regions[index] = None;
        }
    }

    /// Returns whether drawing this line would complete at least one
    /// adjacent region.
    ///
    /// Both candidate regions are checked independently: for each, the
    /// other three bordering lines must already be on. An interior line
    /// can complete one square, the other, or both.
    ///
    /// # Panics
    ///
    /// Panics if no line cell exists at these coordinates.
    #[must_use]
    pub fn does_complete_square(&self, row: u8, col: u8, orientation: Orientation) -> bool {
        self.adjacent_regions(row, col, orientation)
            .into_iter()
            .flatten()
            .any(|(r, c)| self.missing_lines_besides(r, c, (row, col, orientation)) == 0)
    }

    /// Returns how many more lines the nearer adjacent region would still
    /// need after this line is drawn.
    ///
    /// `0` means drawing this line completes a square outright, the same
    /// condition [`ShadowBoard::does_complete_square`] tests; `1` marks
    /// the classic "gives the opponent a free square" move that danger
    /// heuristics avoid.
    ///
    /// # Panics
    ///
    /// Panics if no line cell exists at these coordinates.
    #[must_use]
    pub fn distance_from_square(&self, row: u8, col: u8, orientation: Orientation) -> u8 {
        self.adjacent_regions(row, col, orientation)
            .into_iter()
            .flatten()
            .map(|(r, c)| self.missing_lines_besides(r, c, (row, col, orientation)))
            .min()
            .unwrap_or(u8::MAX)
    }

    /// Counts the open lines of a region, excluding the probe line.
    fn missing_lines_besides(&self, row: u8, col: u8, probe: (u8, u8, Orientation)) -> u8 {
        let mut missing = 0;
        for (r, c, o) in Self::region_lines(row, col) {
            if (r, c, o) != probe && !self.is_on(r, c, o) {
                missing += 1;
            }
        }
        missing
    }

    /// Enumerates all open lines as a fresh [`MoveList`].
    ///
    /// The order is deterministic: row-major over lattice points, with the
    /// horizontal line before the vertical one at each point. Reproducible
    /// ordering keeps seeded random play and tests stable.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::with_capacity(self.open_line_count);
        for row in 1..=self.rows + 1 {
            for col in 1..=self.cols + 1 {
                for orientation in Orientation::ALL {
                    if self.is_valid_line(row, col, orientation)
                        && !self.is_on(row, col, orientation)
                    {
                        moves.push(Move::new(row, col, orientation));
                    }
                }
            }
        }
        moves
    }

    /// Enumerates the open lines that would complete at least one square.
    #[must_use]
    pub fn square_moves(&self) -> MoveList {
        self.legal_moves()
            .filter(|mv| self.does_complete_square(mv.row(), mv.col(), mv.orientation()))
    }

    /// Enumerates the open lines at distance `min_dist` or more from
    /// completing a square.
    ///
    /// `square_distance_moves(2)` is the usual "safe moves" query: lines
    /// that neither complete a square nor set one up for the opponent.
    #[must_use]
    pub fn square_distance_moves(&self, min_dist: u8) -> MoveList {
        self.legal_moves()
            .filter(|mv| self.distance_from_square(mv.row(), mv.col(), mv.orientation()) >= min_dist)
    }

    /// Returns the number of open lines.
    ///
    /// This reads the maintained counter; nothing is enumerated.
    #[must_use]
    pub fn num_legal_moves(&self) -> usize {
        self.open_line_count
    }

    /// Recounts the open lines by scanning the arrays.
    ///
    /// Exists for consistency checks: the result must always equal
    /// [`ShadowBoard::num_legal_moves`].
    #[must_use]
    pub fn count_open_lines(&self) -> usize {
        self.horizontal
            .iter()
            .chain(&self.vertical)
            .filter(|cell| cell.is_none())
            .count()
    }
}
