//! The game session: one dots-and-boxes game in progress.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use dotlace_core::{
    Board, Move, MoveList, Orientation, Part, PartId, PartKind, PlayerId, ShadowBoard,
};
use dotlace_history::{ApplyError, CommandManager, LogEntry, Playfield, ScoreMark};
use tinyvec::ArrayVec;

use crate::{GameError, GameEvent};

/// The result of one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    player: PlayerId,
    completed: ArrayVec<[PartId; 2]>,
    next_player: PlayerId,
}

impl TurnOutcome {
    /// Returns the player who made the move.
    #[must_use]
    pub fn player(self) -> PlayerId {
        self.player
    }

    /// Returns the region(s) this move completed, at most two.
    #[must_use]
    pub fn completed(&self) -> &[PartId] {
        self.completed.as_slice()
    }

    /// Returns whose turn it is after the move.
    #[must_use]
    pub fn next_player(self) -> PlayerId {
        self.next_player
    }

    /// Returns whether the mover earned another turn by closing a square.
    #[must_use]
    pub fn extra_turn(self) -> bool {
        !self.completed.is_empty()
    }
}

/// One game of dots and boxes: the part graph, its shadow mirror, the
/// score sheet, and the command log, driven synchronously by a front end.
///
/// The session is the single writer of all of its state. Every mutation
/// funnels through one place: forward play assembles a [`LogEntry`] while
/// mutating the board and shadow as a pair, and undo/redo replays entries
/// through the same [`Playfield`] operations. The two representations of
/// edge state therefore cannot drift apart, which the shadow board
/// enforces with fatal assertions rather than trusting.
///
/// Events accumulate in an internal queue for the rendering layer; drain
/// them after each call with [`GameSession::drain_events`].
///
/// # Examples
///
/// ```
/// use dotlace_core::{Orientation, PlayerId};
/// use dotlace_game::GameSession;
///
/// let alice = PlayerId::new(1).unwrap();
/// let bob = PlayerId::new(2).unwrap();
/// let mut game = GameSession::new(1, 1, &[alice, bob]);
///
/// let outcome = game.turn_on(1, 1, Orientation::Horizontal).unwrap();
/// assert_eq!(outcome.player(), alice);
/// assert_eq!(outcome.next_player(), bob);
/// assert!(game.undo(false));
/// assert_eq!(game.current_player(), Some(alice));
/// ```
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    shadow: ShadowBoard,
    history: CommandManager,
    players: Vec<PlayerId>,
    scores: BTreeMap<PlayerId, u32>,
    current: Option<PlayerId>,
    selected: BTreeSet<PartId>,
    events: VecDeque<GameEvent>,
}

impl GameSession {
    /// Creates a fresh game of `rows` x `cols` squares.
    ///
    /// The first player in `players` moves first; turn order follows the
    /// slice order.
    ///
    /// # Panics
    ///
    /// Panics if `players` is empty or contains duplicates, or if the
    /// board dimensions are invalid (see [`Board::new`]).
    #[must_use]
    pub fn new(rows: u8, cols: u8, players: &[PlayerId]) -> Self {
        assert!(!players.is_empty(), "a game needs at least one player");
        let unique: BTreeSet<_> = players.iter().copied().collect();
        assert_eq!(unique.len(), players.len(), "player ids must be unique");
        Self {
            board: Board::new(rows, cols),
            shadow: ShadowBoard::new(rows, cols),
            history: CommandManager::new(),
            players: players.to_vec(),
            scores: players.iter().map(|&p| (p, 0)).collect(),
            current: players.first().copied(),
            selected: BTreeSet::new(),
            events: VecDeque::new(),
        }
    }

    /// Rebuilds the board and shadow for a fresh game of the given size.
    ///
    /// Scores, selection, history, and pending events are cleared; the
    /// first registered player moves first again.
    ///
    /// # Panics
    ///
    /// Panics if the board dimensions are invalid (see [`Board::new`]).
    pub fn reset(&mut self, rows: u8, cols: u8) {
        log::debug!("resetting game to {rows}x{cols}");
        self.board = Board::new(rows, cols);
        self.shadow = ShadowBoard::new(rows, cols);
        self.history.clear();
        for score in self.scores.values_mut() {
            *score = 0;
        }
        self.current = self.players.first().copied();
        self.selected.clear();
        self.events.clear();
    }

    /// Returns the part graph.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the shadow board.
    #[must_use]
    pub fn shadow(&self) -> &ShadowBoard {
        &self.shadow
    }

    /// Returns the command log.
    #[must_use]
    pub fn history(&self) -> &CommandManager {
        &self.history
    }

    /// Returns the registered players in turn order.
    #[must_use]
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// Returns the player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current
    }

    /// Returns the number of squares `player` has won.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores.get(&player).copied().unwrap_or_default()
    }

    /// Returns the ids of the currently selected parts.
    #[must_use]
    pub fn selected(&self) -> &BTreeSet<PartId> {
        &self.selected
    }

    /// Drains the queued events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Draws the line at these coordinates for the current player.
    ///
    /// Completing at least one square keeps the turn and scores one point
    /// per square; otherwise play passes to the next registered player.
    /// The transition is recorded as one whole-move history entry.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownLine`] if no such line exists and
    /// [`GameError::Board`] if the line is already drawn.
    pub fn turn_on(
        &mut self,
        row: u8,
        col: u8,
        orientation: Orientation,
    ) -> Result<TurnOutcome, GameError> {
        let player = self.current.ok_or(GameError::NoCurrentPlayer)?;
        self.turn_on_for(player, row, col, orientation)
    }

    /// Replays a recorded move tuple as if `player` made it interactively.
    ///
    /// This is the deterministic replay path for saved game logs: the
    /// state transition, scoring, and history entry are identical to the
    /// interactive ones.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownPlayer`] for an unregistered player,
    /// plus everything [`GameSession::turn_on`] can return.
    pub fn apply_move(&mut self, player: PlayerId, mv: Move) -> Result<TurnOutcome, GameError> {
        if !self.players.contains(&player) {
            return Err(GameError::UnknownPlayer { player });
        }
        self.turn_on_for(player, mv.row(), mv.col(), mv.orientation())
    }

    fn turn_on_for(
        &mut self,
        player: PlayerId,
        row: u8,
        col: u8,
        orientation: Orientation,
    ) -> Result<TurnOutcome, GameError> {
        let edge = self
            .board
            .edge_at(row, col, orientation)
            .ok_or(GameError::UnknownLine {
                row,
                col,
                orientation,
            })?;
        let before_edge = self
            .board
            .part(edge)
            .cloned()
            .ok_or(GameError::UnknownLine {
                row,
                col,
                orientation,
            })?;
        let mut before_regions = BTreeMap::new();
        for &adjacent in before_edge.connected() {
            if let Some(part) = self.board.part(adjacent)
                && part.kind() == PartKind::Region
            {
                before_regions.insert(adjacent, part.clone());
            }
        }

        // The board mutation happens first; on error nothing has changed
        // yet, so the shadow stays untouched.
        let completed = self.board.turn_on(edge, player)?;
        self.shadow.turn_on(row, col, orientation, player);

        let mut entry = LogEntry::new();
        entry.mark_undo_unit();
        let after_edge = self.part_snapshot(edge);
        entry.record_part(Some(before_edge), Some(after_edge));
        self.events.push_back(GameEvent::PartChanged { id: edge });
        for &region in &completed {
            let before = before_regions
                .remove(&region)
                .expect("completed region is adjacent to the edge");
            entry.record_part(Some(before), Some(self.part_snapshot(region)));
            self.events.push_back(GameEvent::PartChanged { id: region });
        }
        if !completed.is_empty() {
            self.events.push_back(GameEvent::SquareCompleted {
                edge,
                regions: completed,
            });
        }

        let gained = u32::try_from(completed.len()).expect("at most two regions complete");
        if gained > 0 {
            let prev_score = self.score(player);
            let new_score = prev_score + gained;
            self.scores.insert(player, new_score);
            entry.record_score(
                ScoreMark {
                    player,
                    score: prev_score,
                },
                ScoreMark {
                    player,
                    score: new_score,
                },
            );
            self.events.push_back(GameEvent::ScoreChanged {
                player,
                score: new_score,
            });
            let message = if gained == 1 {
                format!("{player} closes a square")
            } else {
                format!("{player} closes {gained} squares")
            };
            self.events.push_back(GameEvent::Message(message.clone()));
            entry.push_message(message);
        }

        let next = if gained > 0 {
            player
        } else {
            self.player_after(player)
        };
        let prev_player = self.current;
        if prev_player != Some(next) {
            entry.record_player(prev_player, Some(next));
            self.current = Some(next);
            self.events.push_back(GameEvent::TurnChanged { player: next });
        }

        log::debug!("{player} drew {orientation} line at ({row}, {col}), closing {gained}");
        self.history.save_command(entry);
        Ok(TurnOutcome {
            player,
            completed,
            next_player: next,
        })
    }

    fn part_snapshot(&self, id: PartId) -> Part {
        self.board
            .part(id)
            .cloned()
            .unwrap_or_else(|| panic!("{id} vanished mid-transition"))
    }

    fn player_after(&self, player: PlayerId) -> PlayerId {
        let position = self
            .players
            .iter()
            .position(|&p| p == player)
            .unwrap_or_default();
        self.players[(position + 1) % self.players.len()]
    }

    /// Makes the part at these coordinates the sole selection.
    ///
    /// Selection changes are micro-moves: they are recorded in the history
    /// without the whole-move flag, so `undo(false)` collapses them into
    /// the user move they follow. Re-selecting the current selection is a
    /// no-op and records nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PartNotFound`] if no such part exists. Edges
    /// need their orientation; corners and regions take `None`.
    pub fn select(
        &mut self,
        kind: PartKind,
        row: u8,
        col: u8,
        orientation: Option<Orientation>,
    ) -> Result<(), GameError> {
        let id = self
            .board
            .find_part(kind, row, col, orientation)
            .ok_or(GameError::PartNotFound { kind, row, col })?;
        let new_selection = BTreeSet::from([id]);
        if self.selected == new_selection {
            return Ok(());
        }
        self.replace_selection(new_selection);
        Ok(())
    }

    /// Clears the selection, recording a micro-move if anything changes.
    pub fn clear_selection(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.replace_selection(BTreeSet::new());
    }

    fn replace_selection(&mut self, new_selection: BTreeSet<PartId>) {
        let prev_selection = self.selected.clone();
        let mut entry = LogEntry::new();
        for &id in prev_selection.difference(&new_selection) {
            let before = self.part_snapshot(id);
            self.board
                .set_selected(id, false)
                .expect("selected part is live");
            entry.record_part(Some(before), Some(self.part_snapshot(id)));
            self.events.push_back(GameEvent::PartChanged { id });
        }
        for &id in new_selection.difference(&prev_selection) {
            let before = self.part_snapshot(id);
            self.board
                .set_selected(id, true)
                .expect("looked-up part is live");
            entry.record_part(Some(before), Some(self.part_snapshot(id)));
            self.events.push_back(GameEvent::PartChanged { id });
        }
        entry.record_selection(prev_selection, new_selection.clone());
        self.selected = new_selection;
        self.history.save_command(entry);
    }

    /// Flags the most recent history entry as a prompt boundary.
    ///
    /// Front ends call this right after asking the user something, so a
    /// later undo or redo pauses there instead of replaying past the
    /// question. Returns `false` if the history is empty.
    pub fn mark_prompt(&mut self) -> bool {
        self.history.mark_last_prompt()
    }

    /// Returns whether there is anything to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns whether there is anything to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undoes the most recent user move, or with `undo_micro_move` a
    /// single history entry.
    ///
    /// Restores the part graph, shadow board, scores, selection, and
    /// current player to their prior snapshots. Returns `false` if there
    /// is nothing to undo.
    ///
    /// # Panics
    ///
    /// Panics if a history entry references a part id the board does not
    /// know; that means the log is corrupt, which is a bug, not a user
    /// condition.
    pub fn undo(&mut self, undo_micro_move: bool) -> bool {
        let mut target = FieldTarget {
            board: &mut self.board,
            shadow: &mut self.shadow,
            scores: &mut self.scores,
            current: &mut self.current,
            selected: &mut self.selected,
            events: &mut self.events,
        };
        self.history.undo(&mut target, undo_micro_move)
    }

    /// Redoes the most recently undone entries; the mirror of
    /// [`GameSession::undo`].
    pub fn redo(&mut self, undo_micro_move: bool) -> bool {
        let mut target = FieldTarget {
            board: &mut self.board,
            shadow: &mut self.shadow,
            scores: &mut self.scores,
            current: &mut self.current,
            selected: &mut self.selected,
            events: &mut self.events,
        };
        self.history.redo(&mut target, undo_micro_move)
    }

    /// Enumerates all legal moves in deterministic order.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.shadow.legal_moves()
    }

    /// Enumerates the legal moves that complete at least one square.
    #[must_use]
    pub fn square_moves(&self) -> MoveList {
        self.shadow.square_moves()
    }

    /// Enumerates the legal moves at distance `min_dist` or more from
    /// completing a square.
    #[must_use]
    pub fn square_distance_moves(&self, min_dist: u8) -> MoveList {
        self.shadow.square_distance_moves(min_dist)
    }

    /// Returns the number of legal moves left, in O(1).
    #[must_use]
    pub fn num_legal_moves(&self) -> usize {
        self.shadow.num_legal_moves()
    }

    /// Returns whether no moves remain.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.shadow.num_legal_moves() == 0
    }
}

/// Split borrow of the session fields the history replays into.
///
/// Undoing needs the command manager and the rest of the session mutably
/// at the same time; borrowing the fields separately keeps that safe.
struct FieldTarget<'a> {
    board: &'a mut Board,
    shadow: &'a mut ShadowBoard,
    scores: &'a mut BTreeMap<PlayerId, u32>,
    current: &'a mut Option<PlayerId>,
    selected: &'a mut BTreeSet<PartId>,
    events: &'a mut VecDeque<GameEvent>,
}

impl FieldTarget<'_> {
    /// Mirrors an edge-state flip implied by a part replacement into the
    /// shadow board; exactly one shadow call per flipped edge.
    fn mirror_edge_change(&mut self, old: Option<&Part>, new: &Part) {
        if new.kind() != PartKind::Edge {
            return;
        }
        let was_on = old.is_some_and(Part::is_on);
        let orientation = new.orientation().expect("edges have an orientation");
        match (was_on, new.is_on()) {
            (false, true) => {
                let owner = new.owner().expect("an on edge records its owner");
                self.shadow.turn_on(new.row(), new.col(), orientation, owner);
            }
            (true, false) => self.shadow.turn_off(new.row(), new.col(), orientation),
            _ => {}
        }
    }
}

impl Playfield for FieldTarget<'_> {
    fn set_current_player(&mut self, player: Option<PlayerId>) {
        if *self.current == player {
            return;
        }
        *self.current = player;
        if let Some(player) = player {
            self.events.push_back(GameEvent::TurnChanged { player });
        }
    }

    fn insert_part(&mut self, part: Part) -> Result<(), ApplyError> {
        let id = part.id();
        let old = self.board.part(id).cloned();
        self.mirror_edge_change(old.as_ref(), &part);
        self.board.insert_part(part);
        self.events.push_back(GameEvent::PartChanged { id });
        Ok(())
    }

    fn remove_part(&mut self, id: PartId) -> Result<(), ApplyError> {
        let part = self
            .board
            .part(id)
            .unwrap_or_else(|| panic!("{id} referenced by history is not live"));
        if part.kind() == PartKind::Edge && part.is_on() {
            let orientation = part.orientation().expect("edges have an orientation");
            self.shadow.turn_off(part.row(), part.col(), orientation);
        }
        self.board.remove_part(id);
        self.selected.remove(&id);
        self.events.push_back(GameEvent::PartChanged { id });
        Ok(())
    }

    fn set_selected(&mut self, id: PartId, selected: bool) -> Result<(), ApplyError> {
        self.board
            .set_selected(id, selected)
            .unwrap_or_else(|_| panic!("{id} referenced by history is not live"));
        if selected {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
        self.events.push_back(GameEvent::PartChanged { id });
        Ok(())
    }

    fn set_score(&mut self, player: PlayerId, score: u32) {
        self.scores.insert(player, score);
        self.events.push_back(GameEvent::ScoreChanged { player, score });
    }

    fn emit_message(&mut self, message: &str) {
        self.events.push_back(GameEvent::Message(message.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_game(rows: u8, cols: u8) -> (GameSession, PlayerId, PlayerId) {
        let alice = PlayerId::new(1).unwrap();
        let bob = PlayerId::new(2).unwrap();
        (GameSession::new(rows, cols, &[alice, bob]), alice, bob)
    }

    #[test]
    fn turn_passes_unless_a_square_is_closed() {
        let (mut game, alice, bob) = two_player_game(1, 1);
        let outcome = game.turn_on(1, 1, Orientation::Horizontal).unwrap();
        assert_eq!(outcome.player(), alice);
        assert_eq!(outcome.next_player(), bob);
        assert!(!outcome.extra_turn());
        assert_eq!(game.current_player(), Some(bob));
    }

    #[test]
    fn closing_a_square_scores_and_keeps_the_turn() {
        let (mut game, alice, bob) = two_player_game(1, 1);
        game.turn_on(1, 1, Orientation::Horizontal).unwrap(); // alice
        game.turn_on(2, 1, Orientation::Horizontal).unwrap(); // bob
        game.turn_on(1, 1, Orientation::Vertical).unwrap(); // alice
        let outcome = game.turn_on(1, 2, Orientation::Vertical).unwrap(); // bob closes
        assert_eq!(outcome.player(), bob);
        assert!(outcome.extra_turn());
        assert_eq!(outcome.completed().len(), 1);
        assert_eq!(game.score(bob), 1);
        assert_eq!(game.score(alice), 0);
        assert_eq!(game.current_player(), Some(bob));
        assert!(game.is_over());
    }

    #[test]
    fn drawing_the_same_line_twice_is_rejected() {
        let (mut game, ..) = two_player_game(2, 2);
        game.turn_on(1, 1, Orientation::Horizontal).unwrap();
        let again = game.turn_on(1, 1, Orientation::Horizontal);
        assert!(matches!(again, Err(GameError::Board(_))));
        let missing = game.turn_on(9, 9, Orientation::Horizontal);
        assert!(matches!(missing, Err(GameError::UnknownLine { .. })));
    }

    #[test]
    fn replay_reproduces_interactive_transitions() {
        let (mut interactive, alice, bob) = two_player_game(1, 2);
        let script = [
            (alice, Move::new(1, 1, Orientation::Horizontal)),
            (bob, Move::new(2, 1, Orientation::Horizontal)),
            (alice, Move::new(1, 1, Orientation::Vertical)),
            (bob, Move::new(1, 2, Orientation::Vertical)),
        ];
        for &(player, mv) in &script {
            interactive.apply_move(player, mv).unwrap();
        }

        let (mut replayed, ..) = two_player_game(1, 2);
        for &(player, mv) in &script {
            replayed.apply_move(player, mv).unwrap();
        }
        assert_eq!(interactive.board(), replayed.board());
        assert_eq!(interactive.shadow(), replayed.shadow());
        assert_eq!(interactive.score(bob), replayed.score(bob));
    }

    #[test]
    fn replay_rejects_unregistered_players() {
        let (mut game, ..) = two_player_game(1, 1);
        let stranger = PlayerId::new(9).unwrap();
        let result = game.apply_move(stranger, Move::new(1, 1, Orientation::Horizontal));
        assert_eq!(result, Err(GameError::UnknownPlayer { player: stranger }));
    }

    #[test]
    fn undo_restores_board_shadow_score_and_turn() {
        let (mut game, alice, bob) = two_player_game(1, 1);
        let pristine_board = game.board().clone();
        let pristine_shadow = game.shadow().clone();

        game.turn_on(1, 1, Orientation::Horizontal).unwrap();
        game.turn_on(2, 1, Orientation::Horizontal).unwrap();
        game.turn_on(1, 1, Orientation::Vertical).unwrap();
        game.turn_on(1, 2, Orientation::Vertical).unwrap();
        assert_eq!(game.score(bob), 1);

        for _ in 0..4 {
            assert!(game.undo(false));
        }
        assert!(!game.can_undo());
        assert_eq!(game.board(), &pristine_board);
        assert_eq!(game.shadow(), &pristine_shadow);
        assert_eq!(game.score(bob), 0);
        assert_eq!(game.current_player(), Some(alice));
        assert_eq!(game.num_legal_moves(), 4);
    }

    #[test]
    fn selection_is_a_micro_move_collapsed_into_the_turn() {
        let (mut game, ..) = two_player_game(2, 2);
        game.turn_on(1, 1, Orientation::Horizontal).unwrap();
        game.select(PartKind::Corner, 1, 1, None).unwrap();
        game.select(PartKind::Corner, 1, 2, None).unwrap();
        assert_eq!(game.selected().len(), 1);

        // One whole-move undo reverts both selections and the line.
        assert!(game.undo(false));
        assert!(game.selected().is_empty());
        assert!(!game.can_undo());
        assert_eq!(game.num_legal_moves(), 12);
        let corner = game.board().corner_at(1, 1).unwrap();
        assert!(!game.board().part(corner).unwrap().is_selected());
    }

    #[test]
    fn redo_replays_what_undo_reverted() {
        let (mut game, _, bob) = two_player_game(1, 1);
        game.turn_on(1, 1, Orientation::Horizontal).unwrap();
        game.turn_on(2, 1, Orientation::Horizontal).unwrap();
        let after_two_board = game.board().clone();
        let after_two_shadow = game.shadow().clone();

        assert!(game.undo(false));
        assert!(game.undo(false));
        assert!(game.can_redo());
        assert!(game.redo(false));
        assert!(game.redo(false));
        assert_eq!(game.board(), &after_two_board);
        assert_eq!(game.shadow(), &after_two_shadow);
        assert_eq!(game.current_player(), Some(bob));
        assert!(!game.can_redo());
    }

    #[test]
    fn prompt_marks_pause_undo_runs() {
        let (mut game, ..) = two_player_game(2, 2);
        game.turn_on(1, 1, Orientation::Horizontal).unwrap();
        assert!(game.mark_prompt());
        game.select(PartKind::Corner, 1, 1, None).unwrap();

        // The selection micro-move is reverted, but the prompt boundary
        // keeps the line itself in place.
        assert!(game.undo(false));
        assert!(game.can_undo());
        assert_eq!(game.num_legal_moves(), 11);
    }

    #[test]
    fn reset_produces_a_fresh_game() {
        let (mut game, alice, _) = two_player_game(1, 1);
        game.turn_on(1, 1, Orientation::Horizontal).unwrap();
        game.select(PartKind::Corner, 1, 1, None).unwrap();
        game.reset(2, 3);
        assert_eq!(game.num_legal_moves(), 17);
        assert!(!game.can_undo());
        assert_eq!(game.current_player(), Some(alice));
        assert!(game.selected().is_empty());
        assert_eq!(game.drain_events().count(), 0);
    }

    #[test]
    fn events_report_completion_score_and_turn() {
        let (mut game, _, bob) = two_player_game(1, 1);
        game.turn_on(1, 1, Orientation::Horizontal).unwrap();
        game.turn_on(2, 1, Orientation::Horizontal).unwrap();
        game.turn_on(1, 1, Orientation::Vertical).unwrap();
        let _ = game.drain_events();

        game.turn_on(1, 2, Orientation::Vertical).unwrap();
        let events: Vec<_> = game.drain_events().collect();
        assert!(events.iter().any(GameEvent::is_square_completed));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::ScoreChanged { player, score: 1 } if *player == bob
        )));
        assert!(events.iter().any(GameEvent::is_message));
        // The closer keeps the turn, so no turn change is reported.
        assert!(!events.iter().any(GameEvent::is_turn_changed));
    }
}
