//! The command manager: bounded undo and redo stacks.

use std::{collections::VecDeque, num::NonZero};

use crate::{LogEntry, Playfield};

/// Owner of the undo/redo history for one game session.
///
/// Entries pushed through [`CommandManager::save_command`] accumulate on a
/// bounded command stack; when the bound is reached the oldest entry is
/// permanently discarded. Undoing moves entries onto the redo stack and
/// back, at either of two granularities: whole user moves (collapsing
/// micro-move runs) or single entries.
///
/// The manager is strictly single-threaded and non-reentrant: starting an
/// undo, redo, or repeat while another is in progress on the same manager
/// is a precondition violation and panics. The surrounding system has
/// historically grown background threads, so the guard is explicit rather
/// than assumed.
///
/// # Examples
///
/// ```
/// use dotlace_history::{CommandManager, LogEntry, Playfield};
/// use dotlace_core::PlayerId;
///
/// # struct Nop;
/// # impl Playfield for Nop {
/// #     fn set_current_player(&mut self, _: Option<PlayerId>) {}
/// #     fn insert_part(&mut self, _: dotlace_core::Part) -> Result<(), dotlace_history::ApplyError> { Ok(()) }
/// #     fn remove_part(&mut self, _: dotlace_core::PartId) -> Result<(), dotlace_history::ApplyError> { Ok(()) }
/// #     fn set_selected(&mut self, _: dotlace_core::PartId, _: bool) -> Result<(), dotlace_history::ApplyError> { Ok(()) }
/// #     fn set_score(&mut self, _: PlayerId, _: u32) {}
/// #     fn emit_message(&mut self, _: &str) {}
/// # }
/// let mut manager = CommandManager::new();
/// let mut entry = LogEntry::new();
/// entry.record_player(PlayerId::new(1), PlayerId::new(2));
/// entry.mark_undo_unit();
/// manager.save_command(entry);
///
/// let mut target = Nop;
/// assert!(manager.can_undo());
/// assert!(manager.undo(&mut target, false));
/// assert!(manager.can_redo());
/// assert!(manager.redo(&mut target, false));
/// ```
#[derive(Debug, Clone)]
pub struct CommandManager {
    command_stack: VecDeque<LogEntry>,
    undo_stack: Vec<LogEntry>,
    capacity: NonZero<usize>,
    command_count: u64,
    move_number: u32,
    in_progress: bool,
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandManager {
    /// The history depth used by [`CommandManager::new`].
    #[must_use]
    pub const fn default_capacity() -> NonZero<usize> {
        NonZero::new(1000).unwrap()
    }

    /// Creates a manager with the default history depth.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::default_capacity())
    }

    /// Creates a manager remembering at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: NonZero<usize>) -> Self {
        Self {
            command_stack: VecDeque::new(),
            undo_stack: Vec::new(),
            capacity,
            command_count: 0,
            move_number: 0,
            in_progress: false,
        }
    }

    /// Returns the history depth bound.
    #[must_use]
    pub fn capacity(&self) -> NonZero<usize> {
        self.capacity
    }

    /// Returns how many entries have ever been saved on this manager.
    #[must_use]
    pub fn command_count(&self) -> u64 {
        self.command_count
    }

    /// Returns how many whole user moves have been saved.
    ///
    /// Advanced once per [`undo_unit`](LogEntry::is_undo_unit) entry,
    /// independent of how many micro-moves each move produced.
    #[must_use]
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Returns the number of entries currently held for undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.command_stack.len()
    }

    /// Returns whether there is anything to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.command_stack.is_empty()
    }

    /// Returns whether there is anything to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Clears both stacks and resets the counters for a fresh game.
    pub fn clear(&mut self) {
        self.command_stack.clear();
        self.undo_stack.clear();
        self.command_count = 0;
        self.move_number = 0;
    }

    /// Flags the most recently saved entry as a prompt boundary.
    ///
    /// Called by the session when the UI asks the user something right
    /// after a transition; undo and redo will pause there. Returns `false`
    /// if the history is empty.
    pub fn mark_last_prompt(&mut self) -> bool {
        match self.command_stack.back_mut() {
            Some(entry) => {
                entry.mark_prompt();
                true
            }
            None => false,
        }
    }

    /// Records a completed transition on the command stack.
    ///
    /// Entries that captured nothing undoable or repeatable are discarded.
    /// Saving a command invalidates the redo stack, and once the stack is
    /// at capacity the oldest entry is dropped for good; history depth is
    /// a hard bound, not a ring buffer with recovery.
    ///
    /// Returns whether the entry was kept.
    pub fn save_command(&mut self, entry: LogEntry) -> bool {
        if !entry.is_undoable() && !entry.is_repeatable() {
            log::trace!("discarding log entry with no recorded changes");
            return false;
        }
        self.command_count += 1;
        if entry.is_undo_unit() {
            self.move_number += 1;
        }
        self.undo_stack.clear();
        if self.command_stack.len() == self.capacity.get() {
            self.command_stack.pop_front();
        }
        log::debug!(
            "saved command {} (move {}, unit: {}, prompt: {})",
            self.command_count,
            self.move_number,
            entry.is_undo_unit(),
            entry.has_prompt(),
        );
        self.command_stack.push_back(entry);
        true
    }

    /// Undoes the most recent run of entries.
    ///
    /// Pops the top entry, applies its [`inverse`](LogEntry::inverse), and
    /// moves it to the redo stack. With `undo_micro_move` set, exactly one
    /// entry is undone. Otherwise the run continues until the popped entry
    /// carried the `undo_unit` flag (the user move is fully reverted), the
    /// stack empties, or the next entry is a prompt boundary, in which
    /// case pending messages are flushed before stopping.
    ///
    /// Returns `false` on an empty stack or if an inversion fails; a
    /// failed inversion leaves the entries already inverted in place, so
    /// the undo is best-effort rather than all-or-nothing.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly while another undo, redo, or repeat
    /// is in progress on this manager.
    pub fn undo<T: Playfield + ?Sized>(&mut self, target: &mut T, undo_micro_move: bool) -> bool {
        self.enter();
        let result = self.undo_run(target, undo_micro_move);
        self.in_progress = false;
        result
    }

    fn undo_run<T: Playfield + ?Sized>(&mut self, target: &mut T, undo_micro_move: bool) -> bool {
        if self.command_stack.is_empty() {
            log::debug!("undo requested with empty history");
            return false;
        }
        loop {
            let Some(entry) = self.command_stack.pop_back() else {
                return true;
            };
            if let Err(err) = entry.inverse().apply(target) {
                log::error!("undo stopped: inversion failed: {err}");
                self.command_stack.push_back(entry);
                return false;
            }
            let completes_move = entry.is_undo_unit();
            self.undo_stack.push(entry);
            if completes_move || undo_micro_move {
                return true;
            }
            match self.command_stack.back() {
                None => return true,
                Some(next) if next.has_prompt() => {
                    target.flush_messages();
                    return true;
                }
                Some(_) => {}
            }
        }
    }

    /// Redoes the most recent run of undone entries.
    ///
    /// The mirror of [`CommandManager::undo`] over the redo stack: each
    /// popped entry is re-applied forward (not inverted) and pushed back
    /// onto the command stack, with the same `undo_unit` and `has_prompt`
    /// stopping rules.
    ///
    /// Returns `false` on an empty redo stack or if a re-application
    /// fails.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly while another undo, redo, or repeat
    /// is in progress on this manager.
    pub fn redo<T: Playfield + ?Sized>(&mut self, target: &mut T, undo_micro_move: bool) -> bool {
        self.enter();
        let result = self.redo_run(target, undo_micro_move);
        self.in_progress = false;
        result
    }

    fn redo_run<T: Playfield + ?Sized>(&mut self, target: &mut T, undo_micro_move: bool) -> bool {
        if self.undo_stack.is_empty() {
            log::debug!("redo requested with empty redo stack");
            return false;
        }
        loop {
            let Some(entry) = self.undo_stack.pop() else {
                return true;
            };
            if let Err(err) = entry.apply(target) {
                log::error!("redo stopped: re-application failed: {err}");
                self.undo_stack.push(entry);
                return false;
            }
            let completes_move = entry.is_undo_unit();
            if self.command_stack.len() == self.capacity.get() {
                self.command_stack.pop_front();
            }
            self.command_stack.push_back(entry);
            if completes_move || undo_micro_move {
                return true;
            }
            match self.undo_stack.last() {
                None => return true,
                Some(next) if next.has_prompt() => {
                    target.flush_messages();
                    return true;
                }
                Some(_) => {}
            }
        }
    }

    /// Re-executes the most recent entry in place, without popping it.
    ///
    /// Used for "do that again" gestures. Returns `false` if the command
    /// stack is empty or the re-execution fails.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly while another undo, redo, or repeat
    /// is in progress on this manager.
    pub fn repeat<T: Playfield + ?Sized>(&mut self, target: &mut T) -> bool {
        self.enter();
        let result = match self.command_stack.back().cloned() {
            None => {
                log::debug!("repeat requested with empty history");
                false
            }
            Some(entry) => match entry.apply(target) {
                Ok(()) => true,
                Err(err) => {
                    log::error!("repeat failed: {err}");
                    false
                }
            },
        };
        self.in_progress = false;
        result
    }

    fn enter(&mut self) {
        assert!(
            !self.in_progress,
            "re-entrant undo/redo on the same command manager",
        );
        self.in_progress = true;
    }
}

#[cfg(test)]
mod tests {
    use dotlace_core::{Part, PartId, PlayerId, Point};

    use crate::ApplyError;

    use super::*;

    /// Records every playfield call; optionally fails after N part inserts.
    #[derive(Debug, Default)]
    struct Recorder {
        players: Vec<Option<PlayerId>>,
        inserted: Vec<PartId>,
        removed: Vec<PartId>,
        selected: Vec<(PartId, bool)>,
        scores: Vec<(PlayerId, u32)>,
        messages: Vec<String>,
        flushes: usize,
        fail_inserts_after: Option<usize>,
    }

    impl Playfield for Recorder {
        fn set_current_player(&mut self, player: Option<PlayerId>) {
            self.players.push(player);
        }

        fn insert_part(&mut self, part: Part) -> Result<(), ApplyError> {
            if self.fail_inserts_after == Some(self.inserted.len()) {
                return Err(ApplyError::UnknownPart { id: part.id() });
            }
            self.inserted.push(part.id());
            Ok(())
        }

        fn remove_part(&mut self, id: PartId) -> Result<(), ApplyError> {
            self.removed.push(id);
            Ok(())
        }

        fn set_selected(&mut self, id: PartId, selected: bool) -> Result<(), ApplyError> {
            self.selected.push((id, selected));
            Ok(())
        }

        fn set_score(&mut self, player: PlayerId, score: u32) {
            self.scores.push((player, score));
        }

        fn emit_message(&mut self, message: &str) {
            self.messages.push(message.to_owned());
        }

        fn flush_messages(&mut self) {
            self.flushes += 1;
        }
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn part_entry(index: u32, unit: bool) -> LogEntry {
        init_logging();
        let mut before = Part::new_corner(PartId::from_index(index), Point::new(1, 1));
        let mut after = before.clone();
        before.set_selected(false);
        after.set_selected(true);
        let mut entry = LogEntry::new();
        entry.record_part(Some(before), Some(after));
        if unit {
            entry.mark_undo_unit();
        }
        entry
    }

    #[test]
    fn empty_history_reports_false_not_errors() {
        let mut manager = CommandManager::new();
        let mut target = Recorder::default();
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
        assert!(!manager.undo(&mut target, false));
        assert!(!manager.redo(&mut target, false));
        assert!(!manager.repeat(&mut target));
    }

    #[test]
    fn ineffective_entries_are_discarded() {
        let mut manager = CommandManager::new();
        assert!(!manager.save_command(LogEntry::new()));
        assert_eq!(manager.command_count(), 0);
        assert!(!manager.can_undo());
    }

    #[test]
    fn counters_track_commands_and_moves_separately() {
        let mut manager = CommandManager::new();
        assert!(manager.save_command(part_entry(0, true)));
        assert!(manager.save_command(part_entry(1, false)));
        assert!(manager.save_command(part_entry(2, false)));
        assert!(manager.save_command(part_entry(3, true)));
        assert_eq!(manager.command_count(), 4);
        assert_eq!(manager.move_number(), 2);
    }

    #[test]
    fn capacity_discards_oldest_permanently() {
        let mut manager = CommandManager::with_capacity(NonZero::new(2).unwrap());
        manager.save_command(part_entry(0, true));
        manager.save_command(part_entry(1, true));
        manager.save_command(part_entry(2, true));
        assert_eq!(manager.undo_depth(), 2);

        let mut target = Recorder::default();
        assert!(manager.undo(&mut target, true));
        assert!(manager.undo(&mut target, true));
        assert!(!manager.undo(&mut target, true));
        // Entry 0 is gone: only 2 and 1 were reverted.
        assert_eq!(
            target.inserted,
            [PartId::from_index(2), PartId::from_index(1)],
        );
    }

    #[test]
    fn saving_invalidates_redo() {
        let mut manager = CommandManager::new();
        let mut target = Recorder::default();
        manager.save_command(part_entry(0, true));
        assert!(manager.undo(&mut target, false));
        assert!(manager.can_redo());
        manager.save_command(part_entry(1, true));
        assert!(!manager.can_redo());
    }

    #[test]
    fn micro_undo_reverts_exactly_one_entry() {
        let mut manager = CommandManager::new();
        let mut target = Recorder::default();
        manager.save_command(part_entry(0, true));
        manager.save_command(part_entry(1, false));
        assert!(manager.undo(&mut target, true));
        assert_eq!(target.inserted, [PartId::from_index(1)]);
        assert_eq!(manager.undo_depth(), 1);
    }

    #[test]
    fn whole_move_undo_collapses_micro_run() {
        // A user move logged as its main (unit) entry followed by two
        // automatic micro-moves.
        let mut manager = CommandManager::new();
        let mut target = Recorder::default();
        manager.save_command(part_entry(0, true));
        manager.save_command(part_entry(1, false));
        manager.save_command(part_entry(2, false));

        assert!(manager.undo(&mut target, false));
        assert_eq!(
            target.inserted,
            [
                PartId::from_index(2),
                PartId::from_index(1),
                PartId::from_index(0),
            ],
        );
        assert!(!manager.can_undo());
        assert_eq!(manager.undo_depth(), 0);
    }

    #[test]
    fn undo_pauses_at_prompt_boundaries() {
        let mut manager = CommandManager::new();
        let mut target = Recorder::default();
        let mut prompted = part_entry(0, false);
        prompted.mark_prompt();
        manager.save_command(prompted);
        manager.save_command(part_entry(1, false));

        assert!(manager.undo(&mut target, false));
        // Only the newer entry is reverted; the prompt entry stays.
        assert_eq!(target.inserted, [PartId::from_index(1)]);
        assert_eq!(target.flushes, 1);
        assert!(manager.can_undo());
    }

    #[test]
    fn redo_mirrors_undo_and_restacks_entries() {
        let mut manager = CommandManager::new();
        let mut target = Recorder::default();
        manager.save_command(part_entry(0, true));
        manager.save_command(part_entry(1, false));
        assert!(manager.undo(&mut target, false));

        target.inserted.clear();
        // The unit entry tops the redo stack and replays first.
        assert!(manager.redo(&mut target, false));
        assert_eq!(target.inserted, [PartId::from_index(0)]);
        assert!(manager.can_redo());
        assert!(manager.redo(&mut target, false));
        assert_eq!(
            target.inserted,
            [PartId::from_index(0), PartId::from_index(1)],
        );
        assert!(!manager.can_redo());
        assert_eq!(manager.undo_depth(), 2);
    }

    #[test]
    fn failed_inversion_keeps_partial_undo() {
        // The second inversion fails; the first stays inverted and the
        // failing entry remains current. Best-effort by design.
        let mut manager = CommandManager::new();
        let mut target = Recorder {
            fail_inserts_after: Some(1),
            ..Recorder::default()
        };
        manager.save_command(part_entry(0, true));
        manager.save_command(part_entry(1, false));
        manager.save_command(part_entry(2, false));

        assert!(!manager.undo(&mut target, false));
        assert_eq!(target.inserted, [PartId::from_index(2)]);
        assert_eq!(manager.undo_depth(), 2);
        assert!(manager.can_redo());
    }

    #[test]
    fn repeat_reapplies_top_without_popping() {
        let mut manager = CommandManager::new();
        let mut target = Recorder::default();
        manager.save_command(part_entry(0, true));
        assert!(manager.repeat(&mut target));
        assert!(manager.repeat(&mut target));
        assert_eq!(
            target.inserted,
            [PartId::from_index(0), PartId::from_index(0)],
        );
        assert_eq!(manager.undo_depth(), 1);
    }

    #[test]
    fn clear_resets_history_and_counters() {
        let mut manager = CommandManager::new();
        manager.save_command(part_entry(0, true));
        manager.clear();
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
        assert_eq!(manager.command_count(), 0);
        assert_eq!(manager.move_number(), 0);
    }
}
