//! Command log entries: before/after snapshots of one state transition.

use std::collections::{BTreeMap, BTreeSet};

use dotlace_core::{Part, PartId, PlayerId};

use crate::{ApplyError, Playfield};

/// A recorded before/after pair of one piece of state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change<T> {
    /// The value before the transition.
    pub prev: T,
    /// The value after the transition.
    pub new: T,
}

impl<T> Change<T> {
    /// Returns the pair with the two sides exchanged.
    #[must_use]
    pub fn swapped(self) -> Self {
        Self {
            prev: self.new,
            new: self.prev,
        }
    }
}

/// One player's absolute score at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreMark {
    /// The player whose score this is.
    pub player: PlayerId,
    /// The number of squares the player has won.
    pub score: u32,
}

/// A snapshot of one state transition, replayable in either direction.
///
/// An entry captures whichever facets of the game a transition touched:
/// the current player, one player's score, the selection set, and full
/// copies of every part that changed (keyed by id, before and after).
/// Applying an entry replaces each facet wholesale, which is what makes
/// replay immune to partial-update bugs.
///
/// Two flags control undo/redo granularity. `undo_unit` marks the entry
/// whose inversion completes a whole user move: the main action is logged
/// first with the flag set, and automatic follow-ups are logged after it
/// as micro-moves without it, so undo pops micro entries until it pops
/// the unit entry and stops there. `has_prompt` marks an entry after
/// which the UI asked the user something; undo and redo pause rather than
/// silently skip past such a point.
///
/// # Examples
///
/// ```
/// use dotlace_history::LogEntry;
/// use dotlace_core::PlayerId;
///
/// let mut entry = LogEntry::new();
/// assert!(!entry.is_undoable());
///
/// let alice = PlayerId::new(1);
/// let bob = PlayerId::new(2);
/// entry.record_player(alice, bob);
/// entry.mark_undo_unit();
/// assert!(entry.is_undoable());
/// assert_eq!(entry.inverse().player(), Some((bob, alice)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEntry {
    player: Option<Change<Option<PlayerId>>>,
    score: Option<Change<ScoreMark>>,
    selection: Option<Change<BTreeSet<PartId>>>,
    prev_parts: BTreeMap<PartId, Part>,
    new_parts: BTreeMap<PartId, Part>,
    messages: Vec<String>,
    undo_unit: bool,
    has_prompt: bool,
}

impl LogEntry {
    /// Creates an empty entry; populate it as the transition is assembled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a change of the current player.
    pub fn record_player(&mut self, prev: Option<PlayerId>, new: Option<PlayerId>) {
        self.player = Some(Change { prev, new });
    }

    /// Records a change of one player's score.
    pub fn record_score(&mut self, prev: ScoreMark, new: ScoreMark) {
        self.score = Some(Change { prev, new });
    }

    /// Records a change of the selection set.
    pub fn record_selection(&mut self, prev: BTreeSet<PartId>, new: BTreeSet<PartId>) {
        self.selection = Some(Change { prev, new });
    }

    /// Records one part's full state before and after the transition.
    ///
    /// `None` on the before side means the part was created by this
    /// transition; `None` on the after side means it was removed.
    ///
    /// # Panics
    ///
    /// Panics if both sides are `None`, or if the two snapshots carry
    /// different ids.
    pub fn record_part(&mut self, before: Option<Part>, after: Option<Part>) {
        let id = match (&before, &after) {
            (Some(b), Some(a)) => {
                assert_eq!(b.id(), a.id(), "part snapshot ids must match");
                b.id()
            }
            (Some(b), None) => b.id(),
            (None, Some(a)) => a.id(),
            (None, None) => panic!("part change must have at least one side"),
        };
        if let Some(before) = before {
            self.prev_parts.insert(id, before);
        }
        if let Some(after) = after {
            self.new_parts.insert(id, after);
        }
    }

    /// Appends a user-facing message emitted by this transition.
    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Marks this entry as the one completing a whole user move.
    pub fn mark_undo_unit(&mut self) {
        self.undo_unit = true;
    }

    /// Marks this entry as a point where the user was prompted.
    pub fn mark_prompt(&mut self) {
        self.has_prompt = true;
    }

    /// Returns whether undoing this entry completes a whole user move.
    #[must_use]
    pub fn is_undo_unit(&self) -> bool {
        self.undo_unit
    }

    /// Returns whether this entry sits at a user-prompt boundary.
    #[must_use]
    pub fn has_prompt(&self) -> bool {
        self.has_prompt
    }

    /// Returns the recorded player change, if any.
    #[must_use]
    pub fn player(&self) -> Option<(Option<PlayerId>, Option<PlayerId>)> {
        self.player.map(|change| (change.prev, change.new))
    }

    /// Returns the recorded score change, if any.
    #[must_use]
    pub fn score(&self) -> Option<(ScoreMark, ScoreMark)> {
        self.score.map(|change| (change.prev, change.new))
    }

    /// Returns the recorded selection change, if any.
    #[must_use]
    pub fn selection(&self) -> Option<(&BTreeSet<PartId>, &BTreeSet<PartId>)> {
        self.selection
            .as_ref()
            .map(|change| (&change.prev, &change.new))
    }

    /// Returns the before-side part snapshots, keyed by id.
    #[must_use]
    pub fn prev_parts(&self) -> &BTreeMap<PartId, Part> {
        &self.prev_parts
    }

    /// Returns the after-side part snapshots, keyed by id.
    #[must_use]
    pub fn new_parts(&self) -> &BTreeMap<PartId, Part> {
        &self.new_parts
    }

    /// Returns the recorded messages in emission order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns whether this entry captured any state it can restore.
    ///
    /// Entries that are neither undoable nor [repeatable](Self::is_repeatable)
    /// are discarded instead of being pushed onto the history.
    #[must_use]
    pub fn is_undoable(&self) -> bool {
        self.player.is_some()
            || self.score.is_some()
            || self.selection.is_some()
            || !self.prev_parts.is_empty()
            || !self.new_parts.is_empty()
    }

    /// Returns whether this entry has a forward side worth re-executing.
    ///
    /// Unlike [`Self::is_undoable`], an entry that only carries messages is
    /// still repeatable: repeating it re-announces them.
    #[must_use]
    pub fn is_repeatable(&self) -> bool {
        self.is_undoable() || !self.messages.is_empty()
    }

    /// Returns this entry with every before/after pair exchanged.
    ///
    /// Applying the inverse forward is exactly how undo reverses a
    /// transition; messages and the control flags carry over unchanged.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            player: self.player.map(Change::swapped),
            score: self.score.map(Change::swapped),
            selection: self
                .selection
                .clone()
                .map(|change| Change {
                    prev: change.new,
                    new: change.prev,
                }),
            prev_parts: self.new_parts.clone(),
            new_parts: self.prev_parts.clone(),
            messages: self.messages.clone(),
            undo_unit: self.undo_unit,
            has_prompt: self.has_prompt,
        }
    }

    /// Applies the after side of this entry to a playfield.
    ///
    /// The shared execution path for do, undo (via [`Self::inverse`]),
    /// redo, and repeat: set the target player, remove parts that exist
    /// only on the before side, insert every after-side part, replace the
    /// selection set, apply the score, and emit the messages.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ApplyError`] the playfield reports. An entry
    /// referencing unknown part ids is malformed: the session playfield
    /// treats that as an assertion failure rather than returning an error,
    /// so `Err` here normally surfaces only from test doubles.
    pub fn apply<T: Playfield + ?Sized>(&self, target: &mut T) -> Result<(), ApplyError> {
        if let Some(change) = self.player {
            target.set_current_player(change.new);
        }
        for &id in self.prev_parts.keys() {
            if !self.new_parts.contains_key(&id) {
                target.remove_part(id)?;
            }
        }
        for part in self.new_parts.values() {
            target.insert_part(part.clone())?;
        }
        if let Some(change) = &self.selection {
            for &id in change.prev.difference(&change.new) {
                target.set_selected(id, false)?;
            }
            for &id in &change.new {
                target.set_selected(id, true)?;
            }
        }
        if let Some(change) = self.score {
            target.set_score(change.new.player, change.new.score);
        }
        for message in &self.messages {
            target.emit_message(message);
        }
        Ok(())
    }
}
