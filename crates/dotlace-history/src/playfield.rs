//! The seam between the command log and the live game state.

use dotlace_core::{Part, PartId, PlayerId};

/// Errors a [`Playfield`] may report while a log entry is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ApplyError {
    /// The entry referenced a part id the playfield does not know.
    ///
    /// A well-formed log never does this; see the failure semantics on
    /// [`LogEntry::apply`](crate::LogEntry::apply).
    #[display("{id} is not present in the playfield")]
    UnknownPart {
        /// The offending id.
        id: PartId,
    },
}

/// Mutable game state a [`LogEntry`](crate::LogEntry) can be applied to.
///
/// The game session implements this over its board, shadow board, scores,
/// and selection; the history crate never touches those structures
/// directly. Implementations own the pairing discipline: inserting a part
/// whose edge state changed must mirror the change into the shadow board
/// before returning.
///
/// All operations are full-state replacements, not field patches, so a
/// restored part is bit-for-bit the snapshot the log captured.
pub trait Playfield {
    /// Makes `player` the current player (`None` between games).
    fn set_current_player(&mut self, player: Option<PlayerId>);

    /// Inserts a part, replacing any live part with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::UnknownPart`] if the playfield cannot host
    /// this part.
    fn insert_part(&mut self, part: Part) -> Result<(), ApplyError>;

    /// Removes the part with this id.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::UnknownPart`] if no such part is live.
    fn remove_part(&mut self, id: PartId) -> Result<(), ApplyError>;

    /// Sets or clears the selection flag of one part.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::UnknownPart`] if no such part is live.
    fn set_selected(&mut self, id: PartId, selected: bool) -> Result<(), ApplyError>;

    /// Sets one player's score to an absolute value.
    fn set_score(&mut self, player: PlayerId, score: u32);

    /// Queues a user-facing message recorded in the entry.
    fn emit_message(&mut self, message: &str);

    /// Delivers any queued messages now.
    ///
    /// Called when undo or redo pauses at a prompt boundary, so the user
    /// sees pending output before being asked anything. The default does
    /// nothing; implementations that buffer messages override it.
    fn flush_messages(&mut self) {}
}
