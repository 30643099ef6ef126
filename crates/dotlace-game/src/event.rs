//! Notifications the session emits for the rendering layer.

use dotlace_core::{PartId, PlayerId};
use tinyvec::ArrayVec;

/// One fact about the game the front end may want to react to.
///
/// The session queues events as they happen; the front end drains the
/// queue after each call and decides what to draw, speak, or ignore. The
/// core only reports facts, never presentation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// A part was added, removed, or mutated.
    PartChanged {
        /// Id of the affected part.
        id: PartId,
    },
    /// Turning on an edge completed one or two regions.
    SquareCompleted {
        /// The edge whose turn-on closed the square(s).
        edge: PartId,
        /// The completed region(s); two when an interior edge closes both
        /// of its sides at once.
        regions: ArrayVec<[PartId; 2]>,
    },
    /// A player's score changed.
    ScoreChanged {
        /// The player whose score changed.
        player: PlayerId,
        /// The new absolute score.
        score: u32,
    },
    /// The current player changed.
    TurnChanged {
        /// The player whose turn it now is.
        player: PlayerId,
    },
    /// A user-facing message, e.g. replayed from the command log.
    Message(String),
}
