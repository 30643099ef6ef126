//! Game layer for dots and boxes: turns, scoring, and undoable history.
//!
//! This crate ties the [`dotlace_core`] board pair to the
//! [`dotlace_history`] command log behind one synchronous facade,
//! [`GameSession`]. Front ends call the session for every state change and
//! drain [`GameEvent`]s afterwards to learn what to redraw.
//!
//! # Examples
//!
//! ```
//! use dotlace_core::{Orientation, PlayerId};
//! use dotlace_game::GameSession;
//!
//! let players: Vec<_> = (1..=2).map(|n| PlayerId::new(n).unwrap()).collect();
//! let mut game = GameSession::new(2, 2, &players);
//!
//! while !game.is_over() {
//!     let mv = game.legal_moves().get(0).unwrap();
//!     game.turn_on(mv.row(), mv.col(), mv.orientation()).unwrap();
//! }
//! let total: u32 = players.iter().map(|&p| game.score(p)).sum();
//! assert_eq!(total, 4);
//! ```

pub mod event;
pub mod session;

use dotlace_core::{BoardError, Orientation, PartKind, PlayerId};

pub use self::{
    event::GameEvent,
    session::{GameSession, TurnOutcome},
};

/// An error reported by [`GameSession`] operations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
)]
pub enum GameError {
    /// The move names a line the board does not have.
    #[display("no {orientation} line at ({row}, {col})")]
    UnknownLine {
        /// 1-based row of the requested line.
        row: u8,
        /// 1-based column of the requested line.
        col: u8,
        /// Requested orientation.
        orientation: Orientation,
    },
    /// A selection request names a part the board does not have.
    #[display("no {kind} at ({row}, {col})")]
    PartNotFound {
        /// Kind of the requested part.
        kind: PartKind,
        /// 1-based row of the requested part.
        row: u8,
        /// 1-based column of the requested part.
        col: u8,
    },
    /// A replayed move names a player not registered in this game.
    #[display("{player} is not registered in this game")]
    UnknownPlayer {
        /// The unregistered player.
        player: PlayerId,
    },
    /// A move was attempted with no player on turn.
    #[display("no player is on turn")]
    NoCurrentPlayer,
    /// The board rejected the transition.
    #[display("illegal move: {_0}")]
    Board(#[from] BoardError),
}
