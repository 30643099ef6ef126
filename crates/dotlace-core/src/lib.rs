//! Core data structures for the dots-and-boxes engine.
//!
//! This crate owns the board model and the fast query structures layered
//! on top of it. Nothing here renders, speaks, or does I/O; front ends and
//! automated players drive the model through a small synchronous API.
//!
//! # Overview
//!
//! 1. **Part graph** - the authoritative object graph
//!    - [`part`]: [`Part`] values (corners, edges, regions), [`PartId`],
//!      coordinate and orientation types
//!    - [`board`]: the [`Board`] arena owning every part, with idempotent
//!      edge wiring, turn-on/turn-off, and square-completion detection
//! 2. **Shadow board** - the array mirror
//!    - [`shadow`]: [`ShadowBoard`], kept in lock-step with the part graph
//!      and answering legal-move and completion queries without touching it
//! 3. **Moves** - bulk candidate handling
//!    - [`moves`]: [`Move`] and the fixed-capacity [`MoveList`], with
//!      uniform random sampling and predicate filtering
//! 4. **Players** - [`player`]: the [`PlayerId`] identifier
//!
//! # Examples
//!
//! ```
//! use dotlace_core::{Board, Orientation, PlayerId, ShadowBoard};
//!
//! let mut board = Board::new(2, 2);
//! let mut shadow = ShadowBoard::new(2, 2);
//! let player = PlayerId::new(1).unwrap();
//!
//! // Board and shadow are mutated as a pair.
//! let edge = board.edge_at(1, 1, Orientation::Horizontal).unwrap();
//! let completed = board.turn_on(edge, player).unwrap();
//! shadow.turn_on(1, 1, Orientation::Horizontal, player);
//!
//! assert!(completed.is_empty());
//! assert_eq!(shadow.num_legal_moves(), 11);
//! ```

pub mod board;
pub mod moves;
pub mod part;
pub mod player;
pub mod shadow;

// Re-export commonly used types
pub use self::{
    board::{Board, BoardError},
    moves::{Move, MoveList},
    part::{Orientation, Part, PartId, PartKind, Point, Shape},
    player::PlayerId,
    shadow::ShadowBoard,
};
