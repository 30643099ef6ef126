//! Undo/redo history for the dots-and-boxes engine.
//!
//! Every state transition of a game is captured as a [`LogEntry`]: full
//! before/after copies of the parts it touched, plus the player, score,
//! and selection changes that came with it. The [`CommandManager`] owns a
//! bounded stack of these entries and can replay them in either direction
//! through the [`Playfield`] trait, which the game session implements
//! over its board and shadow board.
//!
//! Replay works at two granularities: whole user moves (a main entry
//! flagged as an [undo unit](LogEntry::mark_undo_unit) plus the micro-move
//! entries that followed it) or individual entries. Entries flagged as
//! [prompt boundaries](LogEntry::mark_prompt) pause replay so user-visible
//! questions are never silently skipped.

pub mod entry;
pub mod manager;
pub mod playfield;

pub use self::{
    entry::{Change, LogEntry, ScoreMark},
    manager::CommandManager,
    playfield::{ApplyError, Playfield},
};
