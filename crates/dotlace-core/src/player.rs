//! Player identifiers.

use std::{
    fmt::{self, Display},
    num::NonZero,
};

/// Identifier of a player participating in a game.
///
/// Player ids are non-zero so that an `Option<PlayerId>` occupies a single
/// byte; the shadow board exploits this by storing one `Option<PlayerId>`
/// per line and region cell, where `None` means "still open".
///
/// # Examples
///
/// ```
/// use dotlace_core::PlayerId;
///
/// let player = PlayerId::new(1).unwrap();
/// assert_eq!(player.get(), 1);
/// assert!(PlayerId::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(NonZero<u8>);

impl PlayerId {
    /// Creates a player id from a non-zero value.
    ///
    /// Returns `None` if `value` is zero.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        match NonZero::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Returns the numeric value of this player id.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}
