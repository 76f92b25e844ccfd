//! Player identification.
//!
//! ## PlayerId
//!
//! Players are identified by their owner address, an opaque 64-bit value
//! supplied by the caller (the transport layer maps accounts onto it).
//! Seat order is the join order kept by `GameState`, not the id.

use serde::{Deserialize, Serialize};

/// Owner address of a player.
///
/// ```
/// use zktt::core::PlayerId;
///
/// let alice = PlayerId::new(0xa11ce);
/// assert_eq!(alice.raw(), 0xa11ce);
/// assert_eq!(alice.to_string(), "0xa11ce");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw address value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
