//! Seeded shuffling for the dealer.
//!
//! Every table owns one `GameRng`, created from the seed its creator
//! supplies. The same seed deals the same game, and a snapshot taken
//! mid-game resumes the stream where it stopped.
//!
//! ```
//! use zktt::core::GameRng;
//!
//! let deck = ["Solana", "Aptos", "Sui", "Bitcoin", "Dogecoin"];
//! let first = GameRng::new(42).shuffled_pile(deck);
//! let second = GameRng::new(42).shuffled_pile(deck);
//! assert_eq!(first, second);
//! ```

use im::Vector;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream behind every shuffle of a table.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "GameRngState", from = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed the table was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Collect `items` into a pile in shuffled order.
    pub fn shuffled_pile<T: Clone>(&mut self, items: impl IntoIterator<Item = T>) -> Vector<T> {
        let mut buffer: Vec<T> = items.into_iter().collect();
        self.shuffle(&mut buffer);
        buffer.into_iter().collect()
    }

    /// Position in the stream, for snapshots.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serialized form of `GameRng`: the seed plus the ChaCha8 word position,
/// so restoring never replays earlier shuffles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Vec<u32> {
        (0..40).collect()
    }

    #[test]
    fn test_same_seed_same_pile() {
        let a = GameRng::new(42).shuffled_pile(deck());
        let b = GameRng::new(42).shuffled_pile(deck());
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeds_differ() {
        let a = GameRng::new(1).shuffled_pile(deck());
        let b = GameRng::new(2).shuffled_pile(deck());
        assert_ne!(a, b);
    }

    #[test]
    fn test_pile_is_permutation() {
        let pile = GameRng::new(3).shuffled_pile(deck());
        assert_ne!(pile.iter().copied().collect::<Vec<_>>(), deck());

        let mut sorted: Vec<u32> = pile.into_iter().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, deck());
    }

    #[test]
    fn test_restore_resumes_stream() {
        let mut rng = GameRng::new(7);
        rng.shuffled_pile(deck());

        let mut restored = GameRng::from_state(&rng.state());
        assert_eq!(rng.shuffled_pile(deck()), restored.shuffled_pile(deck()));
        assert_eq!(restored.seed(), 7);
    }

    #[test]
    fn test_serde_keeps_position() {
        let mut rng = GameRng::new(99);
        rng.shuffled_pile(deck());

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();
        assert_eq!(rng.shuffled_pile(deck()), restored.shuffled_pile(deck()));
    }
}
