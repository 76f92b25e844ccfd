//! The seam between a table and the game's rules.
//!
//! `Table` only knows how to clone, apply, and commit. Everything about
//! whether a ZKTT operation is legal lives behind `RulesEngine`.

use serde::{Deserialize, Serialize};

use crate::cards::Catalog;
use crate::core::{Action, GameConfig, GameError, GameState, PlayerId};

/// How a finished game came out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    /// Nobody was left to win.
    Draw,
    /// Tied on score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }

    /// Build a result from the players sharing the best outcome.
    #[must_use]
    pub fn from_leaders(mut leaders: Vec<PlayerId>) -> Self {
        match leaders.len() {
            0 => GameResult::Draw,
            1 => GameResult::Winner(leaders.remove(0)),
            _ => GameResult::Winners(leaders),
        }
    }
}

/// Applies operations to a `GameState`.
///
/// `apply_action` must be deterministic in `(state, player, action)`, since
/// replay depends on it. On error it may leave `state` half-written, so
/// callers run it against a clone.
pub trait RulesEngine {
    fn config(&self) -> &GameConfig;

    fn catalog(&self) -> &Catalog;

    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), GameError>;

    /// `Some` once the game has ended.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Dry run of `apply_action`.
    fn validate(&self, state: &GameState, player: PlayerId, action: &Action) -> Result<(), GameError> {
        let mut scratch = state.clone();
        self.apply_action(&mut scratch, player, action)
    }
}
