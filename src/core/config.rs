//! Table configuration.
//!
//! `GameConfig` fixes the numeric rules of a table: seat limits, deal sizes,
//! the per-turn move budget, and the win condition. Tables validate their
//! config once at creation; the rules never re-check it.
//!
//! Configs can be built in code or loaded from TOML:
//!
//! ```
//! use zktt::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str("moves_per_turn = 4\nmax_players = 3").unwrap();
//! assert_eq!(config.moves_per_turn, 4);
//! assert_eq!(config.max_players, 3);
//! assert_eq!(config.initial_hand_size, 5); // default
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a `GameConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// Numeric rules for a table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Players required before `start`.
    pub min_players: usize,

    /// Seats at the table.
    pub max_players: usize,

    /// Cards dealt to each player on `start`.
    pub initial_hand_size: usize,

    /// `play`/`move` actions per turn.
    pub moves_per_turn: u32,

    /// Cards taken by a regular draw.
    pub cards_per_draw: usize,

    /// Cards taken by a five-card draw (empty hand).
    pub cards_per_full_draw: usize,

    /// Complete asset groups that end the game immediately.
    pub sets_to_win: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 5,
            initial_hand_size: 5,
            moves_per_turn: 3,
            cards_per_draw: 1,
            cards_per_full_draw: 5,
            sets_to_win: 3,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (partial) TOML document; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the seat limits.
    #[must_use]
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the initial deal size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Set the move budget per turn.
    #[must_use]
    pub fn with_moves_per_turn(mut self, moves: u32) -> Self {
        self.moves_per_turn = moves;
        self
    }

    /// Set the number of complete groups that wins the game.
    #[must_use]
    pub fn with_sets_to_win(mut self, sets: usize) -> Self {
        self.sets_to_win = sets;
        self
    }

    /// Check the config for values the rules cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 {
            return Err(ConfigError::InvalidValue {
                field: "min_players",
                reason: "a game needs at least 2 players".to_string(),
            });
        }
        if self.max_players < self.min_players {
            return Err(ConfigError::InvalidValue {
                field: "max_players",
                reason: format!("must be >= min_players ({})", self.min_players),
            });
        }
        if self.moves_per_turn == 0 {
            return Err(ConfigError::InvalidValue {
                field: "moves_per_turn",
                reason: "must be positive".to_string(),
            });
        }
        if self.cards_per_draw == 0 || self.cards_per_full_draw == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cards_per_draw",
                reason: "draws must take at least one card".to_string(),
            });
        }
        if self.sets_to_win == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sets_to_win",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
