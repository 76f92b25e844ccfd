//! Core engine types: players, state, actions, RNG, configuration, errors.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use player::PlayerId;
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, GameConfig};
pub use error::{ErrorKind, GameError, IntegrityError};
pub use action::{Action, ActionRecord};
pub use state::{GamePhase, GameState};
