//! # zktt
//!
//! Rules and turn engine for ZKTT, a crypto-themed set-collection card game.
//!
//! Players join a table, ready up, and take turns drawing, laying blockchains
//! and assets into their deck, and playing action cards: fees, forks, and
//! attacks on the other players' holdings. A full color set of blockchains is
//! an asset group; completing enough groups wins.
//!
//! ## Design Principles
//!
//! 1. **Atomic Operations**: A table applies every operation to a copy of its
//!    state and commits only on success. A rejected operation changes nothing.
//!
//! 2. **Deterministic Replay**: All randomness comes from a seeded `GameRng`
//!    stored in the state, so replaying a table's history on the same seed
//!    reproduces it exactly.
//!
//! 3. **Effects as Data**: Card rules compute an `EffectBatch`; only the
//!    `EffectResolver` touches collections.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`, which is
//!   what makes copy-then-commit cheap.
//!
//! - **Per-Table Locking**: `TableRegistry` keeps tables in a `DashMap`, one
//!   mutex each; distinct tables never contend.
//!
//! ## Modules
//!
//! - `core`: Player ids, state, actions, RNG, configuration, errors
//! - `cards`: Card variants, the catalog, asset groups
//! - `zones`: Card locations and the dealer (draw and discard piles)
//! - `ledger`: Per-player collections, debts, and scores
//! - `effects`: Effect batches and their resolver
//! - `rules`: `RulesEngine` and the ZKTT turn controller
//! - `table`: Tables, snapshots, and the concurrent registry

pub mod core;
pub mod cards;
pub mod zones;
pub mod ledger;
pub mod effects;
pub mod rules;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ConfigError, GameConfig, GameError, GamePhase, GameRng, GameState,
    IntegrityError, PlayerId,
};

pub use crate::cards::{Blockchain, Card, CardKind, Catalog, Color, PlayerTarget};

pub use crate::zones::{Dealer, Zone};

pub use crate::ledger::{Debt, Player, PlayerStatus};

pub use crate::effects::{Effect, EffectBatch, EffectResolver};

pub use crate::rules::{GameResult, RulesEngine, TurnController};

pub use crate::table::{Table, TableError, TableId, TableRegistry, TableSnapshot};
