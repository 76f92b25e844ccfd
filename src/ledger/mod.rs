//! Player ledger: per-player collections, move budget, readiness, and debt.

pub mod debt;
pub mod player;

pub use debt::{Debt, Obligation};
pub use player::{FeeRecord, Player, PlayerStatus};
