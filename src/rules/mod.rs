//! Game rules.
//!
//! - `RulesEngine`: The trait tables drive
//! - `TurnController`: The ZKTT state machine implementing it
//! - `ActionResolver`: What each card does when played or moved
//! - `FeeEngine`: Fee amounts, payments, and liquidation

pub mod engine;
pub mod fees;
pub mod resolver;
pub mod turn;

pub use engine::{GameResult, RulesEngine};
pub use fees::FeeEngine;
pub use resolver::ActionResolver;
pub use turn::TurnController;
