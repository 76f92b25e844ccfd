//! Effect system for card resolution.
//!
//! - `Effect`: Atomic state changes (card moves, debts, bookkeeping)
//! - `EffectBatch`: The ordered effects of one operation
//! - `EffectResolver`: Executes a batch on game state
//!
//! Rules never mutate collections directly when resolving a card; they
//! describe the change as a batch and hand it to the resolver.

mod effect;
mod resolver;

pub use effect::{Effect, EffectBatch};
pub use resolver::EffectResolver;
