//! Effect definitions.
//!
//! Effects are the atomic state changes card resolution is built from.
//! Rules compute an `EffectBatch` without touching state; the
//! `EffectResolver` applies it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::PlayerId;
use crate::zones::Zone;

/// An atomic state change.
///
/// ## Card Movement
///
/// - `MoveCard`: Take a card (by identity) out of one collection and put the
///   given copy into another. The copy carries any targets the card was
///   played with, so modifiers remember which group they attach to.
///
/// ## Ledger
///
/// - `ImposeDebt` / `SettleDebt`: Open or clear an obligation
/// - `RecordFee`: Remember a gas fee for a later replay
/// - `ConsumeTimestamp`: Burn a hard fork timestamp
/// - `MarkDrawn`: Count the turn's draw as taken
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    // === Card Movement ===
    MoveCard { card: Card, from: Zone, to: Zone },

    // === Ledger ===
    ImposeDebt {
        debtor: PlayerId,
        creditor: PlayerId,
        amount: u32,
    },

    SettleDebt { debtor: PlayerId, creditor: PlayerId },

    RecordFee {
        debtor: PlayerId,
        creditor: PlayerId,
        amount: u32,
        turn: u32,
    },

    ConsumeTimestamp { owner: PlayerId, timestamp: u64 },

    MarkDrawn { player: PlayerId },
}

impl Effect {
    /// Create a move card effect.
    pub fn move_card(card: Card, from: Zone, to: Zone) -> Self {
        Self::MoveCard { card, from, to }
    }

    /// Create a debt effect.
    pub fn debt(debtor: PlayerId, creditor: PlayerId, amount: u32) -> Self {
        Self::ImposeDebt {
            debtor,
            creditor,
            amount,
        }
    }
}

/// Ordered effects produced by one operation.
///
/// Most operations produce one to four effects; `SmallVec` keeps those
/// off the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectBatch {
    effects: SmallVec<[Effect; 4]>,
}

impl EffectBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an effect.
    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Append an effect, builder style.
    #[must_use]
    pub fn with(mut self, effect: Effect) -> Self {
        self.push(effect);
        self
    }

    /// Number of effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Iterate over the effects in order.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }
}

impl Extend<Effect> for EffectBatch {
    fn extend<I: IntoIterator<Item = Effect>>(&mut self, iter: I) {
        self.effects.extend(iter);
    }
}

impl FromIterator<Effect> for EffectBatch {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        Self {
            effects: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EffectBatch {
    type Item = Effect;
    type IntoIter = smallvec::IntoIter<[Effect; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.into_iter()
    }
}
