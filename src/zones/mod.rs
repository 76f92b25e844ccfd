//! Card collections.
//!
//! Every card of a table sits in exactly one collection:
//! - Per player: `Hand`, `Deck` (blockchains and attached modifiers), `Deposit`
//! - Shared: `DrawPile`, `DiscardPile`, held by the `Dealer`
//!
//! `Zone` names a collection so effects can move cards between them.

pub mod dealer;

pub use dealer::Dealer;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::PlayerId;

/// Address of a card collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Hand(PlayerId),
    Deck(PlayerId),
    Deposit(PlayerId),
    DrawPile,
    DiscardPile,
}

impl Zone {
    /// Owner of a per-player collection.
    #[must_use]
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            Zone::Hand(p) | Zone::Deck(p) | Zone::Deposit(p) => Some(p),
            Zone::DrawPile | Zone::DiscardPile => None,
        }
    }
}

/// Remove the first card matching `card` by identity.
pub fn take_card(pile: &mut Vector<Card>, card: &Card) -> Option<Card> {
    let pos = pile.iter().position(|c| c.same_instance(card))?;
    Some(pile.remove(pos))
}
