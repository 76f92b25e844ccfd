//! Asset groups: a player's holdings of one color.
//!
//! Groups are derived from a deck on demand, never stored. A group is
//! complete when it holds every catalog blockchain of its color. Modifiers
//! (MEV boosts, soft forks, hard forks) sit in the deck tagged with the color
//! they were played on and only count while the group is complete.

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::definition::{Blockchain, Card, Color};

/// One color's blockchains and modifiers in a deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetGroup {
    pub color: Color,
    pub set: Vec<Blockchain>,
    pub modifiers: Vec<Card>,
    /// Blockchains of this color in the catalog.
    pub set_size: usize,
}

impl AssetGroup {
    /// Collect the group of `color` from a deck.
    pub fn collect<'a>(
        color: Color,
        deck: impl IntoIterator<Item = &'a Card>,
        catalog: &Catalog,
    ) -> Self {
        let mut set = Vec::new();
        let mut modifiers = Vec::new();

        for card in deck {
            if card.group_color() != Some(color) {
                continue;
            }
            match card {
                Card::Blockchain(bc) => set.push(bc.clone()),
                other => modifiers.push(other.clone()),
            }
        }

        Self {
            color,
            set,
            modifiers,
            set_size: catalog.set_size(color),
        }
    }

    /// Every non-empty group in a deck, in color order.
    pub fn all_in<'a>(
        deck: impl IntoIterator<Item = &'a Card> + Clone,
        catalog: &Catalog,
    ) -> Vec<AssetGroup> {
        Color::ALL
            .iter()
            .map(|&color| AssetGroup::collect(color, deck.clone(), catalog))
            .filter(|group| !group.set.is_empty() || !group.modifiers.is_empty())
            .collect()
    }

    /// Whether every blockchain of the color is held.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.set_size > 0 && self.set.len() == self.set_size
    }

    /// Sum of member blockchain fees.
    #[must_use]
    pub fn base_fee(&self) -> u32 {
        self.set.iter().map(|bc| bc.fee).sum()
    }

    /// Additive bonus from MEV boosts and soft forks.
    #[must_use]
    pub fn bonus(&self) -> u32 {
        self.modifiers
            .iter()
            .filter(|m| matches!(m, Card::MevBoost(_) | Card::SoftFork(_)))
            .map(Card::value)
            .sum()
    }

    /// Product of hard fork multipliers (1 with none attached).
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.modifiers
            .iter()
            .filter(|m| matches!(m, Card::HardFork(_)))
            .map(Card::value)
            .product()
    }

    /// Fee value of the group: `(fees + bonus) * multiplier` when complete,
    /// plain fees otherwise.
    #[must_use]
    pub fn total_fee_value(&self) -> u32 {
        if self.is_complete() {
            (self.base_fee() + self.bonus()) * self.multiplier()
        } else {
            self.base_fee()
        }
    }

    /// Whether the member names match `names` exactly, in any order.
    #[must_use]
    pub fn matches_composition(&self, names: &[Blockchain]) -> bool {
        if names.len() != self.set.len() {
            return false;
        }
        let mut ours: Vec<&str> = self.set.iter().map(|bc| bc.name.as_str()).collect();
        let mut theirs: Vec<&str> = names.iter().map(|bc| bc.name.as_str()).collect();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs
    }

    /// Every card of the group: blockchains, then modifiers.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.set
            .iter()
            .cloned()
            .map(Card::Blockchain)
            .chain(self.modifiers.iter().cloned())
            .collect()
    }
}
