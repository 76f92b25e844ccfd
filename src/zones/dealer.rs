//! Shared draw and discard piles.
//!
//! Both piles are ordered with the top card at the end of the vector.
//! When a draw needs more cards than the draw pile holds, the discard pile is
//! shuffled and slid *under* the remaining draw pile, so cards already on top
//! are drawn first.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{take_card, Zone};
use crate::cards::Card;
use crate::core::{GameError, GameRng};

/// Owner of a table's draw and discard piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealer {
    draw_pile: Vector<Card>,
    discard_pile: Vector<Card>,
}

impl Dealer {
    /// Create a dealer with empty piles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dealer whose draw pile is a seeded permutation of `cards`.
    #[must_use]
    pub fn shuffled(cards: &[Card], rng: &mut GameRng) -> Self {
        Self {
            draw_pile: rng.shuffled_pile(cards.iter().cloned()),
            discard_pile: Vector::new(),
        }
    }

    /// Draw up to `n` cards from the top.
    ///
    /// Reshuffles the discard pile under the draw pile when it runs short.
    /// Returns fewer than `n` cards when both piles together hold fewer.
    ///
    /// ## Errors
    ///
    /// `NoCardsAvailable` if both piles are empty.
    pub fn draw(&mut self, n: usize, rng: &mut GameRng) -> Result<Vec<Card>, GameError> {
        if self.draw_pile.len() < n && !self.discard_pile.is_empty() {
            self.reshuffle(rng);
        }
        if self.draw_pile.is_empty() {
            return Err(GameError::NoCardsAvailable);
        }

        let mut drawn = Vec::with_capacity(n);
        while drawn.len() < n {
            match self.draw_pile.pop_back() {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        Ok(drawn)
    }

    /// Put a card on top of the discard pile, clearing its targets.
    pub fn discard(&mut self, card: &Card) {
        self.discard_pile.push_back(card.cleared());
    }

    /// Remove a card from either pile by identity.
    pub fn take(&mut self, card: &Card) -> Option<Card> {
        take_card(&mut self.discard_pile, card).or_else(|| take_card(&mut self.draw_pile, card))
    }

    /// Remove a card by identity from the named pile only.
    pub fn take_from(&mut self, zone: Zone, card: &Card) -> Option<Card> {
        match zone {
            Zone::DrawPile => take_card(&mut self.draw_pile, card),
            Zone::DiscardPile => take_card(&mut self.discard_pile, card),
            _ => None,
        }
    }

    /// Put a card on top of the draw pile.
    pub fn push_draw(&mut self, card: Card) {
        self.draw_pile.push_back(card);
    }

    /// Cards in the draw pile, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &Vector<Card> {
        &self.draw_pile
    }

    /// Cards in the discard pile, bottom first.
    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard_pile
    }

    /// Cards held in both piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    /// Check if both piles are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reshuffle(&mut self, rng: &mut GameRng) {
        let mut pile = rng.shuffled_pile(std::mem::take(&mut self.discard_pile));
        debug!(
            recycled = pile.len(),
            remaining = self.draw_pile.len(),
            "reshuffling discard pile under draw pile"
        );
        pile.append(std::mem::take(&mut self.draw_pile));
        self.draw_pile = pile;
    }
}
