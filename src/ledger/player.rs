//! Per-player state: collections, turn budget, readiness, debt.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::debt::Debt;
use crate::cards::{AssetGroup, Card, Catalog, Color};
use crate::core::PlayerId;
use crate::zones::Zone;

/// Whether a player still takes part in the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    #[default]
    Active,
    /// Left after the start; keeps the seat, skipped in turn order.
    Inactive,
}

/// Last gas fee charged to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeRecord {
    pub creditor: PlayerId,
    pub amount: u32,
    pub turn: u32,
}

/// A participant at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub owner: PlayerId,
    pub username: String,
    pub moves_remaining: u32,
    pub score: u32,
    pub has_drawn: bool,
    pub is_ready: bool,
    pub status: PlayerStatus,
    pub debt: Debt,

    // === Collections ===
    pub hand: Vector<Card>,
    /// Blockchains and the modifiers attached to them.
    pub deck: Vector<Card>,
    /// Banked value, oldest first.
    pub deposit: Vector<Card>,

    /// Hard fork timestamps this player has already used.
    pub used_timestamps: OrdSet<u64>,
    pub last_fee: Option<FeeRecord>,
}

impl Player {
    /// Create a freshly joined player.
    #[must_use]
    pub fn new(owner: PlayerId, username: impl Into<String>) -> Self {
        Self {
            owner,
            username: username.into(),
            moves_remaining: 0,
            score: 0,
            has_drawn: false,
            is_ready: false,
            status: PlayerStatus::Active,
            debt: Debt::NoDebt,
            hand: Vector::new(),
            deck: Vector::new(),
            deposit: Vector::new(),
            used_timestamps: OrdSet::new(),
            last_fee: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    #[must_use]
    pub fn in_debt(&self) -> bool {
        !self.debt.is_clear()
    }

    /// Cards across hand, deck, and deposit.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.deck.len() + self.deposit.len()
    }

    /// Total value banked in the deposit.
    #[must_use]
    pub fn deposit_value(&self) -> u32 {
        self.deposit.iter().map(Card::value).sum()
    }

    /// Value of everything that can be surrendered as payment.
    #[must_use]
    pub fn payable_value(&self) -> u32 {
        self.payable_cards().map(|(_, c)| c.value()).sum()
    }

    /// Payable cards with their collection, in precedence order:
    /// deposit, then hand, then deck.
    pub fn payable_cards(&self) -> impl Iterator<Item = (Zone, &Card)> {
        let owner = self.owner;
        self.deposit
            .iter()
            .map(move |c| (Zone::Deposit(owner), c))
            .chain(self.hand.iter().map(move |c| (Zone::Hand(owner), c)))
            .chain(self.deck.iter().map(move |c| (Zone::Deck(owner), c)))
    }

    /// Owned copy of `card` and where it sits, searching deposit, hand, deck.
    #[must_use]
    pub fn locate(&self, card: &Card) -> Option<(Zone, &Card)> {
        self.payable_cards().find(|(_, c)| c.same_instance(card))
    }

    /// Owned copy of `card` in hand.
    #[must_use]
    pub fn find_in_hand(&self, card: &Card) -> Option<&Card> {
        self.hand.iter().find(|c| c.same_instance(card))
    }

    /// Collection of this player addressed by `zone`.
    #[must_use]
    pub fn pile(&self, zone: Zone) -> Option<&Vector<Card>> {
        match zone {
            Zone::Hand(p) if p == self.owner => Some(&self.hand),
            Zone::Deck(p) if p == self.owner => Some(&self.deck),
            Zone::Deposit(p) if p == self.owner => Some(&self.deposit),
            _ => None,
        }
    }

    /// Mutable collection of this player addressed by `zone`.
    pub fn pile_mut(&mut self, zone: Zone) -> Option<&mut Vector<Card>> {
        match zone {
            Zone::Hand(p) if p == self.owner => Some(&mut self.hand),
            Zone::Deck(p) if p == self.owner => Some(&mut self.deck),
            Zone::Deposit(p) if p == self.owner => Some(&mut self.deposit),
            _ => None,
        }
    }

    // === Asset groups ===

    /// The group of one color in this player's deck.
    #[must_use]
    pub fn group(&self, color: Color, catalog: &Catalog) -> AssetGroup {
        AssetGroup::collect(color, &self.deck, catalog)
    }

    /// Every non-empty group in this player's deck.
    #[must_use]
    pub fn groups(&self, catalog: &Catalog) -> Vec<AssetGroup> {
        AssetGroup::all_in(&self.deck, catalog)
    }

    /// Number of complete groups.
    #[must_use]
    pub fn complete_groups(&self, catalog: &Catalog) -> usize {
        self.groups(catalog).iter().filter(|g| g.is_complete()).count()
    }

    /// Score: value of complete groups plus deposit value.
    #[must_use]
    pub fn compute_score(&self, catalog: &Catalog) -> u32 {
        let groups: u32 = self
            .groups(catalog)
            .iter()
            .filter(|g| g.is_complete())
            .map(AssetGroup::total_fee_value)
            .sum();
        groups + self.deposit_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Blockchain, ClaimYield};

    fn catalog() -> Catalog {
        Catalog::builder()
            .blockchain("Bitcoin", Color::Gold, 2, 1)
            .blockchain("Dogecoin", Color::Gold, 2, 1)
            .blockchain("Solana", Color::Red, 2, 3)
            .blockchain("Aptos", Color::Red, 2, 3)
            .asset(3)
            .asset(5)
            .build()
            .unwrap()
    }

    fn chain(name: &str) -> Card {
        catalog()
            .iter()
            .find(|c| c.as_blockchain().is_some_and(|bc| bc.name == name))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_new_player() {
        let player = Player::new(PlayerId::new(1), "alice");
        assert!(player.is_active());
        assert!(!player.in_debt());
        assert_eq!(player.card_count(), 0);
        assert_eq!(player.compute_score(&catalog()), 0);
    }

    #[test]
    fn test_payable_precedence() {
        let mut player = Player::new(PlayerId::new(1), "alice");
        let yield_card = Card::ClaimYield(ClaimYield { value: 2, index: 40 });
        player.deck.push_back(chain("Bitcoin"));
        player.hand.push_back(yield_card.clone());
        player.deposit.push_back(catalog().cards()[4].clone());

        let zones: Vec<Zone> = player.payable_cards().map(|(z, _)| z).collect();
        assert_eq!(
            zones,
            vec![
                Zone::Deposit(player.owner),
                Zone::Hand(player.owner),
                Zone::Deck(player.owner)
            ]
        );
        assert_eq!(player.payable_value(), 3 + 2 + 1);
        assert_eq!(player.locate(&yield_card).map(|(z, _)| z), Some(Zone::Hand(player.owner)));
    }

    #[test]
    fn test_pile_rejects_other_owner() {
        let player = Player::new(PlayerId::new(1), "alice");
        assert!(player.pile(Zone::Hand(PlayerId::new(1))).is_some());
        assert!(player.pile(Zone::Hand(PlayerId::new(2))).is_none());
        assert!(player.pile(Zone::DiscardPile).is_none());
    }

    #[test]
    fn test_score_counts_complete_groups_and_deposit() {
        let catalog = catalog();
        let mut player = Player::new(PlayerId::new(1), "alice");
        player.deck.push_back(chain("Bitcoin"));
        player.deck.push_back(chain("Dogecoin"));
        player.deck.push_back(chain("Solana"));
        player.deposit.push_back(catalog.cards()[5].clone());

        assert_eq!(player.complete_groups(&catalog), 1);
        // Gold fees 2 + 2, incomplete Red ignored, deposit 5.
        assert_eq!(player.compute_score(&catalog), 9);
    }

    #[test]
    fn test_find_in_hand_by_identity() {
        let mut player = Player::new(PlayerId::new(1), "alice");
        player.hand.push_back(chain("Solana"));

        let request = Card::Blockchain(Blockchain::new("Solana", Color::Gold, 0, 0));
        assert_eq!(player.find_in_hand(&request), Some(&chain("Solana")));
    }
}
