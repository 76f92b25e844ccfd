//! Card catalog: the full list of cards a table plays with.
//!
//! The catalog is static. It defines which cards exist and how many
//! blockchains make up each color's set. Card conservation is checked
//! against its length.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::definition::{
    Asset, Blockchain, Card, ChainReorg, ClaimYield, Color, FiftyOnePercentAttack, FrontRun,
    GasFee, GasFeeType, HardFork, MevBoost, PlayerTarget, PriorityFee, ReplayAttack,
    SandwichAttack, SoftFork,
};
use crate::core::ConfigError;

/// Immutable list of card instances.
///
/// ## Example
///
/// ```
/// use zktt::cards::{Catalog, Color};
///
/// let catalog = Catalog::builder()
///     .blockchain("Bitcoin", Color::Gold, 1, 1)
///     .blockchain("Dogecoin", Color::Gold, 1, 1)
///     .asset(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(catalog.len(), 3);
/// assert_eq!(catalog.set_size(Color::Gold), 2);
/// assert_eq!(catalog.set_size(Color::Red), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Catalog {
    cards: Vec<Card>,
    set_sizes: FxHashMap<Color, usize>,
}

impl Catalog {
    /// Build a catalog from a list of cards.
    ///
    /// Blockchain names and non-blockchain indices must be unique.
    pub fn new(cards: Vec<Card>) -> Result<Self, ConfigError> {
        let mut seen = FxHashSet::default();

        for card in &cards {
            if !seen.insert(card.identity()) {
                return Err(ConfigError::InvalidValue {
                    field: "catalog",
                    reason: format!("duplicate card `{}`", card.label()),
                });
            }
        }

        let mut set_sizes = FxHashMap::default();
        for bc in cards.iter().filter_map(Card::as_blockchain) {
            *set_sizes.entry(bc.color).or_insert(0) += 1;
        }

        Ok(Self { cards, set_sizes })
    }

    /// Start building a custom catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The standard 87-card deck list.
    #[must_use]
    pub fn standard() -> Self {
        let mut builder = Catalog::builder();

        let chains: [(Color, u32, u32, &[&str]); 10] = [
            (Color::Blue, 3, 4, &["Ethereum", "Base"]),
            (Color::DarkBlue, 3, 4, &["Cardano", "Polkadot"]),
            (Color::Gold, 2, 1, &["Bitcoin", "Dogecoin"]),
            (Color::Green, 2, 4, &["Arbitrum", "Optimism", "Avalanche"]),
            (Color::Grey, 1, 2, &["Chainlink", "Celestia", "Cosmos", "Zcash"]),
            (Color::LightBlue, 1, 1, &["Tron", "Ton", "Stellar"]),
            (Color::Pink, 1, 2, &["Polygon", "Linea", "Scroll"]),
            (Color::Purple, 2, 2, &["Starknet", "zkSync", "Taiko"]),
            (Color::Red, 2, 3, &["Solana", "Aptos", "Sui"]),
            (Color::Yellow, 2, 3, &["BNB Chain", "Fantom", "Near"]),
        ];
        for (color, fee, value, names) in chains {
            for name in names {
                builder = builder.blockchain(name, color, fee, value);
            }
        }

        for (value, copies) in [(1, 6), (2, 5), (3, 3), (4, 3), (5, 2), (10, 1)] {
            for _ in 0..copies {
                builder = builder.asset(value);
            }
        }

        let fee_pairs = [
            (Color::Blue, Color::Green),
            (Color::DarkBlue, Color::Purple),
            (Color::Gold, Color::LightBlue),
            (Color::Pink, Color::Yellow),
            (Color::Grey, Color::Red),
            (Color::Blue, Color::Green),
            (Color::DarkBlue, Color::Purple),
            (Color::Gold, Color::LightBlue),
        ];
        for (a, b) in fee_pairs {
            builder = builder.gas_fee(GasFeeType::AgainstTwo(a, b), 1);
        }
        builder = builder.gas_fee(GasFeeType::Any, 3).gas_fee(GasFeeType::Any, 3);

        builder = builder.repeat(3, |b| b.chain_reorg(3));
        builder = builder.repeat(3, |b| b.claim_yield(2));
        builder = builder.repeat(2, |b| b.hard_fork(2));
        builder = builder.repeat(3, |b| b.mev_boost(3));
        builder = builder.repeat(2, |b| b.soft_fork(4));
        builder = builder.repeat(6, |b| b.priority_fee(1));
        builder = builder.repeat(2, |b| b.replay_attack(1));
        builder = builder.repeat(3, |b| b.front_run(3));
        builder = builder.repeat(2, |b| b.fifty_one_percent_attack(5));
        builder = builder.repeat(3, |b| b.sandwich_attack(3));

        builder.into_catalog()
    }

    /// All cards, in catalog order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Blockchains needed for a complete group of `color`.
    #[must_use]
    pub fn set_size(&self, color: Color) -> usize {
        self.set_sizes.get(&color).copied().unwrap_or(0)
    }

    /// Blockchains of one color.
    pub fn blockchains(&self, color: Color) -> impl Iterator<Item = &Blockchain> {
        self.cards
            .iter()
            .filter_map(Card::as_blockchain)
            .filter(move |bc| bc.color == color)
    }

    /// Catalog copy of a card, by identity.
    #[must_use]
    pub fn find(&self, card: &Card) -> Option<&Card> {
        self.cards.iter().find(|c| c.same_instance(card))
    }
}

impl TryFrom<Vec<Card>> for Catalog {
    type Error = ConfigError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Catalog::new(cards)
    }
}

impl From<Catalog> for Vec<Card> {
    fn from(catalog: Catalog) -> Self {
        catalog.cards
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

/// Builder assigning catalog indices in insertion order.
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    cards: Vec<Card>,
    next_index: u32,
}

impl CatalogBuilder {
    fn next(&mut self) -> u32 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    fn push(mut self, make: impl FnOnce(u32) -> Card) -> Self {
        let index = self.next();
        self.cards.push(make(index));
        self
    }

    /// Apply `add` `times` times.
    #[must_use]
    pub fn repeat(mut self, times: usize, add: impl Fn(Self) -> Self) -> Self {
        for _ in 0..times {
            self = add(self);
        }
        self
    }

    #[must_use]
    pub fn blockchain(mut self, name: &str, color: Color, fee: u32, value: u32) -> Self {
        self.cards.push(Card::Blockchain(Blockchain::new(name, color, fee, value)));
        self
    }

    #[must_use]
    pub fn asset(self, value: u32) -> Self {
        self.push(|index| {
            Card::Asset(Asset {
                name: "ETH".to_string(),
                value,
                index,
            })
        })
    }

    #[must_use]
    pub fn chain_reorg(self, value: u32) -> Self {
        self.push(|index| {
            Card::ChainReorg(ChainReorg {
                self_blockchain_name: None,
                opponent_blockchain_name: None,
                opponent: None,
                value,
                index,
            })
        })
    }

    #[must_use]
    pub fn claim_yield(self, value: u32) -> Self {
        self.push(|index| Card::ClaimYield(ClaimYield { value, index }))
    }

    #[must_use]
    pub fn gas_fee(self, fee_type: GasFeeType, value: u32) -> Self {
        self.push(|index| {
            Card::GasFee(GasFee {
                owner: None,
                players_affected: PlayerTarget::None,
                blockchain_type_affected: fee_type,
                set_applied: Vec::new(),
                value,
                index,
            })
        })
    }

    #[must_use]
    pub fn hard_fork(self, value: u32) -> Self {
        self.push(|index| {
            Card::HardFork(HardFork {
                owner: None,
                timestamp_used: 0,
                set: None,
                value,
                index,
            })
        })
    }

    #[must_use]
    pub fn mev_boost(self, value: u32) -> Self {
        self.push(|index| Card::MevBoost(MevBoost { set: None, value, index }))
    }

    #[must_use]
    pub fn soft_fork(self, value: u32) -> Self {
        self.push(|index| Card::SoftFork(SoftFork { set: None, value, index }))
    }

    #[must_use]
    pub fn priority_fee(self, value: u32) -> Self {
        self.push(|index| Card::PriorityFee(PriorityFee { value, index }))
    }

    #[must_use]
    pub fn replay_attack(self, value: u32) -> Self {
        self.push(|index| Card::ReplayAttack(ReplayAttack { owner: None, value, index }))
    }

    #[must_use]
    pub fn front_run(self, value: u32) -> Self {
        self.push(|index| {
            Card::FrontRun(FrontRun {
                player_targeted: None,
                blockchain_name: None,
                value,
                index,
            })
        })
    }

    #[must_use]
    pub fn fifty_one_percent_attack(self, value: u32) -> Self {
        self.push(|index| {
            Card::FiftyOnePercentAttack(FiftyOnePercentAttack {
                player_targeted: None,
                set: Vec::new(),
                value,
                index,
            })
        })
    }

    #[must_use]
    pub fn sandwich_attack(self, value: u32) -> Self {
        self.push(|index| {
            Card::SandwichAttack(SandwichAttack {
                player_targeted: None,
                value,
                index,
            })
        })
    }

    /// Cards added so far.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Validate and build the catalog.
    pub fn build(self) -> Result<Catalog, ConfigError> {
        Catalog::new(self.cards)
    }

    // Indices are assigned here, so only duplicate blockchain names can fail.
    fn into_catalog(self) -> Catalog {
        let mut set_sizes = FxHashMap::default();
        for bc in self.cards.iter().filter_map(Card::as_blockchain) {
            *set_sizes.entry(bc.color).or_insert(0) += 1;
        }
        Catalog {
            cards: self.cards,
            set_sizes,
        }
    }
}
