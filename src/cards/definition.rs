//! Card definitions.
//!
//! `Card` is a sum type with one payload per variant. Payloads carry two
//! kinds of fields:
//!
//! - **Static** fields fixed by the catalog (`value`, `index`, blockchain
//!   fees, the colors a gas fee applies to).
//! - **Target** fields chosen by the player when the card is played
//!   (`player_targeted`, `set`, `timestamp_used`, ...). Catalog copies leave
//!   them empty.
//!
//! When a card is played the engine finds the owned copy by identity
//! (`same_instance`) and merges only the target fields from the request
//! (`with_targets`), so a client can never inflate a card's value.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Blockchain colors. A complete color set forms an asset group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    DarkBlue,
    Gold,
    Green,
    Grey,
    LightBlue,
    Pink,
    Purple,
    Red,
    Yellow,
}

impl Color {
    /// Every color, in declaration order.
    pub const ALL: [Color; 10] = [
        Color::Blue,
        Color::DarkBlue,
        Color::Gold,
        Color::Green,
        Color::Grey,
        Color::LightBlue,
        Color::Pink,
        Color::Purple,
        Color::Red,
        Color::Yellow,
    ];
}

/// Which players a gas fee charges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerTarget {
    /// Every other active player.
    All,
    /// Nobody (catalog default; rejected on play).
    None,
    /// A single opponent.
    One(PlayerId),
}

/// Which of the actor's blockchains a gas fee may be charged against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GasFeeType {
    /// Any color.
    Any,
    /// Only the two named colors.
    AgainstTwo(Color, Color),
}

impl GasFeeType {
    /// Check whether a color may be charged by this fee type.
    #[must_use]
    pub fn allows(self, color: Color) -> bool {
        match self {
            GasFeeType::Any => true,
            GasFeeType::AgainstTwo(a, b) => color == a || color == b,
        }
    }
}

/// Plain value card, banked into a deposit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub value: u32,
    pub index: u32,
}

/// A capturable colored asset. Names are unique within a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blockchain {
    pub name: String,
    pub color: Color,
    /// Fee charged per blockchain when its owner plays a gas fee.
    pub fee: u32,
    /// Value when surrendered as payment.
    pub value: u32,
}

impl Blockchain {
    pub fn new(name: impl Into<String>, color: Color, fee: u32, value: u32) -> Self {
        Self {
            name: name.into(),
            color,
            fee,
            value,
        }
    }
}

/// Swap one of your blockchains for an opponent's blockchain of the same color.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainReorg {
    pub self_blockchain_name: Option<String>,
    pub opponent_blockchain_name: Option<String>,
    pub opponent: Option<PlayerId>,
    pub value: u32,
    pub index: u32,
}

/// Bank the card's value into the deposit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimYield {
    pub value: u32,
    pub index: u32,
}

/// Charge other players a fee for blockchains you own.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GasFee {
    /// Player who played the fee. Optional in a request; if set it must be
    /// the actor, who is always the creditor.
    pub owner: Option<PlayerId>,
    pub players_affected: PlayerTarget,
    /// Static: colors this card may charge against.
    pub blockchain_type_affected: GasFeeType,
    /// Actor-owned blockchains the fee is charged against.
    pub set_applied: Vec<Blockchain>,
    pub value: u32,
    pub index: u32,
}

/// Multiply the fee value of one of your complete groups.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HardFork {
    pub owner: Option<PlayerId>,
    pub timestamp_used: u64,
    pub set: Option<Color>,
    pub value: u32,
    pub index: u32,
}

/// Add to the fee value of one of your complete groups.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MevBoost {
    pub set: Option<Color>,
    pub value: u32,
    pub index: u32,
}

/// Add to the fee value of one of your complete groups.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoftFork {
    pub set: Option<Color>,
    pub value: u32,
    pub index: u32,
}

/// Pay from your deposit to skip this turn's draw.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriorityFee {
    pub value: u32,
    pub index: u32,
}

/// Charge a player the gas fee they were charged earlier this turn again.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplayAttack {
    pub owner: Option<PlayerId>,
    pub value: u32,
    pub index: u32,
}

/// Take a single blockchain from an opponent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrontRun {
    pub player_targeted: Option<PlayerId>,
    pub blockchain_name: Option<String>,
    pub value: u32,
    pub index: u32,
}

/// Take an opponent's complete asset group.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiftyOnePercentAttack {
    pub player_targeted: Option<PlayerId>,
    pub set: Vec<Blockchain>,
    pub value: u32,
    pub index: u32,
}

/// Make an opponent owe you the card's value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SandwichAttack {
    pub player_targeted: Option<PlayerId>,
    pub value: u32,
    pub index: u32,
}

/// Payload-free discriminant of `Card`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Asset,
    Blockchain,
    ChainReorg,
    ClaimYield,
    GasFee,
    HardFork,
    MevBoost,
    PriorityFee,
    ReplayAttack,
    SoftFork,
    FrontRun,
    FiftyOnePercentAttack,
    SandwichAttack,
}

/// Hashable identity of a physical card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardIdentity {
    /// Blockchains, by unique name.
    Named(String),
    /// Every other card, by variant and catalog index.
    Indexed(CardKind, u32),
}

/// A card instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Asset(Asset),
    Blockchain(Blockchain),
    ChainReorg(ChainReorg),
    ClaimYield(ClaimYield),
    GasFee(GasFee),
    HardFork(HardFork),
    MevBoost(MevBoost),
    PriorityFee(PriorityFee),
    ReplayAttack(ReplayAttack),
    SoftFork(SoftFork),
    FrontRun(FrontRun),
    FiftyOnePercentAttack(FiftyOnePercentAttack),
    SandwichAttack(SandwichAttack),
}

impl Card {
    /// Variant of this card.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Asset(_) => CardKind::Asset,
            Card::Blockchain(_) => CardKind::Blockchain,
            Card::ChainReorg(_) => CardKind::ChainReorg,
            Card::ClaimYield(_) => CardKind::ClaimYield,
            Card::GasFee(_) => CardKind::GasFee,
            Card::HardFork(_) => CardKind::HardFork,
            Card::MevBoost(_) => CardKind::MevBoost,
            Card::PriorityFee(_) => CardKind::PriorityFee,
            Card::ReplayAttack(_) => CardKind::ReplayAttack,
            Card::SoftFork(_) => CardKind::SoftFork,
            Card::FrontRun(_) => CardKind::FrontRun,
            Card::FiftyOnePercentAttack(_) => CardKind::FiftyOnePercentAttack,
            Card::SandwichAttack(_) => CardKind::SandwichAttack,
        }
    }

    /// Value of the card when banked or paid.
    #[must_use]
    pub fn value(&self) -> u32 {
        match self {
            Card::Asset(c) => c.value,
            Card::Blockchain(c) => c.value,
            Card::ChainReorg(c) => c.value,
            Card::ClaimYield(c) => c.value,
            Card::GasFee(c) => c.value,
            Card::HardFork(c) => c.value,
            Card::MevBoost(c) => c.value,
            Card::PriorityFee(c) => c.value,
            Card::ReplayAttack(c) => c.value,
            Card::SoftFork(c) => c.value,
            Card::FrontRun(c) => c.value,
            Card::FiftyOnePercentAttack(c) => c.value,
            Card::SandwichAttack(c) => c.value,
        }
    }

    /// Catalog index. Blockchains are identified by name instead.
    #[must_use]
    pub fn index(&self) -> Option<u32> {
        match self {
            Card::Asset(c) => Some(c.index),
            Card::Blockchain(_) => None,
            Card::ChainReorg(c) => Some(c.index),
            Card::ClaimYield(c) => Some(c.index),
            Card::GasFee(c) => Some(c.index),
            Card::HardFork(c) => Some(c.index),
            Card::MevBoost(c) => Some(c.index),
            Card::PriorityFee(c) => Some(c.index),
            Card::ReplayAttack(c) => Some(c.index),
            Card::SoftFork(c) => Some(c.index),
            Card::FrontRun(c) => Some(c.index),
            Card::FiftyOnePercentAttack(c) => Some(c.index),
            Card::SandwichAttack(c) => Some(c.index),
        }
    }

    /// Blockchain payload, if this is a blockchain.
    #[must_use]
    pub fn as_blockchain(&self) -> Option<&Blockchain> {
        match self {
            Card::Blockchain(bc) => Some(bc),
            _ => None,
        }
    }

    /// Color group this card is attached to when it sits in a deck.
    ///
    /// Blockchains belong to their color; played group modifiers belong to
    /// the color they targeted.
    #[must_use]
    pub fn group_color(&self) -> Option<Color> {
        match self {
            Card::Blockchain(bc) => Some(bc.color),
            Card::MevBoost(c) => c.set,
            Card::SoftFork(c) => c.set,
            Card::HardFork(c) => c.set,
            _ => None,
        }
    }

    /// Identity key of this card.
    #[must_use]
    pub fn identity(&self) -> CardIdentity {
        match self {
            Card::Blockchain(bc) => CardIdentity::Named(bc.name.clone()),
            other => CardIdentity::Indexed(other.kind(), other.index().unwrap_or_default()),
        }
    }

    /// Check whether two cards denote the same physical card.
    #[must_use]
    pub fn same_instance(&self, other: &Card) -> bool {
        match (self, other) {
            (Card::Blockchain(a), Card::Blockchain(b)) => a.name == b.name,
            _ => self.kind() == other.kind() && self.index() == other.index(),
        }
    }

    /// Copy of this (owned) card with the target fields taken from `request`.
    ///
    /// Static fields always come from `self`. If `request` is a different
    /// card, `self` is returned unchanged.
    #[must_use]
    pub fn with_targets(&self, request: &Card) -> Card {
        match (self, request) {
            (Card::ChainReorg(own), Card::ChainReorg(req)) => Card::ChainReorg(ChainReorg {
                self_blockchain_name: req.self_blockchain_name.clone(),
                opponent_blockchain_name: req.opponent_blockchain_name.clone(),
                opponent: req.opponent,
                ..own.clone()
            }),
            (Card::GasFee(own), Card::GasFee(req)) => Card::GasFee(GasFee {
                owner: req.owner,
                players_affected: req.players_affected,
                set_applied: req.set_applied.clone(),
                ..own.clone()
            }),
            (Card::HardFork(own), Card::HardFork(req)) => Card::HardFork(HardFork {
                owner: req.owner,
                timestamp_used: req.timestamp_used,
                set: req.set,
                ..own.clone()
            }),
            (Card::MevBoost(own), Card::MevBoost(req)) => Card::MevBoost(MevBoost {
                set: req.set,
                ..own.clone()
            }),
            (Card::SoftFork(own), Card::SoftFork(req)) => Card::SoftFork(SoftFork {
                set: req.set,
                ..own.clone()
            }),
            (Card::ReplayAttack(own), Card::ReplayAttack(req)) => {
                Card::ReplayAttack(ReplayAttack {
                    owner: req.owner,
                    ..own.clone()
                })
            }
            (Card::FrontRun(own), Card::FrontRun(req)) => Card::FrontRun(FrontRun {
                player_targeted: req.player_targeted,
                blockchain_name: req.blockchain_name.clone(),
                ..own.clone()
            }),
            (Card::FiftyOnePercentAttack(own), Card::FiftyOnePercentAttack(req)) => {
                Card::FiftyOnePercentAttack(FiftyOnePercentAttack {
                    player_targeted: req.player_targeted,
                    set: req.set.clone(),
                    ..own.clone()
                })
            }
            (Card::SandwichAttack(own), Card::SandwichAttack(req)) => {
                Card::SandwichAttack(SandwichAttack {
                    player_targeted: req.player_targeted,
                    ..own.clone()
                })
            }
            _ => self.clone(),
        }
    }

    /// Catalog form of this card: every target field reset.
    #[must_use]
    pub fn cleared(&self) -> Card {
        match self {
            Card::ChainReorg(c) => Card::ChainReorg(ChainReorg {
                self_blockchain_name: None,
                opponent_blockchain_name: None,
                opponent: None,
                ..c.clone()
            }),
            Card::GasFee(c) => Card::GasFee(GasFee {
                owner: None,
                players_affected: PlayerTarget::None,
                set_applied: Vec::new(),
                ..c.clone()
            }),
            Card::HardFork(c) => Card::HardFork(HardFork {
                owner: None,
                timestamp_used: 0,
                set: None,
                ..c.clone()
            }),
            Card::MevBoost(c) => Card::MevBoost(MevBoost { set: None, ..c.clone() }),
            Card::SoftFork(c) => Card::SoftFork(SoftFork { set: None, ..c.clone() }),
            Card::ReplayAttack(c) => Card::ReplayAttack(ReplayAttack { owner: None, ..c.clone() }),
            Card::FrontRun(c) => Card::FrontRun(FrontRun {
                player_targeted: None,
                blockchain_name: None,
                ..c.clone()
            }),
            Card::FiftyOnePercentAttack(c) => {
                Card::FiftyOnePercentAttack(FiftyOnePercentAttack {
                    player_targeted: None,
                    set: Vec::new(),
                    ..c.clone()
                })
            }
            Card::SandwichAttack(c) => Card::SandwichAttack(SandwichAttack {
                player_targeted: None,
                ..c.clone()
            }),
            Card::Asset(_) | Card::Blockchain(_) | Card::ClaimYield(_) | Card::PriorityFee(_) => {
                self.clone()
            }
        }
    }

    /// Short human-readable label for logs and errors.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Card::Asset(a) => format!("{}#{}", a.name, a.index),
            Card::Blockchain(bc) => bc.name.clone(),
            other => format!("{:?}#{}", other.kind(), other.index().unwrap_or_default()),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
