//! Card system: definitions, the catalog, and derived asset groups.
//!
//! ## Key Types
//!
//! - `Card`: One of thirteen variants, each with its own payload
//! - `Color`: Blockchain colors; a full color set is an asset group
//! - `Catalog`: The static list of cards a table plays with
//! - `AssetGroup`: A player's holdings of one color, derived from their deck

pub mod definition;
pub mod catalog;
pub mod group;

pub use definition::{
    Asset, Blockchain, Card, CardIdentity, CardKind, ChainReorg, ClaimYield, Color, FiftyOnePercentAttack,
    FrontRun, GasFee, GasFeeType, HardFork, MevBoost, PlayerTarget, PriorityFee, ReplayAttack,
    SandwichAttack, SoftFork,
};
pub use catalog::{Catalog, CatalogBuilder};
pub use group::AssetGroup;
