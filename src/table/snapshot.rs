//! Binary snapshots of a table.
//!
//! Snapshots are `bincode` encodings of the full table: config, catalog, and
//! state (including the RNG position and history). Decoding re-checks the
//! table invariants before handing the table back.

use serde::{Deserialize, Serialize};

use super::{Table, TableId};
use crate::cards::Catalog;
use crate::core::{GameConfig, GameState, IntegrityError};
use crate::rules::TurnController;

/// Serializable image of a table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub id: TableId,
    pub config: GameConfig,
    pub catalog: Catalog,
    pub state: GameState,
}

impl TableSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode with bincode. The result is not yet integrity-checked.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IntegrityError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Turn the snapshot back into a table, checking its invariants.
    pub fn restore(self) -> Result<Table, IntegrityError> {
        self.config.validate()?;
        let table = Table {
            id: self.id,
            rules: TurnController::new(self.config.clone(), self.catalog),
            config: self.config,
            state: self.state,
        };
        table.check_integrity()?;
        Ok(table)
    }
}

impl Table {
    /// Capture the table.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            id: self.id,
            config: self.config.clone(),
            catalog: self.catalog().clone(),
            state: self.state.clone(),
        }
    }

    /// Decode and restore a table from snapshot bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Table, IntegrityError> {
        TableSnapshot::from_bytes(bytes)?.restore()
    }
}
