//! Concurrent table registry.
//!
//! Tables are independent, so the registry shards them in a `DashMap` and
//! guards each one with its own mutex. Operations on different tables run in
//! parallel; operations on the same table are serialized.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use thiserror::Error;
use tracing::{info, warn};

use super::{Table, TableId};
use crate::cards::{Card, Catalog};
use crate::core::{Action, ConfigError, GameConfig, GameError, PlayerId};

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("unknown table {0}")]
    UnknownTable(TableId),

    #[error(transparent)]
    Rejected(#[from] GameError),
}

/// Shared handle to one table.
pub type TableHandle = Arc<Mutex<Table>>;

/// All open tables of a process.
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: DashMap<TableId, TableHandle>,
    next_id: AtomicU64,
}

impl TableRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new table and return its id.
    pub fn create_table(&self, seed: u64, config: GameConfig, catalog: Catalog) -> Result<TableId, ConfigError> {
        let mut id = TableId(self.next_id.fetch_add(1, Ordering::Relaxed));
        while self.tables.contains_key(&id) {
            id = TableId(self.next_id.fetch_add(1, Ordering::Relaxed));
        }
        let table = Table::new(id, seed, config, catalog)?;
        self.tables.insert(id, Arc::new(Mutex::new(table)));
        Ok(id)
    }

    /// Register an existing table, e.g. one restored from a snapshot.
    ///
    /// Replaces any table already registered under the same id.
    pub fn insert(&self, table: Table) -> TableId {
        let id = table.id();
        self.next_id.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
        if self.tables.insert(id, Arc::new(Mutex::new(table))).is_some() {
            warn!(table = %id, "replaced existing table");
        }
        id
    }

    #[must_use]
    pub fn get(&self, id: TableId) -> Option<TableHandle> {
        self.tables.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Close a table.
    pub fn remove(&self, id: TableId) -> Option<TableHandle> {
        let removed = self.tables.remove(&id).map(|(_, table)| table);
        if removed.is_some() {
            info!(table = %id, "table removed");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Ids of every open table, in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self.tables.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Run `f` with exclusive access to a table.
    pub fn with_table<R>(&self, id: TableId, f: impl FnOnce(&mut Table) -> R) -> Result<R, TableError> {
        let handle = self.get(id).ok_or(TableError::UnknownTable(id))?;
        let mut table = lock(&handle);
        Ok(f(&mut table))
    }

    /// Submit an action to a table.
    pub fn submit(&self, id: TableId, player: PlayerId, action: Action) -> Result<(), TableError> {
        self.with_table(id, |table| table.submit(player, action))?
            .map_err(TableError::from)
    }

    // === Operations ===

    pub fn join(&self, id: TableId, player: PlayerId, username: impl Into<String>) -> Result<(), TableError> {
        self.submit(id, player, Action::Join { username: username.into() })
    }

    pub fn set_ready(&self, id: TableId, player: PlayerId, ready: bool) -> Result<(), TableError> {
        self.submit(id, player, Action::SetReady { ready })
    }

    pub fn leave(&self, id: TableId, player: PlayerId) -> Result<(), TableError> {
        self.submit(id, player, Action::Leave)
    }

    pub fn start(&self, id: TableId, player: PlayerId) -> Result<(), TableError> {
        self.submit(id, player, Action::Start)
    }

    pub fn draw(&self, id: TableId, player: PlayerId, draws_five: bool) -> Result<(), TableError> {
        self.submit(id, player, Action::Draw { draws_five })
    }

    pub fn play(&self, id: TableId, player: PlayerId, card: Card) -> Result<(), TableError> {
        self.submit(id, player, Action::Play { card })
    }

    pub fn move_card(&self, id: TableId, player: PlayerId, card: Card) -> Result<(), TableError> {
        self.submit(id, player, Action::Move { card })
    }

    pub fn pay_fee(
        &self,
        id: TableId,
        player: PlayerId,
        payload: Vec<Card>,
        recipient: PlayerId,
        payee: PlayerId,
    ) -> Result<(), TableError> {
        self.submit(id, player, Action::PayFee { payload, recipient, payee })
    }

    pub fn concede_fee(&self, id: TableId, player: PlayerId, recipient: PlayerId) -> Result<(), TableError> {
        self.submit(id, player, Action::ConcedeFee { recipient })
    }

    pub fn end_turn(&self, id: TableId, player: PlayerId) -> Result<(), TableError> {
        self.submit(id, player, Action::EndTurn)
    }

    pub fn end(&self, id: TableId, player: PlayerId) -> Result<(), TableError> {
        self.submit(id, player, Action::End)
    }
}

/// A panic inside one operation leaves the table at its last committed
/// state, so a poisoned lock is still usable.
fn lock(handle: &TableHandle) -> MutexGuard<'_, Table> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}
