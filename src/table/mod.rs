//! Tables: one match each.
//!
//! A `Table` owns its rules (config and catalog) and its `GameState`. Every
//! operation is applied to a clone of the state and committed only if the
//! rules accept it, so a rejected operation leaves the table untouched.
//! Accepted operations are appended to the history; replaying that history
//! on a fresh table with the same seed rebuilds the same state.

pub mod registry;
pub mod snapshot;

pub use registry::{TableError, TableRegistry};
pub use snapshot::TableSnapshot;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{CardIdentity, Catalog};
use crate::core::{
    Action, ActionRecord, ConfigError, GameConfig, GameError, GamePhase, GameState,
    IntegrityError, PlayerId,
};
use crate::rules::{GameResult, RulesEngine, TurnController};

/// Identifier of a table within a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableId(pub u64);

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table-{}", self.0)
    }
}

/// One match instance.
#[derive(Clone, Debug)]
pub struct Table {
    id: TableId,
    config: GameConfig,
    rules: TurnController,
    state: GameState,
}

impl Table {
    /// Open a table waiting for players.
    pub fn new(id: TableId, seed: u64, config: GameConfig, catalog: Catalog) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(table = %id, seed, cards = catalog.len(), "table created");
        Ok(Self {
            id,
            rules: TurnController::new(config.clone(), catalog),
            config,
            state: GameState::new(seed),
        })
    }

    /// Rebuild a table by replaying its history.
    ///
    /// ## Errors
    ///
    /// `IntegrityError::Replay` names the first record the rules reject.
    pub fn replay(
        id: TableId,
        seed: u64,
        config: GameConfig,
        catalog: Catalog,
        records: &[ActionRecord],
    ) -> Result<Self, IntegrityError> {
        let mut table = Table::new(id, seed, config, catalog)?;
        for (sequence, record) in records.iter().enumerate() {
            table
                .submit(record.player, record.action.clone())
                .map_err(|source| IntegrityError::Replay { sequence, source })?;
        }
        Ok(table)
    }

    /// Apply `action` on behalf of `player`, atomically.
    pub fn submit(&mut self, player: PlayerId, action: Action) -> Result<(), GameError> {
        let mut next = self.state.clone();
        let phase_before = next.phase;
        let turn = next.turn_number;

        if let Err(err) = self.rules.apply_action(&mut next, player, &action) {
            debug!(table = %self.id, player = %player, op = action.name(), error = %err, "action rejected");
            return Err(err);
        }

        debug!(table = %self.id, player = %player, op = action.name(), "action accepted");
        if next.phase != phase_before {
            info!(table = %self.id, from = ?phase_before, to = ?next.phase, "phase changed");
        }

        let record = ActionRecord::new(player, action, turn, next.action_sequence);
        next.record_action(record);
        self.state = next;
        Ok(())
    }

    /// Whether `submit` would accept `action` right now. Changes nothing.
    pub fn check(&self, player: PlayerId, action: &Action) -> Result<(), GameError> {
        self.rules.validate(&self.state, player, action)
    }

    /// Check the invariants a trusted table always satisfies.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        let state = &self.state;

        let expected = if state.phase == GamePhase::WaitingForPlayers {
            0
        } else {
            self.rules.catalog().len()
        };
        let found = state.card_count();
        if found != expected {
            return Err(IntegrityError::CardCount { expected, found });
        }
        if expected > 0 {
            self.check_conservation()?;
        }

        if state.phase.is_in_play()
            && !state.players.get(state.active).is_some_and(|p| p.is_active())
        {
            return Err(IntegrityError::ActivePlayer {
                index: state.active,
                players: state.player_count(),
            });
        }

        let budget = self.config.moves_per_turn;
        if let Some(p) = state.players.iter().find(|p| p.moves_remaining > budget) {
            return Err(IntegrityError::MoveBudget {
                player: p.owner,
                moves: p.moves_remaining,
                budget,
            });
        }
        Ok(())
    }

    /// Every catalog card sits in exactly one collection.
    fn check_conservation(&self) -> Result<(), IntegrityError> {
        let mut held: FxHashMap<CardIdentity, usize> = FxHashMap::default();
        for card in self.state.cards() {
            *held.entry(card.identity()).or_default() += 1;
        }
        let known: FxHashSet<CardIdentity> = self.catalog().iter().map(|c| c.identity()).collect();

        for card in self.state.cards() {
            let identity = card.identity();
            let found = held.get(&identity).copied().unwrap_or_default();
            let expected = usize::from(known.contains(&identity));
            if found != expected {
                return Err(IntegrityError::CardMismatch { card: card.label(), expected, found });
            }
        }
        if let Some(card) = self.catalog().iter().find(|c| !held.contains_key(&c.identity())) {
            return Err(IntegrityError::CardMismatch { card: card.label(), expected: 1, found: 0 });
        }
        Ok(())
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> TableId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.rules.catalog()
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<ActionRecord> {
        self.state.history.iter().cloned().collect()
    }

    /// Final result, once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.state)
    }
}
