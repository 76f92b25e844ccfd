//! Game state of one table.
//!
//! ## GamePhase
//!
//! `WaitingForPlayers → Started ⇄ WaitingForRent → Ended`. The phase is
//! `WaitingForRent` exactly while some player carries debt.
//!
//! ## GameState
//!
//! Everything a table needs to continue a match:
//! - Phase, turn counter, active seat
//! - Players in join order, with their collections
//! - Dealer piles and the RNG stream that shuffles them
//! - Accepted action history
//!
//! Uses `im` persistent data structures so a table can try an operation on a
//! clone and keep the original on rejection.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::error::GameError;
use super::player::PlayerId;
use super::rng::GameRng;
use crate::cards::Card;
use crate::ledger::Player;
use crate::rules::GameResult;
use crate::zones::Dealer;

/// Lifecycle phase of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Seats are open; players join and flag readiness.
    WaitingForPlayers,
    /// Play in progress, nobody owes anything.
    Started,
    /// Play in progress, at least one player is in debt.
    WaitingForRent,
    /// Scored and closed.
    Ended,
}

impl GamePhase {
    /// Whether cards are in play (started, with or without debt).
    #[must_use]
    pub fn is_in_play(self) -> bool {
        matches!(self, GamePhase::Started | GamePhase::WaitingForRent)
    }
}

/// Complete state of one table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase.
    pub phase: GamePhase,

    /// Players in join order.
    pub players: Vector<Player>,

    /// Seat index of the active player.
    pub active: usize,

    /// Turn number (0 before the start, 1 for the first turn).
    pub turn_number: u32,

    /// Accepted actions so far; next record's sequence number.
    pub action_sequence: u32,

    /// Shared draw and discard piles.
    pub dealer: Dealer,

    /// Shuffle stream.
    pub rng: GameRng,

    /// Accepted actions, oldest first.
    pub history: Vector<ActionRecord>,

    /// Set once the game has ended.
    pub result: Option<GameResult>,
}

impl GameState {
    /// Create an empty table state waiting for players.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::WaitingForPlayers,
            players: Vector::new(),
            active: 0,
            turn_number: 0,
            action_sequence: 0,
            dealer: Dealer::new(),
            rng: GameRng::new(seed),
            history: Vector::new(),
            result: None,
        }
    }

    /// Seed the table was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    // === Players ===

    /// Number of seated players, active or not.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat index of a player.
    #[must_use]
    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.owner == id)
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.owner == id)
    }

    /// Look up a player, rejecting unknown ids.
    pub fn require_player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.player(id).ok_or(GameError::NotJoined(id))
    }

    /// Mutable player lookup, rejecting unknown ids.
    pub fn require_player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        let seat = self.seat_of(id).ok_or(GameError::NotJoined(id))?;
        self.players.get_mut(seat).ok_or(GameError::NotJoined(id))
    }

    /// Players still in the game, in join order.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    /// Number of players still in the game.
    #[must_use]
    pub fn active_player_count(&self) -> usize {
        self.active_players().count()
    }

    /// Player whose turn it is, while cards are in play.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        if !self.phase.is_in_play() {
            return None;
        }
        self.players.get(self.active).map(|p| p.owner)
    }

    /// Next active seat after `from`, wrapping around; `None` if nobody is active.
    #[must_use]
    pub fn next_active_seat(&self, from: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|step| (from + step) % n)
            .find(|&seat| self.players.get(seat).is_some_and(Player::is_active))
    }

    // === Phase ===

    /// Whether the game has ended.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// Whether any player carries debt.
    #[must_use]
    pub fn any_debt(&self) -> bool {
        self.players.iter().any(Player::in_debt)
    }

    /// Align the phase with outstanding debts while cards are in play.
    pub fn refresh_phase(&mut self) {
        if self.phase.is_in_play() {
            self.phase = if self.any_debt() {
                GamePhase::WaitingForRent
            } else {
                GamePhase::Started
            };
        }
    }

    // === Cards ===

    /// Cards held across every collection of the table.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.dealer.len() + self.players.iter().map(Player::card_count).sum::<usize>()
    }

    /// Every card on the table: draw pile, discard pile, then each player's
    /// hand, deck, and deposit in seat order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.dealer
            .draw_pile()
            .iter()
            .chain(self.dealer.discard_pile().iter())
            .chain(
                self.players
                    .iter()
                    .flat_map(|p| p.hand.iter().chain(p.deck.iter()).chain(p.deposit.iter())),
            )
    }

    // === History ===

    /// Append an accepted action to history.
    pub fn record_action(&mut self, record: ActionRecord) {
        self.history.push_back(record);
        self.action_sequence += 1;
    }
}
