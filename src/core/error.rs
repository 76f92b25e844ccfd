//! Rejection reasons and integrity failures.
//!
//! Every operation on a table either commits completely or returns a
//! `GameError` and leaves the table untouched. Errors are grouped by
//! `ErrorKind` so callers can react to a class of failure (for example,
//! retry after the turn changes) without matching every variant.
//!
//! `IntegrityError` is different: it is raised only when persisted state or
//! a replayed log cannot be trusted, and the table is not constructed.

use thiserror::Error;

use super::player::PlayerId;
use super::state::GamePhase;

/// Class of a rejected operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input shape (missing targets, empty usernames, ...).
    Validation,
    /// Wrong player, wrong phase, or a blocked player.
    TurnViolation,
    /// Insufficient funds, cards, or targets.
    Resource,
    /// Duplicate timestamp, incomplete group.
    StateConflict,
    /// Draw and discard piles are both empty.
    Exhaustion,
}

/// Why an operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    // === Validation ===
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("card is missing its `{0}` target")]
    MissingTarget(&'static str),

    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("a five-card draw requires an empty hand")]
    HandNotEmpty,

    #[error("payment lists the same card twice")]
    DuplicatePayment,

    #[error("player {0} can cover the debt and must pay it with pay_fee")]
    SolventDebtor(PlayerId),

    // === Turn violations ===
    #[error("operation not allowed while the game is {0:?}")]
    WrongPhase(GamePhase),

    #[error("the game has ended")]
    GameEnded,

    #[error("player {0} has not joined this table")]
    NotJoined(PlayerId),

    #[error("player {0} has already joined this table")]
    AlreadyJoined(PlayerId),

    #[error("player {0} has left the game")]
    PlayerInactive(PlayerId),

    #[error("table is full ({0} seats)")]
    TableFull(usize),

    #[error("need at least {needed} players, have {have}")]
    NotEnoughPlayers { needed: usize, have: usize },

    #[error("player {0} is not ready")]
    NotReady(PlayerId),

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("player must draw before ending the turn")]
    MustDrawFirst,

    #[error("player has already drawn this turn")]
    AlreadyDrawn,

    #[error("no moves remaining this turn")]
    NoMovesRemaining,

    #[error("player {0} must settle outstanding debt first")]
    InDebt(PlayerId),

    // === Resources ===
    #[error("card `{0}` is not in the player's hand")]
    CardNotInHand(String),

    #[error("card `{0}` is not owned by the paying player")]
    CardNotOwned(String),

    #[error("target not found: {0}")]
    TargetNotFound(String),

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },

    #[error("insufficient payment: owed {owed}, offered {offered}")]
    InsufficientPayment { owed: u32, offered: u32 },

    #[error("player {payee} owes nothing to {recipient}")]
    NotYourDebt { payee: PlayerId, recipient: PlayerId },

    #[error("player {0} has no gas fee to replay this turn")]
    NothingToReplay(PlayerId),

    // === State conflicts ===
    #[error("asset group is incomplete")]
    GroupIncomplete,

    #[error("timestamp {0} has already been used")]
    DuplicateTimestamp(u64),

    // === Exhaustion ===
    #[error("no cards left in the draw or discard pile")]
    NoCardsAvailable,
}

impl GameError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::EmptyUsername
            | GameError::MissingTarget(_)
            | GameError::InvalidTarget(_)
            | GameError::HandNotEmpty
            | GameError::DuplicatePayment
            | GameError::SolventDebtor(_) => ErrorKind::Validation,

            GameError::WrongPhase(_)
            | GameError::GameEnded
            | GameError::NotJoined(_)
            | GameError::AlreadyJoined(_)
            | GameError::PlayerInactive(_)
            | GameError::TableFull(_)
            | GameError::NotEnoughPlayers { .. }
            | GameError::NotReady(_)
            | GameError::NotYourTurn(_)
            | GameError::MustDrawFirst
            | GameError::AlreadyDrawn
            | GameError::NoMovesRemaining
            | GameError::InDebt(_) => ErrorKind::TurnViolation,

            GameError::CardNotInHand(_)
            | GameError::CardNotOwned(_)
            | GameError::TargetNotFound(_)
            | GameError::InsufficientFunds { .. }
            | GameError::InsufficientPayment { .. }
            | GameError::NotYourDebt { .. }
            | GameError::NothingToReplay(_) => ErrorKind::Resource,

            GameError::GroupIncomplete | GameError::DuplicateTimestamp(_) => {
                ErrorKind::StateConflict
            }

            GameError::NoCardsAvailable => ErrorKind::Exhaustion,
        }
    }
}

/// Persisted state or a replay log that cannot be trusted.
#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] bincode::Error),

    #[error("card count mismatch: catalog has {expected}, collections hold {found}")]
    CardCount { expected: usize, found: usize },

    #[error("card {card} is held {found} times, catalog has {expected}")]
    CardMismatch { card: String, expected: usize, found: usize },

    #[error("active player index {index} out of range for {players} players")]
    ActivePlayer { index: usize, players: usize },

    #[error("player {player} has {moves} moves, budget is {budget}")]
    MoveBudget { player: PlayerId, moves: u32, budget: u32 },

    #[error("invalid table config: {0}")]
    Config(#[from] super::config::ConfigError),

    #[error("replay rejected record #{sequence}: {source}")]
    Replay {
        sequence: usize,
        #[source]
        source: GameError,
    },
}
