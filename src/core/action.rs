//! Operations a player can submit to a table.
//!
//! An `Action` is the full request: the operation plus its arguments. The
//! calling player travels next to it (see `Table::submit`), never inside it,
//! so a request cannot claim to come from someone else.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::Card;

/// A player operation.
///
/// ## Example
///
/// ```
/// use zktt::core::Action;
///
/// let join = Action::Join { username: "alice".to_string() };
/// assert_eq!(join.name(), "join");
/// assert!(!join.spends_move());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Take a seat before the game starts.
    Join { username: String },

    /// Flag readiness before the game starts.
    SetReady { ready: bool },

    /// Leave the table. After the start the seat stays, marked inactive.
    Leave,

    /// Deal and begin play.
    Start,

    /// Draw for this turn; `draws_five` requires an empty hand.
    Draw { draws_five: bool },

    /// Play a card from hand for its effect.
    Play { card: Card },

    /// Place a card from hand without its effect.
    Move { card: Card },

    /// Settle the payee's debt to `recipient` with the listed cards.
    PayFee {
        payload: Vec<Card>,
        recipient: PlayerId,
        payee: PlayerId,
    },

    /// Surrender everything payable to `recipient` when it cannot cover the debt.
    ConcedeFee { recipient: PlayerId },

    /// Pass the turn to the next active player.
    EndTurn,

    /// Score the game and close it.
    End,
}

impl Action {
    /// Operation name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Join { .. } => "join",
            Action::SetReady { .. } => "set_ready",
            Action::Leave => "leave",
            Action::Start => "start",
            Action::Draw { .. } => "draw",
            Action::Play { .. } => "play",
            Action::Move { .. } => "move",
            Action::PayFee { .. } => "pay_fee",
            Action::ConcedeFee { .. } => "concede_fee",
            Action::EndTurn => "end_turn",
            Action::End => "end",
        }
    }

    /// Whether a successful application consumes one of the turn's moves.
    #[must_use]
    pub fn spends_move(&self) -> bool {
        matches!(self, Action::Play { .. } | Action::Move { .. })
    }

    /// Whether an indebted player may still submit this action.
    #[must_use]
    pub fn allowed_in_debt(&self) -> bool {
        matches!(self, Action::PayFee { .. } | Action::ConcedeFee { .. })
    }
}

/// An accepted action, as kept in the table history.
///
/// Replaying the records of a table in order on a fresh table with the
/// same seed, config, and catalog reproduces its state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken (0 before the start).
    pub turn: u32,

    /// Position in the table history.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
