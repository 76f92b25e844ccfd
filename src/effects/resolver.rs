//! Effect resolution - executing effects on game state.
//!
//! The resolver is the only code that moves cards for card resolution and
//! fee settlement. It expects batches that the rules have already validated;
//! a failure here means the batch disagrees with the state, and the caller
//! discards the working copy.

use crate::cards::Card;
use crate::core::{GameError, GameState};
use crate::ledger::FeeRecord;
use crate::zones::{take_card, Zone};

use super::{Effect, EffectBatch};

/// Applies effects to game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve a batch in order, then align the phase with outstanding debt.
    pub fn resolve_batch(state: &mut GameState, batch: &EffectBatch) -> Result<(), GameError> {
        for effect in batch.iter() {
            Self::resolve_single(state, effect)?;
        }
        state.refresh_phase();
        Ok(())
    }

    /// Resolve a single effect.
    pub fn resolve_single(state: &mut GameState, effect: &Effect) -> Result<(), GameError> {
        match effect {
            Effect::MoveCard { card, from, to } => {
                Self::take(state, card, *from)?;
                Self::put(state, card.clone(), *to)
            }

            Effect::ImposeDebt {
                debtor,
                creditor,
                amount,
            } => {
                state.require_player_mut(*debtor)?.debt.add(*creditor, *amount);
                Ok(())
            }

            Effect::SettleDebt { debtor, creditor } => {
                state.require_player_mut(*debtor)?.debt.settle(*creditor);
                Ok(())
            }

            Effect::RecordFee {
                debtor,
                creditor,
                amount,
                turn,
            } => {
                state.require_player_mut(*debtor)?.last_fee = Some(FeeRecord {
                    creditor: *creditor,
                    amount: *amount,
                    turn: *turn,
                });
                Ok(())
            }

            Effect::ConsumeTimestamp { owner, timestamp } => {
                let player = state.require_player_mut(*owner)?;
                if player.used_timestamps.insert(*timestamp).is_some() {
                    return Err(GameError::DuplicateTimestamp(*timestamp));
                }
                Ok(())
            }

            Effect::MarkDrawn { player } => {
                state.require_player_mut(*player)?.has_drawn = true;
                Ok(())
            }
        }
    }

    fn take(state: &mut GameState, card: &Card, from: Zone) -> Result<Card, GameError> {
        let missing = || GameError::TargetNotFound(card.label());
        match from.owner() {
            Some(owner) => {
                let pile = state.require_player_mut(owner)?.pile_mut(from).ok_or_else(missing)?;
                take_card(pile, card).ok_or_else(missing)
            }
            None => state.dealer.take_from(from, card).ok_or_else(missing),
        }
    }

    fn put(state: &mut GameState, card: Card, to: Zone) -> Result<(), GameError> {
        match to {
            Zone::DiscardPile => state.dealer.discard(&card),
            Zone::DrawPile => state.dealer.push_draw(card.cleared()),
            _ => {
                let owner = to.owner().ok_or_else(|| GameError::TargetNotFound(card.label()))?;
                let label = card.label();
                state
                    .require_player_mut(owner)?
                    .pile_mut(to)
                    .ok_or(GameError::TargetNotFound(label))?
                    .push_back(card);
            }
        }
        Ok(())
    }
}
