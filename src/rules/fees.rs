//! Fee engine: computing fees and settling debt.
//!
//! Payments never give change. Cards surrendered from a deck, and
//! blockchains from anywhere, land in the recipient's deck; everything else
//! lands in the recipient's deposit.

use rustc_hash::FxHashSet;

use crate::cards::{Card, Catalog, Color, GasFee};
use crate::core::{GameError, GameState, PlayerId};
use crate::effects::{Effect, EffectBatch};
use crate::ledger::Player;
use crate::zones::Zone;

/// Fee computation and debt settlement.
pub struct FeeEngine;

impl FeeEngine {
    /// Settle `payee`'s debt to `recipient` with the listed cards.
    ///
    /// ## Errors
    ///
    /// - `NotYourDebt` if nothing is owed to `recipient`
    /// - `DuplicatePayment` if a card is listed twice
    /// - `CardNotOwned` if a card is not in the payee's deposit, hand, or deck
    /// - `InsufficientPayment` if the cards are worth less than the debt
    pub fn pay(
        state: &GameState,
        payee: PlayerId,
        recipient: PlayerId,
        payload: &[Card],
    ) -> Result<EffectBatch, GameError> {
        let debtor = state.require_player(payee)?;
        let owed = debtor
            .debt
            .owed_to(recipient)
            .ok_or(GameError::NotYourDebt { payee, recipient })?;

        let mut seen = FxHashSet::default();
        let mut batch = EffectBatch::new();
        let mut offered = 0;

        for card in payload {
            if !seen.insert(card.identity()) {
                return Err(GameError::DuplicatePayment);
            }
            let (zone, owned) = debtor
                .locate(card)
                .ok_or_else(|| GameError::CardNotOwned(card.label()))?;
            offered += owned.value();
            batch.push(Self::transfer(owned, zone, recipient));
        }

        if offered < owed {
            return Err(GameError::InsufficientPayment { owed, offered });
        }

        batch.push(Effect::SettleDebt {
            debtor: payee,
            creditor: recipient,
        });
        Ok(batch)
    }

    /// Surrender everything payable to `recipient` and clear that debt.
    ///
    /// Only allowed when the payee cannot cover the debt; cards move in
    /// precedence order deposit, hand, deck.
    pub fn concede(
        state: &GameState,
        payee: PlayerId,
        recipient: PlayerId,
    ) -> Result<EffectBatch, GameError> {
        let debtor = state.require_player(payee)?;
        let owed = debtor
            .debt
            .owed_to(recipient)
            .ok_or(GameError::NotYourDebt { payee, recipient })?;

        if debtor.payable_value() >= owed {
            return Err(GameError::SolventDebtor(payee));
        }

        let mut batch: EffectBatch = debtor
            .payable_cards()
            .map(|(zone, card)| Self::transfer(card, zone, recipient))
            .collect();
        batch.push(Effect::SettleDebt {
            debtor: payee,
            creditor: recipient,
        });
        Ok(batch)
    }

    /// Oldest deposit cards covering `amount`, without change.
    pub fn select_from_deposit(player: &Player, amount: u32) -> Result<Vec<Card>, GameError> {
        let mut selected = Vec::new();
        let mut total = 0;

        for card in player.deposit.iter() {
            if total >= amount {
                break;
            }
            total += card.value();
            selected.push(card.clone());
        }

        if total < amount {
            return Err(GameError::InsufficientFunds {
                needed: amount,
                available: total,
            });
        }
        Ok(selected)
    }

    /// Amount a gas fee charges each affected player.
    ///
    /// Card value plus, for every color listed in `set_applied`, the group's
    /// total fee value when complete or the listed blockchains' fees otherwise.
    ///
    /// ## Errors
    ///
    /// - `TargetNotFound` if a listed blockchain is not in the actor's deck
    /// - `InvalidTarget` if a listed blockchain is listed twice or has a color
    ///   the card cannot charge
    pub fn gas_fee_amount(actor: &Player, catalog: &Catalog, fee: &GasFee) -> Result<u32, GameError> {
        let mut seen = FxHashSet::default();
        let mut listed: Vec<(Color, u32)> = Vec::with_capacity(fee.set_applied.len());

        for requested in &fee.set_applied {
            if !seen.insert(requested.name.as_str()) {
                return Err(GameError::InvalidTarget(format!(
                    "{} listed twice",
                    requested.name
                )));
            }
            let owned = actor
                .deck
                .iter()
                .filter_map(Card::as_blockchain)
                .find(|bc| bc.name == requested.name)
                .ok_or_else(|| GameError::TargetNotFound(requested.name.clone()))?;
            if !fee.blockchain_type_affected.allows(owned.color) {
                return Err(GameError::InvalidTarget(format!(
                    "{} is {:?}, not chargeable by this gas fee",
                    owned.name, owned.color
                )));
            }
            listed.push((owned.color, owned.fee));
        }

        let mut amount = fee.value;
        for color in Color::ALL {
            let fees: Vec<u32> = listed
                .iter()
                .filter(|(c, _)| *c == color)
                .map(|(_, f)| *f)
                .collect();
            if fees.is_empty() {
                continue;
            }
            let group = actor.group(color, catalog);
            amount += if group.is_complete() {
                group.total_fee_value()
            } else {
                fees.iter().sum()
            };
        }
        Ok(amount)
    }

    fn transfer(card: &Card, from: Zone, recipient: PlayerId) -> Effect {
        let to = match (from, card) {
            (Zone::Deck(_), _) | (_, Card::Blockchain(_)) => Zone::Deck(recipient),
            _ => Zone::Deposit(recipient),
        };
        Effect::move_card(card.clone(), from, to)
    }
}
