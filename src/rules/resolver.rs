//! Action resolver: what playing or moving a card does.
//!
//! Each rule reads the state and either returns the `EffectBatch` that
//! carries the card out or rejects it. Nothing here mutates state.
//!
//! The card passed in is the actor's owned copy with the request's targets
//! merged in, and it is known to be in the actor's hand. Every batch starts
//! by moving it out of the hand.

use crate::cards::{
    Blockchain, Card, Catalog, ChainReorg, Color, FiftyOnePercentAttack, FrontRun, GasFee,
    HardFork, PlayerTarget, PriorityFee, ReplayAttack, SandwichAttack,
};
use crate::core::{GameError, GameState, PlayerId};
use crate::effects::{Effect, EffectBatch};
use crate::ledger::Player;
use crate::zones::Zone;

use super::fees::FeeEngine;

/// Per-card resolution rules.
pub struct ActionResolver;

impl ActionResolver {
    /// Effects of `actor` playing `card`.
    pub fn resolve(
        state: &GameState,
        catalog: &Catalog,
        actor: PlayerId,
        card: &Card,
    ) -> Result<EffectBatch, GameError> {
        let player = state.require_player(actor)?;
        let hand = Zone::Hand(actor);

        match card {
            Card::Asset(_) | Card::ClaimYield(_) => {
                Ok(EffectBatch::new().with(Effect::move_card(card.clone(), hand, Zone::Deposit(actor))))
            }
            Card::Blockchain(_) => {
                Ok(EffectBatch::new().with(Effect::move_card(card.clone(), hand, Zone::Deck(actor))))
            }
            Card::ChainReorg(reorg) => Self::chain_reorg(state, actor, card, reorg),
            Card::GasFee(fee) => Self::gas_fee(state, catalog, player, card, fee),
            Card::HardFork(fork) => Self::hard_fork(catalog, player, card, fork),
            Card::MevBoost(boost) => Self::attach(catalog, player, card, boost.set),
            Card::SoftFork(fork) => Self::attach(catalog, player, card, fork.set),
            Card::PriorityFee(fee) => Self::priority_fee(player, card, fee),
            Card::ReplayAttack(replay) => Self::replay_attack(state, actor, card, replay),
            Card::FrontRun(front_run) => Self::front_run(state, actor, card, front_run),
            Card::SandwichAttack(sandwich) => Self::sandwich(state, actor, card, sandwich),
            Card::FiftyOnePercentAttack(attack) => {
                Self::fifty_one_percent(state, catalog, actor, card, attack)
            }
        }
    }

    /// Effects of `actor` moving `card` without its effect: blockchains to
    /// the deck, everything else banked into the deposit.
    #[must_use]
    pub fn relocate(actor: PlayerId, card: &Card) -> EffectBatch {
        let to = match card {
            Card::Blockchain(_) => Zone::Deck(actor),
            _ => Zone::Deposit(actor),
        };
        EffectBatch::new().with(Effect::move_card(card.clone(), Zone::Hand(actor), to))
    }

    // === Rules ===

    /// Swap the actor's named blockchain with an opponent's of the same
    /// color. Modifiers stay with their decks.
    fn chain_reorg(
        state: &GameState,
        actor: PlayerId,
        card: &Card,
        reorg: &ChainReorg,
    ) -> Result<EffectBatch, GameError> {
        let own_name = reorg
            .self_blockchain_name
            .as_deref()
            .ok_or(GameError::MissingTarget("self_blockchain_name"))?;
        let their_name = reorg
            .opponent_blockchain_name
            .as_deref()
            .ok_or(GameError::MissingTarget("opponent_blockchain_name"))?;
        let opponent = reorg.opponent.ok_or(GameError::MissingTarget("opponent"))?;
        let target = Self::opponent(state, actor, opponent)?;

        let mine = Self::blockchain_in_deck(state.require_player(actor)?, own_name)?;
        let theirs = Self::blockchain_in_deck(target, their_name)?;
        if mine.color != theirs.color {
            return Err(GameError::InvalidTarget(format!(
                "{} is {:?} but {} is {:?}",
                mine.name, mine.color, theirs.name, theirs.color
            )));
        }

        Ok(Self::discard(actor, card)
            .with(Effect::move_card(
                Card::Blockchain(mine.clone()),
                Zone::Deck(actor),
                Zone::Deck(opponent),
            ))
            .with(Effect::move_card(
                Card::Blockchain(theirs.clone()),
                Zone::Deck(opponent),
                Zone::Deck(actor),
            )))
    }

    /// Charge each affected opponent the card value plus the listed colors'
    /// fees, owed to the actor. Records the fee for a later replay attack.
    fn gas_fee(
        state: &GameState,
        catalog: &Catalog,
        player: &Player,
        card: &Card,
        fee: &GasFee,
    ) -> Result<EffectBatch, GameError> {
        let actor = player.owner;
        if let Some(owner) = fee.owner.filter(|&owner| owner != actor) {
            return Err(GameError::InvalidTarget(format!(
                "gas fee owner {owner} is not the player"
            )));
        }
        let affected: Vec<PlayerId> = match fee.players_affected {
            PlayerTarget::None => {
                return Err(GameError::InvalidTarget("gas fee targets nobody".to_string()))
            }
            PlayerTarget::All => state
                .active_players()
                .map(|p| p.owner)
                .filter(|&p| p != actor)
                .collect(),
            PlayerTarget::One(target) => vec![Self::opponent(state, actor, target)?.owner],
        };
        let amount = FeeEngine::gas_fee_amount(player, catalog, fee)?;

        let mut batch = Self::discard(actor, card);
        for debtor in affected {
            batch.push(Effect::debt(debtor, actor, amount));
            batch.push(Effect::RecordFee {
                debtor,
                creditor: actor,
                amount,
                turn: state.turn_number,
            });
        }
        Ok(batch)
    }

    /// Attach to the actor's complete group, multiplying its fee value.
    /// Each timestamp works once per owner.
    fn hard_fork(
        catalog: &Catalog,
        player: &Player,
        card: &Card,
        fork: &HardFork,
    ) -> Result<EffectBatch, GameError> {
        let owner = fork.owner.ok_or(GameError::MissingTarget("owner"))?;
        if owner != player.owner {
            return Err(GameError::InvalidTarget(format!(
                "hard fork owner {owner} is not the player"
            )));
        }
        if player.used_timestamps.contains(&fork.timestamp_used) {
            return Err(GameError::DuplicateTimestamp(fork.timestamp_used));
        }

        let batch = Self::attach(catalog, player, card, fork.set)?;
        Ok(batch.with(Effect::ConsumeTimestamp {
            owner,
            timestamp: fork.timestamp_used,
        }))
    }

    /// Attach a group modifier to one of the actor's complete groups.
    fn attach(
        catalog: &Catalog,
        player: &Player,
        card: &Card,
        set: Option<Color>,
    ) -> Result<EffectBatch, GameError> {
        let color = set.ok_or(GameError::MissingTarget("set"))?;
        if !player.group(color, catalog).is_complete() {
            return Err(GameError::GroupIncomplete);
        }
        Ok(EffectBatch::new().with(Effect::move_card(
            card.clone(),
            Zone::Hand(player.owner),
            Zone::Deck(player.owner),
        )))
    }

    /// Pay the card value from the deposit, oldest cards first, into the
    /// discard pile. Counts as the turn's draw.
    fn priority_fee(player: &Player, card: &Card, fee: &PriorityFee) -> Result<EffectBatch, GameError> {
        if player.has_drawn {
            return Err(GameError::AlreadyDrawn);
        }
        let actor = player.owner;
        let payment = FeeEngine::select_from_deposit(player, fee.value)?;

        let mut batch = Self::discard(actor, card);
        batch.extend(
            payment
                .into_iter()
                .map(|paid| Effect::move_card(paid, Zone::Deposit(actor), Zone::DiscardPile)),
        );
        batch.push(Effect::MarkDrawn { player: actor });
        Ok(batch)
    }

    /// Impose the named player's gas fee from this turn again, if the actor
    /// collected it.
    fn replay_attack(
        state: &GameState,
        actor: PlayerId,
        card: &Card,
        replay: &ReplayAttack,
    ) -> Result<EffectBatch, GameError> {
        let owner = replay.owner.ok_or(GameError::MissingTarget("owner"))?;
        let target = Self::opponent(state, actor, owner)?;

        let record = target
            .last_fee
            .filter(|r| r.creditor == actor && r.turn == state.turn_number)
            .ok_or(GameError::NothingToReplay(owner))?;

        Ok(Self::discard(actor, card).with(Effect::debt(owner, actor, record.amount)))
    }

    /// Take one named blockchain from the target's deck.
    fn front_run(
        state: &GameState,
        actor: PlayerId,
        card: &Card,
        front_run: &FrontRun,
    ) -> Result<EffectBatch, GameError> {
        let victim = front_run
            .player_targeted
            .ok_or(GameError::MissingTarget("player_targeted"))?;
        let name = front_run
            .blockchain_name
            .as_deref()
            .ok_or(GameError::MissingTarget("blockchain_name"))?;
        let target = Self::opponent(state, actor, victim)?;
        let chain = Self::blockchain_in_deck(target, name)?;

        Ok(Self::discard(actor, card).with(Effect::move_card(
            Card::Blockchain(chain.clone()),
            Zone::Deck(victim),
            Zone::Deck(actor),
        )))
    }

    /// The target owes the actor the card value. They must hold something
    /// they could pay with.
    fn sandwich(
        state: &GameState,
        actor: PlayerId,
        card: &Card,
        sandwich: &SandwichAttack,
    ) -> Result<EffectBatch, GameError> {
        let victim = sandwich
            .player_targeted
            .ok_or(GameError::MissingTarget("player_targeted"))?;
        let target = Self::opponent(state, actor, victim)?;
        if target.payable_value() == 0 {
            return Err(GameError::TargetNotFound(format!("{victim} holds nothing payable")));
        }

        Ok(Self::discard(actor, card).with(Effect::debt(victim, actor, sandwich.value)))
    }

    /// Take a complete group from the target, modifiers included.
    fn fifty_one_percent(
        state: &GameState,
        catalog: &Catalog,
        actor: PlayerId,
        card: &Card,
        attack: &FiftyOnePercentAttack,
    ) -> Result<EffectBatch, GameError> {
        let victim = attack
            .player_targeted
            .ok_or(GameError::MissingTarget("player_targeted"))?;
        let first = attack.set.first().ok_or(GameError::MissingTarget("set"))?;
        let target = Self::opponent(state, actor, victim)?;

        let color = Self::catalog_color(catalog, first)?;
        for named in &attack.set[1..] {
            if Self::catalog_color(catalog, named)? != color {
                return Err(GameError::InvalidTarget(
                    "51% attack set spans several colors".to_string(),
                ));
            }
        }

        let group = target.group(color, catalog);
        if !group.is_complete() {
            return Err(GameError::GroupIncomplete);
        }
        if !group.matches_composition(&attack.set) {
            return Err(GameError::InvalidTarget(format!(
                "set does not match {victim}'s {color:?} group"
            )));
        }

        let mut batch = Self::discard(actor, card);
        batch.extend(
            group
                .cards()
                .into_iter()
                .map(|c| Effect::move_card(c, Zone::Deck(victim), Zone::Deck(actor))),
        );
        Ok(batch)
    }

    // === Helpers ===

    /// Batch moving the played card from hand to the discard pile.
    fn discard(actor: PlayerId, card: &Card) -> EffectBatch {
        EffectBatch::new().with(Effect::move_card(card.clone(), Zone::Hand(actor), Zone::DiscardPile))
    }

    /// Another active player at the table.
    fn opponent(state: &GameState, actor: PlayerId, target: PlayerId) -> Result<&Player, GameError> {
        if target == actor {
            return Err(GameError::InvalidTarget("cannot target yourself".to_string()));
        }
        let player = state
            .player(target)
            .ok_or_else(|| GameError::TargetNotFound(format!("player {target}")))?;
        if !player.is_active() {
            return Err(GameError::PlayerInactive(target));
        }
        Ok(player)
    }

    /// A blockchain by name in `player`'s deck.
    fn blockchain_in_deck<'a>(player: &'a Player, name: &str) -> Result<&'a Blockchain, GameError> {
        player
            .deck
            .iter()
            .filter_map(Card::as_blockchain)
            .find(|bc| bc.name == name)
            .ok_or_else(|| GameError::TargetNotFound(format!("{name} in {}'s deck", player.owner)))
    }

    /// Color of a requested blockchain, as the catalog records it.
    fn catalog_color(catalog: &Catalog, named: &Blockchain) -> Result<Color, GameError> {
        catalog
            .find(&Card::Blockchain(named.clone()))
            .and_then(Card::as_blockchain)
            .map(|bc| bc.color)
            .ok_or_else(|| GameError::TargetNotFound(named.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GamePhase;

    const A: PlayerId = PlayerId::new(1);
    const B: PlayerId = PlayerId::new(2);

    fn catalog() -> Catalog {
        Catalog::builder()
            .blockchain("Solana", Color::Red, 2, 3)
            .blockchain("Aptos", Color::Red, 2, 3)
            .blockchain("Bitcoin", Color::Gold, 1, 1)
            .asset(3)
            .mev_boost(3)
            .sandwich_attack(3)
            .build()
            .unwrap()
    }

    fn state() -> GameState {
        let mut state = GameState::new(1);
        state.players.push_back(Player::new(A, "a"));
        state.players.push_back(Player::new(B, "b"));
        state.phase = GamePhase::Started;
        state.turn_number = 1;
        state
    }

    #[test]
    fn test_asset_goes_to_deposit() {
        let catalog = catalog();
        let asset = catalog.cards()[3].clone();

        let batch = ActionResolver::resolve(&state(), &catalog, A, &asset).unwrap();
        assert_eq!(
            batch.into_iter().collect::<Vec<_>>(),
            vec![Effect::move_card(asset, Zone::Hand(A), Zone::Deposit(A))]
        );
    }

    #[test]
    fn test_relocate() {
        let catalog = catalog();
        let chain = catalog.cards()[0].clone();
        let boost = catalog.cards()[4].clone();

        assert!(matches!(
            ActionResolver::relocate(A, &chain).iter().next(),
            Some(Effect::MoveCard { to: Zone::Deck(_), .. })
        ));
        assert!(matches!(
            ActionResolver::relocate(A, &boost).iter().next(),
            Some(Effect::MoveCard { to: Zone::Deposit(_), .. })
        ));
    }

    #[test]
    fn test_boost_requires_complete_group() {
        let catalog = catalog();
        let mut state = state();
        state.require_player_mut(A).unwrap().deck.push_back(catalog.cards()[0].clone());

        let boost = Card::MevBoost(crate::cards::MevBoost { set: Some(Color::Red), value: 3, index: 1 });
        assert_eq!(
            ActionResolver::resolve(&state, &catalog, A, &boost),
            Err(GameError::GroupIncomplete)
        );

        let unset = Card::MevBoost(crate::cards::MevBoost { set: None, value: 3, index: 1 });
        assert_eq!(
            ActionResolver::resolve(&state, &catalog, A, &unset),
            Err(GameError::MissingTarget("set"))
        );
    }

    #[test]
    fn test_sandwich_needs_payable_target() {
        let catalog = catalog();
        let mut state = state();
        let sandwich = Card::SandwichAttack(SandwichAttack {
            player_targeted: Some(B),
            value: 3,
            index: 2,
        });

        assert!(matches!(
            ActionResolver::resolve(&state, &catalog, A, &sandwich),
            Err(GameError::TargetNotFound(_))
        ));

        state.require_player_mut(B).unwrap().deposit.push_back(catalog.cards()[3].clone());
        let batch = ActionResolver::resolve(&state, &catalog, A, &sandwich).unwrap();
        assert!(batch.iter().any(|e| *e == Effect::debt(B, A, 3)));
    }

    #[test]
    fn test_cannot_target_self() {
        let catalog = catalog();
        let sandwich = Card::SandwichAttack(SandwichAttack {
            player_targeted: Some(A),
            value: 3,
            index: 2,
        });

        assert!(matches!(
            ActionResolver::resolve(&state(), &catalog, A, &sandwich),
            Err(GameError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_front_run_moves_named_chain() {
        let catalog = catalog();
        let mut state = state();
        state.require_player_mut(B).unwrap().deck.push_back(catalog.cards()[2].clone());

        let card = Card::FrontRun(FrontRun {
            player_targeted: Some(B),
            blockchain_name: Some("Bitcoin".to_string()),
            value: 3,
            index: 9,
        });
        let batch = ActionResolver::resolve(&state, &catalog, A, &card).unwrap();
        assert!(batch.iter().any(|e| *e
            == Effect::move_card(catalog.cards()[2].clone(), Zone::Deck(B), Zone::Deck(A))));

        let missing = Card::FrontRun(FrontRun {
            player_targeted: Some(B),
            blockchain_name: Some("Solana".to_string()),
            value: 3,
            index: 9,
        });
        assert!(matches!(
            ActionResolver::resolve(&state, &catalog, A, &missing),
            Err(GameError::TargetNotFound(_))
        ));
    }
}
