//! Turn controller: the table's state machine.
//!
//! Sequences the dealer, the ledger, the action resolver, and the fee engine
//! for every operation, then refreshes scores, the debt phase, and the win
//! condition.

use tracing::{debug, info};

use crate::cards::{Card, Catalog};
use crate::core::{Action, GameConfig, GameError, GamePhase, GameState, PlayerId};
use crate::effects::EffectResolver;
use crate::ledger::{Player, PlayerStatus};
use crate::zones::Dealer;

use super::engine::{GameResult, RulesEngine};
use super::fees::FeeEngine;
use super::resolver::ActionResolver;

/// Rules of a ZKTT table.
///
/// ## Example
///
/// ```
/// use zktt::cards::Catalog;
/// use zktt::core::{Action, GameConfig, GamePhase, GameState, PlayerId};
/// use zktt::rules::{RulesEngine, TurnController};
///
/// let rules = TurnController::new(GameConfig::default(), Catalog::standard());
/// let mut state = GameState::new(7);
/// let (alice, bob) = (PlayerId::new(1), PlayerId::new(2));
///
/// for (id, name) in [(alice, "alice"), (bob, "bob")] {
///     rules.apply_action(&mut state, id, &Action::Join { username: name.to_string() }).unwrap();
///     rules.apply_action(&mut state, id, &Action::SetReady { ready: true }).unwrap();
/// }
/// rules.apply_action(&mut state, alice, &Action::Start).unwrap();
///
/// assert_eq!(state.phase, GamePhase::Started);
/// assert_eq!(state.active_player(), Some(alice));
/// assert_eq!(state.player(bob).unwrap().hand.len(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct TurnController {
    config: GameConfig,
    catalog: Catalog,
}

impl TurnController {
    /// Create a controller. The config is assumed valid.
    #[must_use]
    pub fn new(config: GameConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    // === Lobby ===

    /// Take a seat in the lobby under a non-empty username.
    fn join(&self, state: &mut GameState, player: PlayerId, username: &str) -> Result<(), GameError> {
        Self::require_phase(state, GamePhase::WaitingForPlayers)?;
        let username = username.trim();
        if username.is_empty() {
            return Err(GameError::EmptyUsername);
        }
        if state.player(player).is_some() {
            return Err(GameError::AlreadyJoined(player));
        }
        if state.player_count() >= self.config.max_players {
            return Err(GameError::TableFull(self.config.max_players));
        }

        state.players.push_back(Player::new(player, username));
        Ok(())
    }

    /// Flag the player ready or not; the game starts only when all are.
    fn set_ready(&self, state: &mut GameState, player: PlayerId, ready: bool) -> Result<(), GameError> {
        Self::require_phase(state, GamePhase::WaitingForPlayers)?;
        state.require_player_mut(player)?.is_ready = ready;
        Ok(())
    }

    /// Before the start the seat is freed. After it the player goes
    /// inactive, debts owed to them are dropped, and the game may end.
    fn leave(&self, state: &mut GameState, player: PlayerId) -> Result<(), GameError> {
        let seat = state.seat_of(player).ok_or(GameError::NotJoined(player))?;

        if state.phase == GamePhase::WaitingForPlayers {
            state.players.remove(seat);
            return Ok(());
        }

        let leaver = state.require_player_mut(player)?;
        if !leaver.is_active() {
            return Err(GameError::PlayerInactive(player));
        }
        leaver.status = PlayerStatus::Inactive;
        leaver.is_ready = false;
        leaver.moves_remaining = 0;

        for other in state.players.iter_mut() {
            other.debt.settle(player);
        }

        if state.active_player_count() < self.config.min_players {
            info!(player = %player, "too few players remain, ending game");
            self.finish(state);
            return Ok(());
        }
        if state.active == seat {
            self.advance_turn(state)?;
        }
        Ok(())
    }

    /// Shuffle the catalog, deal in join order, and hand the first turn out.
    fn start(&self, state: &mut GameState, player: PlayerId) -> Result<(), GameError> {
        Self::require_phase(state, GamePhase::WaitingForPlayers)?;
        state.require_player(player)?;

        let have = state.player_count();
        if have < self.config.min_players {
            return Err(GameError::NotEnoughPlayers {
                needed: self.config.min_players,
                have,
            });
        }
        if let Some(unready) = state.players.iter().find(|p| !p.is_ready) {
            return Err(GameError::NotReady(unready.owner));
        }

        state.dealer = Dealer::shuffled(self.catalog.cards(), &mut state.rng);
        for seat in 0..state.players.len() {
            let n = self.config.initial_hand_size.min(state.dealer.draw_pile().len());
            if n == 0 {
                break;
            }
            let dealt = state.dealer.draw(n, &mut state.rng)?;
            if let Some(p) = state.players.get_mut(seat) {
                p.hand.extend(dealt);
            }
        }

        state.phase = GamePhase::Started;
        state.active = 0;
        state.turn_number = 1;
        if let Some(first) = state.players.get_mut(0) {
            first.moves_remaining = self.config.moves_per_turn;
        }

        info!(
            seed = state.seed(),
            players = state.player_count(),
            "game started"
        );
        Ok(())
    }

    // === Turn ===

    /// One draw per turn: `cards_per_draw` cards, or `cards_per_full_draw`
    /// with an empty hand. Spends no move.
    fn draw(&self, state: &mut GameState, player: PlayerId, draws_five: bool) -> Result<(), GameError> {
        Self::require_turn(state, player)?;
        let current = state.require_player(player)?;
        if current.has_drawn {
            return Err(GameError::AlreadyDrawn);
        }
        let n = if draws_five {
            if !current.hand.is_empty() {
                return Err(GameError::HandNotEmpty);
            }
            self.config.cards_per_full_draw
        } else {
            self.config.cards_per_draw
        };

        let drawn = state.dealer.draw(n, &mut state.rng)?;
        debug!(player = %player, requested = n, drawn = drawn.len(), "draw");

        let current = state.require_player_mut(player)?;
        current.hand.extend(drawn);
        current.has_drawn = true;
        Ok(())
    }

    /// Play a card from hand for its effect, spending a move.
    fn play(&self, state: &mut GameState, player: PlayerId, request: &Card) -> Result<(), GameError> {
        let owned = self.owned_for_move(state, player, request)?;
        let card = owned.with_targets(request);
        let batch = ActionResolver::resolve(state, &self.catalog, player, &card)?;
        EffectResolver::resolve_batch(state, &batch)?;
        Self::spend_move(state, player)
    }

    /// Lay a card down without its effect, spending a move.
    fn move_card(&self, state: &mut GameState, player: PlayerId, request: &Card) -> Result<(), GameError> {
        let owned = self.owned_for_move(state, player, request)?;
        let batch = ActionResolver::relocate(player, &owned);
        EffectResolver::resolve_batch(state, &batch)?;
        Self::spend_move(state, player)
    }

    /// Pass the turn once the player has drawn.
    fn end_turn(&self, state: &mut GameState, player: PlayerId) -> Result<(), GameError> {
        Self::require_turn(state, player)?;
        let current = state.require_player_mut(player)?;
        if !current.has_drawn {
            return Err(GameError::MustDrawFirst);
        }
        current.has_drawn = false;
        current.moves_remaining = 0;

        self.advance_turn(state)
    }

    // === Fees ===

    /// Settle one obligation with cards the payee owns.
    fn pay_fee(
        &self,
        state: &mut GameState,
        player: PlayerId,
        payload: &[Card],
        recipient: PlayerId,
        payee: PlayerId,
    ) -> Result<(), GameError> {
        Self::require_in_play(state)?;
        if player != payee {
            return Err(GameError::NotYourDebt { payee: player, recipient });
        }
        let batch = FeeEngine::pay(state, payee, recipient, payload)?;
        EffectResolver::resolve_batch(state, &batch)?;
        debug!(payee = %payee, recipient = %recipient, cards = payload.len(), "fee paid");
        Ok(())
    }

    /// Hand over everything payable when it cannot cover the debt.
    fn concede_fee(&self, state: &mut GameState, player: PlayerId, recipient: PlayerId) -> Result<(), GameError> {
        Self::require_in_play(state)?;
        let batch = FeeEngine::concede(state, player, recipient)?;
        EffectResolver::resolve_batch(state, &batch)?;
        debug!(payee = %player, recipient = %recipient, "fee conceded");
        Ok(())
    }

    // === End ===

    /// Close the game on request and award the best score.
    fn end(&self, state: &mut GameState, player: PlayerId) -> Result<(), GameError> {
        Self::require_in_play(state)?;
        if !state.require_player(player)?.is_active() {
            return Err(GameError::PlayerInactive(player));
        }
        self.finish(state);
        Ok(())
    }

    /// Score every player and close the game; best active score wins.
    fn finish(&self, state: &mut GameState) {
        self.refresh_scores(state);
        let best = state.active_players().map(|p| p.score).max();
        let leaders: Vec<PlayerId> = state
            .active_players()
            .filter(|p| Some(p.score) == best)
            .map(|p| p.owner)
            .collect();
        self.close(state, GameResult::from_leaders(leaders));
    }

    /// Record the result and move to `Ended`.
    fn close(&self, state: &mut GameState, result: GameResult) {
        info!(result = ?result, turn = state.turn_number, "game ended");
        state.result = Some(result);
        state.phase = GamePhase::Ended;
    }

    // === Bookkeeping ===

    /// Scores, debt phase, and the immediate win condition.
    fn settle_state(&self, state: &mut GameState) {
        if !state.phase.is_in_play() {
            return;
        }
        self.refresh_scores(state);
        state.refresh_phase();

        let winners: Vec<PlayerId> = state
            .active_players()
            .filter(|p| p.complete_groups(&self.catalog) >= self.config.sets_to_win)
            .map(|p| p.owner)
            .collect();
        if !winners.is_empty() {
            self.close(state, GameResult::from_leaders(winners));
        }
    }

    fn refresh_scores(&self, state: &mut GameState) {
        for player in state.players.iter_mut() {
            player.score = player.compute_score(&self.catalog);
        }
    }

    /// Pass the turn to the next active seat and refill its budget.
    fn advance_turn(&self, state: &mut GameState) -> Result<(), GameError> {
        let next = state
            .next_active_seat(state.active)
            .ok_or(GameError::NotEnoughPlayers {
                needed: self.config.min_players,
                have: 0,
            })?;

        state.active = next;
        state.turn_number += 1;
        if let Some(p) = state.players.get_mut(next) {
            p.moves_remaining = self.config.moves_per_turn;
            p.has_drawn = false;
        }
        debug!(turn = state.turn_number, seat = next, "turn advanced");
        Ok(())
    }

    /// The actor's own copy of `request`, provided it is their turn and they
    /// have a move left.
    fn owned_for_move(&self, state: &GameState, player: PlayerId, request: &Card) -> Result<Card, GameError> {
        Self::require_turn(state, player)?;
        let current = state.require_player(player)?;
        if current.moves_remaining == 0 {
            return Err(GameError::NoMovesRemaining);
        }
        current
            .find_in_hand(request)
            .cloned()
            .ok_or_else(|| GameError::CardNotInHand(request.label()))
    }

    fn spend_move(state: &mut GameState, player: PlayerId) -> Result<(), GameError> {
        let current = state.require_player_mut(player)?;
        current.moves_remaining = current.moves_remaining.saturating_sub(1);
        Ok(())
    }

    // === Guards ===

    fn require_phase(state: &GameState, phase: GamePhase) -> Result<(), GameError> {
        if state.phase != phase {
            return Err(GameError::WrongPhase(state.phase));
        }
        Ok(())
    }

    fn require_in_play(state: &GameState) -> Result<(), GameError> {
        if !state.phase.is_in_play() {
            return Err(GameError::WrongPhase(state.phase));
        }
        Ok(())
    }

    /// In play, active, and holding the turn.
    fn require_turn(state: &GameState, player: PlayerId) -> Result<(), GameError> {
        Self::require_in_play(state)?;
        if !state.require_player(player)?.is_active() {
            return Err(GameError::PlayerInactive(player));
        }
        if state.active_player() != Some(player) {
            return Err(GameError::NotYourTurn(player));
        }
        Ok(())
    }
}

impl RulesEngine for TurnController {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), GameError> {
        if state.is_ended() {
            return Err(GameError::GameEnded);
        }
        if state.phase.is_in_play()
            && !action.allowed_in_debt()
            && state.player(player).is_some_and(Player::in_debt)
        {
            return Err(GameError::InDebt(player));
        }

        match action {
            Action::Join { username } => self.join(state, player, username),
            Action::SetReady { ready } => self.set_ready(state, player, *ready),
            Action::Leave => self.leave(state, player),
            Action::Start => self.start(state, player),
            Action::Draw { draws_five } => self.draw(state, player, *draws_five),
            Action::Play { card } => self.play(state, player, card),
            Action::Move { card } => self.move_card(state, player, card),
            Action::PayFee {
                payload,
                recipient,
                payee,
            } => self.pay_fee(state, player, payload, *recipient, *payee),
            Action::ConcedeFee { recipient } => self.concede_fee(state, player, *recipient),
            Action::EndTurn => self.end_turn(state, player),
            Action::End => self.end(state, player),
        }?;

        self.settle_state(state);
        Ok(())
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.result.clone()
    }
}
