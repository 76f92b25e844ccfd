//! Shared fixtures for the rules integration tests.
//!
//! `Rig` is a started table laid out by hand: every catalog card starts in
//! the draw pile and is dealt where a scenario needs it.

#![allow(dead_code)]

use zktt::cards::{
    Blockchain, Card, CardKind, Catalog, Color, FiftyOnePercentAttack, GasFee, GasFeeType,
    HardFork, PlayerTarget, SandwichAttack,
};
use zktt::core::{Action, GameConfig, GameError, GamePhase, GameState, PlayerId};
use zktt::ledger::Player;
use zktt::rules::{RulesEngine, TurnController};
use zktt::zones::{Dealer, Zone};

pub const A: PlayerId = PlayerId::new(1);
pub const B: PlayerId = PlayerId::new(2);
pub const C: PlayerId = PlayerId::new(3);

pub fn catalog() -> Catalog {
    Catalog::builder()
        .blockchain("Solana", Color::Red, 2, 3)
        .blockchain("Aptos", Color::Red, 2, 3)
        .blockchain("Sui", Color::Red, 2, 3)
        .blockchain("Bitcoin", Color::Gold, 1, 1)
        .blockchain("Dogecoin", Color::Gold, 1, 1)
        .blockchain("Ethereum", Color::Blue, 3, 4)
        .blockchain("Base", Color::Blue, 3, 4)
        .asset(1)
        .asset(2)
        .asset(2)
        .asset(5)
        .gas_fee(GasFeeType::Any, 3)
        .gas_fee(GasFeeType::AgainstTwo(Color::Gold, Color::Blue), 1)
        .repeat(2, |b| b.hard_fork(2))
        .mev_boost(3)
        .soft_fork(4)
        .priority_fee(1)
        .replay_attack(1)
        .front_run(3)
        .fifty_one_percent_attack(5)
        .sandwich_attack(3)
        .chain_reorg(3)
        .claim_yield(2)
        .build()
        .unwrap()
}

/// A started table with `A` to act and the whole catalog in the draw pile.
pub struct Rig {
    pub rules: TurnController,
    pub catalog: Catalog,
    pub state: GameState,
}

impl Rig {
    pub fn new(players: &[PlayerId]) -> Self {
        Self::with_config(GameConfig::default().with_players(2, 4), players)
    }

    pub fn with_config(config: GameConfig, players: &[PlayerId]) -> Self {
        let catalog = catalog();
        let mut state = GameState::new(1);
        for &p in players {
            let mut player = Player::new(p, format!("p{}", p.raw()));
            player.is_ready = true;
            state.players.push_back(player);
        }
        state.dealer = Dealer::shuffled(catalog.cards(), &mut state.rng);
        state.phase = GamePhase::Started;
        state.turn_number = 1;
        state.players[0].moves_remaining = config.moves_per_turn;

        Self {
            rules: TurnController::new(config, catalog.clone()),
            catalog,
            state,
        }
    }

    /// Move a card from the dealer into a player's collection.
    pub fn give(&mut self, to: Zone, card: &Card) {
        let owned = self.state.dealer.take(card).unwrap();
        self.place(to, owned);
    }

    /// Put an already-targeted card into a player's collection.
    pub fn place(&mut self, to: Zone, card: Card) {
        let owner = to.owner().unwrap();
        self.state
            .require_player_mut(owner)
            .unwrap()
            .pile_mut(to)
            .unwrap()
            .push_back(card);
    }

    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<(), GameError> {
        let mut next = self.state.clone();
        self.rules.apply_action(&mut next, player, &action)?;
        self.state = next;
        Ok(())
    }

    pub fn play(&mut self, player: PlayerId, card: Card) -> Result<(), GameError> {
        self.apply(player, Action::Play { card })
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        self.state.player(id).unwrap()
    }

    pub fn chain(&self, name: &str) -> Card {
        self.catalog
            .iter()
            .find(|c| c.as_blockchain().is_some_and(|bc| bc.name == name))
            .cloned()
            .unwrap()
    }

    pub fn bc(&self, name: &str) -> Blockchain {
        self.chain(name).as_blockchain().cloned().unwrap()
    }

    pub fn nth(&self, kind: CardKind, n: usize) -> Card {
        self.catalog.iter().filter(|c| c.kind() == kind).nth(n).cloned().unwrap()
    }

    pub fn asset(&self, value: u32, n: usize) -> Card {
        self.catalog
            .iter()
            .filter(|c| c.kind() == CardKind::Asset && c.value() == value)
            .nth(n)
            .cloned()
            .unwrap()
    }

    pub fn in_discard(&self, kind: CardKind) -> bool {
        self.state.dealer.discard_pile().iter().any(|c| c.kind() == kind)
    }

    pub fn deck_names(&self, id: PlayerId) -> Vec<String> {
        let mut names: Vec<String> = self
            .player(id)
            .deck
            .iter()
            .filter_map(Card::as_blockchain)
            .map(|bc| bc.name.clone())
            .collect();
        names.sort();
        names
    }
}

pub fn gas_fee(card: &Card, players: PlayerTarget, set: Vec<Blockchain>) -> Card {
    let Card::GasFee(fee) = card else { panic!("not a gas fee") };
    Card::GasFee(GasFee {
        players_affected: players,
        set_applied: set,
        ..fee.clone()
    })
}

pub fn hard_fork(card: &Card, owner: PlayerId, timestamp: u64, set: Color) -> Card {
    let Card::HardFork(fork) = card else { panic!("not a hard fork") };
    Card::HardFork(HardFork {
        owner: Some(owner),
        timestamp_used: timestamp,
        set: Some(set),
        ..fork.clone()
    })
}

pub fn fifty_one(card: &Card, target: PlayerId, set: Vec<Blockchain>) -> Card {
    let Card::FiftyOnePercentAttack(attack) = card else { panic!("not a 51% attack") };
    Card::FiftyOnePercentAttack(FiftyOnePercentAttack {
        player_targeted: Some(target),
        set,
        ..attack.clone()
    })
}

pub fn sandwich(card: &Card, target: PlayerId) -> Card {
    let Card::SandwichAttack(attack) = card else { panic!("not a sandwich attack") };
    Card::SandwichAttack(SandwichAttack {
        player_targeted: Some(target),
        ..attack.clone()
    })
}
