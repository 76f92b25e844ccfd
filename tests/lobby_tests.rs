//! Lobby and turn-flow integration tests.
//!
//! These drive a `Table` through its public operations only: joining,
//! readying, starting, drawing, turn rotation, leaving, and ending.

use zktt::cards::{Card, Catalog};
use zktt::core::{Action, GameConfig, GameError, GamePhase, PlayerId};
use zktt::rules::GameResult;
use zktt::table::{Table, TableId};

const A: PlayerId = PlayerId::new(10);
const B: PlayerId = PlayerId::new(20);
const C: PlayerId = PlayerId::new(30);
const D: PlayerId = PlayerId::new(40);

fn table_with(config: GameConfig, catalog: Catalog) -> Table {
    Table::new(TableId(0), 2024, config, catalog).unwrap()
}

fn seated(config: GameConfig, catalog: Catalog, players: &[PlayerId]) -> Table {
    let mut table = table_with(config, catalog);
    for &p in players {
        table.submit(p, Action::Join { username: format!("player-{}", p.raw()) }).unwrap();
        table.submit(p, Action::SetReady { ready: true }).unwrap();
    }
    table
}

fn started(players: &[PlayerId]) -> Table {
    let mut table = seated(GameConfig::default(), Catalog::standard(), players);
    table.submit(players[0], Action::Start).unwrap();
    table
}

fn draw_and_pass(table: &mut Table, player: PlayerId) {
    table.submit(player, Action::Draw { draws_five: false }).unwrap();
    table.submit(player, Action::EndTurn).unwrap();
}

// =============================================================================
// Joining and Starting
// =============================================================================

/// Three players join, ready up, and any of them starts the game.
#[test]
fn test_join_and_start() {
    let mut table = seated(GameConfig::default(), Catalog::standard(), &[A, B, C]);
    table.submit(B, Action::Start).unwrap();

    let state = table.state();
    assert_eq!(state.phase, GamePhase::Started);
    assert_eq!(state.turn_number, 1);
    assert_eq!(state.active_player(), Some(A));
    for p in [A, B, C] {
        assert_eq!(state.player(p).unwrap().hand.len(), 5);
    }
    assert_eq!(state.player(A).unwrap().moves_remaining, 3);
    assert_eq!(state.player(B).unwrap().moves_remaining, 0);
    assert_eq!(state.dealer.draw_pile().len(), 87 - 15);
    assert_eq!(state.card_count(), 87);
    assert!(table.check_integrity().is_ok());
}

/// Lobby operations are closed once the game starts.
#[test]
fn test_lobby_closed_after_start() {
    let mut table = started(&[A, B]);

    assert_eq!(
        table.submit(D, Action::Join { username: "late".to_string() }),
        Err(GameError::WrongPhase(GamePhase::Started))
    );
    assert_eq!(
        table.submit(A, Action::SetReady { ready: false }),
        Err(GameError::WrongPhase(GamePhase::Started))
    );
    assert_eq!(table.submit(A, Action::Start), Err(GameError::WrongPhase(GamePhase::Started)));
}

/// Strangers cannot act on a table.
#[test]
fn test_unjoined_player_rejected() {
    let mut table = seated(GameConfig::default(), Catalog::standard(), &[A, B]);

    assert_eq!(table.submit(D, Action::Start), Err(GameError::NotJoined(D)));
    assert_eq!(table.submit(D, Action::SetReady { ready: true }), Err(GameError::NotJoined(D)));
    assert_eq!(table.submit(D, Action::Leave), Err(GameError::NotJoined(D)));
}

/// Un-readying blocks the start.
#[test]
fn test_unready_blocks_start() {
    let mut table = seated(GameConfig::default(), Catalog::standard(), &[A, B]);
    table.submit(B, Action::SetReady { ready: false }).unwrap();

    assert_eq!(table.submit(A, Action::Start), Err(GameError::NotReady(B)));
    assert_eq!(table.phase(), GamePhase::WaitingForPlayers);
}

/// The same seed and players deal the same hands.
#[test]
fn test_deal_is_reproducible() {
    let first = started(&[A, B]);
    let second = started(&[A, B]);

    assert_eq!(first.state().players, second.state().players);
    assert_eq!(first.state().dealer, second.state().dealer);
}

// =============================================================================
// Turns
// =============================================================================

/// Turns rotate in join order and skip players who left.
#[test]
fn test_rotation_skips_inactive() {
    let mut table = started(&[A, B, C]);
    table.submit(B, Action::Leave).unwrap();

    draw_and_pass(&mut table, A);
    assert_eq!(table.state().active_player(), Some(C));
    assert_eq!(table.state().turn_number, 2);

    draw_and_pass(&mut table, C);
    assert_eq!(table.state().active_player(), Some(A));
    assert_eq!(table.state().turn_number, 3);
}

/// Only the active player draws or ends a turn.
#[test]
fn test_out_of_turn_rejected() {
    let mut table = started(&[A, B]);

    assert_eq!(
        table.submit(B, Action::Draw { draws_five: false }),
        Err(GameError::NotYourTurn(B))
    );
    assert_eq!(table.submit(B, Action::EndTurn), Err(GameError::NotYourTurn(B)));
}

/// Turn numbers only grow and every accepted action is logged in order.
#[test]
fn test_turns_monotonic() {
    let mut table = started(&[A, B, C]);
    let mut last = table.state().turn_number;

    for _ in 0..4 {
        for p in [A, B, C] {
            draw_and_pass(&mut table, p);
            assert!(table.state().turn_number > last);
            last = table.state().turn_number;
        }
    }

    let history = table.history();
    assert!(history.windows(2).all(|w| w[0].turn <= w[1].turn));
    assert!(history.iter().enumerate().all(|(i, r)| r.sequence as usize == i));
}

// =============================================================================
// Drawing
// =============================================================================

/// Drawing five needs an empty hand.
#[test]
fn test_draw_five_with_empty_hand() {
    let config = GameConfig::default().with_initial_hand_size(0);
    let mut table = seated(config, Catalog::standard(), &[A, B]);
    table.submit(A, Action::Start).unwrap();

    table.submit(A, Action::Draw { draws_five: true }).unwrap();
    assert_eq!(table.state().player(A).unwrap().hand.len(), 5);
}

/// A short draw pile gives what it has; an empty table gives an error.
#[test]
fn test_draw_exhaustion() {
    let catalog = Catalog::builder().repeat(3, |b| b.asset(1)).build().unwrap();
    let config = GameConfig::default().with_initial_hand_size(0);
    let mut table = seated(config, catalog, &[A, B]);
    table.submit(A, Action::Start).unwrap();

    table.submit(A, Action::Draw { draws_five: true }).unwrap();
    assert_eq!(table.state().player(A).unwrap().hand.len(), 3);
    table.submit(A, Action::EndTurn).unwrap();

    assert_eq!(
        table.submit(B, Action::Draw { draws_five: true }),
        Err(GameError::NoCardsAvailable)
    );
    assert!(!table.state().player(B).unwrap().has_drawn);
    assert!(table.check_integrity().is_ok());
}

/// Two cards left and eight discarded: a five-card draw takes the two, then
/// three from the discards shuffled underneath.
#[test]
fn test_draw_five_reshuffles_discards() {
    let config = GameConfig::default().with_initial_hand_size(0);
    let mut table = seated(config, Catalog::standard(), &[A, B]);
    table.submit(A, Action::Start).unwrap();

    let mut snapshot = table.snapshot();
    let pile: Vec<Card> = snapshot.state.dealer.draw_pile().iter().cloned().collect();
    let (banked, rest) = pile.split_at(pile.len() - 10);
    let (discarded, top) = rest.split_at(8);
    for card in banked {
        let card = snapshot.state.dealer.take(card).unwrap();
        snapshot.state.players[1].deposit.push_back(card);
    }
    for card in discarded {
        let card = snapshot.state.dealer.take(card).unwrap();
        snapshot.state.dealer.discard(&card);
    }
    let mut table = snapshot.restore().unwrap();
    assert_eq!(table.state().dealer.draw_pile().len(), 2);
    assert_eq!(table.state().dealer.discard_pile().len(), 8);

    table.submit(A, Action::Draw { draws_five: true }).unwrap();

    let hand = &table.state().player(A).unwrap().hand;
    assert_eq!(hand.len(), 5);
    assert!(top.iter().all(|card| hand.contains(card)));
    assert_eq!(table.state().dealer.draw_pile().len(), 5);
    assert!(table.state().dealer.discard_pile().is_empty());
    assert!(table.check_integrity().is_ok());
}

// =============================================================================
// Leaving and Ending
// =============================================================================

/// Leaving below the minimum ends the game for those who remain.
#[test]
fn test_leave_ends_short_game() {
    let mut table = started(&[A, B]);
    table.submit(A, Action::Leave).unwrap();

    assert_eq!(table.phase(), GamePhase::Ended);
    assert_eq!(table.result(), Some(GameResult::Winner(B)));
    assert_eq!(table.submit(B, Action::EndTurn), Err(GameError::GameEnded));
}

/// Ending with equal scores shares the result.
#[test]
fn test_end_with_tie() {
    let mut table = started(&[A, B]);
    table.submit(B, Action::End).unwrap();

    assert_eq!(table.phase(), GamePhase::Ended);
    assert_eq!(table.result(), Some(GameResult::Winners(vec![A, B])));
    assert_eq!(table.submit(A, Action::End), Err(GameError::GameEnded));
}
