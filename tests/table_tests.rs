//! Table, registry, and persistence integration tests.

use std::sync::Arc;
use std::thread;

use zktt::cards::Catalog;
use zktt::core::{Action, ActionRecord, GameConfig, GameError, GamePhase, IntegrityError, PlayerId};
use zktt::table::{Table, TableError, TableId, TableRegistry, TableSnapshot};

const A: PlayerId = PlayerId::new(1);
const B: PlayerId = PlayerId::new(2);
const C: PlayerId = PlayerId::new(3);

fn played_table() -> Table {
    let mut table = Table::new(TableId(7), 99, GameConfig::default(), Catalog::standard()).unwrap();
    for p in [A, B, C] {
        table.submit(p, Action::Join { username: format!("p{}", p.raw()) }).unwrap();
        table.submit(p, Action::SetReady { ready: true }).unwrap();
    }
    table.submit(A, Action::Start).unwrap();
    for p in [A, B, C, A] {
        table.submit(p, Action::Draw { draws_five: false }).unwrap();
        let card = table.state().player(p).unwrap().hand[0].clone();
        table.submit(p, Action::Move { card }).unwrap();
        table.submit(p, Action::EndTurn).unwrap();
    }
    table
}

// =============================================================================
// Replay
// =============================================================================

/// Replaying the history on a fresh table reproduces the state exactly.
#[test]
fn test_replay_reproduces_table() {
    let table = played_table();
    let replayed = Table::replay(
        TableId(7),
        99,
        GameConfig::default(),
        Catalog::standard(),
        &table.history(),
    )
    .unwrap();

    assert_eq!(replayed.state().players, table.state().players);
    assert_eq!(replayed.state().dealer, table.state().dealer);
    assert_eq!(replayed.state().turn_number, table.state().turn_number);
    assert_eq!(replayed.history(), table.history());
}

/// A different seed deals differently, so the recorded moves stop fitting.
#[test]
fn test_replay_with_wrong_seed_fails() {
    let table = played_table();
    let result = Table::replay(
        TableId(7),
        100,
        GameConfig::default(),
        Catalog::standard(),
        &table.history(),
    );

    assert!(matches!(
        result,
        Err(IntegrityError::Replay { source: GameError::CardNotInHand(_), .. })
    ));
}

/// History survives a JSON round trip, as a log shipped elsewhere would.
#[test]
fn test_history_json() {
    let table = played_table();
    let json = serde_json::to_string(&table.history()).unwrap();
    let records: Vec<ActionRecord> = serde_json::from_str(&json).unwrap();

    assert_eq!(records, table.history());
    assert!(json.contains("EndTurn"));
}

// =============================================================================
// Snapshots
// =============================================================================

/// Snapshot bytes restore a table that plays on identically.
#[test]
fn test_snapshot_bytes() {
    let mut table = played_table();
    let bytes = table.snapshot().to_bytes().unwrap();
    let mut restored = Table::from_bytes(&bytes).unwrap();

    assert_eq!(restored.id(), table.id());
    assert_eq!(restored.config(), table.config());
    assert_eq!(restored.catalog(), table.catalog());

    for t in [&mut table, &mut restored] {
        t.submit(B, Action::Draw { draws_five: false }).unwrap();
    }
    assert_eq!(restored.state().players, table.state().players);
}

/// Tampered snapshots fail the integrity check.
#[test]
fn test_snapshot_tampering_detected() {
    let table = played_table();

    let mut extra = table.snapshot();
    let card = extra.state.dealer.draw_pile()[0].clone();
    extra.state.players[0].hand.push_back(card);
    let bytes = extra.to_bytes().unwrap();
    assert!(matches!(
        Table::from_bytes(&bytes),
        Err(IntegrityError::CardCount { expected: 87, found: 88 })
    ));

    let mut config = table.snapshot();
    config.config.min_players = 1;
    assert!(matches!(config.restore(), Err(IntegrityError::Config(_))));
}

/// A lobby snapshot holds no cards and still validates.
#[test]
fn test_lobby_snapshot() {
    let mut table = Table::new(TableId(1), 5, GameConfig::default(), Catalog::standard()).unwrap();
    table.submit(A, Action::Join { username: "a".to_string() }).unwrap();

    let snapshot: TableSnapshot = table.snapshot();
    let restored = snapshot.restore().unwrap();
    assert_eq!(restored.phase(), GamePhase::WaitingForPlayers);
    assert_eq!(restored.state().player_count(), 1);
}

// =============================================================================
// Registry
// =============================================================================

/// Tables on different threads progress independently.
#[test]
fn test_registry_parallel_tables() {
    let registry = Arc::new(TableRegistry::new());
    let handles: Vec<_> = (0..8)
        .map(|seed| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let id = registry
                    .create_table(seed, GameConfig::default(), Catalog::standard())
                    .unwrap();
                for p in [A, B] {
                    registry.join(id, p, "p").unwrap();
                    registry.set_ready(id, p, true).unwrap();
                }
                registry.start(id, A).unwrap();
                registry.draw(id, A, false).unwrap();
                registry.end_turn(id, A).unwrap();
                id
            })
        })
        .collect();

    let ids: Vec<TableId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(registry.len(), 8);
    for id in ids {
        let turn = registry.with_table(id, |t| t.state().turn_number).unwrap();
        assert_eq!(turn, 2);
    }
}

/// Concurrent joins on one table are serialized; none is lost.
#[test]
fn test_registry_serializes_one_table() {
    let registry = Arc::new(TableRegistry::new());
    let config = GameConfig::default().with_players(2, 5);
    let id = registry.create_table(1, config, Catalog::standard()).unwrap();

    let handles: Vec<_> = (1..=8)
        .map(|n| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.join(id, PlayerId::new(n), format!("p{n}")))
        })
        .collect();
    let results: Vec<Result<(), TableError>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let joined = results.iter().filter(|r| r.is_ok()).count();
    let full = results
        .iter()
        .filter(|r| **r == Err(TableError::Rejected(GameError::TableFull(5))))
        .count();
    assert_eq!(joined, 5);
    assert_eq!(full, 3);

    let (players, history) = registry
        .with_table(id, |t| (t.state().player_count(), t.history().len()))
        .unwrap();
    assert_eq!(players, 5);
    assert_eq!(history, 5);
}

/// Removed tables are gone.
#[test]
fn test_registry_remove() {
    let registry = TableRegistry::new();
    let id = registry.create_table(1, GameConfig::default(), Catalog::standard()).unwrap();

    assert!(registry.remove(id).is_some());
    assert!(registry.is_empty());
    assert_eq!(registry.start(id, A), Err(TableError::UnknownTable(id)));
}

/// Invalid configs never make it into the registry.
#[test]
fn test_registry_rejects_bad_config() {
    let registry = TableRegistry::new();
    let config = GameConfig::default().with_players(4, 3);

    assert!(registry.create_table(1, config, Catalog::standard()).is_err());
    assert!(registry.is_empty());

    let config = GameConfig::from_toml_str("min_players = 3\nmax_players = 4\n").unwrap();
    let id = registry.create_table(1, config, Catalog::standard()).unwrap();
    assert_eq!(registry.with_table(id, |t| t.config().min_players).unwrap(), 3);
}
