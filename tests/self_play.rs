//! Self-play sessions, persistence and play against an external source

use rlbook::{
    Error,
    adapters::{LineReader, ScriptedMoves},
    app::TicTacToeConfig,
    pipeline::{MatchSummary, MetricsObserver, SelfPlay},
    tictactoe::Player,
};
use tempfile::TempDir;

fn config(seed: u64) -> TicTacToeConfig {
    TicTacToeConfig {
        seed: Some(seed),
        progress: false,
        log_every: 0,
        ..TicTacToeConfig::default()
    }
}

#[test]
fn test_seeded_training_is_reproducible() {
    let mut a = SelfPlay::new(config(5)).unwrap();
    let mut b = SelfPlay::new(config(5)).unwrap();
    assert_eq!(a.train(300).unwrap(), b.train(300).unwrap());
    assert_eq!(
        a.value_table(Player::X).unwrap().values(),
        b.value_table(Player::X).unwrap().values()
    );
}

#[test]
fn test_tables_survive_save_and_load() {
    let dir = TempDir::new().unwrap();
    let mut trained = SelfPlay::new(config(8)).unwrap();
    trained.train(200).unwrap();
    trained.save_tables(dir.path()).unwrap();

    let mut restored = SelfPlay::new(config(8)).unwrap();
    restored.load_tables(dir.path()).unwrap();
    for role in [Player::X, Player::O] {
        assert_eq!(
            trained.value_table(role).unwrap().values(),
            restored.value_table(role).unwrap().values()
        );
    }
    assert_eq!(
        trained.compete(5).unwrap(),
        restored.compete(5).unwrap()
    );
}

#[test]
fn test_load_from_empty_directory_fails() {
    let dir = TempDir::new().unwrap();
    let mut session = SelfPlay::new(config(1)).unwrap();
    assert!(matches!(
        session.load_tables(dir.path()),
        Err(Error::Io { .. })
    ));
}

#[test]
fn test_play_against_scripted_opponent() {
    let mut session = SelfPlay::new(config(2)).unwrap();
    session.train(500).unwrap();
    // O always takes the first free cell, so nine positions always suffice.
    let outcome = session.play_external(ScriptedMoves::new(0..9), Player::O);
    assert!(outcome.is_ok(), "{outcome:?}");
}

/// Board printed before the external agent's first move.
fn first_prompted_board(session: &SelfPlay, external_role: Player) -> String {
    let input = "0\n1\n2\n3\n4\n5\n6\n7\n8\n";
    let mut output = Vec::new();
    session
        .play_external(LineReader::new(input.as_bytes(), &mut output), external_role)
        .unwrap();
    let transcript = String::from_utf8(output).unwrap();
    let end = transcript.find("Input your position:").unwrap();
    transcript[..end].to_string()
}

#[test]
fn test_external_x_opens_against_o_table() {
    let mut session = SelfPlay::new(config(9)).unwrap();
    session.train(200).unwrap();
    let board = first_prompted_board(&session, Player::X);
    assert!(!board.contains('X') && !board.contains('O'), "{board}");
}

#[test]
fn test_external_o_answers_x_table() {
    let mut session = SelfPlay::new(config(9)).unwrap();
    session.train(200).unwrap();
    let board = first_prompted_board(&session, Player::O);
    assert_eq!(board.matches('X').count(), 1, "{board}");
    assert!(!board.contains('O'), "{board}");
}

#[test]
fn test_external_x_needs_trained_o_table() {
    let session = SelfPlay::new(config(9)).unwrap();
    assert!(matches!(
        session.play_external(ScriptedMoves::new(0..9), Player::X),
        Err(Error::MissingValueTable { role: Player::O })
    ));
}

#[test]
fn test_play_against_line_reader() {
    let mut session = SelfPlay::new(config(4)).unwrap();
    session.train(100).unwrap();

    let input = "garbage\n0\n1\n2\n3\n4\n5\n6\n7\n8\n";
    let mut output = Vec::new();
    session
        .play_external(LineReader::new(input.as_bytes(), &mut output), Player::O)
        .unwrap();
    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Input your position:"));
    assert!(transcript.contains("-------------"));
}

#[test]
fn test_summary_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.json");
    let mut session = SelfPlay::new(config(6))
        .unwrap()
        .with_observer(Box::new(MetricsObserver::new()));
    let summary = session.train(40).unwrap();
    summary.save(&path).unwrap();
    assert_eq!(MatchSummary::load(&path).unwrap(), summary);
}
