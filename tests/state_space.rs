//! Enumeration of the tic-tac-toe state space

use rlbook::tictactoe::{Board, GameOutcome, Player, StateSpace};

#[test]
fn test_three_by_three_has_5478_states() {
    let space = StateSpace::enumerate(3).unwrap();
    assert_eq!(space.len(), 5478);

    let initial = space.get(space.initial());
    assert!(!initial.is_terminal());
    assert_eq!(initial.board().occupied_count(), 0);
    assert_eq!(initial.board().mover(), Player::X);
}

#[test]
fn test_terminal_outcome_counts() {
    let space = StateSpace::enumerate(3).unwrap();
    let mut x_wins = 0;
    let mut o_wins = 0;
    let mut draws = 0;
    for (_, state) in space.iter() {
        match state.outcome() {
            Some(GameOutcome::Win(Player::X)) => x_wins += 1,
            Some(GameOutcome::Win(Player::O)) => o_wins += 1,
            Some(GameOutcome::Draw) => draws += 1,
            None => {}
        }
    }
    assert_eq!((x_wins, o_wins, draws), (626, 316, 16));
}

#[test]
fn test_outcomes_are_exclusive() {
    let space = StateSpace::enumerate(3).unwrap();
    for (_, state) in space.iter() {
        let x = state.is_won_by(Player::X);
        let o = state.is_won_by(Player::O);
        assert!(!(x && o), "both players win on\n{}", state.board());
        assert_eq!(state.is_terminal(), state.outcome().is_some());
        if state.outcome() == Some(GameOutcome::Draw) {
            assert_eq!(state.board().occupied_count(), 9);
            assert!(!x && !o);
        }
    }
}

#[test]
fn test_enumeration_is_deterministic() {
    let a = StateSpace::enumerate(3).unwrap();
    let b = StateSpace::enumerate(3).unwrap();
    assert_eq!(a.len(), b.len());
    for ((id_a, state_a), (id_b, state_b)) in a.iter().zip(b.iter()) {
        assert_eq!(id_a, id_b);
        assert_eq!(state_a.board(), state_b.board());
        assert_eq!(state_a.hash(), state_b.hash());
        assert_eq!(state_a.outcome(), state_b.outcome());
    }
}

#[test]
fn test_every_state_is_indexed_by_its_board() {
    let space = StateSpace::enumerate(3).unwrap();
    for (id, state) in space.iter() {
        assert_eq!(space.lookup(state.board()), Some(id));
    }
}

#[test]
fn test_terminal_states_have_no_successors_listed() {
    let space = StateSpace::enumerate(3).unwrap();
    let board = Board::empty(3)
        .unwrap()
        .with_move(0, 0, Player::X)
        .unwrap()
        .with_move(1, 0, Player::O)
        .unwrap()
        .with_move(0, 1, Player::X)
        .unwrap()
        .with_move(1, 1, Player::O)
        .unwrap()
        .with_move(0, 2, Player::X)
        .unwrap();
    let id = space.lookup(&board).unwrap();
    assert!(space.get(id).is_won_by(Player::X));

    // A board that continues past a win was never enumerated.
    assert!(space.next(id, 2, 2, Player::O).is_err());
}
