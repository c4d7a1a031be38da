//! Exhaustive enumeration of reachable board states

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::board::{Board, GameOutcome, Player};
use crate::{Error, Result};

/// Index of a state inside a [`StateSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A reachable board together with its cached classification.
#[derive(Debug, Clone)]
pub struct State {
    board: Board,
    hash: u32,
    outcome: Option<GameOutcome>,
}

impl State {
    fn new(board: Board) -> Self {
        let hash = board.structural_hash();
        let outcome = board.check_done_win();
        Self {
            board,
            hash,
            outcome,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether this is a terminal state won by `player`.
    pub fn is_won_by(&self, player: Player) -> bool {
        self.outcome == Some(GameOutcome::Win(player))
    }
}

/// Every state reachable from the empty board with X moving first.
///
/// States are stored in an arena and addressed by [`StateId`]; lookups are
/// keyed by the full cell sequence. The space is immutable once built and is
/// shared by reference between agents and the referee.
#[derive(Debug, Clone)]
pub struct StateSpace {
    dim: usize,
    states: Vec<State>,
    index: HashMap<Board, StateId>,
    initial: StateId,
}

impl StateSpace {
    /// Enumerate all reachable states of a `dim` x `dim` board.
    ///
    /// Expansion is depth-first in row-major order and stops at terminal
    /// states, so the arena order is deterministic for a given dimension.
    pub fn enumerate(dim: usize) -> Result<Self> {
        let root = Board::empty(dim)?;
        let mut space = Self {
            dim,
            states: Vec::new(),
            index: HashMap::new(),
            initial: StateId(0),
        };
        space.initial = space.insert(root.clone());
        space.expand(&root, Player::X)?;

        tracing::debug!(
            dimension = dim,
            states = space.states.len(),
            "enumerated state space"
        );
        Ok(space)
    }

    fn insert(&mut self, board: Board) -> StateId {
        let id = StateId(self.states.len());
        self.index.insert(board.clone(), id);
        self.states.push(State::new(board));
        id
    }

    fn expand(&mut self, board: &Board, player: Player) -> Result<()> {
        for (row, col) in board.empty_positions() {
            let next = board.with_move(row, col, player)?;
            if self.index.contains_key(&next) {
                continue;
            }
            let id = self.insert(next.clone());
            if !self.states[id.0].is_terminal() {
                self.expand(&next, player.opponent())?;
            }
        }
        Ok(())
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The all-empty starting state.
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// Get a state by id. Panics on an id from a different space.
    pub fn get(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    pub fn lookup(&self, board: &Board) -> Option<StateId> {
        self.index.get(board).copied()
    }

    /// Successor of `id` after `player` marks `(row, col)`.
    pub fn next(&self, id: StateId, row: usize, col: usize, player: Player) -> Result<StateId> {
        let board = self.get(id).board().with_move(row, col, player)?;
        self.lookup(&board).ok_or_else(|| Error::UnknownState {
            board: board.encode(),
        })
    }

    /// Legal moves from `id` for `player`, as `(row, col, successor)` in scan order.
    pub fn successors(&self, id: StateId, player: Player) -> Result<Vec<(usize, usize, StateId)>> {
        let board = self.get(id).board();
        board
            .empty_positions()
            .into_iter()
            .map(|(row, col)| Ok((row, col, self.next(id, row, col, player)?)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(idx, state)| (StateId(idx), state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_by_one_board() {
        let space = StateSpace::enumerate(1).unwrap();
        assert_eq!(space.len(), 2);
        let (_, terminal) = space.iter().nth(1).unwrap();
        assert!(terminal.is_won_by(Player::X));
    }

    #[test]
    fn test_initial_state_is_empty_and_open() {
        let space = StateSpace::enumerate(3).unwrap();
        let initial = space.get(space.initial());
        assert_eq!(initial.board().occupied_count(), 0);
        assert!(!initial.is_terminal());
    }

    #[test]
    fn test_next_follows_lookup() {
        let space = StateSpace::enumerate(3).unwrap();
        let id = space.next(space.initial(), 1, 1, Player::X).unwrap();
        assert_eq!(space.get(id).board().encode(), "....X....");
        assert!(matches!(
            space.next(id, 1, 1, Player::O),
            Err(Error::OccupiedCell { .. })
        ));
    }

    #[test]
    fn test_unreachable_board_is_unknown() {
        let space = StateSpace::enumerate(3).unwrap();
        // O moving first never happens from the empty board.
        assert!(matches!(
            space.next(space.initial(), 0, 0, Player::O),
            Err(Error::UnknownState { .. })
        ));
    }

    #[test]
    fn test_successors_scan_order() {
        let space = StateSpace::enumerate(3).unwrap();
        let moves = space.successors(space.initial(), Player::X).unwrap();
        assert_eq!(moves.len(), 9);
        assert_eq!((moves[0].0, moves[0].1), (0, 0));
        assert_eq!((moves[8].0, moves[8].1), (2, 2));
    }
}
