//! Tic-Tac-Toe board and reachable state space

pub mod board;
pub mod state_space;

pub use board::{Board, Cell, GameOutcome, Player};
pub use state_space::{State, StateId, StateSpace};
