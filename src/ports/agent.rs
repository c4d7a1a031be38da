//! Agent port - abstraction over players driven by the referee
//!
//! This port defines the interface both player variants implement:
//! - Learned-policy agents backed by a value table ([`crate::td::TdAgent`])
//! - Externally driven agents ([`crate::adapters::ExternalAgent`])

use std::fmt;

use crate::{
    Result,
    td::ValueTable,
    tictactoe::{Player, StateId, StateSpace},
};

/// A move proposed by an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub row: usize,
    pub col: usize,
    pub role: Player,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at ({}, {})", self.role, self.row, self.col)
    }
}

/// Agent trait - unified interface for anything the referee can seat
///
/// # Event Sequence
///
/// For each episode the referee calls:
/// 1. `reset()` - clear per-episode state
/// 2. `observe(initial)` - the starting state
/// 3. Alternating `act(...)` on the mover, followed by `observe(next)` on
///    both agents
/// 4. `reward(signal)` on both agents when feedback is enabled
pub trait Agent: Send {
    /// Get the agent's name.
    ///
    /// Used for identification in logs and errors.
    fn name(&self) -> &str;

    /// Which mark this agent places.
    fn role(&self) -> Player;

    /// Clear per-episode state (trajectory, current position).
    fn reset(&mut self);

    /// Record a state the game passed through.
    fn observe(&mut self, state: StateId);

    /// Choose a move from the most recently observed state.
    ///
    /// # Errors
    ///
    /// Returns an error if no state was observed yet or the state has no
    /// legal moves.
    fn act(&mut self, space: &StateSpace) -> Result<Action>;

    /// Receive the terminal reward for the episode.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for agents that do not learn.
    fn reward(&mut self, _signal: f64) {}

    /// The agent's value table, if it keeps one.
    fn value_table(&self) -> Option<&ValueTable> {
        None
    }
}
