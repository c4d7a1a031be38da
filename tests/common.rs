//! Shared helpers for the integration tests.

#![allow(dead_code)]

use rlbook::{
    Result,
    adapters::{ExternalAgent, ScriptedMoves},
    ports::{Action, Agent},
    tictactoe::{Player, StateId, StateSpace},
};

/// Scripted agent that keeps every reward and observed state it receives.
pub struct RecordingAgent {
    inner: ExternalAgent<ScriptedMoves>,
    pub rewards: Vec<f64>,
    pub observed: Vec<StateId>,
    pub resets: usize,
}

impl RecordingAgent {
    pub fn new(role: Player, positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            inner: ExternalAgent::new(role, ScriptedMoves::new(positions)),
            rewards: Vec::new(),
            observed: Vec::new(),
            resets: 0,
        }
    }
}

impl Agent for RecordingAgent {
    fn name(&self) -> &str {
        "recording"
    }

    fn role(&self) -> Player {
        self.inner.role()
    }

    fn reset(&mut self) {
        self.resets += 1;
        self.observed.clear();
        self.inner.reset();
    }

    fn observe(&mut self, state: StateId) {
        self.observed.push(state);
        self.inner.observe(state);
    }

    fn act(&mut self, space: &StateSpace) -> Result<Action> {
        self.inner.act(space)
    }

    fn reward(&mut self, signal: f64) {
        self.rewards.push(signal);
    }
}

/// Positions of a full 3×3 game that ends in a draw
///
/// ```text
/// X O X
/// X O O
/// O X X
/// ```
pub const DRAW_X: [usize; 5] = [0, 2, 3, 7, 8];
pub const DRAW_O: [usize; 4] = [1, 4, 5, 6];

/// X completes the top row on its third move.
pub const WIN_X: [usize; 3] = [0, 1, 2];
pub const WIN_X_O: [usize; 2] = [3, 4];
