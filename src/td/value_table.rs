//! Per-agent state-value table for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Player, StateId, StateSpace};

/// Initial estimate for every non-terminal state
pub const NEUTRAL_VALUE: f64 = 0.5;

/// State-value table owned by a single agent
///
/// Indexed by [`StateId`] of the state space it was built against, so the
/// table length always equals the number of enumerated states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    role: Player,
    values: Vec<f64>,
}

impl ValueTable {
    /// Initialize a table from the point of view of `role`.
    ///
    /// Terminal states start at 1.0 when `role` won them and 0.0 otherwise;
    /// every other state starts at [`NEUTRAL_VALUE`].
    pub fn for_role(space: &StateSpace, role: Player) -> Self {
        let values = space
            .iter()
            .map(|(_, state)| {
                if state.is_terminal() {
                    if state.is_won_by(role) { 1.0 } else { 0.0 }
                } else {
                    NEUTRAL_VALUE
                }
            })
            .collect();
        Self { role, values }
    }

    pub(crate) fn from_parts(role: Player, values: Vec<f64>) -> Self {
        Self { role, values }
    }

    pub fn role(&self) -> Player {
        self.role
    }

    pub fn get(&self, id: StateId) -> f64 {
        self.values[id.index()]
    }

    pub fn set(&mut self, id: StateId, value: f64) {
        self.values[id.index()] = value;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Backward TD(0) sweep over one episode.
    ///
    /// V(s) ← V(s) + α[target − V(s)], visiting the trajectory last to first.
    /// The target starts at `reward` and becomes the just-updated V(s) for the
    /// next (earlier) state.
    pub fn backup(&mut self, trajectory: &[StateId], reward: f64, step_size: f64) {
        let mut target = reward;
        for &id in trajectory.iter().rev() {
            let current = self.get(id);
            let updated = current + step_size * (target - current);
            self.set(id, updated);
            target = updated;
        }
    }
}
