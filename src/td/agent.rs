//! Learned-policy agent
//!
//! Chooses moves ε-greedily against its own [`ValueTable`] and learns from the
//! terminal reward with a backward TD(0) sweep over the states it visited.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Action, Agent},
    td::value_table::ValueTable,
    tictactoe::{Player, StateId, StateSpace},
};

/// Hyperparameters of a [`TdAgent`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TdAgentConfig {
    /// Step size α of the TD update
    pub step_size: f64,
    /// Probability ε of a uniformly random move
    pub explore_rate: f64,
    /// Drop the visited-state history when an exploratory move is made, so
    /// only the greedy tail of the episode is backed up
    pub reset_trajectory_on_explore: bool,
    /// Seed for the agent's own generator
    pub seed: Option<u64>,
}

impl Default for TdAgentConfig {
    fn default() -> Self {
        Self {
            step_size: 0.1,
            explore_rate: 0.1,
            reset_trajectory_on_explore: true,
            seed: None,
        }
    }
}

impl TdAgentConfig {
    /// Greedy evaluation settings: no exploration.
    pub fn greedy() -> Self {
        Self {
            explore_rate: 0.0,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Value-table agent trained by self-play
#[derive(Debug, Clone)]
pub struct TdAgent {
    name: String,
    table: ValueTable,
    step_size: f64,
    explore_rate: f64,
    reset_trajectory_on_explore: bool,
    trajectory: Vec<StateId>,
    current: Option<StateId>,
    rng: StdRng,
}

impl TdAgent {
    /// Create an agent for `role` with a freshly initialized value table.
    pub fn new(role: Player, space: &StateSpace, config: &TdAgentConfig) -> Self {
        Self {
            name: format!("TD-{role:?}"),
            table: ValueTable::for_role(space, role),
            step_size: config.step_size,
            explore_rate: config.explore_rate,
            reset_trajectory_on_explore: config.reset_trajectory_on_explore,
            trajectory: Vec::new(),
            current: None,
            rng: build_rng(config.seed),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the value table, e.g. with one trained earlier.
    ///
    /// # Errors
    ///
    /// Returns an error if the table was built against a state space of a
    /// different size.
    pub fn with_value_table(mut self, table: ValueTable) -> Result<Self> {
        if table.len() != self.table.len() {
            return Err(Error::ValueTableMismatch {
                expected: self.table.len(),
                got: table.len(),
            });
        }
        self.table = table;
        Ok(self)
    }

    pub fn into_value_table(self) -> ValueTable {
        self.table
    }

    pub fn explore_rate(&self) -> f64 {
        self.explore_rate
    }

    pub fn set_explore_rate(&mut self, explore_rate: f64) {
        self.explore_rate = explore_rate;
    }

    /// States recorded since the last reset or reward.
    pub fn trajectory(&self) -> &[StateId] {
        &self.trajectory
    }
}

impl Agent for TdAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Player {
        self.table.role()
    }

    fn reset(&mut self) {
        self.trajectory.clear();
        self.current = None;
    }

    fn observe(&mut self, state: StateId) {
        self.trajectory.push(state);
        self.current = Some(state);
    }

    fn act(&mut self, space: &StateSpace) -> Result<Action> {
        let current = self.current.ok_or_else(|| Error::NoCurrentState {
            agent: self.name.clone(),
        })?;
        let role = self.role();
        let candidates = space.successors(current, role)?;
        if candidates.is_empty() {
            return Err(Error::NoValidMoves {
                board: space.get(current).board().encode(),
            });
        }

        if self.rng.random::<f64>() < self.explore_rate {
            // Explore: uniformly random legal move
            let &(row, col, _) = candidates
                .choose(&mut self.rng)
                .ok_or_else(|| Error::NoValidMoves {
                    board: space.get(current).board().encode(),
                })?;
            if self.reset_trajectory_on_explore {
                self.trajectory.clear();
            }
            return Ok(Action { row, col, role });
        }

        // Exploit: first successor with the highest estimate in scan order
        let mut best = candidates[0];
        let mut best_value = f64::NEG_INFINITY;
        for &(row, col, next) in &candidates {
            let value = self.table.get(next);
            if value > best_value {
                best_value = value;
                best = (row, col, next);
            }
        }
        Ok(Action {
            row: best.0,
            col: best.1,
            role,
        })
    }

    fn reward(&mut self, signal: f64) {
        if self.trajectory.is_empty() {
            return;
        }
        self.table.backup(&self.trajectory, signal, self.step_size);
        self.trajectory.clear();
    }

    fn value_table(&self) -> Option<&ValueTable> {
        Some(&self.table)
    }
}
