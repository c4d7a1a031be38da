//! 5×5 gridworld with two teleporting cells, solved by Bellman sweeps
//!
//! Moving off the edge leaves the agent in place with reward −1. Any action
//! taken in A teleports to A' with reward +10, and any action in B teleports to
//! B' with reward +5. Every other move earns 0.

use crate::{Result, app::GridworldConfig};

pub const WORLD_SIZE: usize = 5;
const A_POS: (usize, usize) = (0, 1);
const A_PRIME_POS: (usize, usize) = (4, 1);
const B_POS: (usize, usize) = (0, 3);
const B_PRIME_POS: (usize, usize) = (2, 3);

/// Left, up, right, down as `(d_row, d_col)`
const ACTIONS: [(isize, isize); 4] = [(0, -1), (-1, 0), (0, 1), (1, 0)];
const ACTION_PROB: f64 = 0.25;

pub type Grid = [[f64; WORLD_SIZE]; WORLD_SIZE];

/// Converged values and the number of sweeps it took
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub values: Grid,
    pub sweeps: usize,
}

impl Sweep {
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

fn step(state: (usize, usize), action: (isize, isize)) -> ((usize, usize), f64) {
    if state == A_POS {
        return (A_PRIME_POS, 10.0);
    }
    if state == B_POS {
        return (B_PRIME_POS, 5.0);
    }

    let row = state.0.checked_add_signed(action.0);
    let col = state.1.checked_add_signed(action.1);
    match (row, col) {
        (Some(r), Some(c)) if r < WORLD_SIZE && c < WORLD_SIZE => ((r, c), 0.0),
        _ => (state, -1.0),
    }
}

fn sweep_until_stable<F>(config: &GridworldConfig, backup: F) -> Result<Sweep>
where
    F: Fn(&Grid, (usize, usize)) -> f64,
{
    config.validate()?;

    let mut values = [[0.0; WORLD_SIZE]; WORLD_SIZE];
    let mut sweeps = 0;
    loop {
        let mut next = [[0.0; WORLD_SIZE]; WORLD_SIZE];
        for (row, cells) in next.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = backup(&values, (row, col));
            }
        }
        sweeps += 1;

        let delta: f64 = values
            .iter()
            .flatten()
            .zip(next.iter().flatten())
            .map(|(old, new)| (old - new).abs())
            .sum();
        values = next;
        if delta <= config.tolerance {
            tracing::debug!(sweeps, delta, "gridworld sweep converged");
            return Ok(Sweep { values, sweeps });
        }
    }
}

/// Evaluate the equiprobable random policy.
pub fn evaluate_random_policy(config: &GridworldConfig) -> Result<Sweep> {
    let gamma = config.discount;
    sweep_until_stable(config, |values, state| {
        ACTIONS
            .iter()
            .map(|&action| {
                let ((r, c), reward) = step(state, action);
                ACTION_PROB * (reward + gamma * values[r][c])
            })
            .sum()
    })
}

/// Optimal state values by value iteration.
pub fn optimal_values(config: &GridworldConfig) -> Result<Sweep> {
    let gamma = config.discount;
    sweep_until_stable(config, |values, state| {
        ACTIONS
            .iter()
            .map(|&action| {
                let ((r, c), reward) = step(state, action);
                reward + gamma * values[r][c]
            })
            .fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Render a grid with one decimal place per cell.
pub fn format_grid(values: &Grid) -> String {
    values
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{v:6.1}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
