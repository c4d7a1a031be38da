//! Short-corridor policy-gradient experiment
//!
//! | Piece | Role |
//! |-------|------|
//! | [`ShortCorridor`] | four-cell corridor, cell 1 swaps left and right |
//! | [`ReinforceAgent`] | softmax policy learned with REINFORCE |
//! | [`run_experiment`] | many independent trials on the worker pool, averaged |
//! | [`true_start_value`] | closed-form value for a fixed `p(right)` |

pub mod analytic;
pub mod environment;
pub mod experiment;
pub mod reinforce;

pub use analytic::{linspace, optimal_p_right, true_start_value};
pub use environment::{GOAL, ShortCorridor};
pub use experiment::{CorridorCurves, TrialResult, run_experiment, run_trial};
pub use reinforce::{POLICY_FLOOR, ReinforceAgent};
