//! Parallel trial scheduling
//!
//! A fixed [`WorkerPool`] runs independent trials; [`run_trials`] submits one
//! job per trial and blocks on a [`ResultTable`] until all of them have
//! reported. There are no dependencies between trials and no cancellation.

pub mod pool;
pub mod trials;

pub use pool::{PoolState, WorkerPool};
pub use trials::{ResultTable, run_trials};
