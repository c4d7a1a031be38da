//! Self-play session pipeline
//!
//! This module provides:
//! - Training two value-learning agents against each other
//! - Greedy competition between the learned tables
//! - A single game of a learned table against an external agent
//! - Observers reporting on each session

pub mod observers;
pub mod self_play;

pub use observers::{LogObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use self_play::{MatchSummary, SelfPlay};

pub use crate::ports::Observer;
