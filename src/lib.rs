//! Reinforcement-learning textbook demos
//!
//! This crate provides:
//! - Tic-tac-toe state-space enumeration and TD(0) value learning by self-play
//! - A referee that runs matches between any two agents, human ones included
//! - A fixed-size worker pool with a fork-join barrier for independent trials
//! - REINFORCE on the short corridor with switched actions
//! - Bellman sweeps on the 5×5 teleport gridworld

pub mod adapters;
pub mod app;
pub mod corridor;
pub mod error;
pub mod gridworld;
pub mod pipeline;
pub mod ports;
pub mod referee;
pub mod scheduler;
pub mod td;
pub mod tictactoe;

pub use error::{Error, Result};
