//! Application layer: configuration and logging setup for the demo binaries.

pub mod config;
pub mod telemetry;

pub use config::{
    CONFIG_ENV, CorridorConfig, DemoConfig, GridworldConfig, MAX_DIMENSION, TicTacToeConfig,
};
pub use telemetry::init_tracing;
