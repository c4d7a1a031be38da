//! Ports (trait boundaries) between the game core and its players and observers.

pub mod agent;
pub mod observer;

pub use agent::{Action, Agent};
pub use observer::Observer;
