//! Adapters implementing the ports.

pub mod external;

pub use external::{ExternalAgent, LineReader, MoveSource, ScriptedMoves};
