//! Temporal difference value learning
//!
//! Each learned-policy agent owns a [`ValueTable`] over the enumerated state
//! space. After an episode the terminal reward is pushed back through the
//! visited states, last to first:
//!
//! | Step | Target | Update |
//! |------|--------|--------|
//! | last state | terminal reward r | V ← V + α(r − V) |
//! | earlier state | V of the later state, already updated | V ← V + α(V' − V) |
//!
//! ## Usage Example
//!
//! ```no_run
//! use rlbook::td::{TdAgent, TdAgentConfig};
//! use rlbook::tictactoe::{Player, StateSpace};
//!
//! let space = StateSpace::enumerate(3).unwrap();
//! let agent = TdAgent::new(Player::X, &space, &TdAgentConfig::default());
//! ```

pub mod agent;
pub mod serialization;
pub mod value_table;

pub use agent::{TdAgent, TdAgentConfig};
pub use serialization::SavedValueTable;
pub use value_table::{NEUTRAL_VALUE, ValueTable};
