//! Observer port - abstraction for watching self-play sessions
//!
//! Observers receive session events without the session knowing how they are
//! reported (progress bars, log lines, tallies).

use crate::{Result, tictactoe::GameOutcome};

/// Observer trait for monitoring a session of games
///
/// # Event Sequence
///
/// 1. `on_session_start(label, total_games)` - once
/// 2. `on_game_end(game_num, outcome)` - after every game
/// 3. `on_session_end()` - once
///
/// # Examples
///
/// ```no_run
/// use rlbook::{ports::Observer, tictactoe::GameOutcome};
///
/// struct CountingObserver {
///     games: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> rlbook::Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_session_start(&mut self, _label: &str, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each game reaches a terminal state.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_session_end(&mut self) -> Result<()> {
        Ok(())
    }
}
