//! Observer adapters for self-play sessions
//!
//! Observers allow composable reporting during training and competition without
//! coupling the session loop to an output format.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{GameOutcome, Player},
};

/// Progress bar observer - Shows session progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_session_start(&mut self, label: &str, total_games: usize) -> Result<()> {
        self.x_wins = 0;
        self.o_wins = 0;
        self.draws = 0;

        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        pb.set_prefix(label.to_string());
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Log observer - emits a `tracing` event every `every` games
pub struct LogObserver {
    label: String,
    every: usize,
}

impl LogObserver {
    pub fn new(every: usize) -> Self {
        Self {
            label: String::new(),
            every: every.max(1),
        }
    }
}

impl Observer for LogObserver {
    fn on_session_start(&mut self, label: &str, total_games: usize) -> Result<()> {
        self.label = label.to_string();
        tracing::info!(session = %self.label, total_games, "session started");
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        if game_num.is_multiple_of(self.every) {
            tracing::info!(session = %self.label, epoch = game_num, ?outcome, "epoch");
        }
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        tracing::info!(session = %self.label, "session finished");
        Ok(())
    }
}

/// Metrics observer - Tracks outcome tallies
#[derive(Debug, Default)]
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    total_games: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        let rate = |count: usize| {
            if self.total_games == 0 {
                0.0
            } else {
                count as f64 / self.total_games as f64
            }
        };
        MetricsSummary {
            total_games: self.total_games,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            x_win_rate: rate(self.x_wins),
            o_win_rate: rate(self.o_wins),
            draw_rate: rate(self.draws),
        }
    }
}

/// Summary of session metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.total_games += 1;
        Ok(())
    }
}
