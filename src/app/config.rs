//! Configuration types for the demos.
//!
//! Every demo runs without flags; settings come from defaults matching the
//! book experiments, optionally overridden by a JSON file named in the
//! `RLBOOK_CONFIG` environment variable.
//!
//! # Examples
//!
//! ```
//! use rlbook::app::DemoConfig;
//!
//! let config: DemoConfig = serde_json::from_str(r#"{ "tictactoe": { "train_epochs": 500 } }"#)?;
//! assert_eq!(config.tictactoe.train_epochs, 500);
//! assert_eq!(config.tictactoe.dimension, 3);
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, referee::DrawRewards, td::TdAgentConfig, tictactoe::Player};

/// Environment variable naming an optional JSON configuration file
pub const CONFIG_ENV: &str = "RLBOOK_CONFIG";

/// Largest board side the tic-tac-toe demo accepts
pub const MAX_DIMENSION: usize = 3;

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfiguration {
        message: message.into(),
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be within [0, 1], got {value}")))
    }
}

/// Settings of the tic-tac-toe value-learning demo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeConfig {
    /// Board side length
    pub dimension: usize,
    /// Self-play training games
    pub train_epochs: usize,
    /// Greedy evaluation games
    pub compete_turns: usize,
    /// Learner hyperparameters shared by both seats
    pub agent: TdAgentConfig,
    /// Rewards for the two seats on a draw
    pub draw_rewards: DrawRewards,
    /// Base seed; X uses it as is, O uses seed + 1
    pub seed: Option<u64>,
    /// Show a progress bar per session
    pub progress: bool,
    /// Emit a log line every this many games; 0 disables it. Log lines
    /// interleave with the progress bar, so enable at most one of the two.
    pub log_every: usize,
    /// Play one game against standard input after competing
    pub interactive: bool,
    /// Mark placed by the human in the interactive game
    pub human_role: Player,
    /// Directory for the learned value tables
    pub save_dir: Option<PathBuf>,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            dimension: 3,
            train_epochs: 100_000,
            compete_turns: 1_000,
            agent: TdAgentConfig::default(),
            draw_rewards: DrawRewards::default(),
            seed: None,
            progress: true,
            log_every: 0,
            interactive: false,
            human_role: Player::O,
            save_dir: None,
        }
    }
}

impl TicTacToeConfig {
    pub fn validate(&self) -> Result<()> {
        // 4x4 has close to ten million reachable states.
        if !(1..=MAX_DIMENSION).contains(&self.dimension) {
            return Err(invalid(format!(
                "dimension must be between 1 and {MAX_DIMENSION}, got {}",
                self.dimension
            )));
        }
        check_probability("agent.step_size", self.agent.step_size)?;
        check_probability("agent.explore_rate", self.agent.explore_rate)?;
        Ok(())
    }
}

/// Settings of the short-corridor policy-gradient demo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    /// Independent trials
    pub trials: usize,
    /// Episodes per trial
    pub episodes: usize,
    /// Policy step size α
    pub alpha: f64,
    /// Discount γ
    pub gamma: f64,
    /// Worker threads; defaults to one less than the available cores
    pub workers: Option<usize>,
    /// Base seed; trial `i` uses seed + i
    pub seed: Option<u64>,
    /// Write the averaged curves to this CSV file
    pub csv_output: Option<PathBuf>,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            trials: 1_000,
            episodes: 1_000,
            alpha: 2e-4,
            gamma: 1.0,
            workers: None,
            seed: None,
            csv_output: None,
        }
    }
}

impl CorridorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 || self.episodes == 0 {
            return Err(invalid("trials and episodes must be positive"));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(invalid(format!("alpha must be positive, got {}", self.alpha)));
        }
        check_probability("gamma", self.gamma)?;
        if self.workers == Some(0) {
            return Err(invalid("workers must be at least 1"));
        }
        Ok(())
    }

    /// Worker count to use, resolving the default.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get().saturating_sub(1))
                .unwrap_or(1)
                .max(1)
        })
    }
}

/// Settings of the gridworld value sweeps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridworldConfig {
    /// Stop once the summed absolute change of a sweep is at most this
    pub tolerance: f64,
    /// Discount γ
    pub discount: f64,
}

impl Default for GridworldConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            discount: 0.9,
        }
    }
}

impl GridworldConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(invalid(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        // γ = 1 never contracts on this continuing task.
        if !(0.0..1.0).contains(&self.discount) {
            return Err(invalid(format!(
                "discount must be within [0, 1), got {}",
                self.discount
            )));
        }
        Ok(())
    }
}

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub tictactoe: TicTacToeConfig,
    pub corridor: CorridorConfig,
    pub gridworld: GridworldConfig,
}

impl DemoConfig {
    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: DemoConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by [`CONFIG_ENV`], or fall back to defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.tictactoe.validate()?;
        self.corridor.validate()?;
        self.gridworld.validate()
    }
}
