//! Referee driving one game between two seated agents

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{GameOutcome, Player, StateId, StateSpace},
};

/// Rewards dispatched when a game ends in a draw.
///
/// The two seats are deliberately rewarded differently on a tie; the default
/// reproduces the book experiment's 0.1 / 0.5 split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRewards {
    pub first: f64,
    pub second: f64,
}

impl DrawRewards {
    pub const BOOK: DrawRewards = DrawRewards {
        first: 0.1,
        second: 0.5,
    };
}

impl Default for DrawRewards {
    fn default() -> Self {
        Self::BOOK
    }
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Terminal,
}

/// Alternates turns between two agents and hands out terminal rewards
///
/// The first seat always plays X. Both agents observe every state the game
/// passes through, including the opening position.
pub struct Referee<'a> {
    space: &'a StateSpace,
    first: &'a mut dyn Agent,
    second: &'a mut dyn Agent,
    feedback: bool,
    draw_rewards: DrawRewards,
    phase: Phase,
    current: StateId,
}

impl<'a> Referee<'a> {
    /// Seat two agents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless the first agent plays X
    /// and the second plays O.
    pub fn new(
        space: &'a StateSpace,
        first: &'a mut dyn Agent,
        second: &'a mut dyn Agent,
        feedback: bool,
    ) -> Result<Self> {
        if first.role() != Player::X || second.role() != Player::O {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "first seat must play X and second O (got {:?} and {:?})",
                    first.role(),
                    second.role()
                ),
            });
        }
        Ok(Self {
            space,
            first,
            second,
            feedback,
            draw_rewards: DrawRewards::default(),
            phase: Phase::NotStarted,
            current: space.initial(),
        })
    }

    pub fn with_draw_rewards(mut self, draw_rewards: DrawRewards) -> Self {
        self.draw_rewards = draw_rewards;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    /// Return to the opening position and clear both agents.
    pub fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
        self.current = self.space.initial();
        self.phase = Phase::NotStarted;
    }

    fn feed_current_state(&mut self) {
        self.first.observe(self.current);
        self.second.observe(self.current);
    }

    fn dispatch_rewards(&mut self, outcome: GameOutcome) {
        let (first, second) = match outcome {
            GameOutcome::Win(winner) if winner == self.first.role() => (1.0, 0.0),
            GameOutcome::Win(_) => (0.0, 1.0),
            GameOutcome::Draw => (self.draw_rewards.first, self.draw_rewards.second),
        };
        self.first.reward(first);
        self.second.reward(second);
    }

    /// Play one game to completion and return its outcome.
    ///
    /// Both agents are reset first, so nothing they observed before the game
    /// is backed up with its reward.
    pub fn play(&mut self) -> Result<GameOutcome> {
        self.reset();
        self.phase = Phase::InProgress;
        self.feed_current_state();

        let space = self.space;
        let mut first_to_move = true;
        loop {
            let agent: &mut dyn Agent = if first_to_move {
                &mut *self.first
            } else {
                &mut *self.second
            };

            let expected = space.get(self.current).board().mover();
            let action = agent.act(space)?;
            if action.role != expected {
                return Err(Error::WrongMover {
                    expected,
                    got: action.role,
                });
            }
            tracing::trace!(agent = agent.name(), %action, "move");

            self.current = space.next(self.current, action.row, action.col, action.role)?;
            self.feed_current_state();

            if let Some(outcome) = space.get(self.current).outcome() {
                self.phase = Phase::Terminal;
                if self.feedback {
                    self.dispatch_rewards(outcome);
                }
                return Ok(outcome);
            }
            first_to_move = !first_to_move;
        }
    }
}
