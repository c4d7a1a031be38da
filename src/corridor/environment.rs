//! Short corridor with switched actions

/// Index of the terminal cell
pub const GOAL: usize = 3;

/// Four-cell corridor; in cell 1 the effect of left and right is swapped.
///
/// Every step costs −1 except the one that reaches the goal, which returns 0.
#[derive(Debug, Clone, Default)]
pub struct ShortCorridor {
    state: usize,
}

impl ShortCorridor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.state = 0;
    }

    pub fn state(&self) -> usize {
        self.state
    }

    /// Apply an action and return `(reward, terminated)`.
    pub fn step(&mut self, go_right: bool) -> (f64, bool) {
        self.state = match self.state {
            1 => {
                if go_right {
                    0
                } else {
                    2
                }
            }
            s if go_right => s + 1,
            s => s.saturating_sub(1),
        };

        if self.state == GOAL {
            (0.0, true)
        } else {
            (-1.0, false)
        }
    }
}
