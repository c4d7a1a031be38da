//! REINFORCE Monte-Carlo policy-gradient agent (episodic)

use rand::Rng;

/// Smallest probability either action may have
pub const POLICY_FLOOR: f64 = 0.05;

/// Action features: row = feature, column = action (0 = left, 1 = right).
const FEATURES: [[f64; 2]; 2] = [[0.0, 1.0], [1.0, 0.0]];

/// Softmax-in-preferences policy over {left, right} learned with REINFORCE
#[derive(Debug, Clone)]
pub struct ReinforceAgent {
    theta: [f64; 2],
    alpha: f64,
    gamma: f64,
    rewards: Vec<f64>,
    actions: Vec<bool>,
}

impl ReinforceAgent {
    /// Start from a left-ε-greedy policy.
    pub fn new(alpha: f64, gamma: f64) -> Self {
        Self {
            theta: [-1.47, 1.47],
            alpha,
            gamma,
            rewards: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn theta(&self) -> [f64; 2] {
        self.theta
    }

    /// Action probabilities `[left, right]`.
    ///
    /// The less likely action is clamped up to [`POLICY_FLOOR`] so the policy
    /// never becomes deterministic and every episode terminates.
    pub fn policy(&self) -> [f64; 2] {
        let h = [0, 1].map(|action| {
            FEATURES
                .iter()
                .zip(self.theta)
                .map(|(row, weight)| weight * row[action])
                .sum::<f64>()
        });
        let max = h[0].max(h[1]);
        let exp = h.map(|v| (v - max).exp());
        let total = exp[0] + exp[1];
        let mut pmf = exp.map(|v| v / total);

        let imin = if pmf[0] <= pmf[1] { 0 } else { 1 };
        if pmf[imin] < POLICY_FLOOR {
            pmf = [1.0 - POLICY_FLOOR; 2];
            pmf[imin] = POLICY_FLOOR;
        }
        pmf
    }

    pub fn p_right(&self) -> f64 {
        self.policy()[1]
    }

    /// Record the reward of the previous step (if any) and sample an action.
    pub fn choose_action<R: Rng>(&mut self, reward: Option<f64>, rng: &mut R) -> bool {
        if let Some(reward) = reward {
            self.rewards.push(reward);
        }
        let go_right = rng.random_bool(self.p_right());
        self.actions.push(go_right);
        go_right
    }

    /// Close the episode: compute returns and apply the policy-gradient update.
    pub fn episode_end(&mut self, last_reward: f64) {
        self.rewards.push(last_reward);

        let mut returns = vec![0.0; self.rewards.len()];
        let mut g = 0.0;
        for (ret, reward) in returns.iter_mut().zip(&self.rewards).rev() {
            g = self.gamma * g + reward;
            *ret = g;
        }

        let mut gamma_pow = 1.0;
        for (&go_right, ret) in self.actions.iter().zip(returns) {
            let action = usize::from(go_right);
            let pmf = self.policy();
            for (weight, row) in self.theta.iter_mut().zip(FEATURES) {
                let expected = row[0] * pmf[0] + row[1] * pmf[1];
                let grad_ln_pi = row[action] - expected;
                *weight += self.alpha * gamma_pow * ret * grad_ln_pi;
            }
            gamma_pow *= self.gamma;
        }

        self.rewards.clear();
        self.actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_initial_policy_is_left_epsilon_greedy() {
        let agent = ReinforceAgent::new(2e-4, 1.0);
        let pmf = agent.policy();
        assert!((pmf[1] - POLICY_FLOOR).abs() < 1e-3);
        assert!(pmf[0] > 0.94);
    }

    #[test]
    fn test_floor_clamps_extreme_preferences() {
        let mut agent = ReinforceAgent::new(2e-4, 1.0);
        agent.theta = [10.0, -10.0];
        assert_eq!(agent.policy(), [POLICY_FLOOR, 1.0 - POLICY_FLOOR]);
    }

    #[test]
    fn test_policy_sums_to_one_without_clamp() {
        let mut agent = ReinforceAgent::new(2e-4, 1.0);
        agent.theta = [0.3, -0.2];
        let pmf = agent.policy();
        assert!((pmf[0] + pmf[1] - 1.0).abs() < 1e-12);
        // h = [theta1, theta0], so right is favoured when theta0 > theta1
        assert!(pmf[1] > pmf[0]);
    }

    #[test]
    fn test_update_moves_toward_rewarded_action() {
        let mut agent = ReinforceAgent::new(0.1, 1.0);
        agent.theta = [0.0, 0.0];
        let before = agent.p_right();

        // A single step going right that earned a positive return.
        agent.actions.push(true);
        agent.episode_end(1.0);
        assert!(agent.p_right() > before);
        assert!(agent.rewards.is_empty() && agent.actions.is_empty());
    }

    #[test]
    fn test_choose_action_records_history() {
        let mut agent = ReinforceAgent::new(2e-4, 1.0);
        let mut rng = StdRng::seed_from_u64(5);
        agent.choose_action(None, &mut rng);
        agent.choose_action(Some(-1.0), &mut rng);
        assert_eq!(agent.actions.len(), 2);
        assert_eq!(agent.rewards, vec![-1.0]);
    }
}
