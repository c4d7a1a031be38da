//! Trials of REINFORCE on the short corridor, run in parallel and averaged

use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{environment::ShortCorridor, reinforce::ReinforceAgent};
use crate::{
    Result,
    app::CorridorConfig,
    scheduler::{WorkerPool, run_trials},
};

/// Per-episode measurements of one trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Undiscounted return of each episode
    pub rewards_sum: Vec<f64>,
    /// Probability of going right after each episode's update
    pub p_right: Vec<f64>,
}

/// Run one fresh agent for `episodes` episodes.
pub fn run_trial<R: Rng>(episodes: usize, alpha: f64, gamma: f64, rng: &mut R) -> TrialResult {
    let mut env = ShortCorridor::new();
    let mut agent = ReinforceAgent::new(alpha, gamma);
    let mut rewards_sum = Vec::with_capacity(episodes);
    let mut p_right = Vec::with_capacity(episodes);

    for _ in 0..episodes {
        env.reset();
        let mut total = 0.0;
        let mut reward = None;
        loop {
            let go_right = agent.choose_action(reward, rng);
            let (step_reward, done) = env.step(go_right);
            total += step_reward;
            if done {
                agent.episode_end(step_reward);
                break;
            }
            reward = Some(step_reward);
        }
        rewards_sum.push(total);
        p_right.push(agent.p_right());
    }

    TrialResult {
        rewards_sum,
        p_right,
    }
}

/// Curves averaged over all trials, one entry per episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorridorCurves {
    pub trials: usize,
    pub mean_rewards_sum: Vec<f64>,
    pub mean_p_right: Vec<f64>,
}

#[derive(Serialize)]
struct CurveRow {
    episode: usize,
    mean_rewards_sum: f64,
    mean_p_right: f64,
}

impl CorridorCurves {
    /// Average trial results episode by episode.
    pub fn average(results: &[TrialResult], episodes: usize) -> Self {
        let mut mean_rewards_sum = vec![0.0; episodes];
        let mut mean_p_right = vec![0.0; episodes];
        let n = results.len().max(1) as f64;

        for result in results {
            for (acc, value) in mean_rewards_sum.iter_mut().zip(&result.rewards_sum) {
                *acc += value / n;
            }
            for (acc, value) in mean_p_right.iter_mut().zip(&result.p_right) {
                *acc += value / n;
            }
        }

        Self {
            trials: results.len(),
            mean_rewards_sum,
            mean_p_right,
        }
    }

    pub fn episodes(&self) -> usize {
        self.mean_rewards_sum.len()
    }

    /// Write `episode,mean_rewards_sum,mean_p_right` rows (episodes numbered from 1).
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for (idx, (&mean_rewards_sum, &mean_p_right)) in self
            .mean_rewards_sum
            .iter()
            .zip(&self.mean_p_right)
            .enumerate()
        {
            writer.serialize(CurveRow {
                episode: idx + 1,
                mean_rewards_sum,
                mean_p_right,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Run every trial on a fixed worker pool and average the results.
///
/// With a seed, trial `i` draws from its own generator seeded with
/// `seed + i`, so the curves do not depend on scheduling.
pub fn run_experiment(config: &CorridorConfig) -> Result<CorridorCurves> {
    config.validate()?;

    let mut pool = WorkerPool::new(config.worker_count())?;
    let episodes = config.episodes;
    let alpha = config.alpha;
    let gamma = config.gamma;
    let seed = config.seed;

    tracing::info!(
        trials = config.trials,
        episodes,
        workers = pool.worker_count(),
        "starting corridor experiment"
    );

    let results = run_trials(&pool, config.trials, move |index| {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let result = run_trial(episodes, alpha, gamma, &mut rng);
        tracing::debug!(trial = index, "trial finished");
        result
    })?;
    pool.shutdown();

    Ok(CorridorCurves::average(&results, episodes))
}
