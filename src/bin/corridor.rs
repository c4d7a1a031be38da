//! REINFORCE on the short corridor, averaged over many parallel trials.

use anyhow::{Context, Result};
use rlbook::{
    app::{DemoConfig, init_tracing},
    corridor::{optimal_p_right, run_experiment},
};

fn main() -> Result<()> {
    init_tracing("info");

    let config = DemoConfig::from_env()
        .context("failed to load configuration")?
        .corridor;

    let curves = run_experiment(&config).context("corridor experiment failed")?;

    if let (Some(rewards), Some(p_right)) =
        (curves.mean_rewards_sum.last(), curves.mean_p_right.last())
    {
        println!(
            "{} trials x {} episodes: final mean return {rewards:.2}, final p(right) {p_right:.3}",
            curves.trials,
            curves.episodes()
        );
    }
    if let Some((p, value)) = optimal_p_right(10_000) {
        println!("optimal p(right) {p:.3} with start value {value:.2}");
    }

    if let Some(path) = &config.csv_output {
        curves
            .write_csv(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "curves written");
    }

    Ok(())
}
