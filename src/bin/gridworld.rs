//! State values of the 5×5 teleport gridworld.

use anyhow::{Context, Result};
use rlbook::{
    app::{DemoConfig, init_tracing},
    gridworld::{evaluate_random_policy, format_grid, optimal_values},
};

fn main() -> Result<()> {
    init_tracing("info");

    let config = DemoConfig::from_env()
        .context("failed to load configuration")?
        .gridworld;

    let random = evaluate_random_policy(&config).context("policy evaluation failed")?;
    println!("Random policy ({} sweeps):", random.sweeps);
    println!("{}", format_grid(&random.values));

    let optimal = optimal_values(&config).context("value iteration failed")?;
    println!("\nOptimal values ({} sweeps):", optimal.sweeps);
    println!("{}", format_grid(&optimal.values));

    Ok(())
}
