//! Tic-tac-toe TD(0) self-play: train, compete, and optionally play a human.
//!
//! Settings come from the JSON file named by `RLBOOK_CONFIG`, defaults otherwise.

use std::io::{self, BufReader};

use anyhow::{Context, Result};
use rlbook::{
    adapters::LineReader,
    app::{DemoConfig, init_tracing},
    pipeline::{LogObserver, ProgressObserver, SelfPlay},
    tictactoe::GameOutcome,
};

fn main() -> Result<()> {
    init_tracing("info");

    let config = DemoConfig::from_env()
        .context("failed to load configuration")?
        .tictactoe;

    let mut session =
        SelfPlay::new(config.clone()).context("failed to enumerate the state space")?;
    tracing::info!(states = session.space().len(), "state space ready");

    if config.progress {
        session = session.with_observer(Box::new(ProgressObserver::new()));
    }
    if config.log_every > 0 {
        session = session.with_observer(Box::new(LogObserver::new(config.log_every)));
    }

    let trained = session
        .train(config.train_epochs)
        .context("self-play training failed")?;
    println!(
        "Epoch {}, player 1 winrate: {:.02}, player 2 winrate: {:.02}",
        trained.games,
        trained.first_win_rate(),
        trained.second_win_rate()
    );

    if let Some(dir) = &config.save_dir {
        session
            .save_tables(dir)
            .with_context(|| format!("failed to save value tables to {}", dir.display()))?;
    }

    let competed = session
        .compete(config.compete_turns)
        .context("competition failed")?;
    println!(
        "{} turns, player 1 win {:.02}, player 2 win {:.02}",
        competed.games,
        competed.first_win_rate(),
        competed.second_win_rate()
    );

    if config.interactive {
        let reader = LineReader::new(BufReader::new(io::stdin()), io::stdout());
        let outcome = session
            .play_external(reader, config.human_role)
            .context("interactive game failed")?;
        match outcome {
            GameOutcome::Win(player) => println!("{player:?} wins!"),
            GameOutcome::Draw => println!("It is a tie!"),
        }
    }

    Ok(())
}
