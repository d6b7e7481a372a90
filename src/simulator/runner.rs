//! Main simulation runner.
//!
//! Every run gets its own RNG so a seeded batch is reproducible run by run,
//! independent of which games are selected.

use super::autoplay;
use super::config::SimConfig;
use super::report::SimReport;
use crate::core::rng::{from_entropy, seeded};
use tracing::{debug, info};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize * config.games.len());

    for &game in &config.games {
        for run_idx in 0..config.num_runs {
            let mut rng = match config.seed {
                Some(seed) => seeded(seed.wrapping_add(run_idx as u64)),
                None => from_entropy(),
            };

            let stats =
                autoplay::play(game, &config.arcade, config.max_steps_per_run, &mut rng);
            debug!(
                game = game.name(),
                run = run_idx,
                won = stats.won,
                score = stats.score,
                steps = stats.steps,
                "simulated run"
            );

            if config.verbosity >= 2 {
                println!(
                    "{} run {}/{} - won {}, score {}, steps {}{}",
                    game.name(),
                    run_idx + 1,
                    config.num_runs,
                    stats.won,
                    stats.score,
                    stats.steps,
                    if stats.timed_out { " (timed out)" } else { "" }
                );
            }
            all_runs.push(stats);
        }
        info!(game = game.name(), runs = config.num_runs, "game batch done");
    }

    SimReport::from_runs(all_runs, &config.games)
}
