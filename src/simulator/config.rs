//! Simulation configuration.

use crate::core::config::ArcadeConfig;
use crate::games::GameId;

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs per game
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Games to simulate, in report order
    pub games: Vec<GameId>,

    /// Maximum policy decisions per run before timeout
    pub max_steps_per_run: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,

    /// Difficulties, tables and stakes the games start with
    pub arcade: ArcadeConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            games: GameId::ALL.to_vec(),
            max_steps_per_run: 50_000,
            verbosity: 1,
            arcade: ArcadeConfig::default(),
        }
    }
}

impl SimConfig {
    /// Quick config for a single game.
    pub fn single_game(game: GameId, num_runs: u32) -> Self {
        Self {
            num_runs,
            games: vec![game],
            ..Default::default()
        }
    }
}
