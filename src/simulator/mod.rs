//! Headless batch simulator.
//!
//! Plays thousands of seeded games with scripted policies to check that
//! every game terminates and to see how the scoring behaves:
//! - Win rates and score spread per game
//! - Best candidate scores as the persistence port would judge them
//! - Runs that hit the step limit

mod autoplay;
mod config;
mod report;
mod runner;

pub use autoplay::play;
pub use config::SimConfig;
pub use report::{GameSummary, SimReport};
pub use runner::run_simulation;

use crate::games::GameId;
use serde::Serialize;

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub game: GameId,
    pub won: bool,
    /// Game-specific headline number (points, bankroll, attempts, WPM).
    pub score: u32,
    /// Policy decisions taken.
    pub steps: u64,
    pub timed_out: bool,
    /// What the session would have offered the score store.
    pub candidate_best: Option<u32>,
}
