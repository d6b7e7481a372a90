//! Shared primitives: grid, randomness, errors, scheduler, session, config.

pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod scheduler;
pub mod session;

pub use config::ArcadeConfig;
pub use error::{GridError, PersistenceError};
pub use grid::Grid;
pub use scheduler::{SchedulerState, TickScheduler};
pub use session::{GameSession, ScoreEvent, Scored, TickGame};
