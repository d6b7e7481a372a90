//! Utility modules: best-score persistence.

pub mod persistence;

pub use persistence::{JsonScoreStore, MemoryScoreStore, ScoreStore};
