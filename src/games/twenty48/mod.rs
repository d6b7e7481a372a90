//! 2048 sliding-tile puzzle.
//!
//! A 4x4 board of power-of-two tiles. Each move slides every tile toward one
//! edge, merging equal neighbours once per move, then spawns a new tile.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
