//! Arcade - casual game simulators
//!
//! Deterministic rules, physics and AI for 2048, Tetris, Snake, Minesweeper,
//! Solitaire, Blackjack, Memory, Flappy, a typing trainer and Gomoku. The
//! crate never draws or reads devices: callers feed inputs and clock deltas
//! and read back immutable snapshots.

pub mod core;
pub mod games;
pub mod simulator;
pub mod utils;
