//! Gomoku (five in a row) against a heuristic opponent.
//!
//! 15x15 board. The human moves first; the AI answers each move by scoring
//! nearby empty cells for attack and defence.

pub mod ai;
pub mod logic;
pub mod types;

pub use ai::*;
pub use logic::*;
pub use types::*;
