//! Minesweeper.
//!
//! Mines are placed on the first reveal so the opening click always lands in
//! a clearing. Revealing a zero cell floods its connected region.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
