//! Memory (pair matching): turn two cards per attempt and clear the table.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
