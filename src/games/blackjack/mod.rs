//! Single-deck Blackjack against a dealer who stands on 17.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
