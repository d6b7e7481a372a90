//! Klondike solitaire.
//!
//! Seven tableau columns, a stock dealt one card at a time onto the waste,
//! and four foundations built up by suit from Ace to King.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
