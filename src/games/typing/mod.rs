//! Typing trainer: type a target text, scored by speed and accuracy.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
