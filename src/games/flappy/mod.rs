//! Flappy-style side scroller.
//!
//! The player keeps a bird airborne by flapping through the gaps of scrolling
//! pipes. Gravity pulls the bird down each tick; touching the ceiling, the
//! ground or a pipe ends the game.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
