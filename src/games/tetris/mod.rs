//! Tetris: a 10x20 well, seven tetrominoes, gravity and line clears.
//!
//! Pieces fall one row per gravity tick. A piece that cannot descend locks
//! into the board, full rows are cleared and scored, and the next piece
//! spawns. A spawn that overlaps the stack ends the game.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
