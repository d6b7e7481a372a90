//! Gomoku data structures.

use super::ai::GomokuAiConfig;
use crate::core::grid::Grid;
use serde::{Deserialize, Serialize};

/// Board size (15x15 standard).
pub const BOARD_SIZE: usize = 15;

/// Stones needed in a line to win.
pub const WIN_LENGTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Human,
    Ai,
}

impl Player {
    pub fn opponent(&self) -> Self {
        match self {
            Player::Human => Player::Ai,
            Player::Ai => Player::Human,
        }
    }
}

/// Outcome from the human's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GomokuResult {
    Win,
    Loss,
    Draw,
}

pub type Board = Grid<Option<Player>>;

/// Main game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GomokuGame {
    pub board: Board,
    /// Whose turn it is.
    pub current_player: Player,
    pub game_result: Option<GomokuResult>,
    pub move_history: Vec<(usize, usize, Player)>,
    /// Last move position for highlighting.
    pub last_move: Option<(usize, usize)>,
    /// Winning line positions (for highlighting on game over).
    pub winning_line: Option<Vec<(usize, usize)>>,
    pub ai_config: GomokuAiConfig,
}

impl GomokuGame {
    pub fn new() -> Self {
        Self::with_config(GomokuAiConfig::default())
    }

    pub fn with_config(ai_config: GomokuAiConfig) -> Self {
        Self {
            board: Grid::new(BOARD_SIZE, BOARD_SIZE, None),
            current_player: Player::Human,
            game_result: None,
            move_history: Vec::new(),
            last_move: None,
            winning_line: None,
            ai_config,
        }
    }

    /// Check if a position is on the board and empty.
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        matches!(self.board.get(row, col), Some(None))
    }
}

impl Default for GomokuGame {
    fn default() -> Self {
        Self::new()
    }
}
