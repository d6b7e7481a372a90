//! Minesweeper data structures.

use crate::core::grid::Grid;
use serde::{Deserialize, Serialize};

/// Size of the guaranteed-safe zone around the first click (3x3).
pub const SAFE_ZONE_CELLS: usize = 9;

/// A single cell in the minefield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub has_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    /// Number of adjacent mines (0-8).
    pub adjacent_mines: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinesweeperDifficulty {
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

difficulty_enum_impl!(MinesweeperDifficulty);

impl MinesweeperDifficulty {
    /// (rows, cols) for the board.
    pub fn grid_size(&self) -> (usize, usize) {
        match self {
            Self::Novice => (9, 9),
            Self::Apprentice => (12, 12),
            Self::Journeyman => (16, 16),
            Self::Master => (16, 20),
        }
    }

    pub fn mine_count(&self) -> usize {
        match self {
            Self::Novice => 10,
            Self::Apprentice => 25,
            Self::Journeyman => 40,
            Self::Master => 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinesweeperResult {
    Win,
    Loss,
}

/// Active minesweeper game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinesweeperGame {
    pub grid: Grid<Cell>,
    pub game_result: Option<MinesweeperResult>,
    /// Mines are placed on the first reveal.
    pub first_click_done: bool,
    pub total_mines: usize,
    pub flags_placed: usize,
    /// Play time, counted from the first reveal until the game ends.
    pub elapsed_ms: u64,
}

impl MinesweeperGame {
    pub fn new(difficulty: MinesweeperDifficulty) -> Self {
        let (rows, cols) = difficulty.grid_size();
        Self::new_custom(rows, cols, difficulty.mine_count())
    }

    /// Custom board. The mine count is clamped so that a full safe zone
    /// always fits beside it.
    pub fn new_custom(rows: usize, cols: usize, mines: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let max_mines = (rows * cols).saturating_sub(SAFE_ZONE_CELLS);
        Self {
            grid: Grid::new(rows, cols, Cell::default()),
            game_result: None,
            first_click_done: false,
            total_mines: mines.min(max_mines),
            flags_placed: 0,
            elapsed_ms: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Mines minus flags; negative when over-flagged.
    pub fn mines_remaining(&self) -> i64 {
        self.total_mines as i64 - self.flags_placed as i64
    }

    /// Elapsed seconds, rounded up, for best-time records.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_ms.div_ceil(1000) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = MinesweeperGame::new(MinesweeperDifficulty::Novice);
        assert_eq!(game.rows(), 9);
        assert_eq!(game.cols(), 9);
        assert!(game.game_result.is_none());
        assert!(!game.first_click_done);
        assert_eq!(game.total_mines, 10);
        assert!(game.grid.iter().all(|(_, c)| *c == Cell::default()));
    }

    #[test]
    fn test_difficulty_grid_sizes() {
        assert_eq!(MinesweeperDifficulty::Apprentice.grid_size(), (12, 12));
        assert_eq!(MinesweeperDifficulty::Apprentice.mine_count(), 25);
        assert_eq!(MinesweeperDifficulty::Master.grid_size(), (16, 20));
        assert_eq!(MinesweeperDifficulty::Master.mine_count(), 60);
    }

    #[test]
    fn test_custom_board_clamps_mines() {
        let game = MinesweeperGame::new_custom(4, 4, 100);
        assert_eq!(game.total_mines, 16 - SAFE_ZONE_CELLS);
        let tiny = MinesweeperGame::new_custom(2, 2, 3);
        assert_eq!(tiny.total_mines, 0);
    }

    #[test]
    fn test_mines_remaining() {
        let mut game = MinesweeperGame::new(MinesweeperDifficulty::Novice);
        assert_eq!(game.mines_remaining(), 10);
        game.flags_placed = 15;
        assert_eq!(game.mines_remaining(), -5);
    }

    #[test]
    fn test_elapsed_secs_rounds_up() {
        let mut game = MinesweeperGame::new(MinesweeperDifficulty::Novice);
        game.elapsed_ms = 12_001;
        assert_eq!(game.elapsed_secs(), 13);
    }
}
