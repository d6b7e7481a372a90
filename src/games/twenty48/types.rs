//! 2048 data structures.

use crate::core::grid::Grid;
use rand::Rng;

/// Board edge length.
pub const BOARD_DIM: usize = 4;

/// Tile value that counts as a win. Play continues afterwards.
pub const WIN_TILE: u32 = 2048;

/// Terminal outcome. Reaching 2048 is not terminal, see
/// [`Twenty48Game::reached_target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Twenty48Result {
    /// No direction changes the board.
    NoMovesLeft,
}

/// Main game state. Empty cells hold 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Twenty48Game {
    pub board: Grid<u32>,
    pub score: u32,
    /// Successful (board-changing) moves.
    pub moves: u32,
    /// Set once the first 2048 tile appears.
    pub reached_target: bool,
    pub game_result: Option<Twenty48Result>,
}

impl Twenty48Game {
    /// New game with two random starting tiles.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut game = Self::with_board(Grid::new(BOARD_DIM, BOARD_DIM, 0));
        super::spawn_tile(&mut game.board, rng);
        super::spawn_tile(&mut game.board, rng);
        game
    }

    /// Build a game around a fixed board (tests, replays).
    pub fn with_board(board: Grid<u32>) -> Self {
        let reached_target = board.iter().any(|(_, &v)| v >= WIN_TILE);
        Self {
            board,
            score: 0,
            moves: 0,
            reached_target,
            game_result: None,
        }
    }

    pub fn max_tile(&self) -> u32 {
        self.board.iter().map(|(_, &v)| v).max().unwrap_or(0)
    }

    pub fn empty_cells(&self) -> usize {
        self.board.iter().filter(|(_, &v)| v == 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_game_has_two_tiles() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let game = Twenty48Game::new(&mut rng);
        assert_eq!(game.empty_cells(), BOARD_DIM * BOARD_DIM - 2);
        assert!(game
            .board
            .iter()
            .all(|(_, &v)| v == 0 || v == 2 || v == 4));
        assert_eq!(game.score, 0);
        assert!(game.game_result.is_none());
    }

    #[test]
    fn test_with_board_detects_existing_target() {
        let mut board = Grid::new(BOARD_DIM, BOARD_DIM, 0);
        board[(0, 0)] = 2048;
        let game = Twenty48Game::with_board(board);
        assert!(game.reached_target);
        assert_eq!(game.max_tile(), 2048);
    }
}
