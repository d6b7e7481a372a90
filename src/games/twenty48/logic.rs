//! 2048 slide/merge logic and tile spawning.

use super::types::{Twenty48Game, Twenty48Result, WIN_TILE};
use crate::core::grid::Grid;
use crate::games::Direction;
use rand::Rng;
use tracing::debug;

/// Probability that a spawned tile is a 2 (otherwise 4).
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Slide one line toward index 0.
///
/// Zeros are compacted out, then adjacent equal tiles merge left to right.
/// A tile produced by a merge is never merged again in the same move, so
/// `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`. Returns the new line and the sum
/// of the merged tile values.
pub fn slide_line(line: &[u32]) -> (Vec<u32>, u32) {
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut out = Vec::with_capacity(line.len());
    let mut points = 0;
    let mut i = 0;

    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let merged = tiles[i] * 2;
            out.push(merged);
            points += merged;
            i += 2;
        } else {
            out.push(tiles[i]);
            i += 1;
        }
    }

    out.resize(line.len(), 0);
    (out, points)
}

/// Slide the whole board. Every direction is reoriented so that the shared
/// left-slide does the work, then written back in the original orientation.
pub fn slide_board(board: &Grid<u32>, direction: Direction) -> (Grid<u32>, u32) {
    let mut next = board.clone();
    let mut points = 0;

    match direction {
        Direction::Left | Direction::Right => {
            for r in 0..board.rows() {
                let mut line = board.row(r);
                if direction == Direction::Right {
                    line.reverse();
                }
                let (mut slid, gained) = slide_line(&line);
                if direction == Direction::Right {
                    slid.reverse();
                }
                next.set_row(r, &slid);
                points += gained;
            }
        }
        Direction::Up | Direction::Down => {
            for c in 0..board.cols() {
                let mut line = board.column(c);
                if direction == Direction::Down {
                    line.reverse();
                }
                let (mut slid, gained) = slide_line(&line);
                if direction == Direction::Down {
                    slid.reverse();
                }
                next.set_column(c, &slid);
                points += gained;
            }
        }
    }

    (next, points)
}

/// Whether any direction would change the board.
pub fn can_move(board: &Grid<u32>) -> bool {
    Direction::ALL
        .iter()
        .any(|&d| slide_board(board, d).0 != *board)
}

/// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
///
/// Returns the cell used, or `None` when the board is full; the caller
/// treats that as board-full rather than an error.
pub fn spawn_tile<R: Rng>(board: &mut Grid<u32>, rng: &mut R) -> Option<(usize, usize)> {
    let empty = board.positions(|&v| v == 0);
    if empty.is_empty() {
        return None;
    }
    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let value = if rng.gen_bool(SPAWN_TWO_PROBABILITY) { 2 } else { 4 };
    board[(row, col)] = value;
    Some((row, col))
}

/// Apply one move. Returns an unchanged copy when the game is over or the
/// move would not change the board (no tile is spawned in that case).
pub fn process_move<R: Rng>(
    game: &Twenty48Game,
    direction: Direction,
    rng: &mut R,
) -> Twenty48Game {
    if game.game_result.is_some() {
        return game.clone();
    }

    let (mut board, points) = slide_board(&game.board, direction);
    if board == game.board {
        return game.clone();
    }

    let mut next = game.clone();
    let spawned = spawn_tile(&mut board, rng);
    next.board = board;
    next.score += points;
    next.moves += 1;

    if !next.reached_target && next.max_tile() >= WIN_TILE {
        debug!(score = next.score, moves = next.moves, "2048: target tile reached");
        next.reached_target = true;
    }

    if spawned.is_none() || !can_move(&next.board) {
        debug!(score = next.score, max_tile = next.max_tile(), "2048: no moves left");
        next.game_result = Some(Twenty48Result::NoMovesLeft);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::twenty48::BOARD_DIM;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn board(rows: [[u32; 4]; 4]) -> Grid<u32> {
        Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect())
    }

    #[test]
    fn test_four_equal_tiles_merge_pairwise() {
        assert_eq!(slide_line(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        assert_eq!(slide_line(&[4, 4, 8, 0]), (vec![8, 8, 0, 0], 8));
        assert_eq!(slide_line(&[2, 2, 4, 0]), (vec![4, 4, 0, 0], 4));
    }

    #[test]
    fn test_gaps_are_compacted_before_merging() {
        assert_eq!(slide_line(&[2, 0, 0, 2]), (vec![4, 0, 0, 0], 4));
        assert_eq!(slide_line(&[0, 4, 0, 8]), (vec![4, 8, 0, 0], 0));
    }

    #[test]
    fn test_odd_run_merges_leading_pair() {
        assert_eq!(slide_line(&[2, 2, 2, 0]), (vec![4, 2, 0, 0], 4));
    }

    #[test]
    fn test_slide_is_idempotent_without_equal_neighbours() {
        // All tile values distinct, so no line can ever merge.
        let b = board([[2, 4, 8, 16], [0, 32, 0, 64], [128, 0, 0, 0], [0, 0, 256, 512]]);
        for d in Direction::ALL {
            let (once, _) = slide_board(&b, d);
            let (twice, points) = slide_board(&once, d);
            assert_eq!(once, twice, "{:?} should be idempotent", d);
            assert_eq!(points, 0);
        }
    }

    #[test]
    fn test_slide_directions() {
        let b = board([[2, 0, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0]]);

        let (right, _) = slide_board(&b, Direction::Right);
        assert_eq!(right.row(0), vec![0, 0, 0, 4]);
        assert_eq!(right.row(3), vec![0, 0, 0, 2]);

        let (down, points) = slide_board(&b, Direction::Down);
        assert_eq!(down.column(0), vec![0, 0, 0, 4]);
        assert_eq!(down.column(3), vec![0, 0, 0, 2]);
        assert_eq!(points, 4);

        let (up, _) = slide_board(&b, Direction::Up);
        assert_eq!(up.column(0), vec![4, 0, 0, 0]);
    }

    #[test]
    fn test_noop_move_does_not_spawn() {
        let b = board([[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let game = Twenty48Game::with_board(b);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let next = process_move(&game, Direction::Left, &mut rng);
        assert_eq!(next, game);

        let next = process_move(&game, Direction::Right, &mut rng);
        assert_ne!(next.board, game.board);
        assert_eq!(next.empty_cells(), BOARD_DIM * BOARD_DIM - 3);
        assert_eq!(next.moves, 1);
    }

    #[test]
    fn test_move_scores_merges() {
        let b = board([[2, 2, 4, 4], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let game = Twenty48Game::with_board(b);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let next = process_move(&game, Direction::Left, &mut rng);
        assert_eq!(next.score, 12);
        assert_eq!(&next.board.row(0)[..2], &[4, 8]);
        // prior state is untouched
        assert_eq!(game.board.row(0), vec![2, 2, 4, 4]);
    }

    #[test]
    fn test_reaching_2048_sets_flag_but_continues() {
        let b = board([[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let game = Twenty48Game::with_board(b);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let next = process_move(&game, Direction::Left, &mut rng);
        assert!(next.reached_target);
        assert!(next.game_result.is_none());
    }

    #[test]
    fn test_stuck_board_after_spawn_is_game_over() {
        // Sliding left frees only (3, 3). A spawned 2 leaves no merges
        // anywhere; a spawned 4 can still merge with the 4 above it.
        let b = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [0, 8, 16, 32]]);
        let game = Twenty48Game::with_board(b);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let next = process_move(&game, Direction::Left, &mut rng);
            assert_eq!(next.board.row(3)[..3], [8, 16, 32]);
            if next.board[(3, 3)] == 2 {
                assert_eq!(next.game_result, Some(Twenty48Result::NoMovesLeft));
                let after = process_move(&next, Direction::Right, &mut rng);
                assert_eq!(after, next);
            } else {
                assert_eq!(next.board[(3, 3)], 4);
                assert!(next.game_result.is_none());
            }
        }
    }

    #[test]
    fn test_can_move_detects_stuck_board() {
        let stuck = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!can_move(&stuck));
        let open = board([[2, 2, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(can_move(&open));
    }

    #[test]
    fn test_spawn_on_full_board_returns_none() {
        let mut full = Grid::new(BOARD_DIM, BOARD_DIM, 2u32);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(spawn_tile(&mut full, &mut rng), None);
    }

    #[test]
    fn test_spawn_distribution_roughly_ninety_percent_twos() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut twos = 0;
        for _ in 0..2000 {
            let mut b = Grid::new(BOARD_DIM, BOARD_DIM, 0u32);
            let (r, c) = spawn_tile(&mut b, &mut rng).unwrap();
            if b[(r, c)] == 2 {
                twos += 1;
            }
        }
        assert!((1700..=1900).contains(&twos), "twos = {}", twos);
    }
}
