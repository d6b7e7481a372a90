//! Tetris movement, gravity, locking and line clearing.

use super::types::*;
use crate::core::grid::Grid;
use rand::Rng;
use tracing::debug;

/// UI-agnostic input actions for Tetris.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisInput {
    Left,
    Right,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
}

/// Uniformly random tetromino.
pub fn random_kind<R: Rng>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
}

/// Start a new game with the default scoring table.
pub fn new_game<R: Rng>(rng: &mut R) -> TetrisGame {
    new_game_with_scoring(TetrisScoring::default(), rng)
}

/// Start a new game with a custom scoring table.
pub fn new_game_with_scoring<R: Rng>(scoring: TetrisScoring, rng: &mut R) -> TetrisGame {
    let mut game = TetrisGame {
        board: Grid::new(BOARD_HEIGHT, BOARD_WIDTH, None),
        active: None,
        next_kind: random_kind(rng),
        phase: TetrisPhase::Spawning,
        score: 0,
        lines: 0,
        level: 1,
        last_cleared: Vec::new(),
        pieces_locked: 0,
        scoring,
    };
    settle(&mut game, rng);
    game
}

/// Whether every cell of `piece` is on the board and empty.
pub fn fits(board: &Grid<Option<PieceKind>>, piece: &Piece) -> bool {
    piece
        .cells()
        .iter()
        .all(|&(r, c)| matches!(board.get_signed(r, c), Some(None)))
}

/// Remove full rows; rows above shift down by the number removed.
/// Returns the new board and the indices of the cleared rows.
pub fn clear_full_rows(board: &Grid<Option<PieceKind>>) -> (Grid<Option<PieceKind>>, Vec<usize>) {
    let full: Vec<usize> = (0..board.rows())
        .filter(|&r| board.row(r).iter().all(Option::is_some))
        .collect();
    if full.is_empty() {
        return (board.clone(), full);
    }

    let mut next = Grid::new(board.rows(), board.cols(), None);
    let mut target = board.rows();
    for r in (0..board.rows()).rev() {
        if full.contains(&r) {
            continue;
        }
        target -= 1;
        next.set_row(target, &board.row(r));
    }
    (next, full)
}

/// Apply a player input. Illegal moves (collision, out of bounds, game
/// over) return an unchanged copy. Rotations never kick.
pub fn process_input<R: Rng>(game: &TetrisGame, input: TetrisInput, rng: &mut R) -> TetrisGame {
    let Some(active) = game.active.as_ref().filter(|_| game.phase == TetrisPhase::Falling) else {
        return game.clone();
    };

    let candidate = match input {
        TetrisInput::Left => active.shifted(0, -1),
        TetrisInput::Right => active.shifted(0, 1),
        TetrisInput::SoftDrop => active.shifted(1, 0),
        TetrisInput::RotateCw => active.rotated(true),
        TetrisInput::RotateCcw => active.rotated(false),
        TetrisInput::HardDrop => {
            let mut next = game.clone();
            let mut piece = active.clone();
            let mut rows = 0;
            while fits(&next.board, &piece.shifted(1, 0)) {
                piece = piece.shifted(1, 0);
                rows += 1;
            }
            next.active = Some(piece);
            next.score += rows * next.scoring.hard_drop_per_row;
            next.phase = TetrisPhase::Locking;
            settle(&mut next, rng);
            return next;
        }
    };

    if !fits(&game.board, &candidate) {
        return game.clone();
    }

    let mut next = game.clone();
    if input == TetrisInput::SoftDrop {
        next.score += next.scoring.soft_drop_per_row;
    }
    next.active = Some(candidate);
    next
}

/// One gravity tick: descend a row, or lock when blocked.
pub fn tick<R: Rng>(game: &TetrisGame, rng: &mut R) -> TetrisGame {
    if game.is_over() {
        return game.clone();
    }

    let mut next = game.clone();
    next.last_cleared.clear();

    if next.phase == TetrisPhase::Falling {
        if let Some(active) = next.active.as_ref() {
            let lowered = active.shifted(1, 0);
            if fits(&next.board, &lowered) {
                next.active = Some(lowered);
                return next;
            }
        }
        next.phase = TetrisPhase::Locking;
    }

    settle(&mut next, rng);
    next
}

/// Run the Locking -> LineClearing -> Spawning pipeline until the game is
/// back in Falling or has ended.
fn settle<R: Rng>(game: &mut TetrisGame, rng: &mut R) {
    loop {
        match game.phase {
            TetrisPhase::Falling | TetrisPhase::GameOver => return,
            TetrisPhase::Locking => {
                if let Some(piece) = game.active.take() {
                    for (r, c) in piece.cells() {
                        game.board[(r as usize, c as usize)] = Some(piece.kind);
                    }
                    game.pieces_locked += 1;
                }
                game.phase = TetrisPhase::LineClearing;
            }
            TetrisPhase::LineClearing => {
                let (board, cleared) = clear_full_rows(&game.board);
                if !cleared.is_empty() {
                    let points = game.scoring.line_clear(cleared.len(), game.level);
                    game.score += points;
                    game.lines += cleared.len() as u32;
                    game.level = 1 + game.lines / LINES_PER_LEVEL;
                    debug!(
                        lines = cleared.len(),
                        points,
                        level = game.level,
                        "tetris: rows cleared"
                    );
                }
                game.board = board;
                game.last_cleared = cleared;
                game.phase = TetrisPhase::Spawning;
            }
            TetrisPhase::Spawning => {
                let piece = Piece::spawn(game.next_kind);
                game.next_kind = random_kind(rng);
                if fits(&game.board, &piece) {
                    game.active = Some(piece);
                    game.phase = TetrisPhase::Falling;
                } else {
                    debug!(score = game.score, lines = game.lines, "tetris: spawn blocked");
                    game.active = None;
                    game.phase = TetrisPhase::GameOver;
                }
            }
        }
    }
}

/// Where the active piece would land (for a ghost preview).
pub fn ghost_piece(game: &TetrisGame) -> Option<Piece> {
    let mut piece = game.active.clone()?;
    while fits(&game.board, &piece.shifted(1, 0)) {
        piece = piece.shifted(1, 0);
    }
    Some(piece)
}
