//! Minesweeper mine placement, reveal, flood fill, flags and chording.

use super::types::{Cell, MinesweeperGame, MinesweeperResult};
use crate::core::grid::Grid;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Cell selection events for Minesweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinesweeperAction {
    Reveal(usize, usize),
    ToggleFlag(usize, usize),
    /// Reveal the unflagged neighbours of a revealed number whose flag
    /// count matches it.
    Chord(usize, usize),
}

/// Apply a cell selection. Off-board cells, finished games and inputs that
/// change nothing return an unchanged copy.
pub fn process_action<R: Rng>(
    game: &MinesweeperGame,
    action: MinesweeperAction,
    rng: &mut R,
) -> MinesweeperGame {
    let mut next = game.clone();
    if next.game_result.is_some() {
        return next;
    }

    match action {
        MinesweeperAction::Reveal(row, col) if next.grid.get(row, col).is_some() => {
            if !next.first_click_done {
                handle_first_click(&mut next, row, col, rng);
            } else {
                reveal_cell(&mut next, row, col);
            }
        }
        MinesweeperAction::ToggleFlag(row, col) if next.grid.get(row, col).is_some() => {
            toggle_flag(&mut next, row, col);
        }
        MinesweeperAction::Chord(row, col) if next.grid.get(row, col).is_some() => {
            chord(&mut next, row, col);
        }
        _ => {}
    }
    next
}

/// Advance the play clock. Runs only between the first reveal and the end.
pub fn advance_clock(game: &MinesweeperGame, dt_ms: u64) -> MinesweeperGame {
    let mut next = game.clone();
    if next.first_click_done && next.game_result.is_none() {
        next.elapsed_ms += dt_ms;
    }
    next
}

/// Place mines uniformly outside the 3x3 safe zone around the first click.
///
/// Panics if the placed count differs from `total_mines`; the constructor
/// clamps the count so this can only trip on a corrupted game.
pub fn place_mines<R: Rng>(
    game: &mut MinesweeperGame,
    first_row: usize,
    first_col: usize,
    rng: &mut R,
) {
    let mut excluded = game.grid.neighbors(first_row, first_col);
    excluded.push((first_row, first_col));

    let mut valid_positions = game
        .grid
        .positions(|_| true)
        .into_iter()
        .filter(|p| !excluded.contains(p))
        .collect::<Vec<_>>();

    valid_positions.shuffle(rng);
    for &(row, col) in valid_positions.iter().take(game.total_mines) {
        game.grid[(row, col)].has_mine = true;
    }

    let placed = game.grid.iter().filter(|(_, c)| c.has_mine).count();
    assert_eq!(
        placed, game.total_mines,
        "placed {placed} mines, expected {}",
        game.total_mines
    );
}

/// Count adjacent mines for every non-mine cell.
pub fn calculate_adjacent_counts(grid: &mut Grid<Cell>) {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if grid[(row, col)].has_mine {
                continue;
            }
            let count = grid
                .neighbors(row, col)
                .into_iter()
                .filter(|&pos| grid[pos].has_mine)
                .count();
            grid[(row, col)].adjacent_mines = count as u8;
        }
    }
}

/// Reveal a cell. Flagged and already-revealed cells are left alone.
/// Returns false if a mine was hit.
pub fn reveal_cell(game: &mut MinesweeperGame, row: usize, col: usize) -> bool {
    let cell = game.grid[(row, col)];
    if cell.flagged || cell.revealed {
        return true;
    }

    game.grid[(row, col)].revealed = true;

    if cell.has_mine {
        debug!(row, col, "minesweeper: mine hit");
        game.game_result = Some(MinesweeperResult::Loss);
        reveal_all_mines(game);
        return false;
    }

    if cell.adjacent_mines == 0 {
        flood_fill_reveal(game, row, col);
    }

    check_win_condition(game);
    true
}

/// Reveal the zero region connected to `(start_row, start_col)` plus its
/// numbered border. Stack-based; never crosses flagged or mined cells.
pub fn flood_fill_reveal(game: &mut MinesweeperGame, start_row: usize, start_col: usize) {
    let mut stack = vec![(start_row, start_col)];

    while let Some((row, col)) = stack.pop() {
        for pos in game.grid.neighbors(row, col) {
            let neighbor = game.grid[pos];
            if neighbor.revealed || neighbor.flagged || neighbor.has_mine {
                continue;
            }

            game.grid[pos].revealed = true;
            if neighbor.adjacent_mines == 0 {
                stack.push(pos);
            }
        }
    }
}

/// Reveal every mine (on loss).
pub fn reveal_all_mines(game: &mut MinesweeperGame) {
    for cell in game.grid.cells_mut() {
        if cell.has_mine {
            cell.revealed = true;
        }
    }
}

/// Toggle a flag on an unrevealed cell.
pub fn toggle_flag(game: &mut MinesweeperGame, row: usize, col: usize) {
    let cell = &mut game.grid[(row, col)];
    if cell.revealed {
        return;
    }

    cell.flagged = !cell.flagged;
    if cell.flagged {
        game.flags_placed += 1;
    } else {
        game.flags_placed -= 1;
    }
}

/// Chord on a revealed number: when its flagged neighbours equal its count,
/// reveal every other neighbour. A wrong flag can therefore lose the game.
pub fn chord(game: &mut MinesweeperGame, row: usize, col: usize) {
    let cell = game.grid[(row, col)];
    if !cell.revealed || cell.adjacent_mines == 0 {
        return;
    }

    let neighbors = game.grid.neighbors(row, col);
    let flags = neighbors
        .iter()
        .filter(|&&pos| game.grid[pos].flagged)
        .count();
    if flags != cell.adjacent_mines as usize {
        return;
    }

    for (n_row, n_col) in neighbors {
        if !reveal_cell(game, n_row, n_col) {
            return;
        }
    }
}

/// Win when every non-mine cell is revealed.
pub fn check_win_condition(game: &mut MinesweeperGame) {
    let unrevealed = game.grid.iter().filter(|(_, c)| !c.revealed).count();
    if unrevealed == game.total_mines {
        debug!(elapsed_ms = game.elapsed_ms, "minesweeper: board cleared");
        game.game_result = Some(MinesweeperResult::Win);
    }
}

/// Place mines around the first click, count neighbours, then reveal.
pub fn handle_first_click<R: Rng>(
    game: &mut MinesweeperGame,
    row: usize,
    col: usize,
    rng: &mut R,
) {
    place_mines(game, row, col, rng);
    calculate_adjacent_counts(&mut game.grid);
    game.first_click_done = true;
    reveal_cell(game, row, col);
}
