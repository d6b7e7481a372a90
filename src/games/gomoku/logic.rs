//! Gomoku move application, win and draw detection.

use super::ai::choose_move;
use super::types::{Board, GomokuGame, GomokuResult, Player, WIN_LENGTH};
use rand::Rng;
use tracing::debug;

/// Directions to check for lines: (row_delta, col_delta).
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal down-right
    (1, -1), // Diagonal down-left
];

/// Count consecutive `player` stones from (row, col) in one direction,
/// excluding the starting cell.
pub fn count_direction(
    board: &Board,
    row: usize,
    col: usize,
    dr: i32,
    dc: i32,
    player: Player,
) -> u32 {
    let mut count = 0;
    let mut r = row as i32 + dr;
    let mut c = col as i32 + dc;

    while board.get_signed(r, c) == Some(&Some(player)) {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

/// Stones in the line through (row, col) along one axis, counting the
/// centre cell as `player`'s.
pub fn count_line(board: &Board, row: usize, col: usize, dr: i32, dc: i32, player: Player) -> u32 {
    1 + count_direction(board, row, col, dr, dc, player)
        + count_direction(board, row, col, -dr, -dc, player)
}

/// Check if the stone at (row, col) completes five or more in a row.
pub fn check_win(board: &Board, row: usize, col: usize, player: Player) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| count_line(board, row, col, dr, dc, player) >= WIN_LENGTH)
}

/// The full winning run through (row, col), if any.
pub fn winning_line(
    board: &Board,
    row: usize,
    col: usize,
    player: Player,
) -> Option<Vec<(usize, usize)>> {
    DIRECTIONS.iter().find_map(|&(dr, dc)| {
        if count_line(board, row, col, dr, dc, player) < WIN_LENGTH {
            return None;
        }
        let back = count_direction(board, row, col, -dr, -dc, player) as i32;
        let forward = count_direction(board, row, col, dr, dc, player) as i32;
        Some(
            (-back..=forward)
                .map(|i| {
                    (
                        (row as i32 + dr * i) as usize,
                        (col as i32 + dc * i) as usize,
                    )
                })
                .collect(),
        )
    })
}

pub fn is_board_full(board: &Board) -> bool {
    board.iter().all(|(_, cell)| cell.is_some())
}

/// Place the current player's stone and resolve win/draw, or hand the turn
/// over. Caller has checked the move is legal.
fn apply_move(game: &mut GomokuGame, row: usize, col: usize) {
    let player = game.current_player;
    game.board[(row, col)] = Some(player);
    game.move_history.push((row, col, player));
    game.last_move = Some((row, col));

    if let Some(line) = winning_line(&game.board, row, col, player) {
        game.winning_line = Some(line);
        game.game_result = Some(match player {
            Player::Human => GomokuResult::Win,
            Player::Ai => GomokuResult::Loss,
        });
        debug!(?player, moves = game.move_history.len(), "gomoku: five in a row");
    } else if is_board_full(&game.board) {
        game.game_result = Some(GomokuResult::Draw);
        debug!("gomoku: board full");
    } else {
        game.current_player = player.opponent();
    }
}

/// Human places a stone. Rejected (unchanged copy) when it is not the
/// human's turn, the game is over, or the cell is occupied or off-board.
pub fn human_move(game: &GomokuGame, row: usize, col: usize) -> GomokuGame {
    let mut next = game.clone();
    if next.game_result.is_some()
        || next.current_player != Player::Human
        || !next.is_valid_move(row, col)
    {
        return next;
    }
    apply_move(&mut next, row, col);
    next
}

/// AI replies on its turn. Unchanged copy when it is not the AI's turn.
pub fn ai_move<R: Rng>(game: &GomokuGame, rng: &mut R) -> GomokuGame {
    let mut next = game.clone();
    if next.game_result.is_some() || next.current_player != Player::Ai {
        return next;
    }
    if let Some((row, col)) = choose_move(&next.board, Player::Ai, &next.ai_config, rng) {
        apply_move(&mut next, row, col);
    }
    next
}

/// A full turn: the human's stone, then the AI's reply if the game goes on.
pub fn play_turn<R: Rng>(game: &GomokuGame, row: usize, col: usize, rng: &mut R) -> GomokuGame {
    let next = human_move(game, row, col);
    if next.current_player == Player::Ai {
        ai_move(&next, rng)
    } else {
        next
    }
}
