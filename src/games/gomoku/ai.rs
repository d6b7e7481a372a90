//! Heuristic Gomoku opponent.
//!
//! Every candidate cell is scored twice: as if the AI played there (attack)
//! and as if the opponent did (defence). Each axis through the cell maps its
//! contiguous run length and open ends through a fixed scale, and the move
//! with the highest `attack * weight + defence` wins. Ties are broken with
//! the injected RNG.

use super::logic::{count_direction, DIRECTIONS};
use super::types::{Board, Player, BOARD_SIZE};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SCORE_FIVE: i64 = 100_000;
pub const SCORE_OPEN_FOUR: i64 = 10_000;
pub const SCORE_CLOSED_FOUR: i64 = 1_000;
pub const SCORE_OPEN_THREE: i64 = 500;
pub const SCORE_CLOSED_THREE: i64 = 100;
pub const SCORE_OPEN_TWO: i64 = 50;
pub const SCORE_CLOSED_TWO: i64 = 10;
pub const SCORE_ONE: i64 = 1;

/// Chebyshev radius around existing stones that candidates are drawn from.
pub const CANDIDATE_RADIUS: i32 = 2;

/// Tuning for the Gomoku opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GomokuAiConfig {
    /// Attack weight in thousandths; 1200 means attack counts 1.2x defence.
    pub attack_weight_permille: u32,
    /// Upper bound on cells scored per move.
    pub max_candidates: usize,
}

impl Default for GomokuAiConfig {
    fn default() -> Self {
        Self {
            attack_weight_permille: 1200,
            max_candidates: 60,
        }
    }
}

/// Map a run of `count` stones with `open_ends` (0-2) empty ends to a score.
pub fn shape_score(count: u32, open_ends: u32) -> i64 {
    if count >= 5 {
        return SCORE_FIVE;
    }
    match (count, open_ends) {
        (_, 0) => 0,
        (4, 2) => SCORE_OPEN_FOUR,
        (4, _) => SCORE_CLOSED_FOUR,
        (3, 2) => SCORE_OPEN_THREE,
        (3, _) => SCORE_CLOSED_THREE,
        (2, 2) => SCORE_OPEN_TWO,
        (2, _) => SCORE_CLOSED_TWO,
        _ => SCORE_ONE,
    }
}

/// Score the empty cell (row, col) as if `player` placed a stone there.
pub fn evaluate_point(board: &Board, row: usize, col: usize, player: Player) -> i64 {
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| {
            let forward = count_direction(board, row, col, dr, dc, player) as i32;
            let back = count_direction(board, row, col, -dr, -dc, player) as i32;
            let count = (1 + forward + back) as u32;

            let end_open = |steps: i32, dr: i32, dc: i32| {
                let r = row as i32 + dr * steps;
                let c = col as i32 + dc * steps;
                board.get_signed(r, c) == Some(&None)
            };
            let open_ends = u32::from(end_open(forward + 1, dr, dc))
                + u32::from(end_open(back + 1, -dr, -dc));

            shape_score(count, open_ends)
        })
        .sum()
}

/// Empty cells within `CANDIDATE_RADIUS` of any stone, capped at
/// `max_candidates`. Cells that make or stop a four for either side rank
/// ahead of the cap, strongest first; the rest follow most crowded first.
/// An empty board yields only the centre.
pub fn candidate_moves(board: &Board, max_candidates: usize) -> Vec<(usize, usize)> {
    let stones = board.positions(Option::is_some);
    if stones.is_empty() {
        let center = BOARD_SIZE / 2;
        return vec![(center, center)];
    }

    let near_stone = |r: usize, c: usize| {
        stones.iter().any(|&(sr, sc)| {
            (sr as i32 - r as i32).abs() <= CANDIDATE_RADIUS
                && (sc as i32 - c as i32).abs() <= CANDIDATE_RADIUS
        })
    };

    let mut candidates: Vec<((usize, usize), (i64, usize))> = board
        .positions(Option::is_none)
        .into_iter()
        .filter(|&(r, c)| near_stone(r, c))
        .map(|(r, c)| ((r, c), (threat_level(board, r, c), crowd(board, r, c))))
        .collect();

    // Stable sort keeps row-major order among equal keys.
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates
        .into_iter()
        .take(max_candidates.max(1))
        .map(|(pos, _)| pos)
        .collect()
}

/// Strongest four-or-better shape either side would make at (row, col),
/// or 0 when neither reaches a closed four.
fn threat_level(board: &Board, row: usize, col: usize) -> i64 {
    let threat = evaluate_point(board, row, col, Player::Human)
        .max(evaluate_point(board, row, col, Player::Ai));
    if threat >= SCORE_CLOSED_FOUR {
        threat
    } else {
        0
    }
}

fn crowd(board: &Board, row: usize, col: usize) -> usize {
    board
        .neighbors(row, col)
        .into_iter()
        .filter(|&pos| board[pos].is_some())
        .count()
}

/// Total value of playing (row, col) for `player`, scaled by 1000.
pub fn move_value(
    board: &Board,
    row: usize,
    col: usize,
    player: Player,
    config: &GomokuAiConfig,
) -> i64 {
    let attack = evaluate_point(board, row, col, player);
    let defense = evaluate_point(board, row, col, player.opponent());
    attack * config.attack_weight_permille as i64 + defense * 1000
}

/// Pick the best move for `player`, breaking ties uniformly with `rng`.
/// `None` only when the board is full.
pub fn choose_move<R: Rng>(
    board: &Board,
    player: Player,
    config: &GomokuAiConfig,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let candidates = candidate_moves(board, config.max_candidates);

    let mut best_moves = Vec::new();
    let mut best_score = i64::MIN;
    for (r, c) in candidates {
        if board[(r, c)].is_some() {
            continue;
        }
        let score = move_value(board, r, c, player, config);
        if score > best_score {
            best_score = score;
            best_moves.clear();
            best_moves.push((r, c));
        } else if score == best_score {
            best_moves.push((r, c));
        }
    }

    best_moves.choose(rng).copied()
}
