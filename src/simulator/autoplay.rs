//! Scripted players used by the simulator.
//!
//! Each policy is deliberately simple: good enough to exercise every rule
//! path of its game over thousands of seeded runs, not to play well. The
//! real-time games are driven through [`GameSession`] so the scheduler and
//! score events are exercised exactly as a frontend would use them.

use super::RunStats;
use crate::core::config::ArcadeConfig;
use crate::core::grid::Grid;
use crate::core::session::{score_event, GameSession, ScoreEvent};
use crate::games::blackjack::{self, BlackjackAction, BlackjackGame, BlackjackPhase};
use crate::games::cards;
use crate::games::flappy::{self, FlappyGame, FlappyInput, FlappyResult};
use crate::games::gomoku::{self, GomokuAiConfig, GomokuGame, GomokuResult, Player};
use crate::games::memory::{self, MemoryGame};
use crate::games::minesweeper::{self, MinesweeperAction, MinesweeperGame, MinesweeperResult};
use crate::games::snake::{self, SnakeGame, SnakeInput, SnakeResult};
use crate::games::solitaire::{self, SolitaireGame, SolitaireMove, SolitaireResult};
use crate::games::tetris::{
    self, PieceKind, Piece, TetrisGame, TetrisInput, TetrisScoring, BOARD_WIDTH,
};
use crate::games::twenty48::{self, Twenty48Game};
use crate::games::typing::{self, TypingGame, TypingInput};
use crate::games::{
    Direction, FlappyDifficulty, GameId, MinesweeperDifficulty, SnakeDifficulty,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Play one game of `game` to completion or until `max_steps` decisions.
/// Difficulties, tables and starting stakes come from `config`.
pub fn play<R: Rng + Clone>(
    game: GameId,
    config: &ArcadeConfig,
    max_steps: u64,
    rng: &mut R,
) -> RunStats {
    match game {
        GameId::Twenty48 => play_twenty48(max_steps, rng),
        GameId::Tetris => play_tetris(config.tetris_scoring.clone(), max_steps, rng),
        GameId::Snake => play_snake(config.snake_difficulty, max_steps, rng),
        GameId::Minesweeper => play_minesweeper(config.minesweeper_difficulty, max_steps, rng),
        GameId::Solitaire => play_solitaire(max_steps, rng),
        GameId::Blackjack => play_blackjack(config.blackjack_bankroll, max_steps, rng),
        GameId::Memory => play_memory(config.memory_pairs, max_steps, rng),
        GameId::Flappy => play_flappy(config.flappy_difficulty, max_steps, rng),
        GameId::Typing => play_typing(max_steps, rng),
        GameId::Gomoku => play_gomoku(config.gomoku_ai.clone(), max_steps, rng),
    }
}

fn candidate(event: Option<ScoreEvent>) -> Option<u32> {
    event.map(|ScoreEvent::CandidateBest { score, .. }| score)
}

// ── 2048 ─────────────────────────────────────────────────────────────

/// Corner strategy: prefer Down, then Left, Right, and Up last.
fn play_twenty48<R: Rng>(max_steps: u64, rng: &mut R) -> RunStats {
    const PREFERENCE: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];
    let mut game = Twenty48Game::new(rng);
    let mut steps = 0;
    while game.game_result.is_none() && steps < max_steps {
        steps += 1;
        for direction in PREFERENCE {
            let next = twenty48::process_move(&game, direction, rng);
            if next != game {
                game = next;
                break;
            }
        }
    }
    RunStats {
        game: GameId::Twenty48,
        won: game.reached_target,
        score: game.score,
        steps,
        timed_out: game.game_result.is_none(),
        candidate_best: candidate(score_event(&game)),
    }
}

// ── Tetris ───────────────────────────────────────────────────────────

fn landed(board: &Grid<Option<PieceKind>>, piece: &Piece) -> Piece {
    let mut piece = piece.clone();
    while tetris::fits(board, &piece.shifted(1, 0)) {
        piece = piece.shifted(1, 0);
    }
    piece
}

/// Classic placement heuristic over height, cleared lines, holes and
/// bumpiness of the board after locking `piece`.
fn placement_score(board: &Grid<Option<PieceKind>>, piece: &Piece) -> f64 {
    let mut board = board.clone();
    for (r, c) in piece.cells() {
        if r >= 0 && c >= 0 {
            board[(r as usize, c as usize)] = Some(piece.kind);
        }
    }
    let (board, cleared) = tetris::clear_full_rows(&board);

    let rows = board.rows();
    let heights: Vec<usize> = (0..board.cols())
        .map(|c| {
            (0..rows)
                .find(|&r| board[(r, c)].is_some())
                .map_or(0, |r| rows - r)
        })
        .collect();
    let holes: usize = (0..board.cols())
        .map(|c| {
            let top = rows - heights[c];
            (top..rows).filter(|&r| board[(r, c)].is_none()).count()
        })
        .sum();
    let aggregate: usize = heights.iter().sum();
    let bumpiness: usize = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();

    -0.51 * aggregate as f64 + 0.76 * cleared.len() as f64
        - 0.36 * holes as f64
        - 0.18 * bumpiness as f64
}

/// Inputs that rotate, slide and hard-drop the active piece to its best
/// reachable resting place.
fn plan_tetris(game: &TetrisGame) -> Vec<TetrisInput> {
    let Some(active) = game.active.as_ref() else {
        return Vec::new();
    };
    let width = BOARD_WIDTH as i32;
    let mut best: Option<(f64, Vec<TetrisInput>)> = None;
    let mut rotated = active.clone();

    for rotations in 0..4 {
        if rotations > 0 {
            rotated = rotated.rotated(true);
            if !tetris::fits(&game.board, &rotated) {
                break;
            }
        }
        for dc in -width..=width {
            let step = dc.signum();
            let reachable =
                (1..=dc.abs()).all(|i| tetris::fits(&game.board, &rotated.shifted(0, step * i)));
            if !reachable {
                continue;
            }
            let rest = landed(&game.board, &rotated.shifted(0, dc));
            let score = placement_score(&game.board, &rest);
            if best.as_ref().map_or(true, |(b, _)| score > *b) {
                let mut inputs = vec![TetrisInput::RotateCw; rotations];
                let slide = if dc < 0 {
                    TetrisInput::Left
                } else {
                    TetrisInput::Right
                };
                inputs.extend(std::iter::repeat(slide).take(dc.unsigned_abs() as usize));
                inputs.push(TetrisInput::HardDrop);
                best = Some((score, inputs));
            }
        }
    }
    best.map(|(_, inputs)| inputs)
        .unwrap_or_else(|| vec![TetrisInput::HardDrop])
}

fn play_tetris<R: Rng + Clone>(scoring: TetrisScoring, max_steps: u64, rng: &mut R) -> RunStats {
    let game = tetris::new_game_with_scoring(scoring, rng);
    let mut session = GameSession::new(game, rng.clone());
    let mut steps = 0;
    let mut event = None;
    while !session.is_finished() && steps < max_steps {
        steps += 1;
        for input in plan_tetris(session.game()) {
            event = event.or(session.input(|g, r| tetris::process_input(g, input, r)));
        }
    }
    let game = session.game();
    RunStats {
        game: GameId::Tetris,
        won: false,
        score: game.score,
        steps,
        timed_out: !game.is_over(),
        candidate_best: candidate(event),
    }
}

// ── Snake ────────────────────────────────────────────────────────────

/// Greedy toward food among moves that survive the next step.
fn snake_policy(game: &SnakeGame) -> Option<SnakeInput> {
    let head = game.head();
    let tail = game.snake.back().copied();
    let target = game.food.unwrap_or(head);
    Direction::ALL
        .into_iter()
        .filter(|&d| d != game.direction.opposite())
        .filter_map(|d| {
            let next = head.step(d);
            let blocked = !game.in_bounds(next)
                || game.snake.iter().any(|&s| s == next && Some(s) != tail);
            if blocked {
                return None;
            }
            let distance = (next.x - target.x).abs() + (next.y - target.y).abs();
            Some((distance, d))
        })
        .min_by_key(|&(distance, _)| distance)
        .map(|(_, d)| match d {
            Direction::Up => SnakeInput::Up,
            Direction::Down => SnakeInput::Down,
            Direction::Left => SnakeInput::Left,
            Direction::Right => SnakeInput::Right,
        })
}

fn play_snake<R: Rng + Clone>(
    difficulty: SnakeDifficulty,
    max_steps: u64,
    rng: &mut R,
) -> RunStats {
    let game = SnakeGame::new(difficulty, rng);
    let mut session = GameSession::new(game, rng.clone());
    let mut steps = 0;
    let mut event = None;
    while !session.is_finished() && steps < max_steps {
        steps += 1;
        if let Some(input) = snake_policy(session.game()) {
            session.input(|g, _| snake::process_input(g, input));
        }
        event = event.or(session.step());
    }
    let game = session.game();
    RunStats {
        game: GameId::Snake,
        won: game.game_result == Some(SnakeResult::Win),
        score: game.score,
        steps,
        timed_out: game.game_result.is_none(),
        candidate_best: candidate(event),
    }
}

// ── Flappy ───────────────────────────────────────────────────────────

/// Flap whenever the bird is about to sink below the next gap's centre.
fn should_flap(game: &FlappyGame) -> bool {
    let target = game
        .pipes
        .iter()
        .find(|p| !p.passed)
        .map_or(9.0, |p| p.gap_center as f64);
    game.waiting_to_start || game.bird_y + game.bird_velocity > target
}

fn play_flappy<R: Rng + Clone>(
    difficulty: FlappyDifficulty,
    max_steps: u64,
    rng: &mut R,
) -> RunStats {
    let mut session = GameSession::new(FlappyGame::new(difficulty), rng.clone());
    let mut steps = 0;
    let mut event = None;
    while !session.is_finished() && steps < max_steps {
        steps += 1;
        if should_flap(session.game()) {
            session.input(|g, _| flappy::process_input(g, FlappyInput::Flap));
        }
        event = event.or(session.step());
    }
    let game = session.game();
    RunStats {
        game: GameId::Flappy,
        won: game.game_result == Some(FlappyResult::Win),
        score: game.score,
        steps,
        timed_out: game.game_result.is_none(),
        candidate_best: candidate(event),
    }
}

// ── Minesweeper ──────────────────────────────────────────────────────

/// Single-cell deductions first (flag forced mines, chord satisfied
/// numbers), then a random guess.
fn minesweeper_policy<R: Rng>(game: &MinesweeperGame, rng: &mut R) -> Option<MinesweeperAction> {
    if !game.first_click_done {
        return Some(MinesweeperAction::Reveal(game.rows() / 2, game.cols() / 2));
    }

    for ((r, c), cell) in game.grid.iter() {
        if !cell.revealed || cell.adjacent_mines == 0 {
            continue;
        }
        let neighbors = game.grid.neighbors(r, c);
        let hidden: Vec<(usize, usize)> = neighbors
            .iter()
            .copied()
            .filter(|&p| !game.grid[p].revealed && !game.grid[p].flagged)
            .collect();
        if hidden.is_empty() {
            continue;
        }
        let flagged = neighbors.iter().filter(|&&p| game.grid[p].flagged).count();
        let number = usize::from(cell.adjacent_mines);
        if flagged == number {
            return Some(MinesweeperAction::Chord(r, c));
        }
        if flagged + hidden.len() == number {
            return Some(MinesweeperAction::ToggleFlag(hidden[0].0, hidden[0].1));
        }
    }

    game.grid
        .positions(|cell| !cell.revealed && !cell.flagged)
        .choose(rng)
        .map(|&(r, c)| MinesweeperAction::Reveal(r, c))
}

fn play_minesweeper<R: Rng + Clone>(
    difficulty: MinesweeperDifficulty,
    max_steps: u64,
    rng: &mut R,
) -> RunStats {
    let mut session = GameSession::new(
        MinesweeperGame::new(difficulty),
        rng.clone(),
    );
    let mut steps = 0;
    let mut event = None;
    while !session.is_finished() && steps < max_steps {
        steps += 1;
        let Some(action) = minesweeper_policy(session.game(), rng) else {
            break;
        };
        event = event.or(session.input(|g, r| minesweeper::process_action(g, action, r)));
        event = event.or(session.advance(250));
    }
    let game = session.game();
    let revealed = game.grid.iter().filter(|(_, c)| c.revealed && !c.has_mine).count();
    RunStats {
        game: GameId::Minesweeper,
        won: game.game_result == Some(MinesweeperResult::Win),
        score: revealed as u32,
        steps,
        timed_out: game.game_result.is_none(),
        candidate_best: candidate(event),
    }
}

// ── Solitaire ────────────────────────────────────────────────────────

/// A non-draw move that makes progress: waste to tableau, or a tableau run
/// that uncovers a face-down card or empties a column for a King.
fn solitaire_progress(game: &SolitaireGame) -> Option<SolitaireMove> {
    if let Some(card) = game.waste.last() {
        if let Some(to) = game
            .tableau
            .iter()
            .position(|col| solitaire::can_place_on_tableau(card, col))
        {
            return Some(SolitaireMove::WasteToTableau { to });
        }
    }
    for (from, column) in game.tableau.iter().enumerate() {
        let Some(start) = column.iter().position(|c| c.face_up) else {
            continue;
        };
        if start == 0 {
            // Moving a whole column only helps when a King leaves a
            // face-down pile behind, which `start == 0` rules out.
            continue;
        }
        let card = &column[start];
        if let Some(to) = (0..game.tableau.len())
            .find(|&to| to != from && solitaire::can_place_on_tableau(card, &game.tableau[to]))
        {
            return Some(SolitaireMove::TableauToTableau { from, start, to });
        }
    }
    None
}

fn play_solitaire<R: Rng>(max_steps: u64, rng: &mut R) -> RunStats {
    let mut game = SolitaireGame::new(rng);
    let mut steps = 0;
    let mut idle_draws = 0;
    while game.game_result.is_none() && steps < max_steps {
        steps += 1;
        game = solitaire::auto_foundation(&game);
        if game.game_result.is_some() {
            break;
        }
        if let Some(mv) = solitaire_progress(&game) {
            game = solitaire::apply_move(&game, mv);
            idle_draws = 0;
            continue;
        }
        // A full pass through stock and waste without progress means stuck.
        if idle_draws > game.stock.len() + game.waste.len() + 1 {
            game = solitaire::apply_move(&game, SolitaireMove::Resign);
            break;
        }
        game = solitaire::apply_move(&game, SolitaireMove::Draw);
        idle_draws += 1;
    }
    RunStats {
        game: GameId::Solitaire,
        won: game.game_result == Some(SolitaireResult::Win),
        score: game.score,
        steps,
        timed_out: game.game_result.is_none(),
        candidate_best: candidate(score_event(&game)),
    }
}

// ── Blackjack ────────────────────────────────────────────────────────

const BLACKJACK_BET: u32 = 10;
const BLACKJACK_HANDS: u32 = 100;

/// Double on 10 or 11, hit below 17, otherwise stand.
fn blackjack_policy(game: &BlackjackGame) -> BlackjackAction {
    let value = blackjack::hand_value(&game.player);
    match value {
        10 | 11 if game.player.len() == 2 && game.bankroll >= game.bet => {
            BlackjackAction::DoubleDown
        }
        v if v < 17 => BlackjackAction::Hit,
        _ => BlackjackAction::Stand,
    }
}

fn play_blackjack<R: Rng>(bankroll: u32, max_steps: u64, rng: &mut R) -> RunStats {
    let mut game = BlackjackGame::with_deck(cards::shuffled_deck(rng), bankroll);
    let start = game.bankroll;
    let mut steps = 0;
    let mut best = None;
    while !game.is_broke() && game.hands_played < BLACKJACK_HANDS && steps < max_steps {
        steps += 1;
        game = match game.phase {
            BlackjackPhase::Betting => blackjack::process_action(
                &game,
                BlackjackAction::Bet(BLACKJACK_BET.min(game.bankroll)),
                rng,
            ),
            BlackjackPhase::PlayerTurn => {
                blackjack::process_action(&game, blackjack_policy(&game), rng)
            }
            BlackjackPhase::DealerTurn => blackjack::dealer_step(&game, rng),
            BlackjackPhase::Resolved => {
                best = candidate(score_event(&game)).max(best);
                blackjack::next_round(&game)
            }
        };
    }
    if game.phase == BlackjackPhase::Resolved {
        best = candidate(score_event(&game)).max(best);
    }
    RunStats {
        game: GameId::Blackjack,
        won: game.bankroll > start,
        score: game.bankroll,
        steps,
        timed_out: steps >= max_steps,
        candidate_best: best,
    }
}

// ── Memory ───────────────────────────────────────────────────────────

/// Perfect recall: complete any known pair, otherwise turn an unseen card.
fn memory_policy(game: &MemoryGame, seen: &BTreeMap<usize, u8>) -> Option<usize> {
    let open = |i: &usize| !game.cards[*i].matched && Some(*i) != game.first_pick;

    if let Some(first) = game.first_pick {
        let value = game.cards[first].value;
        if let Some((&i, _)) = seen.iter().find(|(i, v)| **v == value && open(*i)) {
            return Some(i);
        }
    } else {
        for (&i, &v) in seen {
            if !open(&i) {
                continue;
            }
            let pair = seen.iter().any(|(j, w)| *w == v && *j != i && open(j));
            if pair {
                return Some(i);
            }
        }
    }
    (0..game.cards.len()).find(|i| !seen.contains_key(i) && open(i))
}

fn play_memory<R: Rng>(pairs: usize, max_steps: u64, rng: &mut R) -> RunStats {
    let mut game = MemoryGame::with_pairs(pairs, rng);
    let mut seen: BTreeMap<usize, u8> = BTreeMap::new();
    let mut steps = 0;
    while game.game_result.is_none() && steps < max_steps {
        steps += 1;
        let Some(index) = memory_policy(&game, &seen) else {
            break;
        };
        game = memory::flip(&game, index);
        seen.insert(index, game.cards[index].value);
    }
    RunStats {
        game: GameId::Memory,
        won: game.game_result.is_some(),
        score: game.moves,
        steps,
        timed_out: game.game_result.is_none(),
        candidate_best: candidate(score_event(&game)),
    }
}

// ── Typing ───────────────────────────────────────────────────────────

const TYPO_CHANCE: f64 = 0.05;
const KEYSTROKE_MS: u64 = 180;

fn play_typing<R: Rng + Clone>(max_steps: u64, rng: &mut R) -> RunStats {
    let game = TypingGame::random(rng);
    let mut session = GameSession::new(game, rng.clone());
    let mut steps = 0;
    let mut event = None;
    while !session.is_finished() && steps < max_steps {
        steps += 1;
        let game = session.game();
        let input = match game.typed.last() {
            Some(last) if game.target.get(game.typed.len() - 1) != Some(last) => {
                TypingInput::Backspace
            }
            _ => {
                let expected = game.target[game.typed.len()];
                if rng.gen_bool(TYPO_CHANCE) {
                    TypingInput::Char('#')
                } else {
                    TypingInput::Char(expected)
                }
            }
        };
        event = event.or(session.advance(KEYSTROKE_MS));
        event = event.or(session.input(|g, _| typing::process_input(g, input)));
    }
    let game = session.game();
    RunStats {
        game: GameId::Typing,
        won: game.is_complete(),
        score: game.wpm().round() as u32,
        steps,
        timed_out: !game.is_complete(),
        candidate_best: candidate(event),
    }
}

// ── Gomoku ───────────────────────────────────────────────────────────

/// The human side plays the same heuristic as the AI.
fn play_gomoku<R: Rng>(ai: GomokuAiConfig, max_steps: u64, rng: &mut R) -> RunStats {
    let mut game = GomokuGame::with_config(ai);
    let mut steps = 0;
    while game.game_result.is_none() && steps < max_steps {
        steps += 1;
        let Some((row, col)) =
            gomoku::choose_move(&game.board, Player::Human, &game.ai_config, rng)
        else {
            break;
        };
        game = gomoku::play_turn(&game, row, col, rng);
    }
    RunStats {
        game: GameId::Gomoku,
        won: game.game_result == Some(GomokuResult::Win),
        score: game.move_history.len() as u32,
        steps,
        timed_out: game.game_result.is_none(),
        candidate_best: candidate(score_event(&game)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::seeded;

    #[test]
    fn test_bounded_games_finish_within_budget() {
        let bounded = [
            GameId::Twenty48,
            GameId::Minesweeper,
            GameId::Solitaire,
            GameId::Blackjack,
            GameId::Memory,
            GameId::Typing,
            GameId::Gomoku,
        ];
        for game in bounded {
            let stats = play(game, &ArcadeConfig::default(), 20_000, &mut seeded(17));
            assert_eq!(stats.game, game);
            assert!(!stats.timed_out, "{:?} timed out", game);
            assert!(stats.steps > 0);
        }
    }

    #[test]
    fn test_step_budget_is_respected() {
        for game in GameId::ALL {
            let stats = play(game, &ArcadeConfig::default(), 40, &mut seeded(3));
            assert!(stats.steps <= 40, "{:?}", game);
        }
    }

    #[test]
    fn test_runs_are_reproducible() {
        for game in GameId::ALL {
            let a = play(game, &ArcadeConfig::default(), 300, &mut seeded(99));
            let b = play(game, &ArcadeConfig::default(), 300, &mut seeded(99));
            assert_eq!(a, b, "{:?}", game);
        }
    }

    #[test]
    fn test_memory_bot_clears_table_quickly() {
        let stats = play(GameId::Memory, &ArcadeConfig::default(), 1_000, &mut seeded(4));
        assert!(stats.won);
        // 8 pairs need at least 8 attempts and perfect recall needs < 16.
        assert!((8..16).contains(&stats.score), "{}", stats.score);
        assert_eq!(stats.candidate_best, Some(stats.score));
    }

    #[test]
    fn test_config_shapes_the_table() {
        let config = ArcadeConfig {
            memory_pairs: 4,
            blackjack_bankroll: 0,
            ..Default::default()
        };
        let memory = play(GameId::Memory, &config, 1_000, &mut seeded(4));
        assert!(memory.won);
        assert!((4..8).contains(&memory.score), "{}", memory.score);

        // An empty bankroll is broke before the first bet.
        let blackjack = play(GameId::Blackjack, &config, 1_000, &mut seeded(4));
        assert_eq!(blackjack.steps, 0);
        assert_eq!(blackjack.score, 0);
        assert!(!blackjack.won);
    }

    #[test]
    fn test_tetris_plan_ends_with_hard_drop() {
        let game = tetris::new_game(&mut seeded(8));
        let plan = plan_tetris(&game);
        assert_eq!(plan.last(), Some(&TetrisInput::HardDrop));
    }

    #[test]
    fn test_snake_policy_avoids_wall() {
        let mut game = SnakeGame::new(SnakeDifficulty::Novice, &mut seeded(1));
        let width = game.grid_width;
        game.snake = [(width - 1, 5), (width - 2, 5), (width - 3, 5)]
            .iter()
            .map(|&(x, y)| snake::Position::new(x, y))
            .collect();
        game.food = Some(snake::Position::new(0, 0));
        let input = snake_policy(&game).unwrap();
        assert!(matches!(input, SnakeInput::Up | SnakeInput::Down));
    }
}
