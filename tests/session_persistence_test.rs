//! Integration test: session flow
//!
//! Tick-driven games through the session, score events into the JSON
//! store, and the store's strict-improvement rule across reopenings.

use arcade::core::session::{record_best, score_event, GameSession, ScoreEvent};
use arcade::games::memory::{self, MemoryGame};
use arcade::games::snake::{self, SnakeGame, SnakeInput};
use arcade::games::{Direction, GameId, SnakeDifficulty};
use arcade::utils::persistence::{JsonScoreStore, ScoreStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

fn temp_store(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "arcade_it_{}_{}.json",
        name,
        std::process::id()
    ))
}

#[test]
fn test_snake_eats_food_directly_ahead() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut game = SnakeGame::new(SnakeDifficulty::Novice, &mut rng);
    let before: Vec<_> = game.snake.iter().copied().collect();
    assert_eq!(before.len(), 3);
    assert_eq!(game.direction, Direction::Right);

    let food = game.head().step(Direction::Right);
    game.food = Some(food);
    let next = snake::step_snake(&game, &mut rng);

    assert_eq!(next.snake.len(), 4);
    assert_eq!(next.head(), food);
    // The old body stays put behind the new head.
    let body: Vec<_> = next.snake.iter().skip(1).copied().collect();
    assert_eq!(body, before);
    assert_eq!(next.score, game.score + 1);
    assert_ne!(next.food, Some(food));
}

#[test]
fn test_snake_session_crash_is_recorded_once() {
    let path = temp_store("snake");
    std::fs::remove_file(&path).ok();
    let mut store = JsonScoreStore::open(&path).unwrap();

    let rng = ChaCha8Rng::seed_from_u64(8);
    let game = SnakeGame::new(SnakeDifficulty::Novice, &mut rng.clone());
    let mut session = GameSession::new(game, rng);
    session.input(|g, _| snake::process_input(g, SnakeInput::Up));

    let mut events = Vec::new();
    for _ in 0..100 {
        if let Some(event) = session.advance(session.game().move_interval_ms) {
            events.push(event);
        }
    }

    assert!(session.is_finished());
    assert_eq!(events.len(), 1);
    let ScoreEvent::CandidateBest { game, score } = events[0];
    assert_eq!(game, GameId::Snake);

    // A zero-point crash is still a first record.
    assert!(record_best(&mut store, events[0]).unwrap());
    assert!(!record_best(&mut store, events[0]).unwrap());

    let reopened = JsonScoreStore::open(&path).unwrap();
    assert_eq!(reopened.best(GameId::Snake), Some(score));
    assert!(reopened.record(GameId::Snake).unwrap().achieved_at > 0);
    std::fs::remove_file(path).ok();
}

#[test]
fn test_lower_is_better_records_survive_reopen() {
    let path = temp_store("memory");
    std::fs::remove_file(&path).ok();

    let solve = |order: &[usize]| {
        order
            .iter()
            .fold(MemoryGame::from_values(&[0, 1, 0, 1]), |g, &i| memory::flip(&g, i))
    };
    let lucky = solve(&[0, 2, 1, 3]);
    let clumsy = solve(&[0, 1, 0, 2, 1, 3]);
    assert_eq!(lucky.moves, 2);
    assert_eq!(clumsy.moves, 3);

    let mut store = JsonScoreStore::open(&path).unwrap();
    assert!(record_best(&mut store, score_event(&clumsy).unwrap()).unwrap());
    assert!(record_best(&mut store, score_event(&lucky).unwrap()).unwrap());

    let mut reopened = JsonScoreStore::open(&path).unwrap();
    assert_eq!(reopened.best(GameId::Memory), Some(2));
    assert!(!record_best(&mut reopened, score_event(&clumsy).unwrap()).unwrap());
    assert_eq!(reopened.best(GameId::Memory), Some(2));
    std::fs::remove_file(path).ok();
}

#[test]
fn test_unfinished_game_emits_nothing() {
    let game = MemoryGame::from_values(&[0, 1, 0, 1]);
    assert_eq!(score_event(&memory::flip(&game, 0)), None);
}
