//! Integration test: batch simulator
//!
//! Small seeded batches across every game, checking the report shape and
//! that best candidates honour each game's score order.

use arcade::core::config::ArcadeConfig;
use arcade::games::{GameId, ScoreOrder};
use arcade::simulator::{run_simulation, SimConfig};

#[test]
fn test_every_game_reported_in_order() {
    let config = SimConfig {
        num_runs: 2,
        seed: Some(7),
        max_steps_per_run: 400,
        verbosity: 0,
        ..Default::default()
    };
    let report = run_simulation(&config);

    assert_eq!(report.num_runs, 2 * GameId::ALL.len() as u32);
    let order: Vec<GameId> = report.games.iter().map(|s| s.game).collect();
    assert_eq!(order, GameId::ALL.to_vec());

    for summary in &report.games {
        assert_eq!(summary.runs, 2);
        assert!(summary.min_score <= summary.max_score);
        let runs: Vec<_> = report
            .run_stats
            .iter()
            .filter(|r| r.game == summary.game)
            .collect();
        let candidates = runs.iter().filter_map(|r| r.candidate_best);
        let expected = match summary.game.score_order() {
            ScoreOrder::HigherIsBetter => candidates.max(),
            ScoreOrder::LowerIsBetter => candidates.min(),
        };
        assert_eq!(summary.best_candidate, expected, "{:?}", summary.game);
    }
}

#[test]
fn test_single_game_config() {
    let mut config = SimConfig::single_game(GameId::Memory, 5);
    config.seed = Some(1);
    config.verbosity = 0;
    let report = run_simulation(&config);

    let memory = report.summary(GameId::Memory).unwrap();
    assert_eq!(memory.runs, 5);
    assert_eq!(memory.wins, 5);
    assert_eq!(memory.timeouts, 0);
    assert!(report.summary(GameId::Tetris).is_none());
    assert!(report.to_text().contains("memory"));
}

#[test]
fn test_game_settings_reach_every_run() {
    let mut config = SimConfig::single_game(GameId::Memory, 4);
    config.seed = Some(3);
    config.verbosity = 0;
    config.arcade = ArcadeConfig {
        memory_pairs: 3,
        ..Default::default()
    };
    let report = run_simulation(&config);

    let memory = report.summary(GameId::Memory).unwrap();
    assert_eq!(memory.wins, 4);
    // Three pairs take between three and five attempts with perfect recall.
    assert!(memory.max_score <= 5, "{}", memory.max_score);
    assert!(report.run_stats.iter().all(|r| r.score >= 3));
}
