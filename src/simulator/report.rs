//! Simulation report generation.

use super::RunStats;
use crate::games::{GameId, ScoreOrder};
use serde::Serialize;

/// Aggregates for one game's runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub game: GameId,
    pub runs: u32,
    pub wins: u32,
    pub timeouts: u32,
    pub avg_score: f64,
    pub min_score: u32,
    pub max_score: u32,
    pub avg_steps: f64,
    /// Best candidate score judged by the game's score order.
    pub best_candidate: Option<u32>,
}

impl GameSummary {
    fn from_runs(game: GameId, runs: &[&RunStats]) -> Self {
        let count = runs.len() as u32;
        let denom = count.max(1) as f64;
        let candidates = runs.iter().filter_map(|r| r.candidate_best);
        let best_candidate = match game.score_order() {
            ScoreOrder::HigherIsBetter => candidates.max(),
            ScoreOrder::LowerIsBetter => candidates.min(),
        };

        Self {
            game,
            runs: count,
            wins: runs.iter().filter(|r| r.won).count() as u32,
            timeouts: runs.iter().filter(|r| r.timed_out).count() as u32,
            avg_score: runs.iter().map(|r| r.score as f64).sum::<f64>() / denom,
            min_score: runs.iter().map(|r| r.score).min().unwrap_or(0),
            max_score: runs.iter().map(|r| r.score).max().unwrap_or(0),
            avg_steps: runs.iter().map(|r| r.steps as f64).sum::<f64>() / denom,
            best_candidate,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.wins as f64 / self.runs as f64
        }
    }
}

/// Aggregated results from a simulation batch.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,
    pub games: Vec<GameSummary>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a report from completed runs, one summary per game in `games`
    /// order.
    pub fn from_runs(runs: Vec<RunStats>, games: &[GameId]) -> Self {
        let summaries = games
            .iter()
            .map(|&game| {
                let mine: Vec<&RunStats> = runs.iter().filter(|r| r.game == game).collect();
                GameSummary::from_runs(game, &mine)
            })
            .collect();

        Self {
            num_runs: runs.len() as u32,
            runs_timed_out: runs.iter().filter(|r| r.timed_out).count() as u32,
            games: summaries,
            run_stats: runs,
        }
    }

    pub fn summary(&self, game: GameId) -> Option<&GameSummary> {
        self.games.iter().find(|s| s.game == game)
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} timed out\n\n",
            self.num_runs, self.runs_timed_out
        ));

        report.push_str("── PER-GAME BREAKDOWN ───────────────────────────────────────────\n");
        report.push_str("  Game          Runs   Win%   Avg Score   Min    Max    Avg Steps\n");
        report.push_str("  ────────────  ────   ────   ─────────   ───    ───    ─────────\n");
        for s in &self.games {
            report.push_str(&format!(
                "  {:<12}  {:4}  {:5.1}   {:9.1}  {:5}  {:5}   {:9.0}\n",
                s.game.name(),
                s.runs,
                s.win_rate() * 100.0,
                s.avg_score,
                s.min_score,
                s.max_score,
                s.avg_steps
            ));
        }
        report.push('\n');

        report.push_str("── BEST CANDIDATE SCORES ────────────────────────────────────────\n");
        for s in &self.games {
            let order = match s.game.score_order() {
                ScoreOrder::HigherIsBetter => "higher is better",
                ScoreOrder::LowerIsBetter => "lower is better",
            };
            match s.best_candidate {
                Some(best) => report.push_str(&format!(
                    "  {:<12}  {:>6}   ({})\n",
                    s.game.name(),
                    best,
                    order
                )),
                None => report.push_str(&format!("  {:<12}  {:>6}\n", s.game.name(), "-")),
            }
        }

        for s in &self.games {
            if s.timeouts > 0 {
                report.push_str(&format!(
                    "  ⚠️  {} hit the step limit in {} of {} runs\n",
                    s.game.name(),
                    s.timeouts,
                    s.runs
                ));
            }
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(game: GameId, won: bool, score: u32, candidate_best: Option<u32>) -> RunStats {
        RunStats {
            game,
            won,
            score,
            steps: 10,
            timed_out: false,
            candidate_best,
        }
    }

    #[test]
    fn test_best_candidate_respects_score_order() {
        let runs = vec![
            run(GameId::Twenty48, false, 300, Some(300)),
            run(GameId::Twenty48, false, 900, Some(900)),
            run(GameId::Memory, true, 12, Some(12)),
            run(GameId::Memory, true, 9, Some(9)),
            run(GameId::Memory, false, 40, None),
        ];
        let report = SimReport::from_runs(runs, &[GameId::Twenty48, GameId::Memory]);

        let twenty48 = report.summary(GameId::Twenty48).unwrap();
        assert_eq!(twenty48.best_candidate, Some(900));
        assert_eq!(twenty48.avg_score, 600.0);

        let memory = report.summary(GameId::Memory).unwrap();
        assert_eq!(memory.best_candidate, Some(9));
        assert_eq!(memory.wins, 2);
        assert_eq!((memory.min_score, memory.max_score), (9, 40));
    }

    #[test]
    fn test_empty_game_summary() {
        let report = SimReport::from_runs(Vec::new(), &[GameId::Snake]);
        let snake = report.summary(GameId::Snake).unwrap();
        assert_eq!(snake.runs, 0);
        assert_eq!(snake.win_rate(), 0.0);
        assert_eq!(snake.best_candidate, None);
    }

    #[test]
    fn test_json_has_per_game_entries() {
        let report = SimReport::from_runs(
            vec![run(GameId::Gomoku, true, 21, Some(11))],
            &[GameId::Gomoku],
        );
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["games"][0]["game"], "gomoku");
        assert_eq!(value["games"][0]["best_candidate"], 11);
        assert!(value.get("run_stats").is_none());
        assert!(report.to_text().contains("gomoku"));
    }
}
