//! Tunable policy loaded from ~/.arcade/config.json.
//!
//! Numeric constants that are matters of taste (AI weights, the Tetris
//! scoring table, default difficulties) live here rather than in the game
//! logic. A missing file or missing keys fall back to the defaults.

use crate::core::error::PersistenceError;
use crate::games::gomoku::GomokuAiConfig;
use crate::games::tetris::TetrisScoring;
use crate::games::{FlappyDifficulty, MinesweeperDifficulty, SnakeDifficulty};
use crate::utils::persistence::{load_json_or_default, save_json, save_path};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub gomoku_ai: GomokuAiConfig,
    pub tetris_scoring: TetrisScoring,
    pub snake_difficulty: SnakeDifficulty,
    pub flappy_difficulty: FlappyDifficulty,
    pub minesweeper_difficulty: MinesweeperDifficulty,
    pub memory_pairs: usize,
    pub blackjack_bankroll: u32,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            gomoku_ai: GomokuAiConfig::default(),
            tetris_scoring: TetrisScoring::default(),
            snake_difficulty: SnakeDifficulty::Novice,
            flappy_difficulty: FlappyDifficulty::Novice,
            minesweeper_difficulty: MinesweeperDifficulty::Novice,
            memory_pairs: crate::games::memory::DEFAULT_PAIRS,
            blackjack_bankroll: crate::games::blackjack::DEFAULT_BANKROLL,
        }
    }
}

impl ArcadeConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, PersistenceError> {
        let config: Self = load_json_or_default(path)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load ~/.arcade/config.json.
    pub fn load() -> Result<Self, PersistenceError> {
        Self::load_from(&save_path(CONFIG_FILE)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PersistenceError> {
        save_json(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("arcade_cfg_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = ArcadeConfig::load_from(&temp_path("absent")).unwrap();
        assert_eq!(config, ArcadeConfig::default());
        assert_eq!(config.gomoku_ai.attack_weight_permille, 1200);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_path("partial");
        fs::write(
            &path,
            r#"{ "gomoku_ai": { "attack_weight_permille": 1500 }, "tetris_scoring": { "hard_drop_per_row": 3 } }"#,
        )
        .unwrap();
        let config = ArcadeConfig::load_from(&path).unwrap();
        assert_eq!(config.gomoku_ai.attack_weight_permille, 1500);
        assert_eq!(config.gomoku_ai.max_candidates, GomokuAiConfig::default().max_candidates);
        assert_eq!(config.tetris_scoring.hard_drop_per_row, 3);
        assert_eq!(config.tetris_scoring.line_points, [0, 100, 300, 500, 800]);
        assert_eq!(config.memory_pairs, 8);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path("roundtrip");
        let config = ArcadeConfig {
            snake_difficulty: SnakeDifficulty::Master,
            blackjack_bankroll: 250,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(ArcadeConfig::load_from(&path).unwrap(), config);
        fs::remove_file(path).ok();
    }
}
