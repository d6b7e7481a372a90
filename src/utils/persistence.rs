//! Best-score persistence port and JSON helpers for ~/.arcade/ files.
//!
//! The games never touch storage. The session layer hands a finished score
//! to a [`ScoreStore`], and the store decides whether it beats the recorded
//! best for that game (higher or lower is better depending on the game).

use crate::core::error::PersistenceError;
use crate::games::{GameId, ScoreOrder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name of the persisted best scores inside the arcade directory.
pub const SCORES_FILE: &str = "scores.json";

/// Get the ~/.arcade/ directory path, creating it if needed.
pub fn arcade_dir() -> Result<PathBuf, PersistenceError> {
    let home_dir = dirs::home_dir().ok_or(PersistenceError::NoHomeDir)?;
    let dir = home_dir.join(".arcade");
    fs::create_dir_all(&dir).map_err(|source| PersistenceError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Get the full path for a file in ~/.arcade/.
pub fn save_path(filename: &str) -> Result<PathBuf, PersistenceError> {
    Ok(arcade_dir()?.join(filename))
}

/// Load JSON from `path`, returning `T::default()` if the file is missing.
/// A present but malformed file is an error, so it never gets silently
/// overwritten with defaults.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<T, PersistenceError> {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).map_err(|source| PersistenceError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(source) => Err(PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Save a value as pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(data).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Key-value contract for best scores, keyed by game.
pub trait ScoreStore {
    /// The recorded best for a game, if any.
    fn best(&self, game: GameId) -> Option<u32>;

    /// Offer a candidate best. Overwrites only if strictly better; returns
    /// whether it did.
    fn submit(&mut self, game: GameId, candidate: u32) -> Result<bool, PersistenceError>;
}

/// Whether `candidate` strictly improves on `current` under `order`.
pub fn improves(order: ScoreOrder, candidate: u32, current: Option<u32>) -> bool {
    match (order, current) {
        (_, None) => true,
        (ScoreOrder::HigherIsBetter, Some(best)) => candidate > best,
        (ScoreOrder::LowerIsBetter, Some(best)) => candidate < best,
    }
}

/// In-memory store, for tests and sessions that should not touch disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    bests: BTreeMap<GameId, u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn best(&self, game: GameId) -> Option<u32> {
        self.bests.get(&game).copied()
    }

    fn submit(&mut self, game: GameId, candidate: u32) -> Result<bool, PersistenceError> {
        if improves(game.score_order(), candidate, self.best(game)) {
            self.bests.insert(game, candidate);
            return Ok(true);
        }
        Ok(false)
    }
}

/// One persisted best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestRecord {
    pub value: u32,
    /// Unix timestamp (seconds) when the record was set.
    pub achieved_at: i64,
}

/// JSON-file store. Every accepted submission is written through.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
    records: BTreeMap<GameId, BestRecord>,
}

impl JsonScoreStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let records = load_json_or_default(&path)?;
        Ok(Self { path, records })
    }

    /// Open the default store at ~/.arcade/scores.json.
    pub fn open_default() -> Result<Self, PersistenceError> {
        Self::open(save_path(SCORES_FILE)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, game: GameId) -> Option<BestRecord> {
        self.records.get(&game).copied()
    }
}

impl ScoreStore for JsonScoreStore {
    fn best(&self, game: GameId) -> Option<u32> {
        self.records.get(&game).map(|r| r.value)
    }

    fn submit(&mut self, game: GameId, candidate: u32) -> Result<bool, PersistenceError> {
        if !improves(game.score_order(), candidate, self.best(game)) {
            return Ok(false);
        }
        let previous = self.records.insert(
            game,
            BestRecord {
                value: candidate,
                achieved_at: chrono::Utc::now().timestamp(),
            },
        );
        if let Err(e) = save_json(&self.path, &self.records) {
            warn!(game = game.name(), error = %e, "failed to persist best score");
            // Keep memory and disk in agreement.
            match previous {
                Some(prev) => self.records.insert(game, prev),
                None => self.records.remove(&game),
            };
            return Err(e);
        }
        info!(game = game.name(), best = candidate, "new best score");
        Ok(true)
    }
}
