//! Memory data structures.

use crate::games::cards;
use rand::Rng;

pub const DEFAULT_PAIRS: usize = 8;
/// Layout hint for renderers; 16 cards make a 4x4 table.
pub const COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryResult {
    /// Every pair matched.
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCard {
    /// Pair identifier; exactly two cards share each value.
    pub value: u8,
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryGame {
    pub cards: Vec<MemoryCard>,
    /// First card of the attempt in progress.
    pub first_pick: Option<usize>,
    /// Last failed pair, left face up until the next flip.
    pub mismatch: Option<(usize, usize)>,
    /// Completed two-card attempts.
    pub moves: u32,
    pub pairs_found: usize,
    pub game_result: Option<MemoryResult>,
}

impl MemoryGame {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_pairs(DEFAULT_PAIRS, rng)
    }

    /// `pairs` values, each duplicated, shuffled face down.
    pub fn with_pairs<R: Rng>(pairs: usize, rng: &mut R) -> Self {
        let pairs = pairs.clamp(1, usize::from(u8::MAX));
        let mut values: Vec<u8> = (0..pairs as u8).flat_map(|v| [v, v]).collect();
        cards::shuffle(&mut values, rng);
        Self::from_values(&values)
    }

    /// Fixed layout (tests, replays). Every value must appear exactly twice.
    pub fn from_values(values: &[u8]) -> Self {
        for v in values {
            assert_eq!(
                values.iter().filter(|&w| w == v).count(),
                2,
                "memory value {v} must appear exactly twice"
            );
        }
        Self {
            cards: values
                .iter()
                .map(|&value| MemoryCard {
                    value,
                    face_up: false,
                    matched: false,
                })
                .collect(),
            first_pick: None,
            mismatch: None,
            moves: 0,
            pairs_found: 0,
            game_result: None,
        }
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }
}
