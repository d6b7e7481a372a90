//! Typing trainer data structures.

use rand::seq::SliceRandom;
use rand::Rng;

/// Built-in practice passages.
pub const PASSAGES: [&str; 5] = [
    "the quick brown fox jumps over the lazy dog",
    "pack my box with five dozen liquor jugs",
    "sphinx of black quartz judge my vow",
    "how vexingly quick daft zebras jump",
    "a journey of a thousand miles begins with a single step",
];

/// Characters per conventional word.
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingGame {
    pub target: Vec<char>,
    /// What has been typed so far; the cursor sits at `typed.len()`.
    pub typed: Vec<char>,
    pub correct_keystrokes: u32,
    pub incorrect_keystrokes: u32,
    /// Only runs between the first keystroke and completion.
    pub elapsed_ms: u64,
    pub started: bool,
}

impl TypingGame {
    pub fn new(text: &str) -> Self {
        Self {
            target: text.chars().collect(),
            typed: Vec::new(),
            correct_keystrokes: 0,
            incorrect_keystrokes: 0,
            elapsed_ms: 0,
            started: false,
        }
    }

    /// Random built-in passage.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let text = PASSAGES.choose(rng).copied().unwrap_or(PASSAGES[0]);
        Self::new(text)
    }

    pub fn cursor(&self) -> usize {
        self.typed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.typed.len() >= self.target.len()
    }

    /// Typed characters that currently match the target.
    pub fn correct_chars(&self) -> usize {
        self.typed
            .iter()
            .zip(&self.target)
            .filter(|(a, b)| a == b)
            .count()
    }

    pub fn total_keystrokes(&self) -> u32 {
        self.correct_keystrokes + self.incorrect_keystrokes
    }

    /// Words per minute over correct characters. Zero before any time passes.
    pub fn wpm(&self) -> f64 {
        if self.elapsed_ms == 0 {
            return 0.0;
        }
        let minutes = self.elapsed_ms as f64 / 60_000.0;
        (self.correct_chars() as f64 / CHARS_PER_WORD) / minutes
    }

    /// Fraction of keystrokes that were correct, 1.0 before any typing.
    pub fn accuracy(&self) -> f64 {
        match self.total_keystrokes() {
            0 => 1.0,
            total => self.correct_keystrokes as f64 / total as f64,
        }
    }
}
