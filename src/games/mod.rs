//! Game simulators: 2048, Tetris, Snake, Minesweeper, Solitaire, Blackjack,
//! Memory, Flappy, typing trainer and Gomoku.
//!
//! Each game exposes pure transition functions (`&Game -> Game`). A rejected
//! input returns an unchanged copy; terminal states are absorbing.

use serde::{Deserialize, Serialize};

/// Generate the standard `ALL`, `from_index()`, and `name()` methods shared by
/// all four-variant difficulty enums (Novice / Apprentice / Journeyman / Master).
macro_rules! difficulty_enum_impl {
    ($name:ident) => {
        impl $name {
            pub const ALL: [$name; 4] = [
                $name::Novice,
                $name::Apprentice,
                $name::Journeyman,
                $name::Master,
            ];

            pub fn from_index(index: usize) -> Self {
                Self::ALL.get(index).copied().unwrap_or($name::Novice)
            }

            pub fn name(&self) -> &'static str {
                match self {
                    Self::Novice => "Novice",
                    Self::Apprentice => "Apprentice",
                    Self::Journeyman => "Journeyman",
                    Self::Master => "Master",
                }
            }
        }
    };
}

pub mod blackjack;
pub mod cards;
pub mod flappy;
pub mod gomoku;
pub mod memory;
pub mod minesweeper;
pub mod snake;
pub mod solitaire;
pub mod tetris;
pub mod twenty48;
pub mod typing;

pub use blackjack::{BlackjackGame, BlackjackPhase, HandOutcome};
pub use flappy::{FlappyDifficulty, FlappyGame, FlappyResult};
pub use gomoku::{GomokuGame, GomokuResult, Player as GomokuPlayer, BOARD_SIZE};
pub use memory::{MemoryGame, MemoryResult};
pub use minesweeper::{MinesweeperDifficulty, MinesweeperGame, MinesweeperResult};
pub use snake::{SnakeDifficulty, SnakeGame, SnakeResult};
pub use solitaire::{SolitaireGame, SolitaireMove};
pub use tetris::{TetrisGame, TetrisPhase};
pub use twenty48::{Twenty48Game, Twenty48Result};
pub use typing::TypingGame;

/// Four-way direction shared by the grid games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (dx, dy) delta for this direction.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Whether a larger or smaller number is the better record for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrder {
    HigherIsBetter,
    /// Times and move counts (Minesweeper seconds, Memory attempts, Gomoku
    /// stones to win).
    LowerIsBetter,
}

/// Identifier used to key persisted best scores.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GameId {
    Twenty48,
    Tetris,
    Snake,
    Minesweeper,
    Solitaire,
    Blackjack,
    Memory,
    Flappy,
    Typing,
    Gomoku,
}

impl GameId {
    pub const ALL: [GameId; 10] = [
        GameId::Twenty48,
        GameId::Tetris,
        GameId::Snake,
        GameId::Minesweeper,
        GameId::Solitaire,
        GameId::Blackjack,
        GameId::Memory,
        GameId::Flappy,
        GameId::Typing,
        GameId::Gomoku,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Twenty48 => "2048",
            Self::Tetris => "tetris",
            Self::Snake => "snake",
            Self::Minesweeper => "minesweeper",
            Self::Solitaire => "solitaire",
            Self::Blackjack => "blackjack",
            Self::Memory => "memory",
            Self::Flappy => "flappy",
            Self::Typing => "typing",
            Self::Gomoku => "gomoku",
        }
    }

    /// Parse a game name as accepted by the simulator CLI.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(name))
    }

    pub fn score_order(&self) -> ScoreOrder {
        match self {
            Self::Minesweeper | Self::Memory | Self::Gomoku => ScoreOrder::LowerIsBetter,
            _ => ScoreOrder::HigherIsBetter,
        }
    }
}
