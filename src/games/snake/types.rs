//! Snake state: the body deque, buffered heading, food and board size.

use crate::games::Direction;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeDifficulty {
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

difficulty_enum_impl!(SnakeDifficulty);

impl SnakeDifficulty {
    /// Every level plays on the same 26x26 board.
    pub fn grid_width(&self) -> i16 {
        26
    }

    pub fn grid_height(&self) -> i16 {
        26
    }

    /// Milliseconds between steps.
    pub fn move_interval_ms(&self) -> u64 {
        match self {
            Self::Novice => 200,
            Self::Apprentice => 150,
            Self::Journeyman => 120,
            Self::Master => 90,
        }
    }

    pub fn target_score(&self) -> u32 {
        match self {
            Self::Novice => 10,
            Self::Apprentice => 15,
            Self::Journeyman => 20,
            Self::Master => 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeResult {
    Win,
    Loss,
}

/// Board cell; x grows rightward, y downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeGame {
    pub game_result: Option<SnakeResult>,
    pub forfeit_pending: bool,

    pub grid_width: i16,
    pub grid_height: i16,

    /// Head first.
    pub snake: VecDeque<Position>,
    /// Direction applied on the last step.
    pub direction: Direction,
    /// Heading for the next step; a reversal of `direction` is refused.
    pub next_direction: Direction,

    /// `None` only once the snake fills the board.
    pub food: Option<Position>,

    pub score: u32,
    /// Food needed to win; `None` plays until the board is full.
    pub target_score: Option<u32>,

    /// Movement interval in milliseconds, read by the session scheduler.
    pub move_interval_ms: u64,
    pub tick_count: u64,
}

impl SnakeGame {
    pub fn new<R: rand::Rng>(difficulty: SnakeDifficulty, rng: &mut R) -> Self {
        let mut game = Self::empty(
            difficulty.grid_width(),
            difficulty.grid_height(),
            difficulty.move_interval_ms(),
        );
        game.target_score = Some(difficulty.target_score());
        game.food = super::logic::spawn_food(&game, rng);
        game
    }

    /// Endless game on a custom board; only a full board wins.
    pub fn endless<R: rand::Rng>(
        width: i16,
        height: i16,
        move_interval_ms: u64,
        rng: &mut R,
    ) -> Self {
        let mut game = Self::empty(width.max(4), height.max(1), move_interval_ms);
        game.food = super::logic::spawn_food(&game, rng);
        game
    }

    /// Snake starts in the centre, 3 segments long, moving right.
    fn empty(grid_width: i16, grid_height: i16, move_interval_ms: u64) -> Self {
        let center_x = grid_width / 2;
        let center_y = grid_height / 2;
        let snake = (0..3)
            .map(|i| Position::new(center_x - i, center_y))
            .collect();

        Self {
            game_result: None,
            forfeit_pending: false,
            grid_width,
            grid_height,
            snake,
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: None,
            score: 0,
            target_score: None,
            move_interval_ms,
            tick_count: 0,
        }
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.grid_width && pos.y >= 0 && pos.y < self.grid_height
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }
}
