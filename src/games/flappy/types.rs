//! Flappy data structures: difficulty tuning, pipes and bird state.

use serde::{Deserialize, Serialize};

/// Difficulty levels for Flappy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlappyDifficulty {
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

difficulty_enum_impl!(FlappyDifficulty);

/// Playfield dimensions in cells.
pub const GAME_WIDTH: u16 = 50;
pub const GAME_HEIGHT: u16 = 18;

/// Bird fixed horizontal column position and width.
pub const BIRD_COL: u16 = 8;
pub const BIRD_WIDTH: u16 = 2;

/// Pipe width in cells.
pub const PIPE_WIDTH: u16 = 3;

/// Physics tick length in milliseconds.
pub const TICK_MS: u64 = 16;

impl FlappyDifficulty {
    /// Gravity (velocity change per tick).
    ///
    /// Gravity-to-flap ratio is roughly 18x, giving about half a second of
    /// rise to the apex per flap on an 18-row field.
    pub fn gravity(&self) -> f64 {
        match self {
            Self::Novice => 0.005,
            Self::Apprentice => 0.006,
            Self::Journeyman => 0.007,
            Self::Master => 0.008,
        }
    }

    /// Flap impulse. Replaces the velocity rather than adding to it
    /// (negative = upward).
    pub fn flap_impulse(&self) -> f64 {
        match self {
            Self::Novice => -0.18,
            Self::Apprentice => -0.19,
            Self::Journeyman => -0.20,
            Self::Master => -0.22,
        }
    }

    /// Maximum downward velocity per tick.
    pub fn terminal_velocity(&self) -> f64 {
        0.35
    }

    pub fn pipe_gap(&self) -> u16 {
        match self {
            Self::Novice => 7,
            Self::Apprentice => 6,
            Self::Journeyman => 5,
            Self::Master => 4,
        }
    }

    /// Pipe speed in columns per tick.
    pub fn pipe_speed(&self) -> f64 {
        match self {
            Self::Novice => 0.073,
            Self::Apprentice => 0.097,
            Self::Journeyman => 0.121,
            Self::Master => 0.145,
        }
    }

    /// Horizontal spacing between consecutive pipes in columns.
    pub fn pipe_spacing(&self) -> f64 {
        match self {
            Self::Novice => 20.0,
            Self::Apprentice => 17.0,
            Self::Journeyman => 15.0,
            Self::Master => 13.0,
        }
    }

    /// Pipes cleared for a win.
    pub fn target_score(&self) -> u32 {
        match self {
            Self::Novice => 10,
            Self::Apprentice => 15,
            Self::Journeyman => 20,
            Self::Master => 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlappyResult {
    Win,
    Loss,
}

/// Upper and lower pipe sharing one column span, open between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge in fractional columns.
    pub x: f64,
    pub gap_center: u16,
    /// Set once the pipe's right edge is behind the bird.
    pub passed: bool,
}

impl Pipe {
    pub fn right_edge(&self) -> f64 {
        self.x + PIPE_WIDTH as f64
    }

    /// Top and bottom rows of the open gap as `[top, bottom)`.
    pub fn gap_bounds(&self, gap: u16) -> (f64, f64) {
        let top = self.gap_center.saturating_sub(gap / 2) as f64;
        (top, top + gap as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlappyGame {
    pub difficulty: FlappyDifficulty,
    pub game_result: Option<FlappyResult>,
    pub forfeit_pending: bool,
    /// True until the first flap. Physics paused while waiting.
    pub waiting_to_start: bool,

    /// Vertical position in rows. Row 0 = ceiling, `GAME_HEIGHT - 1` = ground.
    pub bird_y: f64,
    /// Rows per tick, positive = downward.
    pub bird_velocity: f64,
    /// Applied and cleared by the next tick.
    pub flap_queued: bool,

    pub pipes: Vec<Pipe>,
    pub next_pipe_x: f64,

    pub score: u32,
    pub target_score: u32,
    pub tick_count: u64,

    // copied from `difficulty` at construction
    pub gravity: f64,
    pub flap_impulse: f64,
    pub terminal_velocity: f64,
    pub pipe_gap: u16,
    pub pipe_speed: f64,
    pub pipe_spacing: f64,
}

impl FlappyGame {
    pub fn new(difficulty: FlappyDifficulty) -> Self {
        Self {
            difficulty,
            game_result: None,
            forfeit_pending: false,
            waiting_to_start: true,

            // Roughly the middle of the playable area
            bird_y: 8.0,
            bird_velocity: 0.0,
            flap_queued: false,

            pipes: Vec::new(),
            // First pipe spawns off the right edge
            next_pipe_x: GAME_WIDTH as f64 + 5.0,

            score: 0,
            target_score: difficulty.target_score(),
            tick_count: 0,

            gravity: difficulty.gravity(),
            flap_impulse: difficulty.flap_impulse(),
            terminal_velocity: difficulty.terminal_velocity(),
            pipe_gap: difficulty.pipe_gap(),
            pipe_speed: difficulty.pipe_speed(),
            pipe_spacing: difficulty.pipe_spacing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_defaults() {
        let game = FlappyGame::new(FlappyDifficulty::Novice);
        assert!(game.game_result.is_none());
        assert!(game.waiting_to_start);
        assert_eq!(game.score, 0);
        assert_eq!(game.target_score, 10);
        assert!(game.pipes.is_empty());
        assert!(!game.flap_queued);
    }

    #[test]
    fn test_difficulty_parameters() {
        let d = FlappyDifficulty::Novice;
        assert!((d.gravity() - 0.005).abs() < f64::EPSILON);
        assert!((d.flap_impulse() - (-0.18)).abs() < f64::EPSILON);
        assert_eq!(d.pipe_gap(), 7);

        let d = FlappyDifficulty::Master;
        assert!((d.gravity() - 0.008).abs() < f64::EPSILON);
        assert_eq!(d.pipe_gap(), 4);
        assert_eq!(d.target_score(), 30);
    }

    #[test]
    fn test_gap_bounds() {
        let pipe = Pipe {
            x: 10.0,
            gap_center: 9,
            passed: false,
        };
        assert_eq!(pipe.gap_bounds(6), (6.0, 12.0));
        assert_eq!(pipe.right_edge(), 13.0);
    }
}
