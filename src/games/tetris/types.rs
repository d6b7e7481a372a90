//! Tetris data structures: pieces, phases, scoring policy and game state.

use crate::core::grid::Grid;
use serde::{Deserialize, Serialize};

/// Board width in cells.
pub const BOARD_WIDTH: usize = 10;
/// Board height in cells.
pub const BOARD_HEIGHT: usize = 20;
/// Lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// The seven tetrominoes. Doubles as the colour tag of locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Spawn-orientation shape matrix (row-major, `true` = filled).
    pub fn shape(&self) -> Vec<Vec<bool>> {
        let rows: &[&[u8]] = match self {
            PieceKind::I => &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
            PieceKind::S => &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
            PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
            PieceKind::J => &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
            PieceKind::L => &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
        };
        rows.iter()
            .map(|r| r.iter().map(|&v| v == 1).collect())
            .collect()
    }
}

/// A piece: a square shape matrix placed at a `(row, col)` offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Vec<Vec<bool>>,
    pub row: i32,
    pub col: i32,
}

impl Piece {
    /// Piece in spawn orientation, horizontally centred, with its topmost
    /// filled row on board row 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        let size = shape.len() as i32;
        let top = shape.iter().position(|r| r.iter().any(|&c| c)).unwrap_or(0) as i32;
        Self {
            kind,
            shape,
            row: -top,
            col: (BOARD_WIDTH as i32 - size) / 2,
        }
    }

    /// Absolute board coordinates of the filled cells.
    pub fn cells(&self) -> Vec<(i32, i32)> {
        let mut out = Vec::with_capacity(4);
        for (r, line) in self.shape.iter().enumerate() {
            for (c, &filled) in line.iter().enumerate() {
                if filled {
                    out.push((self.row + r as i32, self.col + c as i32));
                }
            }
        }
        out
    }

    pub fn shifted(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..self.clone()
        }
    }

    /// Rotated copy (90 degrees) about the matrix centre.
    pub fn rotated(&self, clockwise: bool) -> Self {
        let n = self.shape.len();
        let mut shape = vec![vec![false; n]; n];
        for (r, line) in self.shape.iter().enumerate() {
            for (c, &filled) in line.iter().enumerate() {
                if clockwise {
                    shape[c][n - 1 - r] = filled;
                } else {
                    shape[n - 1 - c][r] = filled;
                }
            }
        }
        Self {
            shape,
            ..self.clone()
        }
    }
}

/// Line-clear scoring policy. Points for `n` simultaneous lines are
/// `line_points[n] * level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrisScoring {
    pub line_points: [u32; 5],
    pub soft_drop_per_row: u32,
    pub hard_drop_per_row: u32,
}

impl Default for TetrisScoring {
    fn default() -> Self {
        Self {
            line_points: [0, 100, 300, 500, 800],
            soft_drop_per_row: 1,
            hard_drop_per_row: 2,
        }
    }
}

impl TetrisScoring {
    pub fn line_clear(&self, lines: usize, level: u32) -> u32 {
        self.line_points.get(lines).copied().unwrap_or(0) * level
    }
}

/// Per-tick lifecycle of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisPhase {
    /// A new piece is about to enter.
    Spawning,
    /// The active piece is descending.
    Falling,
    /// Downward motion was blocked; the piece is merged into the board.
    Locking,
    /// Full rows are being removed and scored.
    LineClearing,
    /// A spawn overlapped filled cells. Absorbing.
    GameOver,
}

/// Main game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TetrisGame {
    pub board: Grid<Option<PieceKind>>,
    /// The falling piece; `None` only while spawning or after game over.
    pub active: Option<Piece>,
    pub next_kind: PieceKind,
    pub phase: TetrisPhase,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    /// Rows removed by the most recent lock, for the renderer's flash.
    pub last_cleared: Vec<usize>,
    pub pieces_locked: u32,
    pub scoring: TetrisScoring,
}

impl TetrisGame {
    pub fn is_over(&self) -> bool {
        self.phase == TetrisPhase::GameOver
    }

    /// Gravity interval for the current level, in milliseconds.
    pub fn gravity_interval_ms(&self) -> u64 {
        gravity_interval_ms(self.level)
    }
}

/// Milliseconds per gravity row at `level` (1-based), floored at 100 ms.
pub fn gravity_interval_ms(level: u32) -> u64 {
    let reduction = u64::from(level.saturating_sub(1)) * 75;
    800u64.saturating_sub(reduction).max(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            let cells = Piece::spawn(kind).cells();
            assert_eq!(cells.len(), 4, "{:?}", kind);
            assert!(cells.iter().any(|&(r, _)| r == 0), "{:?} top at row 0", kind);
            assert!(cells.iter().all(|&(r, c)| r >= 0
                && c >= 0
                && (c as usize) < BOARD_WIDTH));
        }
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        for kind in PieceKind::ALL {
            let p = Piece::spawn(kind);
            let back = p.rotated(true).rotated(true).rotated(true).rotated(true);
            assert_eq!(back, p);
            assert_eq!(p.rotated(true).rotated(false), p);
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let t = Piece::spawn(PieceKind::T).rotated(true);
        // T pointing right: column 1 full, plus (1, 2)
        assert_eq!(
            t.shape,
            vec![
                vec![false, true, false],
                vec![false, true, true],
                vec![false, true, false],
            ]
        );
    }

    #[test]
    fn test_scoring_table_scales_with_level() {
        let s = TetrisScoring::default();
        assert_eq!(s.line_clear(1, 1), 100);
        assert_eq!(s.line_clear(4, 1), 800);
        assert_eq!(s.line_clear(2, 3), 900);
        assert_eq!(s.line_clear(0, 5), 0);
        assert_eq!(s.line_clear(9, 5), 0);
    }

    #[test]
    fn test_gravity_speeds_up_and_floors() {
        assert_eq!(gravity_interval_ms(1), 800);
        assert!(gravity_interval_ms(2) < gravity_interval_ms(1));
        assert_eq!(gravity_interval_ms(50), 100);
    }
}
