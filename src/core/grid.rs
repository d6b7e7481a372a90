//! Fixed-size 2D grid shared by the board games.
//!
//! Dimensions are set at construction and never change. Reads are
//! sentinel-checked (`get` returns `None` off-grid, which neighbour scans
//! rely on); writes through [`Grid::set`] return an error off-grid, and the
//! `Index`/`IndexMut` impls panic, since an off-grid index there is a bug.

use super::error::GridError;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Offsets of the 8 surrounding cells, row-major.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A rectangular grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a `rows x cols` grid with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    /// Build a grid from nested rows. Panics if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == width),
            "grid rows must all have the same length"
        );
        Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    /// Copy of one row, left to right.
    pub fn row(&self, row: usize) -> Vec<T> {
        assert!(row < self.rows, "row {row} out of bounds");
        self.cells[row * self.cols..(row + 1) * self.cols].to_vec()
    }

    /// Copy of one column, top to bottom.
    pub fn column(&self, col: usize) -> Vec<T> {
        assert!(col < self.cols, "column {col} out of bounds");
        (0..self.rows).map(|r| self[(r, col)].clone()).collect()
    }

    /// Overwrite a full row. Panics on a length mismatch.
    pub fn set_row(&mut self, row: usize, values: &[T]) {
        assert_eq!(values.len(), self.cols, "row length mismatch");
        self.cells[row * self.cols..(row + 1) * self.cols].clone_from_slice(values);
    }

    /// Overwrite a full column. Panics on a length mismatch.
    pub fn set_column(&mut self, col: usize, values: &[T]) {
        assert_eq!(values.len(), self.rows, "column length mismatch");
        for (r, v) in values.iter().enumerate() {
            self[(r, col)] = v.clone();
        }
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `(row, col)` lies inside the grid. Accepts signed coordinates
    /// so callers can probe neighbours without underflow.
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Read a cell; `None` when off-grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Signed-coordinate read for directional scans.
    pub fn get_signed(&self, row: i32, col: i32) -> Option<&T> {
        if self.in_bounds(row, col) {
            self.get(row as usize, col as usize)
        } else {
            None
        }
    }

    /// Write a cell, failing if it is off-grid.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.cells[row * self.cols + col] = value;
        Ok(())
    }

    /// Coordinates of the up-to-8 in-bounds neighbours of a cell.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row as i32 + dr;
                let c = col as i32 + dc;
                self.in_bounds(r, c).then_some((r as usize, c as usize))
            })
            .collect()
    }

    /// Iterate `((row, col), &cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / cols, i % cols), cell))
    }

    /// Iterate all cells mutably in row-major order.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    /// Coordinates of every cell matching `pred`.
    pub fn positions<F: Fn(&T) -> bool>(&self, pred: F) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|(_, cell)| pred(cell))
            .map(|(pos, _)| pos)
            .collect()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "grid index ({row}, {col}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        &self.cells[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "grid index ({row}, {col}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        &mut self.cells[row * self.cols + col]
    }
}
