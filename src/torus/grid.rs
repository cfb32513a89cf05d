//! Flat toroidal board with incrementally maintained neighbor counts.
//!
//! Cells are stored row-major in a single `Vec<Cell>`. Every neighbor lookup
//! goes through [`wrap`], so neighbor maintenance can never index out of
//! range. Direct `(row, col)` access for edits is bounds-checked instead of
//! wrapped: a wrapped edit would silently hit an unrelated cell.
//!
//! When `width == 1` or `height == 1` the wrapped neighborhood folds back
//! onto the cell itself (and onto the same neighbor several times). That is
//! kept as-is: the count is still "live cells among the 8 wrapped offsets",
//! with multiplicity.

use std::ops::Index;

use crate::error::{LifeError, Result};

use super::cell::Cell;

/// `(d_row, d_col)` offsets of the Moore neighborhood.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Normalize a signed coordinate onto `0..dim`.
///
/// Total for any `i` as long as `dim > 0`, which `Grid::new` guarantees.
#[inline(always)]
pub fn wrap(i: isize, dim: usize) -> usize {
    i.rem_euclid(dim as isize) as usize
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    pub(crate) cells: Vec<Cell>,
}

impl Grid {
    /// All-dead board of `width` columns by `height` rows.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::DEAD; len],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major view of every cell.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[self.cell_index(row, col)])
        } else {
            None
        }
    }

    #[inline(always)]
    pub(crate) fn cell_index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Reset every cell to dead, zero neighbors, unchanged.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::DEAD);
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Add one to the count of each of the 8 wrapped neighbors of
    /// `(row, col)`. Call exactly once per dead-to-alive transition.
    #[inline]
    pub fn increment_neighbors(&mut self, row: usize, col: usize) {
        self.for_each_neighbor_mut(row, col, |cell| cell.neighbor_count += 1);
    }

    /// Remove one from the count of each of the 8 wrapped neighbors of
    /// `(row, col)`. Call exactly once per alive-to-dead transition.
    #[inline]
    pub fn decrement_neighbors(&mut self, row: usize, col: usize) {
        self.for_each_neighbor_mut(row, col, |cell| cell.neighbor_count -= 1);
    }

    #[inline(always)]
    fn for_each_neighbor_mut<F: FnMut(&mut Cell)>(&mut self, row: usize, col: usize, mut f: F) {
        debug_assert!(row < self.height && col < self.width);
        for (d_row, d_col) in NEIGHBOR_OFFSETS {
            let r = wrap(row as isize + d_row, self.height);
            let c = wrap(col as isize + d_col, self.width);
            let idx = self.cell_index(r, c);
            f(&mut self.cells[idx]);
        }
    }

    /// Paint: bring a dead cell to life. A live cell is left untouched,
    /// including its `changed` flag.
    pub fn toggle_alive(&mut self, row: usize, col: usize) -> Result<()> {
        let idx = self.checked_index(row, col)?;
        let cell = &mut self.cells[idx];
        if cell.alive {
            return Ok(());
        }
        cell.alive = true;
        cell.changed = true;
        self.increment_neighbors(row, col);
        Ok(())
    }

    /// Erase: kill a live cell. A dead cell is left untouched.
    pub fn toggle_dead(&mut self, row: usize, col: usize) -> Result<()> {
        let idx = self.checked_index(row, col)?;
        let cell = &mut self.cells[idx];
        if !cell.alive {
            return Ok(());
        }
        cell.alive = false;
        cell.changed = true;
        self.decrement_neighbors(row, col);
        Ok(())
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.height || col >= self.width {
            return Err(LifeError::OutOfRangeEdit {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(self.cell_index(row, col))
    }

    /// Live neighbors of `(row, col)` counted by scanning, bypassing the
    /// maintained count.
    pub fn scan_live_neighbors(&self, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(d_row, d_col)| {
                let r = wrap(row as isize + d_row, self.height);
                let c = wrap(col as isize + d_col, self.width);
                self.cells[self.cell_index(r, c)].alive
            })
            .count() as u8
    }

    /// First cell, in row-major order, whose maintained count disagrees with
    /// a full rescan. `None` when the neighbor invariant holds.
    pub fn find_inconsistent_count(&self) -> Option<(usize, usize)> {
        (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| (row, col)))
            .find(|&(row, col)| {
                self.cells[self.cell_index(row, col)].neighbor_count
                    != self.scan_live_neighbors(row, col)
            })
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    /// Panics when `(row, col)` is off the board; use [`Grid::get`] for a
    /// checked lookup.
    fn index(&self, (row, col): (usize, usize)) -> &Cell {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) is outside the {}x{} board",
            self.height,
            self.width
        );
        &self.cells[row * self.width + col]
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize> {
    let invalid = LifeError::InvalidDimension { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    match width.checked_mul(height) {
        Some(len) if len <= isize::MAX as usize / std::mem::size_of::<Cell>() => Ok(len),
        _ => Err(invalid),
    }
}
