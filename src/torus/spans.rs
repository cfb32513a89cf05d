//! Redraw spans: per row, the maximal column runs whose cells are alive or
//! flipped in the last transition.
//!
//! Purely a view over a [`Grid`]; nothing here touches `changed`. The flags
//! are reset by the next transition clearing its output buffer.

use std::iter::FusedIterator;
use std::ops::Range;

use super::cell::Cell;
use super::grid::Grid;

impl Grid {
    /// Lazy per-row redraw spans, top row first.
    pub fn draw_spans(&self) -> DrawSpans<'_> {
        DrawSpans { grid: self, row: 0 }
    }

    /// Redraw spans of a single row.
    pub fn row_spans(&self, row: usize) -> RowSpans<'_> {
        RowSpans {
            row,
            cells: self.row(row),
            col: 0,
        }
    }
}

pub struct DrawSpans<'a> {
    grid: &'a Grid,
    row: usize,
}

impl<'a> Iterator for DrawSpans<'a> {
    type Item = RowSpans<'a>;

    fn next(&mut self) -> Option<RowSpans<'a>> {
        if self.row >= self.grid.height() {
            return None;
        }
        let spans = self.grid.row_spans(self.row);
        self.row += 1;
        Some(spans)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.grid.height() - self.row;
        (left, Some(left))
    }
}

impl ExactSizeIterator for DrawSpans<'_> {}
impl FusedIterator for DrawSpans<'_> {}

/// Column ranges `[start, end)` of one row.
#[derive(Clone)]
pub struct RowSpans<'a> {
    row: usize,
    cells: &'a [Cell],
    col: usize,
}

impl RowSpans<'_> {
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }
}

impl Iterator for RowSpans<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let len = self.cells.len();
        while self.col < len && !self.cells[self.col].needs_draw() {
            self.col += 1;
        }
        if self.col == len {
            return None;
        }
        let start = self.col;
        while self.col < len && self.cells[self.col].needs_draw() {
            self.col += 1;
        }
        Some(start..self.col)
    }
}

impl FusedIterator for RowSpans<'_> {}
