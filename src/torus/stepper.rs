//! One B3/S23 transition from a consistent `current` board into `next`.
//!
//! The rule is always evaluated with `current`'s maintained counts. `next`'s
//! counts are being built during the same sweep (a birth at row `r` bumps
//! cells in rows `r - 1` and `r + 1`), so they are never read back here.

use rayon::prelude::*;

use super::cell::Cell;
use super::grid::Grid;
use super::rules::LIFE;

/// Sequential reference transition.
///
/// `next` is wiped first, so any flags or counts it held from two
/// generations ago are discarded. Both boards must share dimensions.
pub fn step_into(current: &Grid, next: &mut Grid) {
    assert_same_shape(current, next);
    next.clear();

    let width = current.width();
    for row in 0..current.height() {
        for col in 0..width {
            let idx = row * width + col;
            let before = current.cells[idx];
            let alive = LIFE.next_alive(before.alive, before.neighbor_count);
            let cell = &mut next.cells[idx];
            cell.alive = alive;
            cell.changed = alive != before.alive;
            if alive {
                next.increment_neighbors(row, col);
            }
        }
    }
}

/// Row-partitioned transition with the same result as [`step_into`].
///
/// Phase one decides `alive`/`changed` per row in parallel; each worker owns
/// a disjoint row slice of `next` and only reads `current`. Phase two applies
/// the neighbor increments sequentially, since adjacent rows share neighbors.
pub fn step_into_parallel(current: &Grid, next: &mut Grid) {
    assert_same_shape(current, next);

    let width = current.width();
    next.cells
        .par_chunks_mut(width)
        .zip(current.cells.par_chunks(width))
        .for_each(|(out_row, in_row)| {
            for (out, before) in out_row.iter_mut().zip(in_row) {
                let alive = LIFE.next_alive(before.alive, before.neighbor_count);
                *out = Cell {
                    alive,
                    neighbor_count: 0,
                    changed: alive != before.alive,
                };
            }
        });

    for row in 0..next.height() {
        for col in 0..width {
            if next.cells[row * width + col].alive {
                next.increment_neighbors(row, col);
            }
        }
    }
}

fn assert_same_shape(current: &Grid, next: &Grid) {
    assert!(
        current.width() == next.width() && current.height() == next.height(),
        "double buffers disagree on shape: {}x{} vs {}x{}",
        current.height(),
        current.width(),
        next.height(),
        next.width()
    );
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::{step_into, step_into_parallel};
    use crate::torus::grid::Grid;

    fn board(width: usize, height: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(row, col) in live {
            grid.toggle_alive(row, col).unwrap();
        }
        grid
    }

    fn step(current: &Grid) -> Grid {
        let mut next = Grid::new(current.width(), current.height()).unwrap();
        step_into(current, &mut next);
        next
    }

    #[test]
    fn lone_cell_dies_of_underpopulation() {
        let next = step(&board(5, 5, &[(2, 2)]));
        assert!(!next[(2, 2)].alive);
        assert!(next[(2, 2)].changed);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn crowded_cell_dies_of_overpopulation() {
        // Center plus four orthogonal neighbors: the center sees 4.
        let current = board(7, 7, &[(3, 3), (2, 3), (4, 3), (3, 2), (3, 4)]);
        assert_eq!(current[(3, 3)].neighbor_count, 4);
        let next = step(&current);
        assert!(!next[(3, 3)].alive);
        assert!(next[(3, 3)].changed);
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        let current = board(6, 6, &[(1, 1), (1, 2), (2, 1)]);
        assert_eq!(current[(2, 2)].neighbor_count, 3);
        let next = step(&current);
        assert!(next[(2, 2)].alive);
        assert!(next[(2, 2)].changed);
        // The three seeds each have two neighbors and survive unchanged.
        for pos in [(1, 1), (1, 2), (2, 1)] {
            assert!(next[pos].alive);
            assert!(!next[pos].changed);
        }
    }

    #[test]
    fn next_buffer_leftovers_are_discarded() {
        let current = board(5, 5, &[]);
        let mut next = board(5, 5, &[(0, 0), (0, 1), (1, 0)]);
        step_into(&current, &mut next);
        assert!(next.cells().iter().all(|cell| *cell == Default::default()));
    }

    #[test]
    fn parallel_sweep_matches_sequential() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x7025_0B0A);
        let mut current = Grid::new(37, 23).unwrap();
        for row in 0..23 {
            for col in 0..37 {
                if rng.random_bool(0.4) {
                    current.toggle_alive(row, col).unwrap();
                }
            }
        }

        for _ in 0..8 {
            let mut sequential = Grid::new(37, 23).unwrap();
            let mut parallel = Grid::new(37, 23).unwrap();
            step_into(&current, &mut sequential);
            step_into_parallel(&current, &mut parallel);
            assert_eq!(sequential, parallel);
            assert_eq!(parallel.find_inconsistent_count(), None);
            current = sequential;
        }
    }
}
