//! Errors reported by the torus engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifeError>;

#[derive(Debug, Error)]
pub enum LifeError {
    /// A grid side is zero, or `width * height` does not fit in memory.
    #[error("invalid grid dimensions {width}x{height}: both sides must be positive")]
    InvalidDimension { width: usize, height: usize },

    /// A manual edit addressed a cell outside the board.
    #[error("cell ({row}, {col}) is outside the {height}x{width} board")]
    OutOfRangeEdit {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("failed to build step thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
