//! Conway's Game of Life (B3/S23) on a fixed-size toroidal grid.

pub mod error;
pub mod torus;
pub use error::{LifeError, Result};
pub use torus::{Grid, Simulation, StepMode, TorusLife, TorusLifeConfig};
