//! Toroidal B3/S23 engine with incrementally maintained neighbor counts.

mod cell;
mod engine;
mod grid;
mod rules;
mod session;
mod spans;
mod stepper;

pub use cell::Cell;
pub use engine::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, LIVE_DENSITY, StepMode, TorusLife, TorusLifeConfig,
};
pub use grid::{Grid, NEIGHBOR_OFFSETS, wrap};
pub use rules::{LIFE, RuleTable};
pub use session::Simulation;
pub use spans::{DrawSpans, RowSpans};
pub use stepper::{step_into, step_into_parallel};
