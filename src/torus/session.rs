//! Driver-facing wrapper: a board plus the per-tick pause flag.
//!
//! A frame is: apply pending paints/erases, render from
//! [`Simulation::engine`], then [`Simulation::tick`].

use log::debug;

use crate::error::Result;

use super::engine::TorusLife;

pub struct Simulation {
    engine: TorusLife,
    paused: bool,
}

impl Simulation {
    pub fn new(engine: TorusLife) -> Self {
        Self {
            engine,
            paused: false,
        }
    }

    /// Step once unless paused. Returns whether a generation was produced.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.engine.step();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            debug!(
                "{} at generation {}",
                if paused { "paused" } else { "resumed" },
                self.engine.generation()
            );
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn paint(&mut self, row: usize, col: usize) -> Result<()> {
        self.engine.toggle_alive(row, col)
    }

    pub fn erase(&mut self, row: usize, col: usize) -> Result<()> {
        self.engine.toggle_dead(row, col)
    }

    pub fn engine(&self) -> &TorusLife {
        &self.engine
    }

    pub fn into_engine(self) -> TorusLife {
        self.engine
    }
}
