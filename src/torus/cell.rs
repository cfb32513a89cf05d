/// One board position.
///
/// `neighbor_count` is only ever written by `Grid::increment_neighbors` and
/// `Grid::decrement_neighbors`, so it always equals the number of live cells
/// among the 8 wrapped neighbors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub alive: bool,
    pub neighbor_count: u8,
    /// Set when `alive` flipped during the last transition or manual edit.
    pub changed: bool,
}

impl Cell {
    pub const DEAD: Cell = Cell {
        alive: false,
        neighbor_count: 0,
        changed: false,
    };

    /// Whether the renderer has to touch this cell this frame.
    #[inline]
    pub fn needs_draw(self) -> bool {
        self.alive || self.changed
    }
}
