use serde::{Deserialize, Serialize};

/// State of a single cell of a populated field.
///
/// `adjacent_mines` is only meaningful when `is_mine` is false.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub is_revealed: bool,
    pub is_flagged: bool,
}

impl Cell {
    /// Safe cell whose neighborhood holds no mine, the cells flood fill expands through.
    pub const fn is_empty(self) -> bool {
        !self.is_mine && self.adjacent_mines == 0
    }
}
