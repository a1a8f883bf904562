use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Open(u8),
    Mine,
    Exploded,
    WrongFlag,
}

impl CellView {
    /// Projects a cell of `grid`, uncovering every mine and misplaced flag once the game is lost.
    pub fn of(grid: &Grid, coords: Coord2) -> Result<Self> {
        use CellView::*;

        let cell = grid.cell_at(coords)?;
        if grid.status() == GameStatus::Lost {
            return Ok(match cell {
                Cell { is_mine: true, .. } if grid.triggered_mine() == Some(coords) => Exploded,
                Cell { is_mine: true, is_flagged: true, .. } => Flagged,
                Cell { is_mine: true, .. } => Mine,
                Cell { is_flagged: true, .. } => WrongFlag,
                Cell { is_revealed: true, adjacent_mines, .. } => Open(adjacent_mines),
                _ => Hidden,
            });
        }

        Ok(if cell.is_revealed {
            Open(cell.adjacent_mines)
        } else if cell.is_flagged {
            Flagged
        } else {
            Hidden
        })
    }

    // whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::WrongFlag)
    }

    pub fn glyph(self) -> char {
        use CellView::*;
        match self {
            Hidden => '#',
            Flagged => 'F',
            Open(0) => '.',
            Open(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
            Mine => '*',
            Exploded => 'X',
            WrongFlag => 'x',
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
