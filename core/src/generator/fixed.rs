use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Generator with a predetermined mine layout.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    mines: Vec<Coord2>,
}

impl FixedMinefieldGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(self, config: FieldConfig, safe: Coord2) -> Result<Grid> {
        let safe = validate_request(&config, safe)?;

        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        for coords in self.mines {
            let coords = config.validate_coords(coords)?;
            if is_adjacent_or_same(coords, safe) {
                return Err(GameError::MineInSafeZone);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let grid = Grid::from_mine_mask(&mine_mask)?;
        if grid.mine_count() != config.mines {
            return Err(GameError::InvalidMineLayout);
        }
        Ok(grid)
    }
}
