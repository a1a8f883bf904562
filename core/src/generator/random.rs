use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Uniform generator seeded for reproducible fields.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: FieldConfig, safe: Coord2) -> Result<Grid> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        place_mines(config, safe, &mut rng)
    }
}

/// Places `config.mines` mines by rejection sampling, keeping the 3x3 box around `safe` clear.
///
/// Each sample picks a uniformly random cell and is retried when the cell already holds a mine
/// or lies in the safe zone. The config is validated first, so enough free cells always remain.
pub fn place_mines<R: Rng + ?Sized>(config: FieldConfig, safe: Coord2, rng: &mut R) -> Result<Grid> {
    let safe = validate_request(&config, safe)?;

    let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
    let mut mines_placed: CellCount = 0;
    let mut rejected: u32 = 0;

    while mines_placed < config.mines {
        let coords = (rng.random_range(0..config.rows), rng.random_range(0..config.cols));
        if is_adjacent_or_same(coords, safe) || mine_mask[coords.to_nd_index()] {
            rejected += 1;
            continue;
        }
        mine_mask[coords.to_nd_index()] = true;
        mines_placed += 1;
    }

    log::debug!(
        "Placed {} mines on {}x{} field, safe cell {:?}, {} samples rejected",
        mines_placed,
        config.rows,
        config.cols,
        safe,
        rejected
    );

    Grid::from_mine_mask(&mine_mask)
}
