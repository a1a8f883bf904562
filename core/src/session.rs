use alloc::collections::BTreeSet;

use crate::*;

#[derive(Clone, Debug, PartialEq)]
enum Board {
    /// No mines yet; flags placed before the first click are remembered here.
    Pending { flags: BTreeSet<Coord2> },
    Started(Grid),
}

/// One game on one field: an empty board until the first reveal, then a populated [`Grid`].
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    config: FieldConfig,
    tier: Option<DifficultyTier>,
    seed: u64,
    board: Board,
}

impl Session {
    pub fn new(tier: DifficultyTier, seed: u64) -> Self {
        Self {
            config: tier.config(),
            tier: Some(tier),
            seed,
            board: Board::Pending {
                flags: BTreeSet::new(),
            },
        }
    }

    pub fn with_config(config: FieldConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tier: None,
            seed,
            board: Board::Pending {
                flags: BTreeSet::new(),
            },
        })
    }

    /// Discards the current board and starts over on the same field settings.
    pub fn restart(&mut self, seed: u64) {
        log::debug!("Restarting {:?} with seed {}", self.config, seed);
        self.seed = seed;
        self.board = Board::Pending {
            flags: BTreeSet::new(),
        };
    }

    pub fn config(&self) -> FieldConfig {
        self.config
    }

    pub fn tier(&self) -> Option<DifficultyTier> {
        self.tier
    }

    pub fn grid(&self) -> Option<&Grid> {
        match &self.board {
            Board::Pending { .. } => None,
            Board::Started(grid) => Some(grid),
        }
    }

    pub fn status(&self) -> GameStatus {
        match &self.board {
            Board::Pending { .. } => GameStatus::NotStarted,
            Board::Started(grid) => grid.status(),
        }
    }

    pub fn mines_left(&self) -> i32 {
        match &self.board {
            Board::Pending { flags } => i32::from(self.config.mines) - flags.len() as i32,
            Board::Started(grid) => grid.mines_left(),
        }
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.config.validate_coords(coords)?;
        Ok(match &self.board {
            Board::Pending { flags } if flags.contains(&coords) => CellView::Flagged,
            Board::Pending { .. } => CellView::Hidden,
            Board::Started(grid) => CellView::of(grid, coords)?,
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.config.validate_coords(coords)?;
        match &mut self.board {
            Board::Pending { flags } => {
                if !flags.remove(&coords) {
                    flags.insert(coords);
                }
                Ok(flags.contains(&coords))
            }
            Board::Started(grid) => grid.toggle_flag(coords),
        }
    }

    /// Reveals a cell, generating the field from this session's seed on the first reveal.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let generator = RandomMinefieldGenerator::new(self.seed);
        self.reveal_with(coords, generator)
    }

    /// Like [`Session::reveal`], with `generator` building the field if none exists yet.
    ///
    /// A failed generation leaves the session untouched.
    pub fn reveal_with<G: MinefieldGenerator>(
        &mut self,
        coords: Coord2,
        generator: G,
    ) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        let mut grid = match &mut self.board {
            Board::Started(grid) => return grid.reveal(coords),
            Board::Pending { flags } => {
                if flags.contains(&coords) {
                    return Ok(RevealOutcome::Flagged);
                }
                let mut grid = generator.generate(self.config, coords)?;
                for &pos in flags.iter() {
                    grid.toggle_flag(pos)?;
                }
                grid
            }
        };

        log::debug!("First click at {:?}, field generated", coords);
        let outcome = grid.reveal(coords)?;
        self.board = Board::Started(grid);
        Ok(outcome)
    }
}
