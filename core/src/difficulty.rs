use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Cells kept free around the first click: the clicked cell and its Moore neighborhood.
pub const SAFE_ZONE_CELLS: CellCount = 9;

/// Dimensions and mine count of a field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl FieldConfig {
    pub const fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Rejects configurations that could not leave a full safe zone around any first click.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mines.saturating_add(SAFE_ZONE_CELLS) >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.rows && coords.1 < self.cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Expert,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> FieldConfig {
        match self {
            Self::Beginner => FieldConfig::new(9, 9, 10),
            Self::Intermediate => FieldConfig::new(16, 16, 40),
            Self::Expert => FieldConfig::new(16, 30, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

impl Default for DifficultyTier {
    fn default() -> Self {
        Self::Beginner
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DifficultyTier {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Looks up the field settings of a difficulty tier.
pub const fn settings_for(tier: DifficultyTier) -> FieldConfig {
    tier.config()
}
