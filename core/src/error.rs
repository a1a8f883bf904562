use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Field must have at least one row and one column")]
    InvalidSize,
    #[error("Too many mines, at least 9 cells must remain free around the first click")]
    TooManyMines,
    #[error("Mine layout places a mine next to the first click")]
    MineInSafeZone,
    #[error("Mine layout does not match the configured mine count")]
    InvalidMineLayout,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
