use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be positive")]
    InvalidDimensions,
    #[error("Too many mines, requested {requested} but only {available} cells are available")]
    InvalidMineCount {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Mines were already placed on this grid")]
    AlreadyGenerated,
}

pub type Result<T> = core::result::Result<T, GameError>;
