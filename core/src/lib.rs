//! Rule engine for Minesweeper: a grid of cells, mines placed lazily around the first reveal,
//! flood-fill disclosure of empty regions, flags, and win/loss detection.
//!
//! Rendering, input, timing and persistence are left to the caller. A front-end drives a
//! [`Game`] with commands and draws what [`Game::cell_view`] or [`BoardView`] exposes.
#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use types::*;
pub use view::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod types;
mod view;

/// Board size, mine count and placement strategy for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
    pub placement: Placement,
}

impl GameConfig {
    /// Cells kept free of mines around the first reveal away from the edges.
    pub const SAFE_ZONE_CELLS: CellCount = 9;

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            placement: Placement::LinearProbe,
        }
    }

    /// Validates against the worst-case safe zone, so the first reveal can always be placed.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let available = Self::max_mines(size);
        if mines > available {
            return Err(GameError::InvalidMineCount {
                requested: mines,
                available,
            });
        }

        Ok(Self::new_unchecked(size, mines))
    }

    /// Like [`GameConfig::new`] but clamps out-of-range values instead of failing.
    pub fn clamped((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size = (size_x.max(1), size_y.max(1));
        let mines = mines.min(Self::max_mines(size));
        Self::new_unchecked(size, mines)
    }

    pub const fn with_placement(self, placement: Placement) -> Self {
        Self { placement, ..self }
    }

    pub const fn max_mines((size_x, size_y): Coord2) -> CellCount {
        mult(size_x, size_y).saturating_sub(Self::SAFE_ZONE_CELLS)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Result of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Result of a reveal or chord.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Merges outcomes of several reveals, the most significant one wins.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Exploded, _) => Exploded,
            (_, Exploded) => Exploded,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
