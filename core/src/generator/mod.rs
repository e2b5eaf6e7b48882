use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Chooses mine positions for a grid.
pub trait MineGenerator {
    /// Returns a mask shaped like `excluded` with `mines` cells set, none of them excluded.
    fn generate(&mut self, excluded: &Array2<bool>, mines: CellCount) -> Array2<bool>;
}

impl<G: MineGenerator + ?Sized> MineGenerator for &mut G {
    fn generate(&mut self, excluded: &Array2<bool>, mines: CellCount) -> Array2<bool> {
        (**self).generate(excluded, mines)
    }
}

/// Which built-in generator a game uses for its lazy mine placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Random candidate, then scan forward row by row to the next free cell.
    LinearProbe,
    /// Every free cell equally likely.
    Uniform,
}

impl Placement {
    /// Places `mines` on `grid` around `start` using a generator seeded from `seed`.
    pub fn place(self, grid: &mut Grid, start: Coord2, mines: CellCount, seed: u64) -> Result<()> {
        let rng = SmallRng::seed_from_u64(seed);
        match self {
            Self::LinearProbe => grid.place_mines(start, mines, LinearProbeGenerator::new(rng)),
            Self::Uniform => grid.place_mines(start, mines, UniformGenerator::new(rng)),
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::LinearProbe
    }
}
