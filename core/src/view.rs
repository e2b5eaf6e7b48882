use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of one cell.
///
/// `kind` is only present for revealed cells, and for mines once the game is over, so a
/// front-end can never learn what lies under a hidden cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub kind: Option<CellKind>,
    pub revealed: bool,
    pub flagged: bool,
    pub exploded: bool,
}

impl CellView {
    pub fn observe(cell: &Cell, phase: Phase) -> Self {
        let visible = cell.is_revealed() || (phase.is_finished() && cell.is_mine());
        Self {
            kind: visible.then_some(cell.kind()),
            revealed: cell.is_revealed(),
            flagged: cell.is_flagged(),
            exploded: cell.is_exploded(),
        }
    }
}

/// Snapshot of everything a front-end needs to draw the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub phase: Phase,
    pub mines_left: isize,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_game(game: &Game) -> Self {
        let size = game.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            // shape comes from the game, every index is on the grid
            let coords = (x as Coord, y as Coord);
            game.cell_view(coords).unwrap_or(HIDDEN)
        });

        Self {
            size,
            phase: game.phase(),
            mines_left: game.mines_left(),
            cells,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (self.size.0 as usize, self.size.1 as usize);
        if self.cells.dim() != expected {
            return Err(GameError::OutOfBounds);
        }
        Ok(())
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}

const HIDDEN: CellView = CellView {
    kind: None,
    revealed: false,
    flagged: false,
    exploded: false,
};
