use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular board of cells with mine placement and adjacency math.
///
/// The grid knows nothing about game phases. Mines are placed at most once, either lazily
/// through [`Grid::place_mines`] or up front with [`Grid::from_mine_coords`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    generated: bool,
}

impl Grid {
    pub fn new((width, height): Coord2) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions);
        }

        // shape is bounded by Coord, so the casts back are lossless
        let shape = (usize::from(width), usize::from(height));
        let cells = Array2::from_shape_fn(shape, |(x, y)| {
            Cell::new((x as Coord, y as Coord))
        });

        Ok(Self {
            cells,
            mine_count: 0,
            generated: false,
        })
    }

    /// Builds an already generated grid with mines at `mine_coords` and numbers computed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(size)?;

        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid.cell_mut(coords).kind = CellKind::Mine;
        }

        grid.mine_count = grid.cells().filter(|cell| cell.is_mine()).count() as CellCount;
        grid.generated = true;
        grid.compute_numbers();
        Ok(grid)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.cells.dim();
        (width as Coord, height as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Whether mines have been placed yet.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn in_bounds(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x < width && y < height
    }

    /// Converts signed coordinates, such as a pointer position mapped onto the board.
    pub fn checked_coords(&self, x: i32, y: i32) -> Option<Coord2> {
        let coords = (Coord::try_from(x).ok()?, Coord::try_from(y).ok()?);
        self.in_bounds(coords).then_some(coords)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// The up to 8 surrounding cells that lie on the grid.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::adjacent(coords, self.size())
    }

    /// The up to 4 cells left, right, below and above that lie on the grid.
    pub fn cardinal_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::cardinal(coords, self.size())
    }

    /// `center` followed by its neighbors, the cells kept free of mines on the first reveal.
    pub fn safe_zone(&self, center: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        core::iter::once(center).chain(self.neighbors(center))
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    pub fn count_adjacent_flags(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| !self[pos].revealed && self[pos].flagged)
            .count() as u8
    }

    /// Places `mines` mines anywhere except `exclude` and its neighbors.
    ///
    /// Fails when mines were already placed, when `exclude` is off the grid, or when fewer than
    /// `mines` cells remain outside the safe zone. A generator that returns a bad mask is
    /// rejected the same way, leaving the grid untouched.
    pub fn place_mines<G: MineGenerator>(
        &mut self,
        exclude: Coord2,
        mines: CellCount,
        mut generator: G,
    ) -> Result<()> {
        if self.generated {
            return Err(GameError::AlreadyGenerated);
        }
        let exclude = self.validate_coords(exclude)?;

        let mut excluded = Array2::from_elem(self.cells.dim(), false);
        let mut safe_zone_size: CellCount = 0;
        for coords in self.safe_zone(exclude) {
            excluded[coords.to_nd_index()] = true;
            safe_zone_size += 1;
        }

        let available = self.total_cells() - safe_zone_size;
        if mines > available {
            return Err(GameError::InvalidMineCount {
                requested: mines,
                available,
            });
        }

        let mine_mask = generator.generate(&excluded, mines);

        // double check what the generator produced
        let placed = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let overlaps = mine_mask
            .iter()
            .zip(excluded.iter())
            .any(|(&is_mine, &is_excluded)| is_mine && is_excluded);
        if mine_mask.dim() != excluded.dim() || placed != usize::from(mines) || overlaps {
            log::warn!(
                "Generated minefield rejected, placed: {}, requested: {}, overlaps safe zone: {}",
                placed,
                mines,
                overlaps
            );
            return Err(GameError::InvalidMineCount {
                requested: mines,
                available,
            });
        }

        for (cell, &is_mine) in self.cells.iter_mut().zip(mine_mask.iter()) {
            if is_mine {
                cell.kind = CellKind::Mine;
            }
        }
        self.mine_count = mines;
        self.generated = true;
        log::debug!("Placed {} mines around safe zone at {:?}", mines, exclude);

        Ok(())
    }

    /// Marks every non-mine cell as `Number(n)` or `Empty` from its adjacent mines.
    pub fn compute_numbers(&mut self) {
        let (width, height) = self.size();
        for x in 0..width {
            for y in 0..height {
                let coords = (x, y);
                if self[coords].is_mine() {
                    continue;
                }
                let count = self.count_adjacent_mines(coords);
                self.cell_mut(coords).kind = CellKind::from_count(count);
            }
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
