use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotGenerated -> Playing
/// - Playing -> Won
/// - Playing -> Lost
///
/// A first reveal can pass through `Playing` and end the game in the same command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Mines not placed yet, waiting for the first reveal
    NotGenerated,
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotGenerated)
    }

    /// No more commands are accepted
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::NotGenerated
    }
}

/// One game from the first reveal to a win or a loss.
///
/// Commands never fail on stray input: off-grid coordinates, revealed or flagged targets and
/// anything issued after the game ended are no-ops. Only generating the minefield on the
/// first reveal can return an error.
///
/// The serialized form holds the whole minefield and is meant for saving on the trusted side.
/// Anything shown to a player should go through [`BoardView`] or [`Game::cell_view`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    grid: Grid,
    phase: Phase,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    triggered_mine: Option<Coord2>,
    pending_reveals: Vec<Coord2>,
}

impl Game {
    /// Starts a game whose mines are placed around the first reveal using `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?.with_placement(config.placement);
        let grid = Grid::new(config.size)?;
        Ok(Self::from_parts(config, seed, grid))
    }

    /// Starts a game on `grid`, keeping its mines if they were already placed.
    pub fn with_grid(grid: Grid) -> Self {
        let config = GameConfig::new_unchecked(grid.size(), grid.mine_count());
        Self::from_parts(config, 0, grid)
    }

    fn from_parts(config: GameConfig, seed: u64, grid: Grid) -> Self {
        Self {
            config,
            seed,
            grid,
            phase: Default::default(),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            triggered_mine: None,
            pending_reveals: Vec::new(),
        }
    }

    /// Replaces this game with a fresh one. On error the current game is kept as it was.
    pub fn new_game(&mut self, config: GameConfig, seed: u64) -> Result<()> {
        *self = Self::new(config, seed)?;
        log::debug!("New game {:?} with seed {}", self.config, seed);
        Ok(())
    }

    /// Fresh game with the same configuration.
    pub fn restart(&mut self, seed: u64) -> Result<()> {
        self.new_game(self.config, seed)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Mines minus flags, negative when more flags than mines were placed.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count.0 as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Board topology only, no cell contents.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.grid.neighbors(coords)
    }

    /// What an observer may see of the cell at `coords`.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let cell = self.grid.get(coords)?;
        Ok(CellView::observe(cell, self.phase))
    }

    /// Cells revealed since the previous call, in the order they were opened.
    pub fn drain_revealed(&mut self) -> impl Iterator<Item = Coord2> {
        self.pending_reveals.drain(..)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.phase.is_finished() || !self.grid.in_bounds(coords) {
            return FlagOutcome::NoChange;
        }

        let cell = self.grid.cell_mut(coords);
        if cell.revealed {
            return FlagOutcome::NoChange;
        }

        cell.flagged = !cell.flagged;
        let outcome = if cell.flagged {
            self.flagged_count += 1;
            FlagOutcome::Flagged
        } else {
            self.flagged_count -= 1;
            FlagOutcome::Unflagged
        };
        log::debug!("Flag at {:?}: {:?}", coords, outcome);

        // a flag alone never completes the board, checked anyway
        if matches!(self.phase, Phase::Playing) && self.all_safe_revealed() {
            self.end_game(true);
        }

        outcome
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        if self.phase.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        if !self.grid.in_bounds(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        // the first in-bounds reveal starts the game even when its target stays closed
        self.ensure_generated(coords)?;
        Ok(self.reveal_cell(coords))
    }

    /// Reveals every unflagged neighbor of a revealed number whose flags already account for
    /// all of its mines. A wrong flag makes this lose the game.
    pub fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        if !matches!(self.phase, Phase::Playing) {
            return RevealOutcome::NoChange;
        }

        let Ok(&cell) = self.grid.get(coords) else {
            return RevealOutcome::NoChange;
        };
        match cell.kind() {
            CellKind::Number(count)
                if cell.is_revealed() && count == self.grid.count_adjacent_flags(coords) =>
            {
                self.grid
                    .neighbors(coords)
                    .map(|neighbor_coords| self.reveal_cell(neighbor_coords))
                    .fold(RevealOutcome::NoChange, core::ops::BitOr::bitor)
            }
            _ => RevealOutcome::NoChange,
        }
    }

    fn ensure_generated(&mut self, start: Coord2) -> Result<()> {
        if !self.phase.is_initial() {
            return Ok(());
        }

        if !self.grid.is_generated() {
            self.config
                .placement
                .place(&mut self.grid, start, self.config.mines, self.seed)?;
            self.grid.compute_numbers();
        }

        self.phase = Phase::Playing;
        log::debug!("Game started at {:?}", start);
        Ok(())
    }

    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.grid[coords];
        if self.phase.is_finished() || !cell.is_hidden() {
            return RevealOutcome::NoChange;
        }

        match cell.kind() {
            CellKind::Mine => {
                self.explode(coords);
                RevealOutcome::Exploded
            }
            CellKind::Number(count) => {
                self.open(coords);
                log::debug!("Open cell at {:?}, mine count: {}", coords, count);
                self.check_won()
            }
            CellKind::Empty => {
                self.flood_fill(coords);
                self.check_won()
            }
        }
    }

    /// Opens the 4-connected region of empty cells around `start` and the numbers bordering it.
    /// Mines are never opened, flags on safe cells in the way are cleared.
    fn flood_fill(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);
        log::trace!("Starting flood-fill from {:?}", start);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = self.grid[visit_coords];

            // already opened by an earlier path
            if cell.is_revealed() || cell.is_mine() {
                continue;
            }

            if cell.is_flagged() {
                self.grid.cell_mut(visit_coords).flagged = false;
                self.flagged_count -= 1;
                log::trace!("Flood cleared flag at {:?}", visit_coords);
            }
            self.open(visit_coords);
            log::trace!("Flood opened cell at {:?}: {:?}", visit_coords, cell.kind());

            if matches!(cell.kind(), CellKind::Empty) {
                to_visit.extend(
                    self.grid
                        .cardinal_neighbors(visit_coords)
                        .filter(|&pos| !self.grid[pos].is_revealed() && !self.grid[pos].is_mine()),
                );
            }
        }
    }

    fn open(&mut self, coords: Coord2) {
        self.grid.cell_mut(coords).revealed = true;
        self.revealed_count += 1;
        self.pending_reveals.push(coords);
    }

    fn explode(&mut self, coords: Coord2) {
        let cell = self.grid.cell_mut(coords);
        cell.revealed = true;
        cell.exploded = true;
        self.pending_reveals.push(coords);
        self.triggered_mine = Some(coords);

        for cell in self.grid.cells_mut() {
            if cell.is_mine() && !cell.revealed {
                cell.revealed = true;
                self.pending_reveals.push(cell.position());
            }
        }

        self.end_game(false);
    }

    fn all_safe_revealed(&self) -> bool {
        self.revealed_count.0 == self.grid.safe_cell_count()
    }

    fn check_won(&mut self) -> RevealOutcome {
        if self.all_safe_revealed() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }

        if won {
            self.phase = Phase::Won;
            for cell in self.grid.cells_mut() {
                if cell.is_mine() {
                    cell.flagged = true;
                }
            }
            self.flagged_count = Saturating(self.grid.mine_count());
        } else {
            self.phase = Phase::Lost;
        }
        log::debug!("Game ended: {:?}", self.phase);
    }
}
