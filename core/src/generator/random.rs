use rand::Rng;

use super::*;

fn free_cell_count(excluded: &Array2<bool>) -> usize {
    excluded.iter().filter(|&&is_excluded| !is_excluded).count()
}

/// Picks a random candidate and, when it is taken or excluded, walks forward in row-major
/// order (x first, wrapping) to the next free cell.
///
/// Cells that directly follow a cluster of taken cells are favored slightly, so the layout is
/// not perfectly uniform. This matches the classic feel of the game and is kept as the default.
#[derive(Clone, Debug)]
pub struct LinearProbeGenerator<R> {
    rng: R,
}

impl<R: Rng> LinearProbeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MineGenerator for LinearProbeGenerator<R> {
    fn generate(&mut self, excluded: &Array2<bool>, mines: CellCount) -> Array2<bool> {
        let (width, height) = excluded.dim();
        let mut mine_mask = Array2::from_elem((width, height), false);

        // probing would never find a free cell
        let free_cells = free_cell_count(excluded);
        if usize::from(mines) > free_cells {
            log::warn!(
                "Cannot place {} mines, only {} cells are free",
                mines,
                free_cells
            );
            return mine_mask;
        }

        for _ in 0..mines {
            let mut x = self.rng.random_range(0..width);
            let mut y = self.rng.random_range(0..height);

            while mine_mask[[x, y]] || excluded[[x, y]] {
                x += 1;
                if x >= width {
                    x = 0;
                    y += 1;
                    if y >= height {
                        y = 0;
                    }
                }
            }

            mine_mask[[x, y]] = true;
        }

        mine_mask
    }
}

/// Picks the n-th still free cell with `n` drawn uniformly, so every layout is equally likely.
#[derive(Clone, Debug)]
pub struct UniformGenerator<R> {
    rng: R,
}

impl<R: Rng> UniformGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MineGenerator for UniformGenerator<R> {
    fn generate(&mut self, excluded: &Array2<bool>, mines: CellCount) -> Array2<bool> {
        let mut mine_mask = Array2::from_elem(excluded.dim(), false);
        let mut free_cells = free_cell_count(excluded);

        for _ in 0..mines {
            if free_cells == 0 {
                log::warn!("Minefield already full, {} mines requested", mines);
                break;
            }

            let place = self.rng.random_range(0..free_cells);
            let slot = mine_mask
                .iter_mut()
                .zip(excluded.iter())
                .filter(|(is_mine, is_excluded)| !**is_mine && !**is_excluded)
                .nth(place);

            if let Some((is_mine, _)) = slot {
                *is_mine = true;
                free_cells -= 1;
            }
        }

        mine_mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn corner_exclusion(size: (usize, usize)) -> Array2<bool> {
        Array2::from_shape_fn(size, |(x, y)| x <= 1 && y <= 1)
    }

    fn assert_valid_mask(mask: &Array2<bool>, excluded: &Array2<bool>, mines: usize) {
        assert_eq!(mask.iter().filter(|&&is_mine| is_mine).count(), mines);
        for (is_mine, is_excluded) in mask.iter().zip(excluded.iter()) {
            assert!(!(*is_mine && *is_excluded));
        }
    }

    #[test]
    fn linear_probe_places_exact_count_outside_exclusion() {
        let excluded = corner_exclusion((6, 5));

        for seed in 0..64 {
            let mut generator = LinearProbeGenerator::new(SmallRng::seed_from_u64(seed));
            let mask = generator.generate(&excluded, 12);
            assert_valid_mask(&mask, &excluded, 12);
        }
    }

    #[test]
    fn uniform_places_exact_count_outside_exclusion() {
        let excluded = corner_exclusion((6, 5));

        for seed in 0..64 {
            let mut generator = UniformGenerator::new(SmallRng::seed_from_u64(seed));
            let mask = generator.generate(&excluded, 12);
            assert_valid_mask(&mask, &excluded, 12);
        }
    }

    #[test]
    fn generators_fill_every_free_cell() {
        let excluded = corner_exclusion((4, 4));

        let mut probe = LinearProbeGenerator::new(SmallRng::seed_from_u64(7));
        assert_valid_mask(&probe.generate(&excluded, 12), &excluded, 12);

        let mut uniform = UniformGenerator::new(SmallRng::seed_from_u64(7));
        assert_valid_mask(&uniform.generate(&excluded, 12), &excluded, 12);
    }

    #[test]
    fn linear_probe_refuses_overfull_request() {
        let excluded = corner_exclusion((3, 3));
        let mut generator = LinearProbeGenerator::new(SmallRng::seed_from_u64(1));

        let mask = generator.generate(&excluded, 6);

        assert!(mask.iter().all(|&is_mine| !is_mine));
    }

    #[test]
    fn same_seed_same_layout() {
        let excluded = corner_exclusion((9, 9));

        let first = LinearProbeGenerator::new(SmallRng::seed_from_u64(42)).generate(&excluded, 10);
        let second = LinearProbeGenerator::new(SmallRng::seed_from_u64(42)).generate(&excluded, 10);

        assert_eq!(first, second);
    }
}
