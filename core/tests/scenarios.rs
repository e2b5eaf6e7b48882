//! End-to-end games driven only through the public command/query surface.

use mineclear_core::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn cells(size: Coord2) -> impl Iterator<Item = Coord2> {
    (0..size.0).flat_map(move |x| (0..size.1).map(move |y| (x, y)))
}

fn view(game: &Game, coords: Coord2) -> CellView {
    game.cell_view(coords).unwrap()
}

#[test]
fn one_by_one_board_is_won_immediately() {
    let mut game = Game::new(GameConfig::new((1, 1), 0).unwrap(), 0).unwrap();

    assert_eq!(game.phase(), Phase::NotGenerated);
    assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::Won);
    assert_eq!(game.phase(), Phase::Won);
}

#[test]
fn crowded_three_by_three_is_rejected() {
    assert!(matches!(
        GameConfig::new((3, 3), 8),
        Err(GameError::InvalidMineCount { .. })
    ));
    assert!(matches!(
        Game::new(GameConfig::new_unchecked((3, 3), 8), 0),
        Err(GameError::InvalidMineCount { .. })
    ));

    let mut grid = Grid::new((3, 3)).unwrap();
    let generator = LinearProbeGenerator::new(SmallRng::seed_from_u64(0));
    assert_eq!(
        grid.place_mines((1, 1), 8, generator),
        Err(GameError::InvalidMineCount {
            requested: 8,
            available: 0
        })
    );
}

#[test]
fn lone_corner_mine_board_floods_open() {
    let grid = Grid::from_mine_coords((5, 5), &[(4, 4)]).unwrap();
    let mut game = Game::with_grid(grid);

    assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::Won);

    for coords in cells((5, 5)) {
        let cell = view(&game, coords);
        if coords == (4, 4) {
            assert_eq!(cell.kind, Some(CellKind::Mine));
            assert!(cell.flagged && !cell.revealed);
        } else {
            let near_mine = coords.0 >= 3 && coords.1 >= 3;
            let expected = if near_mine {
                CellKind::Number(1)
            } else {
                CellKind::Empty
            };
            assert!(cell.revealed);
            assert_eq!(cell.kind, Some(expected));
        }
    }
}

#[test]
fn unrevealed_cells_stay_opaque_while_playing() {
    let mut game = Game::new(GameConfig::beginner(), 11).unwrap();
    game.reveal((0, 0)).unwrap();
    assert_eq!(game.phase(), Phase::Playing);

    for coords in cells(game.size()) {
        let cell = view(&game, coords);
        assert_eq!(cell.kind.is_some(), cell.revealed);
    }
}

#[test]
fn random_play_reaches_consistent_end_states() {
    for seed in 0..40 {
        let config = GameConfig::new((10, 8), 12).unwrap();
        let mut game = Game::new(config, seed).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);

        while !game.is_finished() {
            let coords = (rng.random_range(0..10), rng.random_range(0..8));
            if rng.random_bool(0.1) {
                game.toggle_flag(coords);
            } else {
                game.reveal(coords).unwrap();
            }
        }

        let mines: Vec<_> = cells(game.size())
            .filter(|&coords| view(&game, coords).kind == Some(CellKind::Mine))
            .collect();
        assert_eq!(mines.len(), 12);

        match game.phase() {
            Phase::Lost => {
                let exploded = game.triggered_mine().unwrap();
                for &coords in &mines {
                    let cell = view(&game, coords);
                    assert!(cell.revealed);
                    assert_eq!(cell.exploded, coords == exploded);
                }
            }
            Phase::Won => {
                assert_eq!(game.revealed_count(), 80 - 12);
                for &coords in &mines {
                    let cell = view(&game, coords);
                    assert!(cell.flagged && !cell.revealed);
                }
            }
            phase => panic!("unexpected phase {phase:?}"),
        }
    }
}

#[test]
fn flood_reveals_exactly_the_connected_region_and_frontier() {
    for seed in 0..40 {
        let mut game = Game::new(GameConfig::intermediate(), seed).unwrap();
        game.reveal((8, 8)).unwrap();
        let opened: Vec<_> = game.drain_revealed().collect();

        // every opened empty cell has all of its cardinal neighbors opened
        for &coords in &opened {
            let cell = view(&game, coords);
            assert_ne!(cell.kind, Some(CellKind::Mine));
            if cell.kind == Some(CellKind::Empty) {
                let (x, y) = coords;
                let cardinal = [
                    (x.wrapping_sub(1), y),
                    (x + 1, y),
                    (x, y.wrapping_sub(1)),
                    (x, y + 1),
                ];
                for neighbor in cardinal {
                    if let Ok(neighbor) = game.cell_view(neighbor) {
                        assert!(neighbor.revealed);
                    }
                }
            }
        }

        // every opened number touches an opened empty cell, or is the target itself
        for &coords in &opened {
            if let Some(CellKind::Number(_)) = view(&game, coords).kind {
                let (x, y) = coords;
                let touches_empty = [
                    (x.wrapping_sub(1), y),
                    (x + 1, y),
                    (x, y.wrapping_sub(1)),
                    (x, y + 1),
                ]
                .into_iter()
                .filter_map(|neighbor| game.cell_view(neighbor).ok())
                .any(|neighbor| neighbor.revealed && neighbor.kind == Some(CellKind::Empty));
                assert!(touches_empty || coords == (8, 8));
            }
        }

        let revealed = cells(game.size())
            .filter(|&coords| view(&game, coords).revealed)
            .count();
        assert_eq!(revealed, opened.len());
    }
}

#[test]
fn toggling_flag_twice_restores_state() {
    let mut game = Game::new(GameConfig::beginner(), 3).unwrap();
    game.reveal((4, 4)).unwrap();
    let hidden = cells(game.size())
        .find(|&coords| !view(&game, coords).revealed)
        .unwrap();
    let before = game.clone();

    assert_eq!(game.toggle_flag(hidden), FlagOutcome::Flagged);
    assert_eq!(game.toggle_flag(hidden), FlagOutcome::Unflagged);

    assert_eq!(game, before);
}

#[test]
fn signed_input_coordinates_map_onto_grid() {
    let grid = Grid::new((4, 4)).unwrap();

    assert_eq!(grid.checked_coords(-3, 1), None);
    assert_eq!(grid.checked_coords(2, 1), Some((2, 1)));
}
