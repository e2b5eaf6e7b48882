use anyhow::Result;
use mineclear_core::*;
use rand::Rng;
use rand::rngs::SmallRng;

/// How a single game ended.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlayReport {
    pub phase: Phase,
    pub moves: u32,
    pub guesses: u32,
}

/// Plays through the public command surface only: the center first, then the obvious
/// flags and chords, and a random hidden cell whenever nothing is certain.
pub fn play(game: &mut Game, rng: &mut SmallRng) -> Result<PlayReport> {
    let (width, height) = game.size();
    game.reveal((width / 2, height / 2))?;
    let mut moves = 1;
    let mut guesses = 0;

    while !game.is_finished() {
        if !deduce(game)? {
            let hidden = hidden_cells(game)?;
            if hidden.is_empty() {
                break;
            }
            let pick = hidden[rng.random_range(0..hidden.len())];
            log::trace!("Guessing {:?}", pick);
            game.reveal(pick)?;
            guesses += 1;
        }
        moves += 1;
    }

    Ok(PlayReport {
        phase: game.phase(),
        moves,
        guesses,
    })
}

fn all_coords((width, height): Coord2) -> impl Iterator<Item = Coord2> {
    (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
}

fn hidden_cells(game: &Game) -> Result<Vec<Coord2>> {
    let mut hidden = Vec::new();
    for coords in all_coords(game.size()) {
        let view = game.cell_view(coords)?;
        if !view.revealed && !view.flagged {
            hidden.push(coords);
        }
    }
    Ok(hidden)
}

/// Applies the first trivially safe move found, returns whether anything changed.
fn deduce(game: &mut Game) -> Result<bool> {
    for coords in all_coords(game.size()) {
        let Some(CellKind::Number(count)) = game.cell_view(coords)?.kind else {
            continue;
        };

        let mut hidden = Vec::new();
        let mut flagged = 0;
        for neighbor in game.neighbors(coords) {
            let view = game.cell_view(neighbor)?;
            if view.flagged {
                flagged += 1;
            } else if !view.revealed {
                hidden.push(neighbor);
            }
        }

        if hidden.is_empty() {
            continue;
        }

        if flagged + hidden.len() == usize::from(count) {
            for neighbor in hidden {
                game.toggle_flag(neighbor);
            }
            return Ok(true);
        }

        if flagged == usize::from(count) {
            game.chord(coords);
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn plays_every_game_to_an_end() {
        for seed in 0..10 {
            let mut game = Game::new(GameConfig::beginner(), seed).unwrap();
            let mut rng = SmallRng::seed_from_u64(seed);

            let report = play(&mut game, &mut rng).unwrap();

            assert!(report.phase.is_finished());
            assert!(report.moves > report.guesses);
        }
    }

    #[test]
    fn open_board_needs_no_guess() {
        let grid = Grid::from_mine_coords((5, 5), &[(4, 4)]).unwrap();
        let mut game = Game::with_grid(grid);
        let mut rng = SmallRng::seed_from_u64(0);

        let report = play(&mut game, &mut rng).unwrap();

        assert_eq!(report.phase, Phase::Won);
        assert_eq!(report.guesses, 0);
    }

    #[test]
    fn deduction_flags_forced_mines() {
        let grid = Grid::from_mine_coords((4, 1), &[(0, 0), (2, 0)]).unwrap();
        let mut game = Game::with_grid(grid);
        game.reveal((1, 0)).unwrap();

        assert!(deduce(&mut game).unwrap());
        assert!(game.cell_view((0, 0)).unwrap().flagged);
        assert!(game.cell_view((2, 0)).unwrap().flagged);
        assert_eq!(game.phase(), Phase::Playing);
    }
}
