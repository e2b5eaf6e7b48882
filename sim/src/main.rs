use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mineclear_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;

mod autoplay;

#[derive(Parser, Debug)]
#[command(version, about = "Plays seeded minesweeper games headlessly", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[arg(long, default_value_t = 9)]
    width: Coord,

    #[arg(long, default_value_t = 9)]
    height: Coord,

    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    games: u32,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = PlacementArg::LinearProbe)]
    placement: PlacementArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PlacementArg {
    LinearProbe,
    Uniform,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::LinearProbe => Placement::LinearProbe,
            PlacementArg::Uniform => Placement::Uniform,
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    config: Option<GameConfig>,
    seed: u64,
    games: u32,
    wins: u32,
    losses: u32,
    win_rate: f64,
    average_moves: f64,
    average_guesses: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = GameConfig::new((args.width, args.height), args.mines)
        .context("invalid board configuration")?
        .with_placement(args.placement.into());
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("config: {:?}, seed: {}", config, seed);

    let mut summary = Summary {
        config: Some(config),
        seed,
        ..Default::default()
    };
    let mut total_moves = 0u64;
    let mut total_guesses = 0u64;

    for index in 0..args.games {
        let game_seed = seed.wrapping_add(index.into());
        let mut game = Game::new(config, game_seed)?;
        let mut rng = SmallRng::seed_from_u64(game_seed);

        let report = autoplay::play(&mut game, &mut rng)
            .with_context(|| format!("game {index} with seed {game_seed} failed"))?;
        log::info!(
            "game {} (seed {}): {:?} after {} moves, {} guesses",
            index,
            game_seed,
            report.phase,
            report.moves,
            report.guesses
        );

        summary.games += 1;
        match report.phase {
            Phase::Won => summary.wins += 1,
            Phase::Lost => summary.losses += 1,
            phase => log::warn!("game {} stopped while {:?}", index, phase),
        }
        total_moves += u64::from(report.moves);
        total_guesses += u64::from(report.guesses);
    }

    if summary.games > 0 {
        let games = f64::from(summary.games);
        summary.win_rate = f64::from(summary.wins) / games;
        summary.average_moves = total_moves as f64 / games;
        summary.average_guesses = total_guesses as f64 / games;
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reports_moves_and_guesses() {
        let summary = Summary {
            config: Some(GameConfig::beginner()),
            seed: 3,
            games: 2,
            wins: 1,
            losses: 1,
            win_rate: 0.5,
            average_moves: 12.5,
            average_guesses: 1.0,
        };

        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["win_rate"], 0.5);
        assert_eq!(json["average_moves"], 12.5);
        assert_eq!(json["average_guesses"], 1.0);
        assert!(json.get("average_reveals").is_none());
    }
}
