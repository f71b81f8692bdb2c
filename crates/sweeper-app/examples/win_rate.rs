//! Measures how often the solver sweeps generated boards.
//!
//! Each game is generated from its own seed, so a run is reproducible.
//!
//! # Usage
//!
//! ```sh
//! cargo run --release --example win_rate
//! ```
//!
//! Pick a preset and the number of games:
//!
//! ```sh
//! cargo run --release --example win_rate -- --preset beginner --games 5000
//! ```

use clap::Parser;
use rayon::prelude::*;
use sweeper_app::Preset;
use sweeper_game::Minesweeper;
use sweeper_generator::MinefieldGenerator;
use sweeper_solver::{MinesweeperSolver, ProbableConfig, SolveSummary, SolverError};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board size and mine count.
    #[arg(long, value_name = "PRESET", default_value = "expert")]
    preset: Preset,

    /// Number of games to play.
    #[arg(long, value_name = "COUNT", default_value_t = 1000)]
    games: u64,

    /// Seed of the first game; game `i` uses `seed + i`.
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    seed: u64,
}

fn main() {
    let args = Args::parse();
    let (width, height, mines) = args.preset.dimensions();
    let generator = MinefieldGenerator::new();

    let results: Vec<Result<SolveSummary, SolverError>> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let seed = args.seed.wrapping_add(i);
            let game = Minesweeper::with_seed(&generator, seed, width, height, mines)
                .expect("preset dimensions are valid");
            MinesweeperSolver::new(game)?
                .with_probable_config(ProbableConfig::default().with_seed(seed))
                .solve()
        })
        .collect();

    let wins: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    let unexpected = results
        .iter()
        .filter(|r| !matches!(r, Ok(_) | Err(SolverError::MineRevealed { .. })))
        .count();
    let guesses: usize = wins.iter().map(|summary| summary.guesses).sum();

    println!("Preset: {:?} ({width}x{height}, {mines} mines)", args.preset);
    println!("Games: {}", results.len());
    println!("Wins: {} ({:.1}%)", wins.len(), ratio(wins.len(), results.len()) * 100.0);
    println!("Guesses per win: {:.2}", ratio(guesses, wins.len()));
    if unexpected > 0 {
        println!("Unexpected errors: {unexpected}");
    }
}

#[expect(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator.max(1) as f64
}
