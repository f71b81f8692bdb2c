//! Generates a Minesweeper board and lets the solver play it, drawing every
//! move in the terminal.
//!
//! # Usage
//!
//! ```sh
//! cargo run --release -- --preset intermediate --seed 42 --delay-ms 20
//! ```

use std::{io, process::ExitCode, time::Duration};

use clap::Parser;
use sweeper_app::{Preset, TerminalLogger};
use sweeper_game::Minesweeper;
use sweeper_generator::MinefieldGenerator;
use sweeper_solver::{
    MinesweeperSolver, NullLogger, ProbableConfig, SolveSummary, SolverError, StateLogger,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board size and mine count.
    #[arg(long, value_name = "PRESET", default_value = "expert")]
    preset: Preset,

    /// Overrides the preset width.
    #[arg(long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// Overrides the preset height.
    #[arg(long, value_name = "ROWS")]
    height: Option<usize>,

    /// Overrides the preset mine count.
    #[arg(long, value_name = "COUNT")]
    mines: Option<usize>,

    /// Seed of the board; random if omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Pause after every drawn frame.
    #[arg(long, value_name = "MILLISECONDS", default_value_t = 0)]
    delay_ms: u64,

    /// Only report the outcome.
    #[arg(long)]
    no_render: bool,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let (width, height, mines) = args.preset.dimensions();
    let width = args.width.unwrap_or(width);
    let height = args.height.unwrap_or(height);
    let mines = args.mines.unwrap_or(mines);

    let generator = MinefieldGenerator::new();
    let game = match args.seed {
        Some(seed) => Minesweeper::with_seed(&generator, seed, width, height, mines),
        None => Minesweeper::new(&generator, width, height, mines),
    };
    let game = match game {
        Ok(game) => game,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let seed = game.seed().unwrap_or_default();
    log::info!("playing {width}x{height} with {mines} mines, seed {seed}");

    let config = ProbableConfig::default().with_seed(seed);
    let outcome = if args.no_render {
        play(game, NullLogger, config)
    } else {
        let logger =
            TerminalLogger::new(io::stdout().lock()).with_delay(Duration::from_millis(args.delay_ms));
        play(game, logger, config)
    };

    match outcome {
        (Ok(summary), _) => {
            println!("Minefield Swept!");
            println!(
                "seed {seed}: {} turns, {} reveals, {} flags, {} guesses",
                summary.turns, summary.reveals, summary.flags, summary.guesses
            );
            ExitCode::SUCCESS
        }
        (Err(err), game) => {
            eprintln!("error: {err}");
            if let Some(game) = game {
                println!("seed {seed}, layout:");
                print!("{}", game.layout());
            }
            ExitCode::FAILURE
        }
    }
}

fn play<L>(
    game: Minesweeper,
    logger: L,
    config: ProbableConfig,
) -> (Result<SolveSummary, SolverError>, Option<Minesweeper>)
where
    L: StateLogger,
{
    match MinesweeperSolver::with_logger(game, logger) {
        Ok(solver) => {
            let mut solver = solver.with_probable_config(config);
            let result = solver.solve();
            (result, Some(solver.into_game()))
        }
        Err(err) => (Err(err), None),
    }
}
