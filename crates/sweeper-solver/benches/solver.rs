//! Benchmarks for the solving engine.
//!
//! Measures whole sessions on generated boards and single probability
//! estimates on an opened board.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::hint;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sweeper_core::{Game as _, Position};
use sweeper_game::Minesweeper;
use sweeper_generator::MinefieldGenerator;
use sweeper_solver::{MinesweeperSolver, ProbableSolver, SolverState};

const PRESETS: [(&str, usize, usize, usize); 3] = [
    ("beginner", 9, 9, 10),
    ("intermediate", 16, 16, 40),
    ("expert", 30, 16, 99),
];

const SEEDS: [u64; 3] = [0x5eed_0001, 0xdead_beef, 0x1234_5678_9abc_def0];

fn bench_solve(c: &mut Criterion) {
    let generator = MinefieldGenerator::new();
    for (name, width, height, mines) in PRESETS {
        for (i, seed) in SEEDS.into_iter().enumerate() {
            let game = Minesweeper::with_seed(&generator, seed, width, height, mines).unwrap();
            c.bench_with_input(
                BenchmarkId::new(format!("solve_{name}"), format!("seed_{i}")),
                &game,
                |b, game| {
                    b.iter_batched(
                        || MinesweeperSolver::new(game.clone()).unwrap(),
                        |mut solver| hint::black_box(solver.solve()),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

fn bench_probability(c: &mut Criterion) {
    let generator = MinefieldGenerator::new();
    let (_, width, height, mines) = PRESETS[2];
    let mut game = Minesweeper::with_seed(&generator, SEEDS[0], width, height, mines).unwrap();
    let _ = game.uncover_tile(Position::new(width / 2, height / 2)).unwrap();
    let mines_left = game.mines_left();
    let state = SolverState::new(game.field()).unwrap();

    c.bench_function("calculate_probability_expert", |b| {
        b.iter_batched(
            || (ProbableSolver::new(), state.clone()),
            |(mut solver, mut state)| {
                solver.calculate_probability(&mut state, hint::black_box(mines_left))
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_solve, bench_probability);
criterion_main!(benches);
