//! Minesweeper solving engine.
//!
//! The solver keeps its own view of the board as a graph of nodes, one per
//! tile, and escalates through increasingly expensive techniques until it
//! finds a move.
//!
//! # Overview
//!
//! - [`SolverState`] and [`NodeGraph`]: the board as the solver knows it.
//! - [`BasicSolver`], [`AdvancedSolver`], [`ProbableSolver`]: the techniques.
//! - [`LinearSystem`]: the equations behind probability estimates.
//! - [`MinesweeperSolver`]: plays a [`sweeper_core::Game`] to the end,
//!   reporting each move to a [`StateLogger`].
//!
//! # Examples
//!
//! ```
//! use sweeper_core::GameState;
//! use sweeper_game::Minesweeper;
//! use sweeper_generator::MinefieldGenerator;
//! use sweeper_solver::{MinesweeperSolver, SolverError};
//!
//! let game = Minesweeper::with_seed(&MinefieldGenerator::new(), 7, 9, 9, 10)?;
//! let mut solver = MinesweeperSolver::new(game)?;
//! match solver.solve() {
//!     Ok(summary) => {
//!         assert_eq!(solver.game().state(), GameState::Win);
//!         println!("swept with {} guesses", summary.guesses);
//!     }
//!     Err(SolverError::MineRevealed { position }) => println!("hit a mine at {position}"),
//!     Err(err) => return Err(err.into()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    choose::{CHOOSE_LIMIT, ChooseTable},
    error::SolverError,
    logger::{NullLogger, StateLogger, StateSnapshot},
    minesweeper_solver::{MinesweeperSolver, SolveSummary},
    node::{Node, NodeGraph, NodeId},
    sle::{Assignments, Coefficients, Equation, LinearSystem},
    state::SolverState,
    technique::{
        AdvancedSolver, BasicSolver, Deduction, ProbableConfig, ProbableSolver, SolveMode,
    },
};

mod choose;
mod error;
pub mod logger;
mod minesweeper_solver;
pub mod node;
pub mod sle;
mod state;
pub mod technique;
