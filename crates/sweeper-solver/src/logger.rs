//! Hooks for observing a solving session.

use sweeper_core::Position;

use crate::{SolveMode, SolverState};

/// What the solver is looking at, passed to a [`StateLogger`] around every
/// move.
#[derive(Debug, Clone, Copy)]
pub struct StateSnapshot<'a> {
    /// The technique that chose the move.
    pub mode: SolveMode,
    /// The tile being acted on.
    pub selected: Option<Position>,
    /// The solver's knowledge of the board.
    pub state: &'a SolverState,
}

/// Receives a snapshot before and after every move.
///
/// Closures taking a [`StateSnapshot`] implement this trait.
pub trait StateLogger {
    /// Observes one snapshot.
    fn log(&mut self, snapshot: &StateSnapshot<'_>);
}

/// A [`StateLogger`] that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl StateLogger for NullLogger {
    fn log(&mut self, _snapshot: &StateSnapshot<'_>) {}
}

impl<F> StateLogger for F
where
    F: FnMut(&StateSnapshot<'_>),
{
    fn log(&mut self, snapshot: &StateSnapshot<'_>) {
        self(snapshot);
    }
}
