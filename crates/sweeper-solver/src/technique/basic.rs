use std::collections::BTreeSet;

use crate::{NodeId, SolverState};

/// Deductions that need only one hint.
///
/// - A hint whose covered neighbors number exactly its remaining mines has
///   only mines around it.
/// - A covered node next to a hint whose mines are all flagged is safe.
///
/// # Examples
///
/// ```
/// use sweeper_core::{Minefield, Position};
/// use sweeper_solver::{BasicSolver, SolverState};
///
/// let state = SolverState::new(&"1#\n11".parse::<Minefield>()?)?;
/// let flags: Vec<_> = BasicSolver::new()
///     .flaggable(&state)
///     .into_iter()
///     .map(|id| state.position(id))
///     .collect();
/// assert_eq!(flags, [Position::new(1, 0)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicSolver;

impl BasicSolver {
    /// Creates a new `BasicSolver`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the covered nodes that are certainly mines.
    #[must_use]
    pub fn flaggable(&self, state: &SolverState) -> BTreeSet<NodeId> {
        let graph = state.graph();
        let mut flaggable = BTreeSet::new();
        for hint in state.hint_edge() {
            if graph.adjacent_covered_count(hint) == usize::from(graph[hint].adjacent_mines_left()) {
                flaggable.extend(graph.adjacent_covered(hint));
            }
        }
        flaggable
    }

    /// Returns the covered nodes that are certainly safe.
    #[must_use]
    pub fn safe(&self, state: &SolverState) -> BTreeSet<NodeId> {
        state
            .covered_edge()
            .into_iter()
            .filter(|&id| state.graph().is_covered_safe(id))
            .collect()
    }
}
