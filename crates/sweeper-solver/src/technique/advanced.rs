use std::collections::BTreeSet;

use num_rational::Rational64;
use num_traits::{CheckedAdd as _, CheckedDiv as _, CheckedMul as _, One as _, Zero as _};

use super::Deduction;
use crate::{ChooseTable, NodeGraph, NodeId, SolverError, SolverState};

/// Deductions from pairs of hints whose covered neighbors overlap.
///
/// [`flaggable`](Self::flaggable) and [`safe`](Self::safe) use plain set
/// differences. [`solve`](Self::solve) counts every way two hints can place
/// their mines and keeps what holds in all of them.
///
/// # Examples
///
/// ```
/// use sweeper_core::{Minefield, Position};
/// use sweeper_solver::{AdvancedSolver, SolverState};
///
/// // the mine is under the middle `1`, so both corners are safe
/// let state = SolverState::new(&"###\n111".parse::<Minefield>()?)?;
/// let safe: Vec<_> = AdvancedSolver::new()
///     .safe(&state)
///     .into_iter()
///     .map(|id| state.position(id))
///     .collect();
/// assert_eq!(safe, [Position::new(0, 0), Position::new(2, 0)]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct AdvancedSolver {
    choose: ChooseTable,
}

impl AdvancedSolver {
    /// Creates a new `AdvancedSolver`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            choose: ChooseTable::new(),
        }
    }

    /// Returns the covered nodes that are certainly mines.
    ///
    /// For a hint `n` and a neighboring hint `h` sharing covered tiles, if `n`
    /// needs `k` more mines than `h` can provide in the shared tiles and `n`
    /// has exactly `k` tiles `h` cannot see, those tiles are mines.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::ImpossibleConfiguration`] if `n` has fewer
    /// unshared tiles than the mines it needs beyond `h`.
    pub fn flaggable(&self, state: &SolverState) -> Result<BTreeSet<NodeId>, SolverError> {
        let graph = state.graph();
        let mut flaggable = BTreeSet::new();
        for node in state.hint_edge() {
            let mines = graph[node].adjacent_mines_left();
            let covered = graph.adjacent_covered(node);
            for &cell in &covered {
                for other in graph.adjacent_active_hints(cell) {
                    let other_mines = graph[other].adjacent_mines_left();
                    if other == node || mines <= other_mines {
                        continue;
                    }
                    let other_covered = graph.adjacent_covered(other);
                    let unshared: BTreeSet<_> = covered.difference(&other_covered).copied().collect();
                    let needed = usize::from(mines - other_mines);
                    if unshared.len() < needed {
                        return Err(SolverError::ImpossibleConfiguration {
                            first: graph[node].position(),
                            second: graph[other].position(),
                        });
                    }
                    if unshared.len() == needed {
                        flaggable.extend(unshared);
                    }
                }
            }
        }
        Ok(flaggable)
    }

    /// Returns the covered nodes that are certainly safe.
    ///
    /// A neighboring hint `h` with few unshared tiles must place some of its
    /// mines in the tiles it shares with `n`. If that lower bound already
    /// covers all mines `n` needs, the tiles only `n` sees are safe.
    #[must_use]
    pub fn safe(&self, state: &SolverState) -> BTreeSet<NodeId> {
        let graph = state.graph();
        let mut safe = BTreeSet::new();
        for node in state.hint_edge() {
            let mines = usize::from(graph[node].adjacent_mines_left());
            if mines == 0 {
                continue;
            }
            let covered = graph.adjacent_covered(node);
            for &cell in &covered {
                for other in graph.adjacent_active_hints(cell) {
                    if other == node {
                        continue;
                    }
                    let other_covered = graph.adjacent_covered(other);
                    let outside = other_covered.difference(&covered).count();
                    let shared_at_least =
                        usize::from(graph[other].adjacent_mines_left()).saturating_sub(outside);
                    if shared_at_least >= mines {
                        safe.extend(covered.difference(&other_covered).copied());
                    }
                }
            }
        }
        safe
    }

    /// Counts the joint mine placements of two overlapping hints.
    ///
    /// The union of the sets splits into the tiles only in `set1`, the
    /// shared tiles, and the tiles only in `set2`. Each placement consistent
    /// with both mine counts is weighted by the number of ways to choose the
    /// tiles in every segment. A segment that never holds a mine is safe, and
    /// one that always does is mined. Other segments get their mine
    /// probability recorded in `graph`, merged with any earlier estimate.
    ///
    /// Disjoint sets, segments with more than eight tiles, and pairs of mine
    /// counts no placement satisfies give no conclusion.
    ///
    /// # Errors
    ///
    /// Returns an error if a merged probability leaves `[0, 1]`.
    pub fn compare_sets(
        &self,
        graph: &mut NodeGraph,
        set1: &BTreeSet<NodeId>,
        mines1: u8,
        set2: &BTreeSet<NodeId>,
        mines2: u8,
    ) -> Result<BTreeSet<Deduction>, SolverError> {
        let mut deductions = BTreeSet::new();
        let overlap: BTreeSet<_> = set1.intersection(set2).copied().collect();
        if overlap.is_empty() {
            return Ok(deductions);
        }
        let segments = [
            set1.difference(set2).copied().collect::<BTreeSet<_>>(),
            overlap,
            set2.difference(set1).copied().collect(),
        ];
        if segments[0].len() > crate::CHOOSE_LIMIT || segments[2].len() > crate::CHOOSE_LIMIT {
            return Ok(deductions);
        }

        let (mines1, mines2) = (usize::from(mines1), usize::from(mines2));
        let mut picked = [0_i64; 3];
        let mut total = 0_i64;
        for shared in 0..=mines1.min(mines2) {
            let choice = [mines1 - shared, shared, mines2 - shared];
            let weight: i64 = segments
                .iter()
                .zip(choice)
                .map(|(segment, k)| self.choose.get(segment.len(), k))
                .product();
            for (picked, k) in picked.iter_mut().zip(choice) {
                *picked += i64::try_from(k).unwrap_or(i64::MAX) * weight;
            }
            total += weight;
        }
        if total == 0 {
            return Ok(deductions);
        }

        for (segment, picked) in segments.iter().zip(picked) {
            if picked == 0 {
                deductions.extend(segment.iter().map(|&id| Deduction::safe(id)));
                continue;
            }
            let count = i64::try_from(segment.len()).unwrap_or(i64::MAX);
            let probability = Rational64::new(picked, count * total);
            if probability.is_one() {
                deductions.extend(segment.iter().map(|&id| Deduction::mine(id)));
                continue;
            }
            for &id in segment {
                let prior = graph[id].mine_probability();
                let merged = if prior.is_zero() {
                    probability
                } else if let Some(merged) = merge(prior, probability) {
                    merged
                } else {
                    log::trace!("keeping estimate {prior} of {}", graph[id].position());
                    prior
                };
                graph.set_mine_probability(id, merged)?;
            }
        }
        log::trace!("set comparison concluded {} nodes", deductions.len());
        Ok(deductions)
    }

    /// Compares every ordered pair of distinct hint-edge nodes and returns the
    /// first non-empty set of conclusions.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`AdvancedSolver::compare_sets`].
    pub fn solve(&self, state: &mut SolverState) -> Result<BTreeSet<Deduction>, SolverError> {
        let edge = state.hint_edge();
        for &first in &edge {
            for &second in &edge {
                if first == second {
                    continue;
                }
                let graph = state.graph();
                let set1 = graph.adjacent_covered(first);
                let set2 = graph.adjacent_covered(second);
                let mines1 = graph[first].adjacent_mines_left();
                let mines2 = graph[second].adjacent_mines_left();
                let deductions =
                    self.compare_sets(state.graph_mut(), &set1, mines1, &set2, mines2)?;
                if !deductions.is_empty() {
                    return Ok(deductions);
                }
            }
        }
        Ok(BTreeSet::new())
    }
}

/// Combines two independent estimates of the same tile.
///
/// Returns `None` when the exact result no longer fits in a [`Rational64`].
fn merge(prior: Rational64, probability: Rational64) -> Option<Rational64> {
    let one = Rational64::one();
    let both = prior.checked_mul(&probability)?;
    let neither = (one - prior).checked_mul(&(one - probability))?;
    both.checked_div(&both.checked_add(&neither)?)
}
