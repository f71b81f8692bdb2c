use std::collections::BTreeMap;

use num_rational::Rational64;
use num_traits::{One as _, Zero as _};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

use crate::{Assignments, LinearSystem, NodeId, SolverError, SolverState};

/// Tuning for [`ProbableSolver`].
///
/// # Examples
///
/// ```
/// use sweeper_solver::ProbableConfig;
///
/// let config = ProbableConfig::default().with_exact_limit(6).with_seed(7);
/// assert_eq!(config.exact_limit, 6);
/// assert_eq!(config.sample_count, 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbableConfig {
    /// Largest number of free unknowns enumerated exhaustively.
    pub exact_limit: usize,
    /// Number of random assignments drawn above `exact_limit`.
    pub sample_count: usize,
    /// Seed of the sampling generator.
    pub seed: u64,
}

impl Default for ProbableConfig {
    fn default() -> Self {
        Self {
            exact_limit: 10,
            sample_count: 1024,
            seed: 0,
        }
    }
}

impl ProbableConfig {
    /// Sets the exhaustive enumeration limit.
    #[must_use]
    pub const fn with_exact_limit(mut self, exact_limit: usize) -> Self {
        self.exact_limit = exact_limit;
        self
    }

    /// Sets the number of samples.
    #[must_use]
    pub const fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Sets the sampling seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Estimates mine probabilities and picks the safest covered tile.
///
/// Every hint on the edge gives an equation over its covered neighbors. The
/// free unknowns of the reduced system are set to 0 or 1, exhaustively when
/// there are at most [`ProbableConfig::exact_limit`] of them and by random
/// sampling otherwise. Assignments under which every determined value lies in
/// `[0, 1]` and every equation holds are averaged into per-tile
/// probabilities.
///
/// Covered tiles the system says nothing about share the mines not accounted
/// for on the edge evenly. That share is clamped into `[0, 1]` and is not
/// reconciled with the edge, so the probabilities of all covered tiles need
/// not add up to the mines left.
#[derive(Debug, Clone)]
pub struct ProbableSolver {
    config: ProbableConfig,
    rng: Pcg64,
}

impl Default for ProbableSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbableSolver {
    /// Creates a solver with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ProbableConfig::default())
    }

    /// Creates a solver with `config`.
    #[must_use]
    pub fn with_config(config: ProbableConfig) -> Self {
        Self {
            config,
            rng: Pcg64::seed_from_u64(config.seed),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ProbableConfig {
        &self.config
    }

    /// Recomputes the mine probability of every covered node.
    ///
    /// # Errors
    ///
    /// Returns an error if the linear system cannot be evaluated.
    pub fn calculate_probability(
        &mut self,
        state: &mut SolverState,
        mines_left: i64,
    ) -> Result<(), SolverError> {
        let zero = Rational64::zero();
        let one = Rational64::one();

        let mut system = LinearSystem::new();
        for hint in state.hint_edge() {
            let graph = state.graph();
            let coefficients = graph
                .adjacent_covered(hint)
                .into_iter()
                .map(|id| (id, one))
                .collect();
            let total = Rational64::from_integer(i64::from(graph[hint].adjacent_mines_left()));
            system.add_equation(coefficients, total);
        }
        let free: Vec<NodeId> = system.independent_variables().into_iter().collect();

        let exact = free.len() <= self.config.exact_limit && free.len() < 64;
        let rounds = if exact {
            1_u64 << free.len()
        } else {
            u64::try_from(self.config.sample_count).unwrap_or(u64::MAX)
        };
        log::debug!(
            "{} equations, {} free unknowns, {} {} assignments",
            system.equations().len(),
            free.len(),
            rounds,
            if exact { "enumerated" } else { "sampled" },
        );

        let mut tally: BTreeMap<NodeId, (Rational64, i64)> = BTreeMap::new();
        for round in 0..rounds {
            let assignments: Assignments = if exact {
                free.iter()
                    .enumerate()
                    .map(|(bit, &id)| (id, if (round >> bit) & 1 == 1 { one } else { zero }))
                    .collect()
            } else {
                free.iter()
                    .map(|&id| (id, if self.rng.random() { one } else { zero }))
                    .collect()
            };
            let values = system.evaluate(&assignments)?;
            let in_range = values.values().all(|v| *v >= zero && *v <= one);
            let consistent = system
                .equations()
                .iter()
                .filter(|eq| eq.unknowns(&values) == 0)
                .all(|eq| eq.is_satisfied_by(&values));
            if !(in_range && consistent) {
                continue;
            }
            for (id, value) in values {
                let (sum, count) = tally.entry(id).or_insert((zero, 0));
                *sum += value;
                *count += 1;
            }
        }

        let edge = state.covered_edge();
        let mut resolved = zero;
        let mut pool = Vec::new();
        for id in state.covered() {
            match tally.get(&id) {
                Some(&(sum, count)) if edge.contains(&id) => {
                    let probability = sum / Rational64::from_integer(count);
                    state.graph_mut().set_mine_probability(id, probability)?;
                    resolved += probability;
                }
                _ => pool.push(id),
            }
        }

        if !pool.is_empty() {
            let share = (Rational64::from_integer(mines_left) - resolved)
                / Rational64::from_integer(i64::try_from(pool.len()).unwrap_or(i64::MAX));
            let share = share.clamp(zero, one);
            for id in pool {
                state.graph_mut().set_mine_probability(id, share)?;
            }
        }
        Ok(())
    }

    /// Returns the covered node least likely to be a mine.
    ///
    /// Ties go to the node with the smallest id. Returns `None` if nothing is
    /// covered.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`ProbableSolver::calculate_probability`].
    pub fn solve(
        &mut self,
        state: &mut SolverState,
        mines_left: i64,
    ) -> Result<Option<NodeId>, SolverError> {
        self.calculate_probability(state, mines_left)?;
        let graph = state.graph();
        let pick = state
            .covered()
            .into_iter()
            .min_by_key(|&id| graph[id].mine_probability());
        if let Some(id) = pick {
            log::debug!(
                "guessing {} with mine probability {}",
                graph[id].position(),
                graph[id].mine_probability()
            );
        }
        Ok(pick)
    }
}
