//! Systems of linear equations over node-valued unknowns.
//!
//! Each covered tile is an unknown, each hint an equation: the sum of its
//! covered neighbors equals its remaining mine count. Coefficients are exact
//! rationals, so elimination introduces no rounding.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use num_rational::Rational64;
use num_traits::Zero as _;

use crate::{NodeId, SolverError};

/// Coefficients of an equation, keyed by unknown.
pub type Coefficients = BTreeMap<NodeId, Rational64>;

/// Known values of unknowns.
pub type Assignments = BTreeMap<NodeId, Rational64>;

/// A linear equation `Σ coefficient · unknown = total`.
///
/// Zero coefficients are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    coefficients: Coefficients,
    total: Rational64,
}

impl Equation {
    /// Creates an equation, dropping zero coefficients.
    #[must_use]
    pub fn new(mut coefficients: Coefficients, total: Rational64) -> Self {
        coefficients.retain(|_, c| !c.is_zero());
        Self {
            coefficients,
            total,
        }
    }

    /// Returns the coefficients.
    #[must_use]
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Returns the right-hand side.
    #[must_use]
    pub fn total(&self) -> Rational64 {
        self.total
    }

    /// Returns the leading unknown, the one with the smallest id.
    #[must_use]
    pub fn pivot(&self) -> Option<NodeId> {
        self.coefficients.keys().next().copied()
    }

    /// Returns the number of unknowns not in `assignments`.
    #[must_use]
    pub fn unknowns(&self, assignments: &Assignments) -> usize {
        self.coefficients
            .keys()
            .filter(|id| !assignments.contains_key(id))
            .count()
    }

    /// Returns `true` if every unknown is assigned and the equation holds.
    #[must_use]
    pub fn is_satisfied_by(&self, assignments: &Assignments) -> bool {
        let mut sum = Rational64::zero();
        for (id, c) in &self.coefficients {
            let Some(value) = assignments.get(id) else {
                return false;
            };
            sum += c * value;
        }
        sum == self.total
    }

    fn negate(&mut self) {
        for c in self.coefficients.values_mut() {
            *c = -*c;
        }
        self.total = -self.total;
    }

    /// Subtracts `factor` times `other` from this equation.
    fn eliminate(&mut self, other: &Self, factor: Rational64) {
        for (&id, &c) in &other.coefficients {
            let entry = self.coefficients.entry(id).or_insert_with(Rational64::zero);
            *entry -= factor * c;
            if entry.is_zero() {
                self.coefficients.remove(&id);
            }
        }
        self.total -= factor * other.total;
    }
}

/// A system of linear equations.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use num_rational::Rational64;
/// use sweeper_core::Position;
/// use sweeper_solver::{LinearSystem, NodeGraph};
///
/// let mut graph = NodeGraph::new();
/// let a = graph.add_node(Position::new(0, 0));
/// let b = graph.add_node(Position::new(1, 0));
/// let one = Rational64::from_integer(1);
///
/// // a + b = 1, b = 1
/// let mut system = LinearSystem::new();
/// system.add_equation(BTreeMap::from([(a, one), (b, one)]), one);
/// system.add_equation(BTreeMap::from([(b, one)]), one);
///
/// assert!(system.independent_variables().is_empty());
/// let values = system.evaluate(&BTreeMap::new())?;
/// assert_eq!(values[&a], Rational64::from_integer(0));
/// assert_eq!(values[&b], one);
/// # Ok::<(), sweeper_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinearSystem {
    equations: Vec<Equation>,
}

impl LinearSystem {
    /// Creates an empty system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an equation.
    pub fn add_equation(&mut self, coefficients: Coefficients, total: Rational64) {
        self.equations.push(Equation::new(coefficients, total));
    }

    /// Returns the equations in insertion order.
    #[must_use]
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Returns every unknown appearing in some equation.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<NodeId> {
        self.equations
            .iter()
            .flat_map(|eq| eq.coefficients.keys().copied())
            .collect()
    }

    /// Brings the system to row echelon form.
    ///
    /// Forward elimination only: each equation is scaled by `-1` if its pivot
    /// coefficient is negative, then its pivot is removed from every later
    /// equation. Applying it again leaves the system unchanged.
    pub fn convert_row_echelon(&mut self) {
        for i in 0..self.equations.len() {
            let (done, rest) = self.equations.split_at_mut(i + 1);
            let pivot_eq = &mut done[i];
            let Some(pivot) = pivot_eq.pivot() else {
                continue;
            };
            if pivot_eq.coefficients[&pivot] < Rational64::zero() {
                pivot_eq.negate();
            }
            let pivot_eq = &*pivot_eq;
            let pivot_coefficient = pivot_eq.coefficients[&pivot];
            for eq in rest {
                if let Some(&c) = eq.coefficients.get(&pivot) {
                    eq.eliminate(pivot_eq, c / pivot_coefficient);
                }
            }
        }
        log::trace!("reduced system of {} equations", self.equations.len());
    }

    /// Returns the unknowns that elimination leaves free.
    ///
    /// Reduces the system first.
    pub fn independent_variables(&mut self) -> BTreeSet<NodeId> {
        self.convert_row_echelon();
        let mut variables = self.variables();
        for eq in &self.equations {
            if let Some(pivot) = eq.pivot() {
                variables.remove(&pivot);
            }
        }
        variables
    }

    /// Solves `equation` for its single unknown under `assignments`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::UnsolvableEquation`] unless exactly one unknown
    /// remains after substitution.
    pub fn solve(
        equation: &Equation,
        assignments: &Assignments,
    ) -> Result<(NodeId, Rational64), SolverError> {
        let mut remaining = equation.total;
        let mut unknown = None;
        let mut unknowns = 0;
        for (&id, &c) in &equation.coefficients {
            if let Some(value) = assignments.get(&id) {
                remaining -= c * value;
            } else {
                unknown = Some((id, c));
                unknowns += 1;
            }
        }
        match unknown {
            Some((id, c)) if unknowns == 1 => Ok((id, remaining / c)),
            _ => Err(SolverError::UnsolvableEquation { unknowns }),
        }
    }

    /// Extends `assignments` with every value the equations determine.
    ///
    /// Equations are taken from a work queue: one with a single unknown is
    /// solved, one with none is dropped, and one with more goes to the back.
    /// Evaluation stops once a full pass over the queue makes no progress;
    /// equations left in it stay unresolved.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`LinearSystem::solve`].
    pub fn evaluate(&self, assignments: &Assignments) -> Result<Assignments, SolverError> {
        let mut assignments = assignments.clone();
        let mut queue: VecDeque<&Equation> = self.equations.iter().collect();
        let mut stalled = 0;
        while let Some(eq) = queue.pop_front() {
            match eq.unknowns(&assignments) {
                0 => stalled = 0,
                1 => {
                    let (id, value) = Self::solve(eq, &assignments)?;
                    assignments.insert(id, value);
                    stalled = 0;
                }
                _ => {
                    queue.push_back(eq);
                    stalled += 1;
                    if stalled >= queue.len() {
                        break;
                    }
                }
            }
        }
        Ok(assignments)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sweeper_core::Position;

    use super::*;
    use crate::NodeGraph;

    fn r(n: i64, d: i64) -> Rational64 {
        Rational64::new(n, d)
    }

    fn nodes(count: usize) -> Vec<NodeId> {
        let mut graph = NodeGraph::new();
        (0..count)
            .map(|i| graph.add_node(Position::new(i, 0)))
            .collect()
    }

    fn coefficients<const N: usize>(terms: [(NodeId, Rational64); N]) -> Coefficients {
        BTreeMap::from(terms)
    }

    /// The three-equation fixture over `n0..n3`.
    fn fixture(n: &[NodeId]) -> LinearSystem {
        let mut system = LinearSystem::new();
        system.add_equation(
            coefficients([(n[1], r(1, 1)), (n[3], r(1, 1)), (n[0], r(1, 1))]),
            r(2, 1),
        );
        system.add_equation(
            coefficients([(n[0], r(2, 1)), (n[1], r(3, 1)), (n[2], r(1, 1))]),
            r(4, 1),
        );
        system.add_equation(
            coefficients([(n[3], r(-1, 1)), (n[1], r(2, 1)), (n[2], r(3, 4))]),
            r(5, 3),
        );
        system
    }

    #[test]
    fn test_add_equation() {
        let n = nodes(5);
        let mut system = fixture(&n);
        assert_eq!(system.equations().len(), 3);
        system.add_equation(
            coefficients([
                (n[0], r(3, 2)),
                (n[1], r(3, 1)),
                (n[2], r(1, 4)),
                (n[3], r(1, 1)),
                (n[4], r(1, 6)),
            ]),
            r(4, 1),
        );
        assert_eq!(system.equations().len(), 4);
        assert_eq!(system.equations()[3].coefficients()[&n[4]], r(1, 6));
        assert_eq!(system.variables().len(), 5);
    }

    #[test]
    fn test_zero_coefficients_are_dropped() {
        let n = nodes(2);
        let eq = Equation::new(coefficients([(n[0], r(0, 1)), (n[1], r(1, 2))]), r(1, 1));
        assert_eq!(eq.coefficients().len(), 1);
        assert_eq!(eq.pivot(), Some(n[1]));
    }

    #[test]
    fn test_convert_row_echelon() {
        let n = nodes(4);
        let mut system = fixture(&n);
        system.convert_row_echelon();

        let expected = [
            Equation::new(
                coefficients([(n[0], r(1, 1)), (n[1], r(1, 1)), (n[3], r(1, 1))]),
                r(2, 1),
            ),
            Equation::new(
                coefficients([(n[1], r(1, 1)), (n[2], r(1, 1)), (n[3], r(-2, 1))]),
                r(0, 1),
            ),
            Equation::new(coefficients([(n[2], r(5, 4)), (n[3], r(-3, 1))]), r(-5, 3)),
        ];
        assert_eq!(system.equations(), expected);

        let once = system.clone();
        system.convert_row_echelon();
        assert_eq!(system, once);
    }

    #[test]
    fn test_row_echelon_makes_pivots_positive() {
        let n = nodes(3);
        let mut system = LinearSystem::new();
        system.add_equation(coefficients([(n[0], r(-2, 1)), (n[1], r(1, 1))]), r(-1, 1));
        system.add_equation(coefficients([(n[0], r(1, 1)), (n[2], r(1, 1))]), r(1, 1));
        system.convert_row_echelon();

        let expected = [
            Equation::new(coefficients([(n[0], r(2, 1)), (n[1], r(-1, 1))]), r(1, 1)),
            Equation::new(coefficients([(n[1], r(1, 2)), (n[2], r(1, 1))]), r(1, 2)),
        ];
        assert_eq!(system.equations(), expected);
    }

    #[test]
    fn test_independent_variables() {
        let n = nodes(4);
        let mut system = fixture(&n);
        assert_eq!(system.independent_variables(), BTreeSet::from([n[3]]));
    }

    #[test]
    fn test_solve() {
        let n = nodes(4);
        let system = fixture(&n);
        let eq = &system.equations()[1];

        let assignments = BTreeMap::from([(n[0], r(1, 4)), (n[2], r(2, 1))]);
        assert_eq!(LinearSystem::solve(eq, &assignments), Ok((n[1], r(1, 2))));

        let too_few = BTreeMap::from([(n[0], r(1, 4))]);
        assert_eq!(
            LinearSystem::solve(eq, &too_few),
            Err(SolverError::UnsolvableEquation { unknowns: 2 })
        );
        let all = BTreeMap::from([(n[0], r(1, 1)), (n[1], r(1, 1)), (n[2], r(1, 1))]);
        assert_eq!(
            LinearSystem::solve(eq, &all),
            Err(SolverError::UnsolvableEquation { unknowns: 0 })
        );
    }

    #[test]
    fn test_evaluate() {
        let n = nodes(4);
        let mut system = fixture(&n);
        system.convert_row_echelon();

        let values = system.evaluate(&BTreeMap::from([(n[3], r(1, 3))])).unwrap();
        assert_eq!(
            values,
            BTreeMap::from([
                (n[0], r(7, 15)),
                (n[1], r(6, 5)),
                (n[2], r(-8, 15)),
                (n[3], r(1, 3)),
            ])
        );
        assert!(system.equations().iter().all(|eq| eq.is_satisfied_by(&values)));
    }

    #[test]
    fn test_evaluate_leaves_stuck_equations() {
        let n = nodes(3);
        let mut system = LinearSystem::new();
        system.add_equation(coefficients([(n[0], r(1, 1)), (n[1], r(1, 1))]), r(1, 1));
        system.add_equation(coefficients([(n[1], r(1, 1)), (n[2], r(1, 1))]), r(1, 1));

        let values = system.evaluate(&BTreeMap::new()).unwrap();
        assert!(values.is_empty());

        let values = system.evaluate(&BTreeMap::from([(n[2], r(0, 1))])).unwrap();
        assert_eq!(values[&n[1]], r(1, 1));
        assert_eq!(values[&n[0]], r(0, 1));
    }

    proptest! {
        #[test]
        fn test_row_echelon_removes_pivots_from_later_rows(
            rows in prop::collection::vec(
                (prop::collection::vec(-3i64..=3, 5), 0i64..=4),
                1..6,
            ),
        ) {
            let n = nodes(5);
            let mut system = LinearSystem::new();
            for (coeffs, total) in rows {
                let coeffs = n.iter().copied().zip(coeffs.into_iter().map(Rational64::from_integer)).collect();
                system.add_equation(coeffs, Rational64::from_integer(total));
            }
            system.convert_row_echelon();

            let equations = system.equations();
            for (i, eq) in equations.iter().enumerate() {
                prop_assert!(eq.coefficients().values().all(|c| !c.is_zero()));
                if let Some(pivot) = eq.pivot() {
                    prop_assert!(eq.coefficients()[&pivot] > Rational64::zero());
                    for later in &equations[i + 1..] {
                        prop_assert!(!later.coefficients().contains_key(&pivot));
                    }
                }
            }

            let once = system.clone();
            system.convert_row_echelon();
            prop_assert_eq!(system, once);
        }
    }
}
