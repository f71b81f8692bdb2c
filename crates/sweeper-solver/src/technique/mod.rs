//! Deduction techniques, from cheapest to most expensive.
//!
//! - [`BasicSolver`]: looks at one hint at a time.
//! - [`AdvancedSolver`]: compares pairs of overlapping hints.
//! - [`ProbableSolver`]: estimates mine probabilities when nothing is
//!   certain and picks the safest guess.

use std::fmt::{self, Display};

pub use self::{
    advanced::AdvancedSolver,
    basic::BasicSolver,
    probable::{ProbableConfig, ProbableSolver},
};
use crate::NodeId;

mod advanced;
mod basic;
mod probable;

/// A certain conclusion about one covered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deduction {
    /// The node concluded about.
    pub node: NodeId,
    /// `true` if the node is certainly a mine, `false` if certainly safe.
    pub is_mine: bool,
}

impl Deduction {
    /// A node that is certainly a mine.
    #[must_use]
    pub const fn mine(node: NodeId) -> Self {
        Self {
            node,
            is_mine: true,
        }
    }

    /// A node that is certainly safe.
    #[must_use]
    pub const fn safe(node: NodeId) -> Self {
        Self {
            node,
            is_mine: false,
        }
    }
}

/// The technique a solving step was taken with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SolveMode {
    /// Single-hint deduction.
    Basic,
    /// Pairwise hint difference deduction.
    Advanced,
    /// Exact counting over two overlapping hints.
    SetComparison,
    /// Best guess by mine probability.
    Probable,
}

impl SolveMode {
    /// All modes in escalation order.
    pub const ALL: [Self; 4] = [
        Self::Basic,
        Self::Advanced,
        Self::SetComparison,
        Self::Probable,
    ];

    /// Returns the position of this mode in [`SolveMode::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Display for SolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Basic => "Basic",
            Self::Advanced => "Advanced",
            Self::SetComparison => "Set comparison",
            Self::Probable => "Most probable (this might blow up)",
        };
        f.write_str(label)
    }
}
