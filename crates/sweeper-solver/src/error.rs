use num_rational::Rational64;
use sweeper_core::{OutOfBoundsError, Position};

/// Errors that can occur while solving.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SolverError {
    /// The source field has no tiles.
    #[display("solver state needs a positive width and height, got {width}x{height}")]
    EmptyGrid {
        /// Width of the source field.
        width: usize,
        /// Height of the source field.
        height: usize,
    },
    /// A mine probability outside `[0, 1]` was requested.
    #[display("mine probability {probability} is outside [0, 1]")]
    ProbabilityOutOfRange {
        /// The rejected probability.
        probability: Rational64,
    },
    /// An equation was solved with other than exactly one unknown remaining.
    #[display("cannot solve an equation with {unknowns} unknowns")]
    UnsolvableEquation {
        /// Number of unknowns left after substitution.
        unknowns: usize,
    },
    /// Two hints contradict each other.
    #[display("hints at {first} and {second} cannot coexist")]
    ImpossibleConfiguration {
        /// The hint needing more mines.
        first: Position,
        /// The hint it was compared with.
        second: Position,
    },
    /// The solver uncovered a mine.
    #[display("uncovered a mine at {position}")]
    MineRevealed {
        /// Where the mine was.
        position: Position,
    },
    /// No covered tile is left, but the game is not won.
    #[display("no move available")]
    NoMoveAvailable,
    /// A position was outside the game field.
    #[display("{_0}")]
    OutOfBounds(#[from] OutOfBoundsError),
}
