//! Board position representation.

use std::fmt::{self, Display};

/// A position on a Minesweeper board.
///
/// `x` is the column (growing to the right) and `y` is the row (growing
/// downwards). Positions are not tied to a particular board size; bounds are
/// checked by the containers that use them.
///
/// # Examples
///
/// ```
/// use sweeper_core::Position;
///
/// let pos = Position::new(3, 1);
/// assert_eq!(pos.x(), 3);
/// assert_eq!(pos.y(), 1);
/// assert_eq!(pos.to_string(), "(3, 1)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the column of this position.
    #[must_use]
    #[inline]
    pub const fn x(self) -> usize {
        self.x
    }

    /// Returns the row of this position.
    #[must_use]
    #[inline]
    pub const fn y(self) -> usize {
        self.y
    }

    /// Returns the position shifted by `(dx, dy)`, or `None` if either
    /// coordinate would become negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweeper_core::Position;
    ///
    /// let pos = Position::new(0, 2);
    /// assert_eq!(pos.offset(1, -1), Some(Position::new(1, 1)));
    /// assert_eq!(pos.offset(-1, 0), None);
    /// ```
    #[must_use]
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_non_negative() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset(0, 0), Some(origin));
        assert_eq!(origin.offset(1, 1), Some(Position::new(1, 1)));
        assert_eq!(origin.offset(0, -1), None);
        assert_eq!(origin.offset(-1, 1), None);
    }

    #[test]
    fn test_ordering_is_by_column_first() {
        assert!(Position::new(0, 5) < Position::new(1, 0));
        assert!(Position::new(1, 0) < Position::new(1, 1));
    }
}
