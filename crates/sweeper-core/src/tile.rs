//! Tile representation.

use std::fmt::{self, Display};

/// The visible state of a single tile.
///
/// A tile is either still covered, flagged by the player, a revealed mine, or
/// a revealed hint carrying the number of mines among its up to eight
/// neighbors.
///
/// # Examples
///
/// ```
/// use sweeper_core::Tile;
///
/// let tile = Tile::Hint(3);
/// assert!(tile.is_hint());
/// assert_eq!(tile.hint_value(), Some(3));
/// assert_eq!(Tile::Covered.hint_value(), None);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Tile {
    /// A revealed tile showing the number of adjacent mines (0-8).
    Hint(u8),
    /// A revealed mine.
    Mine,
    /// A covered tile marked as a mine by the player.
    Flag,
    /// A covered tile.
    #[default]
    Covered,
}

impl Tile {
    /// The largest number a hint can carry.
    pub const MAX_HINT: u8 = 8;

    /// Returns the hint number if this tile is a revealed hint.
    #[must_use]
    #[inline]
    pub const fn hint_value(self) -> Option<u8> {
        match self {
            Self::Hint(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the single-character code used by [`Minefield`]'s text format.
    ///
    /// [`Minefield`]: crate::Minefield
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Hint(n) => (b'0' + n) as char,
            Self::Mine => '*',
            Self::Flag => 'f',
            Self::Covered => '#',
        }
    }

    /// Parses a tile from its single-character code.
    ///
    /// Digits `0`-`8` are hints, `*` is a mine, `f`/`F` a flag, and `#`/`_`
    /// a covered tile.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0'..='8' => Some(Self::Hint(ch as u8 - b'0')),
            '*' => Some(Self::Mine),
            'f' | 'F' => Some(Self::Flag),
            '#' | '_' => Some(Self::Covered),
            _ => None,
        }
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
