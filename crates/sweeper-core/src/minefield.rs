//! Rectangular tile grids.

use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{Position, Tile};

/// Offsets of the eight neighbors of a tile.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Error returned when a position lies outside a minefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("position {position} is outside the {width}x{height} field")]
pub struct OutOfBoundsError {
    /// The rejected position.
    pub position: Position,
    /// Width of the field.
    pub width: usize,
    /// Height of the field.
    pub height: usize,
}

/// Errors that can occur when parsing a [`Minefield`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MinefieldError {
    /// The input contains no tiles.
    #[display("minefield text contains no tiles")]
    Empty,
    /// A row has a different length than the first row.
    #[display("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A character does not denote a tile.
    #[display("invalid tile character {ch:?} at {position}")]
    InvalidChar {
        /// The offending character.
        ch: char,
        /// Where it appeared.
        position: Position,
    },
}

/// A rectangular grid of [`Tile`]s.
///
/// Tiles are stored column-major, so iterating over [`Minefield::positions`]
/// visits `(0, 0), (0, 1), ..., (1, 0), ...`.
///
/// # Text format
///
/// Each non-empty line is a row. Digits `0`-`8` are hints, `*` is a mine,
/// `f` is a flag, and `#` or `_` is a covered tile. Whitespace inside a line
/// is ignored, so fixtures may be indented and grouped freely.
///
/// # Examples
///
/// ```
/// use sweeper_core::{Minefield, Position, Tile};
///
/// let mut field = Minefield::new(4, 3);
/// assert!(field.positions().all(|pos| field[pos].is_covered()));
///
/// field[Position::new(2, 1)] = Tile::Hint(1);
/// assert_eq!(field.to_string(), "####\n##1#\n####\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Minefield {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Minefield {
    /// Creates a field of the given size with every tile covered.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Tile::Covered)
    }

    /// Creates a field of the given size with every tile set to `tile`.
    #[must_use]
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
        }
    }

    /// Returns the number of columns.
    #[must_use]
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the total number of tiles.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if the field has no tiles.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns `true` if `pos` lies inside the field.
    #[must_use]
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x() < self.width && pos.y() < self.height
    }

    /// Checks that `pos` lies inside the field.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if it does not.
    pub fn check_bounds(&self, pos: Position) -> Result<(), OutOfBoundsError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(OutOfBoundsError {
                position: pos,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Returns the tile at `pos`, or `None` if it is out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.contains(pos).then(|| self.tiles[self.offset(pos)])
    }

    /// Returns the tile at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if `pos` is outside the field.
    pub fn tile(&self, pos: Position) -> Result<Tile, OutOfBoundsError> {
        self.check_bounds(pos)?;
        Ok(self.tiles[self.offset(pos)])
    }

    /// Replaces the tile at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if `pos` is outside the field.
    pub fn set(&mut self, pos: Position, tile: Tile) -> Result<(), OutOfBoundsError> {
        self.check_bounds(pos)?;
        let offset = self.offset(pos);
        self.tiles[offset] = tile;
        Ok(())
    }

    /// Returns an iterator over every position, column by column.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }

    /// Returns an iterator over the in-bounds neighbors of `pos`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweeper_core::{Minefield, Position};
    ///
    /// let field = Minefield::new(3, 3);
    /// assert_eq!(field.neighbors(Position::new(0, 0)).count(), 3);
    /// assert_eq!(field.neighbors(Position::new(1, 0)).count(), 5);
    /// assert_eq!(field.neighbors(Position::new(1, 1)).count(), 8);
    /// ```
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(dx, dy)| pos.offset(dx, dy))
            .filter(|&p| self.contains(p))
    }

    /// Returns the number of tiles satisfying `pred`.
    #[must_use]
    pub fn count_tiles(&self, mut pred: impl FnMut(&Tile) -> bool) -> usize {
        self.tiles.iter().filter(|tile| pred(*tile)).count()
    }

    fn offset(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos));
        pos.x() * self.height + pos.y()
    }
}

impl Index<Position> for Minefield {
    type Output = Tile;

    /// # Panics
    ///
    /// Panics if `pos` is outside the field.
    fn index(&self, pos: Position) -> &Self::Output {
        assert!(self.contains(pos), "position {pos} is out of bounds");
        &self.tiles[self.offset(pos)]
    }
}

impl IndexMut<Position> for Minefield {
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        assert!(self.contains(pos), "position {pos} is out of bounds");
        let offset = self.offset(pos);
        &mut self.tiles[offset]
    }
}

impl FromStr for Minefield {
    type Err = MinefieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<Tile>> = vec![];
        for line in s.lines() {
            let y = rows.len();
            let row = line
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .enumerate()
                .map(|(x, ch)| {
                    Tile::from_char(ch).ok_or(MinefieldError::InvalidChar {
                        ch,
                        position: Position::new(x, y),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if row.is_empty() {
                continue;
            }
            if let Some(first) = rows.first()
                && first.len() != row.len()
            {
                return Err(MinefieldError::RaggedRow {
                    row: y,
                    expected: first.len(),
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MinefieldError::Empty);
        }

        let mut field = Self::new(width, height);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, tile) in row.into_iter().enumerate() {
                field[Position::new(x, y)] = tile;
            }
        }
        Ok(field)
    }
}

impl Display for Minefield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self[Position::new(x, y)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
