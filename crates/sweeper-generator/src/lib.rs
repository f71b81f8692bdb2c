//! Random Minesweeper board generation.
//!
//! [`MinefieldGenerator`] places mines uniformly at random and fills every
//! other tile with its hint number. Generation is reproducible: the same seed
//! and dimensions always produce the same layout.
//!
//! # Examples
//!
//! ```
//! use sweeper_core::Tile;
//! use sweeper_generator::MinefieldGenerator;
//!
//! let generator = MinefieldGenerator::new();
//! let generated = generator.generate_with_seed(42, 9, 9, 10)?;
//!
//! assert_eq!(generated.layout.count_tiles(Tile::is_mine), 10);
//! assert_eq!(generated, generator.generate_with_seed(42, 9, 9, 10)?);
//! # Ok::<(), sweeper_generator::GenerateError>(())
//! ```

use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;
use sweeper_core::{Minefield, Position, Tile};

/// Errors returned for board parameters that cannot be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerateError {
    /// The board has no tiles.
    #[display("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The board cannot hold that many mines and still have a safe tile.
    #[display("{mines} mines do not fit on a board of {tiles} tiles")]
    TooManyMines {
        /// Requested mine count.
        mines: usize,
        /// Number of tiles on the board.
        tiles: usize,
    },
}

/// A generated board layout together with the seed that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMinefield {
    /// The fully revealed layout: every tile is either [`Tile::Mine`] or a
    /// [`Tile::Hint`].
    pub layout: Minefield,
    /// Number of mines on the board.
    pub mines: usize,
    /// The seed used for generation.
    pub seed: u64,
}

/// Generates random board layouts.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinefieldGenerator;

impl MinefieldGenerator {
    /// Creates a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generates a board with a random seed.
    ///
    /// # Errors
    ///
    /// See [`MinefieldGenerator::generate_with_seed`].
    pub fn generate(
        &self,
        width: usize,
        height: usize,
        mines: usize,
    ) -> Result<GeneratedMinefield, GenerateError> {
        let seed = rand::rng().random();
        self.generate_with_seed(seed, width, height, mines)
    }

    /// Generates a board from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidDimensions`] if either dimension is
    /// zero, and [`GenerateError::TooManyMines`] unless `mines` is smaller
    /// than the number of tiles.
    pub fn generate_with_seed(
        &self,
        seed: u64,
        width: usize,
        height: usize,
        mines: usize,
    ) -> Result<GeneratedMinefield, GenerateError> {
        if width == 0 || height == 0 {
            return Err(GenerateError::InvalidDimensions { width, height });
        }
        let tiles = width * height;
        if mines >= tiles {
            return Err(GenerateError::TooManyMines { mines, tiles });
        }

        let mut rng = Pcg64::seed_from_u64(seed);
        let mut layout = Minefield::filled(width, height, Tile::Hint(0));
        let mut positions: Vec<Position> = layout.positions().collect();
        let (mine_positions, _) = positions.partial_shuffle(&mut rng, mines);
        for &pos in &*mine_positions {
            layout[pos] = Tile::Mine;
        }
        fill_hints(&mut layout);

        log::debug!("generated {width}x{height} board with {mines} mines from seed {seed:#018x}");
        Ok(GeneratedMinefield {
            layout,
            mines,
            seed,
        })
    }
}

/// Replaces every non-mine tile with the number of adjacent mines.
///
/// # Examples
///
/// ```
/// use sweeper_core::Minefield;
///
/// let mut field: Minefield = "*##\n###".parse()?;
/// sweeper_generator::fill_hints(&mut field);
/// assert_eq!(field.to_string(), "*10\n110\n");
/// # Ok::<(), sweeper_core::MinefieldError>(())
/// ```
pub fn fill_hints(field: &mut Minefield) {
    for pos in field.positions() {
        if field[pos].is_mine() {
            continue;
        }
        let count = field
            .neighbors(pos)
            .filter(|&p| field[p].is_mine())
            .fold(0, |n, _| n + 1);
        field[pos] = Tile::Hint(count);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_rejects_invalid_parameters() {
        let generator = MinefieldGenerator::new();
        assert_eq!(
            generator.generate_with_seed(0, 0, 5, 1),
            Err(GenerateError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert_eq!(
            generator.generate_with_seed(0, 3, 3, 9),
            Err(GenerateError::TooManyMines { mines: 9, tiles: 9 })
        );
        assert!(generator.generate_with_seed(0, 3, 3, 8).is_ok());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let generator = MinefieldGenerator::new();
        let a = generator.generate_with_seed(7, 30, 16, 99).unwrap();
        let b = generator.generate_with_seed(7, 30, 16, 99).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, 7);
    }

    #[test]
    fn test_fill_hints_counts_neighbors() {
        let mut field: Minefield = "
            *#*
            ###
            ##*
        "
        .parse()
        .unwrap();
        fill_hints(&mut field);
        assert_eq!(field.to_string(), "*2*\n132\n01*\n");
    }

    proptest! {
        #[test]
        fn test_generated_layout_is_consistent(
            seed in any::<u64>(),
            width in 1usize..12,
            height in 1usize..12,
            mines in 0usize..100,
        ) {
            let mines = mines % (width * height);
            let generated = MinefieldGenerator::new()
                .generate_with_seed(seed, width, height, mines)
                .unwrap();
            let layout = &generated.layout;
            prop_assert_eq!(layout.count_tiles(Tile::is_mine), mines);
            for pos in layout.positions() {
                let tile = layout[pos];
                prop_assert!(!tile.is_covered() && !tile.is_flag());
                if let Some(n) = tile.hint_value() {
                    let around = layout.neighbors(pos).filter(|&p| layout[p].is_mine()).count();
                    prop_assert_eq!(usize::from(n), around);
                }
            }
        }
    }
}
