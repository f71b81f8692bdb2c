use sweeper_core::{Game, GameState, Minefield, OutOfBoundsError, Position, Tile};
use sweeper_generator::{GeneratedMinefield, MinefieldGenerator, fill_hints};

use crate::GameError;

/// A Minesweeper game session.
///
/// Holds the hidden layout and the field visible to the player. Uncovering a
/// tile with no adjacent mines also uncovers its neighbors, repeatedly, until
/// the uncovered area is bordered by numbered tiles.
///
/// # Examples
///
/// ```
/// use sweeper_core::{Game as _, Position};
/// use sweeper_game::Minesweeper;
/// use sweeper_generator::MinefieldGenerator;
///
/// let mut game = Minesweeper::with_seed(&MinefieldGenerator::new(), 1, 9, 9, 10)?;
/// assert_eq!(game.mines_left(), 10);
///
/// game.toggle_flag(Position::new(0, 0))?;
/// assert_eq!(game.mines_left(), 9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minesweeper {
    layout: Minefield,
    visible: Minefield,
    total_mines: usize,
    flags_placed: usize,
    covered_tiles: usize,
    seed: Option<u64>,
    state: GameState,
}

impl Minesweeper {
    /// Starts a game on a freshly generated board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidDimensions`] if either dimension is zero,
    /// and [`GameError::TooManyMines`] unless `mines` is smaller than the
    /// number of tiles.
    pub fn new(
        generator: &MinefieldGenerator,
        width: usize,
        height: usize,
        mines: usize,
    ) -> Result<Self, GameError> {
        Ok(Self::from_generated(
            generator.generate(width, height, mines)?,
        ))
    }

    /// Starts a game on a board generated from `seed`.
    ///
    /// # Errors
    ///
    /// Same as [`Minesweeper::new`].
    pub fn with_seed(
        generator: &MinefieldGenerator,
        seed: u64,
        width: usize,
        height: usize,
        mines: usize,
    ) -> Result<Self, GameError> {
        Ok(Self::from_generated(
            generator.generate_with_seed(seed, width, height, mines)?,
        ))
    }

    /// Starts a game on a known layout.
    ///
    /// Every [`Tile::Mine`] in `layout` is a mine; every other tile is safe
    /// and its hint is recomputed from the mines around it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::FlagInLayout`] if `layout` contains a flag and
    /// [`GameError::TooManyMines`] if it has no safe tile.
    pub fn from_layout(mut layout: Minefield) -> Result<Self, GameError> {
        if let Some(position) = layout.positions().find(|&pos| layout[pos].is_flag()) {
            return Err(GameError::FlagInLayout { position });
        }
        let mines = layout.count_tiles(Tile::is_mine);
        if mines >= layout.len() {
            return Err(GameError::TooManyMines {
                mines,
                tiles: layout.len(),
            });
        }
        fill_hints(&mut layout);
        Ok(Self::with_layout(layout, mines, None))
    }

    fn from_generated(generated: GeneratedMinefield) -> Self {
        let GeneratedMinefield {
            layout,
            mines,
            seed,
        } = generated;
        Self::with_layout(layout, mines, Some(seed))
    }

    fn with_layout(layout: Minefield, total_mines: usize, seed: Option<u64>) -> Self {
        let visible = Minefield::new(layout.width(), layout.height());
        let covered_tiles = visible.len();
        Self {
            layout,
            visible,
            total_mines,
            flags_placed: 0,
            covered_tiles,
            seed,
            state: GameState::Continue,
        }
    }

    /// Returns the hidden layout.
    #[must_use]
    pub fn layout(&self) -> &Minefield {
        &self.layout
    }

    /// Returns the total number of mines on the board.
    #[must_use]
    pub fn total_mines(&self) -> usize {
        self.total_mines
    }

    /// Returns the number of flags currently placed.
    #[must_use]
    pub fn flags_placed_count(&self) -> usize {
        self.flags_placed
    }

    /// Returns the number of tiles not yet uncovered, flags included.
    #[must_use]
    pub fn covered_tiles_count(&self) -> usize {
        self.covered_tiles
    }

    /// Returns the seed the board was generated from, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the outcome of the last uncovered tile.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    fn reveal_from(&mut self, start: Position) {
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            if !self.visible[pos].is_covered() {
                continue;
            }
            let tile = self.layout[pos];
            self.visible[pos] = tile;
            self.covered_tiles -= 1;
            if tile == Tile::Hint(0) {
                stack.extend(
                    self.visible
                        .neighbors(pos)
                        .filter(|&p| self.visible[p].is_covered()),
                );
            }
        }
    }
}

impl Game for Minesweeper {
    fn field(&self) -> &Minefield {
        &self.visible
    }

    fn mines_left(&self) -> i64 {
        let total = i64::try_from(self.total_mines).unwrap_or(i64::MAX);
        let flags = i64::try_from(self.flags_placed).unwrap_or(i64::MAX);
        total - flags
    }

    fn uncover_tile(&mut self, pos: Position) -> Result<GameState, OutOfBoundsError> {
        let tile = self.visible.tile(pos)?;
        if !tile.is_covered() || !self.state.is_continue() {
            return Ok(self.state);
        }

        if self.layout[pos].is_mine() {
            self.visible[pos] = Tile::Mine;
            self.covered_tiles -= 1;
            self.state = GameState::Lose;
            log::info!("uncovered a mine at {pos}");
            return Ok(self.state);
        }

        self.reveal_from(pos);
        if self.covered_tiles == self.total_mines {
            self.state = GameState::Win;
            log::info!("all safe tiles uncovered");
        }
        Ok(self.state)
    }

    fn toggle_flag(&mut self, pos: Position) -> Result<(), OutOfBoundsError> {
        match self.visible.tile(pos)? {
            Tile::Covered => {
                self.visible[pos] = Tile::Flag;
                self.flags_placed += 1;
            }
            Tile::Flag => {
                self.visible[pos] = Tile::Covered;
                self.flags_placed -= 1;
            }
            Tile::Hint(_) | Tile::Mine => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(layout: &str) -> Minesweeper {
        Minesweeper::from_layout(layout.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_parameters() {
        let generator = MinefieldGenerator::new();
        assert_eq!(
            Minesweeper::new(&generator, 0, 10, 1),
            Err(GameError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert_eq!(
            Minesweeper::new(&generator, 10, 0, 1),
            Err(GameError::InvalidDimensions {
                width: 10,
                height: 0
            })
        );
        assert_eq!(
            Minesweeper::new(&generator, 2, 2, 4),
            Err(GameError::TooManyMines { mines: 4, tiles: 4 })
        );
    }

    #[test]
    fn test_from_layout_rejects_flags_and_full_boards() {
        assert_eq!(
            Minesweeper::from_layout("#f".parse().unwrap()),
            Err(GameError::FlagInLayout {
                position: Position::new(1, 0)
            })
        );
        assert_eq!(
            Minesweeper::from_layout("**".parse().unwrap()),
            Err(GameError::TooManyMines { mines: 2, tiles: 2 })
        );
    }

    #[test]
    fn test_initial_state() {
        let game = Minesweeper::with_seed(&MinefieldGenerator::new(), 3, 30, 16, 99).unwrap();
        assert_eq!(game.total_mines(), 99);
        assert_eq!(game.mines_left(), 99);
        assert_eq!(game.covered_tiles_count(), 30 * 16);
        assert_eq!(game.seed(), Some(3));
        assert!(game.field().positions().all(|pos| game.field()[pos].is_covered()));
    }

    #[test]
    fn test_tile_out_of_bounds() {
        let game = game("#*\n##");
        assert!(game.tile(Position::new(2, 0)).is_err());
        assert!(game.tile(Position::new(0, 2)).is_err());
        assert_eq!(game.tile(Position::new(1, 1)), Ok(Tile::Covered));
    }

    #[test]
    fn test_uncover_zero_cascades_to_win() {
        let mut game = game(
            "
            ####
            ####
            ##**
            ",
        );
        let state = game.uncover_tile(Position::new(0, 0)).unwrap();
        assert_eq!(state, GameState::Win);
        assert_eq!(game.field().to_string(), "0000\n0122\n01##\n");
        assert_eq!(game.covered_tiles_count(), 2);
    }

    #[test]
    fn test_uncover_mine_loses() {
        let mut game = game("*#\n##");
        assert_eq!(game.uncover_tile(Position::new(0, 0)), Ok(GameState::Lose));
        assert_eq!(game.tile(Position::new(0, 0)), Ok(Tile::Mine));
        assert_eq!(game.state(), GameState::Lose);
        assert_eq!(game.uncover_tile(Position::new(1, 1)), Ok(GameState::Lose));
        assert_eq!(game.tile(Position::new(1, 1)), Ok(Tile::Covered));
    }

    #[test]
    fn test_uncover_non_covered_is_noop() {
        let mut game = game("*#\n##");
        game.toggle_flag(Position::new(0, 0)).unwrap();
        assert_eq!(game.uncover_tile(Position::new(0, 0)), Ok(GameState::Continue));
        assert_eq!(game.tile(Position::new(0, 0)), Ok(Tile::Flag));

        game.uncover_tile(Position::new(1, 0)).unwrap();
        let covered = game.covered_tiles_count();
        assert_eq!(game.uncover_tile(Position::new(1, 0)), Ok(GameState::Continue));
        assert_eq!(game.covered_tiles_count(), covered);
        assert!(game.uncover_tile(Position::new(9, 9)).is_err());
    }

    #[test]
    fn test_win_when_only_mines_remain() {
        let mut game = game("*#\n##");
        assert_eq!(game.uncover_tile(Position::new(1, 0)), Ok(GameState::Continue));
        assert_eq!(game.uncover_tile(Position::new(0, 1)), Ok(GameState::Continue));
        assert_eq!(game.uncover_tile(Position::new(1, 1)), Ok(GameState::Win));
        assert_eq!(game.covered_tiles_count(), game.total_mines());
    }

    #[test]
    fn test_toggle_flag() {
        let mut game = game("*#\n##");
        let pos = Position::new(0, 0);
        game.toggle_flag(pos).unwrap();
        assert_eq!(game.tile(pos), Ok(Tile::Flag));
        assert_eq!(game.flags_placed_count(), 1);
        assert_eq!(game.mines_left(), 0);

        game.toggle_flag(Position::new(1, 1)).unwrap();
        assert_eq!(game.mines_left(), -1);

        game.toggle_flag(pos).unwrap();
        assert_eq!(game.tile(pos), Ok(Tile::Covered));
        assert_eq!(game.flags_placed_count(), 1);

        game.uncover_tile(Position::new(1, 0)).unwrap();
        game.toggle_flag(Position::new(1, 0)).unwrap();
        assert_eq!(game.tile(Position::new(1, 0)), Ok(Tile::Hint(1)));
        assert!(game.toggle_flag(Position::new(2, 0)).is_err());
    }
}
