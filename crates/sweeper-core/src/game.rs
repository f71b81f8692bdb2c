//! The interface between a running game and its player.

use crate::{Minefield, OutOfBoundsError, Position, Tile};

/// The outcome of uncovering a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum GameState {
    /// The game goes on.
    #[display("continue")]
    Continue,
    /// Every tile that is not a mine has been uncovered.
    #[display("win")]
    Win,
    /// A mine has been uncovered.
    #[display("lose")]
    Lose,
}

/// A Minesweeper game as seen by its player.
///
/// The player only observes the visible field (hints, flags, and covered
/// tiles) and the number of mines not yet flagged. Mutations are limited to
/// uncovering a tile and toggling a flag.
pub trait Game {
    /// Returns the visible field.
    fn field(&self) -> &Minefield;

    /// Returns the number of mines minus the number of placed flags.
    ///
    /// This can become negative if more flags than mines have been placed.
    fn mines_left(&self) -> i64;

    /// Uncovers the tile at `pos`.
    ///
    /// Uncovering a tile that is not covered, or any tile once the game has
    /// ended, leaves the game unchanged and returns the current state.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if `pos` is outside the field.
    fn uncover_tile(&mut self, pos: Position) -> Result<GameState, OutOfBoundsError>;

    /// Toggles a flag on the covered tile at `pos`.
    ///
    /// Tiles that are neither covered nor flagged are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if `pos` is outside the field.
    fn toggle_flag(&mut self, pos: Position) -> Result<(), OutOfBoundsError>;

    /// Returns the visible tile at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBoundsError`] if `pos` is outside the field.
    fn tile(&self, pos: Position) -> Result<Tile, OutOfBoundsError> {
        self.field().tile(pos)
    }
}
