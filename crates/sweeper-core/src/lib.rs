//! Core data structures for Minesweeper engines.
//!
//! This crate provides the types shared by board generation, game bookkeeping,
//! and solving components.
//!
//! # Overview
//!
//! - [`position`]: Board coordinates `(x, y)`.
//! - [`tile`]: The state of a single tile as seen by a player.
//! - [`minefield`]: A rectangular grid of tiles, with a text format for fixtures.
//! - [`game`]: The [`Game`] trait through which a player (human or solver)
//!   interacts with a running game.
//!
//! # Examples
//!
//! ```
//! use sweeper_core::{Minefield, Position, Tile};
//!
//! let field: Minefield = "
//!     01#
//!     1f#
//! "
//! .parse()?;
//!
//! assert_eq!(field.width(), 3);
//! assert_eq!(field.height(), 2);
//! assert_eq!(field[Position::new(1, 1)], Tile::Flag);
//! assert_eq!(field.neighbors(Position::new(0, 0)).count(), 3);
//! # Ok::<(), sweeper_core::MinefieldError>(())
//! ```

pub mod game;
pub mod minefield;
pub mod position;
pub mod tile;

// Re-export commonly used types
pub use self::{
    game::{Game, GameState},
    minefield::{Minefield, MinefieldError, OutOfBoundsError},
    position::Position,
    tile::Tile,
};
