//! Minesweeper game session management.
//!
//! This crate keeps the hidden layout of a board apart from what the player
//! has uncovered so far, and implements [`sweeper_core::Game`] on top of it.
//!
//! # Examples
//!
//! ```
//! use sweeper_core::{Game as _, GameState, Position, Tile};
//! use sweeper_game::Minesweeper;
//!
//! let mut game = Minesweeper::from_layout("
//!     ###*
//!     ####
//! ".parse()?)?;
//!
//! assert_eq!(game.uncover_tile(Position::new(0, 0))?, GameState::Continue);
//! assert_eq!(game.tile(Position::new(1, 1))?, Tile::Hint(1));
//! assert_eq!(game.uncover_tile(Position::new(2, 1))?, GameState::Win);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{error::GameError, minesweeper::Minesweeper};

mod error;
mod minesweeper;
