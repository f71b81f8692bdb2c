//! Terminal front end for the Minesweeper solver.

pub use self::{preset::Preset, terminal::TerminalLogger};

pub mod preset;
pub mod terminal;
