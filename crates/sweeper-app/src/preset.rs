//! Classic board sizes.

use clap::ValueEnum;

/// A classic difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 9x9 with 10 mines.
    Beginner,
    /// 16x16 with 40 mines.
    Intermediate,
    /// 30x16 with 99 mines.
    Expert,
}

impl Preset {
    /// Returns `(width, height, mines)`.
    #[must_use]
    pub const fn dimensions(self) -> (usize, usize, usize) {
        match self {
            Self::Beginner => (9, 9, 10),
            Self::Intermediate => (16, 16, 40),
            Self::Expert => (30, 16, 99),
        }
    }
}
