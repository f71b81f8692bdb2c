use sweeper_core::Position;
use sweeper_generator::GenerateError;

/// Errors that can occur when setting up a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The board has no tiles.
    #[display("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The board has no safe tile.
    #[display("{mines} mines do not fit on a board of {tiles} tiles")]
    TooManyMines {
        /// Mine count.
        mines: usize,
        /// Number of tiles on the board.
        tiles: usize,
    },
    /// A layout contains a flag, which is not part of a hidden board.
    #[display("layout contains a flag at {position}")]
    FlagInLayout {
        /// Position of the flag.
        position: Position,
    },
}

impl From<GenerateError> for GameError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::InvalidDimensions { width, height } => {
                Self::InvalidDimensions { width, height }
            }
            GenerateError::TooManyMines { mines, tiles } => Self::TooManyMines { mines, tiles },
        }
    }
}
