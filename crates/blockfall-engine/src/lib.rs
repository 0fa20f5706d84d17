pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A move or rotation was rejected because the candidate placement is out of
/// bounds or overlaps a filled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding at candidate placement")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("board must be at least 4x4 cells, got {width}x{height}")]
pub struct BoardDimensionsError {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SessionConfigError {
    #[display("invalid board dimensions: {_0}")]
    Dimensions(BoardDimensionsError),
    #[display("base drop interval must be at least one microsecond")]
    ZeroDropInterval,
}

impl From<BoardDimensionsError> for SessionConfigError {
    fn from(err: BoardDimensionsError) -> Self {
        Self::Dimensions(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("invalid cell {found:?} at row {row}, column {column}")]
    InvalidCell {
        row: usize,
        column: usize,
        found: char,
    },
    #[display("{_0}")]
    Dimensions(BoardDimensionsError),
}

impl From<BoardDimensionsError> for BoardParseError {
    fn from(err: BoardDimensionsError) -> Self {
        Self::Dimensions(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("rotation must be 0-3, got {_0}")]
pub struct InvalidRotationError(#[error(not(source))] pub u8);
