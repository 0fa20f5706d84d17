use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::PieceCollisionError;

use super::{
    board::Board,
    shape::{PieceKind, PieceRotation, ShapeMask},
};

/// A tetromino with kind, rotation and position.
///
/// Movement helpers such as [`Piece::left`] build *candidate* pieces without
/// checking anything. The `try_*` operations validate a candidate against the
/// board and either commit it or leave the piece untouched, so a failed
/// attempt never leaks a partial change.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind};
///
/// let board = Board::new(10, 20).unwrap();
/// let mut piece = Piece::spawn(PieceKind::T, board.width());
/// assert_eq!(piece.position().x(), 3);
///
/// piece.try_move_left(&board).unwrap();
/// piece.try_rotate(&board).unwrap();
/// assert_eq!(piece.position().x(), 2);
/// assert_eq!(piece.rotation().value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
    position: PiecePosition,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, rotation: PieceRotation, position: PiecePosition) -> Self {
        Self {
            kind,
            rotation,
            position,
        }
    }

    /// Creates a piece in spawn orientation, horizontally centred on a board
    /// of the given width, in the top row.
    #[must_use]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        Self::new(
            kind,
            PieceRotation::SPAWN,
            PiecePosition::spawn(board_width),
        )
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub const fn mask(&self) -> ShapeMask {
        self.kind.mask(self.rotation)
    }

    /// Board coordinates of the four occupied cells.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(i32, i32), 4> {
        let PiecePosition { x, y } = self.position;
        self.mask()
            .occupied_cells()
            .map(|(dx, dy)| (x + offset(dx), y + offset(dy)))
            .collect()
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.moved_to(self.position.left())
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.moved_to(self.position.right())
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.moved_to(self.position.down())
    }

    /// Same position, next clockwise rotation state.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            ..*self
        }
    }

    pub fn try_move_left(&mut self, board: &Board) -> Result<(), PieceCollisionError> {
        self.try_replace(board, self.left())
    }

    pub fn try_move_right(&mut self, board: &Board) -> Result<(), PieceCollisionError> {
        self.try_replace(board, self.right())
    }

    /// Moves one row down.
    ///
    /// Failure is how a falling piece comes to rest; the session locks the
    /// piece when this is rejected.
    pub fn try_move_down(&mut self, board: &Board) -> Result<(), PieceCollisionError> {
        self.try_replace(board, self.down())
    }

    /// Rotates clockwise in place.
    ///
    /// No offset compensation is attempted: a rotation that would collide
    /// with a wall or the stack simply fails.
    pub fn try_rotate(&mut self, board: &Board) -> Result<(), PieceCollisionError> {
        self.try_replace(board, self.rotated_right())
    }

    fn try_replace(&mut self, board: &Board, candidate: Self) -> Result<(), PieceCollisionError> {
        if !board.can_place(&candidate) {
            return Err(PieceCollisionError);
        }
        *self = candidate;
        Ok(())
    }

    const fn moved_to(&self, position: PiecePosition) -> Self {
        Self { position, ..*self }
    }
}

#[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const fn offset(d: usize) -> i32 {
    // Mask offsets are always below ShapeMask::SIZE
    d as i32
}

/// Top-left corner of a piece's 4×4 bounding box in board coordinates.
///
/// - X increases rightward (columns)
/// - Y increases downward (rows)
///
/// Coordinates are signed: a candidate may sit partly outside the board,
/// which [`Board::can_place`] then rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Spawn position on a board of the given width: `width / 2 - 2`, row 0.
    #[must_use]
    pub fn spawn(board_width: usize) -> Self {
        let half = i32::try_from(board_width / 2).unwrap_or(i32::MAX);
        Self::new(half - 2, 0)
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }
}
