use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

use crate::InvalidRotationError;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// J-piece.
    J = 3,
    /// L-piece.
    L = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

/// Draws one of the seven kinds with equal probability.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the occupancy mask of this kind in the given rotation.
    ///
    /// Total over all 28 combinations; the table is the single source of shape
    /// data for collision checks and rendering alike.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::{PieceKind, PieceRotation};
    ///
    /// let mask = PieceKind::I.mask(PieceRotation::SPAWN);
    /// assert!(mask.is_occupied(0, 1));
    /// assert!(!mask.is_occupied(0, 0));
    /// ```
    #[must_use]
    pub const fn mask(self, rotation: PieceRotation) -> ShapeMask {
        SHAPE_MASKS[self as usize][rotation.as_usize()]
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);

    /// Creates a rotation state, reducing `value` modulo 4.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value % 4)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for PieceRotation {
    type Error = InvalidRotationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 4 {
            Ok(Self(value))
        } else {
            Err(InvalidRotationError(value))
        }
    }
}

impl From<PieceRotation> for u8 {
    fn from(rotation: PieceRotation) -> Self {
        rotation.0
    }
}

/// Occupancy of a piece within its 4×4 bounding box.
///
/// Row `y` is stored as a 4-bit mask where bit `x` is column `x` (left to right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMask([u8; 4]);

impl ShapeMask {
    /// Side length of the bounding box.
    pub const SIZE: usize = 4;

    /// Returns whether the cell at `(x, y)` inside the bounding box is occupied.
    ///
    /// Coordinates outside the box are never occupied.
    #[must_use]
    pub const fn is_occupied(self, x: usize, y: usize) -> bool {
        x < Self::SIZE && y < Self::SIZE && (self.0[y] & (1 << x)) != 0
    }

    /// Iterates over the occupied `(x, y)` offsets, row by row.
    pub fn occupied_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..Self::SIZE).flat_map(move |y| {
            (0..Self::SIZE).filter_map(move |x| self.is_occupied(x, y).then_some((x, y)))
        })
    }

    #[must_use]
    pub fn count(self) -> u32 {
        self.0.iter().map(|row| row.count_ones()).sum()
    }
}

/// Shape table indexed by `[kind][rotation]`.
///
/// Every rotation is written out explicitly rather than derived by rotating
/// the spawn shape: the rotations do not share a common pivot (O is identical
/// in all four states, I alternates between rows 1/2 and columns 2/1).
const SHAPE_MASKS: [[ShapeMask; 4]; PieceKind::LEN] = {
    const fn m(bits: [bool; 4]) -> u8 {
        let mut mask = 0;
        let mut i = 0;
        while i < 4 {
            if bits[i] {
                mask |= 1 << i;
            }
            i += 1;
        }
        mask
    }

    const C: bool = true;
    const E: bool = false;
    const EEEE: u8 = m([E; 4]);

    [
        // I-piece
        [
            ShapeMask([EEEE, m([C, C, C, C]), EEEE, EEEE]),
            ShapeMask([m([E, E, C, E]), m([E, E, C, E]), m([E, E, C, E]), m([E, E, C, E])]),
            ShapeMask([EEEE, EEEE, m([C, C, C, C]), EEEE]),
            ShapeMask([m([E, C, E, E]), m([E, C, E, E]), m([E, C, E, E]), m([E, C, E, E])]),
        ],
        // O-piece
        [
            ShapeMask([EEEE, m([E, C, C, E]), m([E, C, C, E]), EEEE]),
            ShapeMask([EEEE, m([E, C, C, E]), m([E, C, C, E]), EEEE]),
            ShapeMask([EEEE, m([E, C, C, E]), m([E, C, C, E]), EEEE]),
            ShapeMask([EEEE, m([E, C, C, E]), m([E, C, C, E]), EEEE]),
        ],
        // T-piece
        [
            ShapeMask([EEEE, m([E, C, E, E]), m([C, C, C, E]), EEEE]),
            ShapeMask([EEEE, m([E, C, E, E]), m([E, C, C, E]), m([E, C, E, E])]),
            ShapeMask([EEEE, EEEE, m([C, C, C, E]), m([E, C, E, E])]),
            ShapeMask([EEEE, m([E, C, E, E]), m([C, C, E, E]), m([E, C, E, E])]),
        ],
        // J-piece
        [
            ShapeMask([EEEE, m([C, E, E, E]), m([C, C, C, E]), EEEE]),
            ShapeMask([EEEE, m([E, C, C, E]), m([E, C, E, E]), m([E, C, E, E])]),
            ShapeMask([EEEE, EEEE, m([C, C, C, E]), m([E, E, C, E])]),
            ShapeMask([EEEE, m([E, C, E, E]), m([E, C, E, E]), m([C, C, E, E])]),
        ],
        // L-piece
        [
            ShapeMask([EEEE, m([E, E, C, E]), m([C, C, C, E]), EEEE]),
            ShapeMask([EEEE, m([E, C, E, E]), m([E, C, E, E]), m([E, C, C, E])]),
            ShapeMask([EEEE, EEEE, m([C, C, C, E]), m([C, E, E, E])]),
            ShapeMask([EEEE, m([C, C, E, E]), m([E, C, E, E]), m([E, C, E, E])]),
        ],
        // S-piece
        [
            ShapeMask([EEEE, m([E, C, C, E]), m([C, C, E, E]), EEEE]),
            ShapeMask([EEEE, m([E, C, E, E]), m([E, C, C, E]), m([E, E, C, E])]),
            ShapeMask([EEEE, EEEE, m([E, C, C, E]), m([C, C, E, E])]),
            ShapeMask([EEEE, m([C, E, E, E]), m([C, C, E, E]), m([E, C, E, E])]),
        ],
        // Z-piece
        [
            ShapeMask([EEEE, m([C, C, E, E]), m([E, C, C, E]), EEEE]),
            ShapeMask([EEEE, m([E, E, C, E]), m([E, C, C, E]), m([E, C, E, E])]),
            ShapeMask([EEEE, EEEE, m([C, C, E, E]), m([E, C, C, E])]),
            ShapeMask([EEEE, m([E, C, E, E]), m([C, C, E, E]), m([C, E, E, E])]),
        ],
    ]
};
