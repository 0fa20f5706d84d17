use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{BoardDimensionsError, BoardParseError, core::piece::Piece};

/// A single board cell.
///
/// Only occupancy is tracked; locked cells do not remember which piece kind
/// filled them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, derive_more::IsVariant,
)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

impl Cell {
    const EMPTY_CHAR: char = '.';
    const FILLED_CHAR: char = '#';

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => Self::EMPTY_CHAR,
            Cell::Filled => Self::FILLED_CHAR,
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            Self::EMPTY_CHAR => Some(Cell::Empty),
            Self::FILLED_CHAR => Some(Cell::Filled),
            _ => None,
        }
    }
}

/// Fixed-size playfield of `height` rows by `width` columns.
///
/// Row 0 is the top (spawn) row and `x` grows to the right. Dimensions are
/// fixed at construction. The board is mutated only by [`Board::lock`] and
/// [`Board::clear_completed_rows`].
///
/// # Text form
///
/// `Display`, `FromStr` and serde all use the same row-per-line layout where
/// `#` is a filled cell and `.` an empty one:
///
/// ```
/// use blockfall_engine::Board;
///
/// let board: Board = "
///     ....
///     ....
///     #...
///     #.##
/// "
/// .parse()
/// .unwrap();
/// assert_eq!(board.width(), 4);
/// assert!(!board.is_cell_empty(0, 3));
/// assert!(board.is_cell_empty(1, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Smallest accepted width and height: one piece bounding box.
    pub const MIN_DIMENSION: usize = 4;
    /// Largest accepted width and height, keeping every coordinate in `i32`.
    pub const MAX_DIMENSION: usize = u16::MAX as usize;

    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;

    /// Creates an empty board.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardDimensionsError> {
        let valid = Self::MIN_DIMENSION..=Self::MAX_DIMENSION;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(BoardDimensionsError { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    /// Builds a board from rows of `#`/`.` text, top row first.
    ///
    /// Whitespace around each row is ignored and blank lines are skipped.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, BoardParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut width = None;
        let mut height = 0;
        let mut cells = vec![];
        for line in rows {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            let start = cells.len();
            for (column, c) in line.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or(BoardParseError::InvalidCell {
                    row: height,
                    column,
                    found: c,
                })?;
                cells.push(cell);
            }
            let found = cells.len() - start;
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(BoardParseError::RaggedRow {
                    row: height,
                    expected,
                    found,
                });
            }
            height += 1;
        }

        let mut board = Self::new(width.unwrap_or(0), height)?;
        board.cells = cells;
        Ok(board)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(x, y)`, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Returns `false` for out-of-bounds coordinates, otherwise whether the
    /// cell is empty.
    #[must_use]
    pub fn is_cell_empty(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|cell| cell.is_empty())
    }

    /// Returns whether every occupied cell of `piece` is in bounds and empty.
    ///
    /// This is the only legality check: spawn, movement and rotation all go
    /// through it.
    #[must_use]
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece
            .occupied_cells()
            .into_iter()
            .all(|(x, y)| self.is_cell_empty(x, y))
    }

    /// Writes the occupied cells of `piece` into the board.
    ///
    /// The caller must have checked [`Board::can_place`] first. Cells of an
    /// invalid placement that fall outside the board are dropped.
    pub fn lock(&mut self, piece: &Piece) {
        debug_assert!(self.can_place(piece), "locking invalid placement {piece:?}");
        for (x, y) in piece.occupied_cells() {
            if let Some(i) = self.index(x, y) {
                self.cells[i] = Cell::Filled;
            }
        }
    }

    /// Removes every complete row and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. When a row is removed, everything above
    /// it shifts down by one, an empty row enters at the top, and the same
    /// row index is examined again before the scan continues upward.
    pub fn clear_completed_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;
        while y > 0 {
            if self.is_row_complete(y - 1) {
                self.collapse_row(y - 1);
                cleared += 1;
                continue;
            }
            y -= 1;
        }
        cleared
    }

    /// Returns whether any cell of the spawn row (row 0) is filled.
    #[must_use]
    pub fn top_row_has_filled_cell(&self) -> bool {
        self.row(0).iter().any(|cell| cell.is_filled())
    }

    #[must_use]
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.row(y).iter().all(|cell| cell.is_filled())
    }

    /// Returns the cells of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not less than [`Board::height`].
    #[must_use]
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..][..self.width]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Number of filled cells on the whole board.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = usize::try_from(y).ok().filter(|y| *y < self.height)?;
        Some(y * self.width + x)
    }

    /// Drops row `y`, shifting every row above it down by one and emptying
    /// the top row.
    fn collapse_row(&mut self, y: usize) {
        let width = self.width;
        self.cells.copy_within(..y * width, width);
        self.cells[..width].fill(Cell::Empty);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(s.lines())
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = BoardParseError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board
            .rows()
            .map(|row| row.iter().map(|cell| cell.as_char()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        piece::{Piece, PiecePosition},
        shape::{PieceKind, PieceRotation},
    };

    fn board(art: &str) -> Board {
        art.parse().unwrap()
    }

    fn piece(kind: PieceKind, rotation: u8, x: i32, y: i32) -> Piece {
        Piece::new(kind, PieceRotation::new(rotation), PiecePosition::new(x, y))
    }

    fn fill_row(board: &mut Board, y: usize) {
        let width = board.width;
        board.cells[y * width..][..width].fill(Cell::Filled);
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 20).unwrap();
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert_eq!(board.rows().len(), 20);
        assert_eq!(board.filled_count(), 0);
        assert!(!board.top_row_has_filled_cell());
    }

    #[test]
    fn test_new_board_rejects_degenerate_dimensions() {
        assert_eq!(
            Board::new(0, 20),
            Err(BoardDimensionsError {
                width: 0,
                height: 20
            })
        );
        assert!(Board::new(10, 0).is_err());
        assert!(Board::new(3, 20).is_err());
        assert!(Board::new(4, 4).is_ok());
    }

    #[test]
    fn test_is_cell_empty_out_of_bounds() {
        let board = Board::new(10, 20).unwrap();
        assert!(board.is_cell_empty(0, 0));
        assert!(board.is_cell_empty(9, 19));
        assert!(!board.is_cell_empty(-1, 0));
        assert!(!board.is_cell_empty(0, -1));
        assert!(!board.is_cell_empty(10, 0));
        assert!(!board.is_cell_empty(0, 20));
    }

    #[test]
    fn test_can_place_in_bounds_and_empty() {
        let board = Board::new(10, 20).unwrap();
        for kind in PieceKind::ALL {
            for rotation in 0..4 {
                assert!(board.can_place(&piece(kind, rotation, 3, 0)));
            }
        }
    }

    #[test]
    fn test_can_place_rejects_out_of_bounds() {
        let board = Board::new(10, 20).unwrap();
        // I spawn occupies row 1, columns x..x+3
        assert!(board.can_place(&piece(PieceKind::I, 0, 0, 0)));
        assert!(!board.can_place(&piece(PieceKind::I, 0, -1, 0)));
        assert!(board.can_place(&piece(PieceKind::I, 0, 6, 0)));
        assert!(!board.can_place(&piece(PieceKind::I, 0, 7, 0)));
        assert!(board.can_place(&piece(PieceKind::I, 0, 0, 18)));
        assert!(!board.can_place(&piece(PieceKind::I, 0, 0, 19)));
        // Empty mask rows may hang outside the board
        assert!(board.can_place(&piece(PieceKind::I, 0, 0, -1)));
        assert!(!board.can_place(&piece(PieceKind::I, 0, 0, -2)));
    }

    #[test]
    fn test_can_place_rejects_overlap() {
        let board = board(
            "
            ..........
            ..........
            ....#.....
            ..........
            ",
        );
        // T spawn at (3, 0) covers (4,1), (3,2), (4,2), (5,2)
        assert!(!board.can_place(&piece(PieceKind::T, 0, 3, 0)));
        assert!(board.can_place(&piece(PieceKind::T, 0, 5, 0)));
        // O covers (x+1..x+3, y+1..y+3)
        assert!(!board.can_place(&piece(PieceKind::O, 0, 3, 1)));
        assert!(board.can_place(&piece(PieceKind::O, 0, 3, -1)));
    }

    #[test]
    fn test_can_place_matches_brute_force() {
        let board = board(
            "
            ......
            ..#...
            ......
            #....#
            ##..##
            ",
        );
        for kind in PieceKind::ALL {
            for rotation in 0..4 {
                for x in -4..10 {
                    for y in -4..9 {
                        let candidate = piece(kind, rotation, x, y);
                        let mask = kind.mask(PieceRotation::new(rotation));
                        let expected = mask.occupied_cells().all(|(mx, my)| {
                            let bx = x + i32::try_from(mx).unwrap();
                            let by = y + i32::try_from(my).unwrap();
                            (0..6).contains(&bx)
                                && (0..5).contains(&by)
                                && board.cell(bx, by) == Some(Cell::Empty)
                        });
                        assert_eq!(board.can_place(&candidate), expected, "{candidate:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_lock_fills_occupied_cells() {
        let mut board = Board::new(6, 4).unwrap();
        board.lock(&piece(PieceKind::L, 0, 1, 1));
        assert_eq!(
            board.to_string(),
            "......\n......\n...#..\n.###.."
        );
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_clear_no_complete_rows() {
        let mut board = board(
            "
            ....
            ....
            ###.
            .###
            ",
        );
        let before = board.clone();
        assert_eq!(board.clear_completed_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_single_bottom_row() {
        let mut board = board(
            "
            ....
            .#..
            ##..
            ####
            ",
        );
        assert_eq!(board.clear_completed_rows(), 1);
        assert_eq!(board.to_string(), "....\n....\n.#..\n##..");
    }

    #[test]
    fn test_clear_two_separated_rows() {
        let mut board = board(
            "
            #...
            ####
            .#..
            ####
            ..#.
            ",
        );
        assert_eq!(board.clear_completed_rows(), 2);
        assert_eq!(board.to_string(), "....\n....\n#...\n.#..\n..#.");
    }

    #[test]
    fn test_clear_adjacent_rows_rescans_same_index() {
        let mut board = board(
            "
            ....
            #...
            ####
            ####
            .#.#
            ",
        );
        assert_eq!(board.clear_completed_rows(), 2);
        assert_eq!(board.to_string(), "....\n....\n....\n#...\n.#.#");
    }

    #[test]
    fn test_clear_rows_preserves_cells_below() {
        let mut board = Board::new(10, 20).unwrap();
        fill_row(&mut board, 12);
        fill_row(&mut board, 15);
        board.lock(&piece(PieceKind::T, 0, 0, 0));
        board.lock(&piece(PieceKind::I, 0, 2, 16));
        board.lock(&piece(PieceKind::O, 0, 5, 9));
        let before = board.clone();

        assert_eq!(board.clear_completed_rows(), 2);

        // Rows below the lowest cleared row are unchanged
        for y in 16..20 {
            assert_eq!(board.row(y), before.row(y));
        }
        // Rows between the cleared rows shift down by one
        for y in 13..15 {
            assert_eq!(board.row(y + 1), before.row(y));
        }
        // Rows above both shift down by two
        for y in 0..12 {
            assert_eq!(board.row(y + 2), before.row(y));
        }
        // Top rows are empty
        assert!(board.row(0).iter().all(|c| c.is_empty()));
        assert!(board.row(1).iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_clear_all_rows() {
        let mut board = Board::new(4, 6).unwrap();
        for y in 0..6 {
            fill_row(&mut board, y);
        }
        assert_eq!(board.clear_completed_rows(), 6);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_top_row_has_filled_cell() {
        let mut board = Board::new(4, 4).unwrap();
        assert!(!board.top_row_has_filled_cell());
        board.lock(&piece(PieceKind::I, 1, 0, 0));
        assert!(board.top_row_has_filled_cell());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "....\n...".parse::<Board>(),
            Err(BoardParseError::RaggedRow {
                row: 1,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            "....\n..x.\n....\n....".parse::<Board>(),
            Err(BoardParseError::InvalidCell {
                row: 1,
                column: 2,
                found: 'x'
            })
        );
        assert!(matches!(
            "..\n..".parse::<Board>(),
            Err(BoardParseError::Dimensions(_))
        ));
        assert!(matches!(
            "".parse::<Board>(),
            Err(BoardParseError::Dimensions(_))
        ));
    }

    #[test]
    fn test_board_serialization() {
        let board = board(
            "
            ....
            .#..
            ##.#
            ####
            ",
        );
        let serialized = serde_json::to_value(&board).unwrap();
        assert_eq!(serialized, serde_json::json!(["....", ".#..", "##.#", "####"]));

        let deserialized: Board = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, board);

        assert!(serde_json::from_str::<Board>(r#"["....","..."]"#).is_err());
    }
}
