use blockfall_engine::{Cell, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One board cell, drawn two columns wide so cells look square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::new(style::EMPTY_DOT, "."),
            Cell::Filled => Self::new(style::LOCKED, ""),
        }
    }

    /// A cell of the falling piece, coloured by its kind.
    pub fn from_piece_kind(kind: PieceKind) -> Self {
        let style = match kind {
            PieceKind::I => style::I_CELL,
            PieceKind::O => style::O_CELL,
            PieceKind::T => style::T_CELL,
            PieceKind::J => style::J_CELL,
            PieceKind::L => style::L_CELL,
            PieceKind::S => style::S_CELL,
            PieceKind::Z => style::Z_CELL,
        };
        Self::new(style, "")
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area with the style, not only the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cell() {
        assert_eq!(
            CellDisplay::from_cell(Cell::Empty),
            CellDisplay::new(style::EMPTY_DOT, ".")
        );
        assert_eq!(
            CellDisplay::from_cell(Cell::Filled),
            CellDisplay::new(style::LOCKED, "")
        );
    }

    #[test]
    fn test_piece_kinds_have_distinct_colors() {
        let styles: Vec<_> = PieceKind::ALL
            .iter()
            .map(|kind| CellDisplay::from_piece_kind(*kind).style)
            .collect();
        for (i, a) in styles.iter().enumerate() {
            assert!(!styles[i + 1..].contains(a));
            assert_ne!(*a, style::LOCKED);
        }
    }
}
