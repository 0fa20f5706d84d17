use std::iter;

use blockfall_engine::{Board, Cell, Piece};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::CellDisplay;

/// The playfield: locked cells with the falling piece composited on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            falling_piece: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: Option<Piece>) -> Self {
        Self {
            falling_piece: piece,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        cells_to_u16(self.board.width())
            .saturating_mul(CellDisplay::WIDTH)
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        cells_to_u16(self.board.height())
            .saturating_mul(CellDisplay::HEIGHT)
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }

    fn cell_display(&self, x: u16, y: u16) -> CellDisplay {
        let (x, y) = (i32::from(x), i32::from(y));
        if let Some(piece) = self.falling_piece
            && piece.occupied_cells().contains(&(x, y))
        {
            return CellDisplay::from_piece_kind(piece.kind());
        }
        self.board
            .cell(x, y)
            .map_or(CellDisplay::from_cell(Cell::Empty), CellDisplay::from_cell)
    }
}

fn cells_to_u16(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = 0..cells_to_u16(self.board.height());
        let columns = 0..cells_to_u16(self.board.width());
        for y in rows {
            for x in columns.clone() {
                let cell_area = Rect::new(
                    area.x.saturating_add(x.saturating_mul(CellDisplay::WIDTH)),
                    area.y.saturating_add(y.saturating_mul(CellDisplay::HEIGHT)),
                    CellDisplay::WIDTH,
                    CellDisplay::HEIGHT,
                )
                .intersection(area);
                if cell_area.is_empty() {
                    continue;
                }
                self.cell_display(x, y).render(cell_area, buf);
            }
        }
    }
}
