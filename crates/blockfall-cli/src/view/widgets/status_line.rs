use blockfall_engine::TickResult;
use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};

use super::style;

/// `Score: S Level: L Lines: N`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    score: u64,
    level: u64,
    lines: u64,
}

impl StatusLine {
    pub fn new(result: &TickResult) -> Self {
        Self {
            score: result.score,
            level: result.level,
            lines: result.lines_cleared,
        }
    }

    pub fn text(&self) -> String {
        format!(
            "Score: {} Level: {} Lines: {}",
            self.score, self.level, self.lines
        )
    }
}

impl Widget for StatusLine {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::styled(self.text(), style::DEFAULT)
            .centered()
            .render(area, buf);
    }
}
