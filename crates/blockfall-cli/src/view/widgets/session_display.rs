use blockfall_engine::{SessionState, TickResult};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Widget},
};

use super::{BoardDisplay, StatusLine, color, style};

const HELP_PLAYING: &str = "← → (Move) | ↑ (Rotate) | ↓ (Soft Drop) | Q (Quit)";
const HELP_FINISHED: &str = "Press any key to exit";

/// Whole game screen: bordered board, status line, key help and the
/// game-over banner.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    result: &'a TickResult,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(result: &'a TickResult) -> Self {
        Self { result }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.result.state {
            SessionState::Playing => color::WHITE,
            SessionState::GameOver | SessionState::Quit => color::RED,
        };
        let board = BoardDisplay::new(&self.result.board)
            .falling_piece(self.result.active_piece)
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let help = if self.result.game_over {
            HELP_FINISHED
        } else {
            HELP_PLAYING
        };

        let [board_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(area);
        let [board_area] = Layout::horizontal([Constraint::Length(board.width())])
            .flex(Flex::Center)
            .areas(board_area);

        let board_width = board.width();
        board.render(board_area, buf);
        StatusLine::new(self.result).render(status_area, buf);
        Line::styled(help, style::HELP)
            .centered()
            .render(help_area, buf);

        if self.result.state.is_game_over() {
            let banner = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let block = Block::new().style(style::GAME_OVER);
            let inner = block.inner(banner);
            Clear.render(banner, buf);
            block.render(banner, buf);
            Text::styled("GAME OVER", style::GAME_OVER)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blockfall_engine::{GameSession, InputEvent, SessionConfig};

    use super::*;

    fn render(result: &TickResult) -> Vec<String> {
        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(result).render(area, &mut buf);
        buf.content()
            .chunks(usize::from(area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn session() -> GameSession {
        GameSession::with_config(&SessionConfig {
            seed: Some(1),
            ..SessionConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_playing_screen() {
        let lines = render(&session().snapshot());
        assert!(lines.iter().any(|line| line.contains("Score: 0 Level: 1 Lines: 0")));
        assert!(lines.iter().any(|line| line.contains("(Rotate)")));
        assert!(!lines.iter().any(|line| line.contains("GAME OVER")));
    }

    #[test]
    fn test_game_over_banner() {
        let mut session = session();
        let mut result = session.snapshot();
        while !result.game_over {
            result = session.tick_at(Some(InputEvent::SoftDrop), Duration::ZERO);
        }
        let lines = render(&result);
        assert!(lines.iter().any(|line| line.contains("GAME OVER")));
        assert!(lines.iter().any(|line| line.contains(HELP_FINISHED)));
    }
}
