use blockfall_engine::{GameSession, SystemClock, TickResult};
use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    input::{KeyQueue, is_key_press},
    tui::App,
    view::widgets::SessionDisplay,
};

/// Interactive game: feeds key presses to the session once per tick and
/// draws the latest result.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    clock: SystemClock,
    keys: KeyQueue,
    result: TickResult,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        let result = session.snapshot();
        Self {
            session,
            clock: SystemClock::new(),
            keys: KeyQueue::new(),
            result,
            is_exiting: false,
        }
    }

    pub fn result(&self) -> &TickResult {
        &self.result
    }
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event().filter(is_key_press) else {
            return;
        };
        if self.result.game_over {
            // Any key dismisses the game-over screen
            self.is_exiting = true;
            return;
        }
        self.keys.push_key(&key);
    }

    fn update(&mut self) {
        if self.result.game_over {
            return;
        }
        self.result = self.session.tick_with(&mut self.keys, &self.clock);
        if self.result.state.is_quit() {
            self.is_exiting = true;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(SessionDisplay::new(&self.result), frame.area());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blockfall_engine::{InputEvent, SessionConfig, SessionState};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::*;

    fn app() -> PlayApp {
        let session = GameSession::with_config(&SessionConfig {
            base_drop_interval: Duration::from_secs(3600),
            seed: Some(5),
            ..SessionConfig::default()
        })
        .unwrap();
        PlayApp::new(session)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_key_applied_on_next_tick() {
        let mut app = app();
        let x = app.result().active_piece.unwrap().position().x();

        app.handle_event(&press(KeyCode::Left));
        assert_eq!(app.result().active_piece.unwrap().position().x(), x);

        app.update();
        assert_eq!(app.result().active_piece.unwrap().position().x(), x - 1);
        assert!(!app.should_exit());
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = app();
        let x = app.result().active_piece.unwrap().position().x();
        let release = KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release);
        app.handle_event(&Event::Key(release));
        app.update();
        assert_eq!(app.result().active_piece.unwrap().position().x(), x);
    }

    #[test]
    fn test_quit_key_exits() {
        let mut app = app();
        app.handle_event(&press(KeyCode::Char('q')));
        app.update();
        assert_eq!(app.result().state, SessionState::Quit);
        assert!(app.should_exit());
    }

    #[test]
    fn test_any_key_exits_after_game_over() {
        let mut app = app();
        while !app.result().game_over {
            app.session.apply_input(InputEvent::SoftDrop);
            app.update();
        }
        assert!(app.result().state.is_game_over());
        assert!(!app.should_exit());

        app.handle_event(&press(KeyCode::Char('x')));
        assert!(app.should_exit());
    }
}
