use crossterm::event::Event;
use ratatui::Frame;

/// Application driven by [`Tui::run`](super::Tui::run).
pub trait App {
    /// Checked before every event; the loop stops once this returns true.
    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key press, resize, ...).
    fn handle_event(&mut self, event: &Event);

    /// Advances the application by one tick.
    fn update(&mut self);

    fn draw(&self, frame: &mut Frame);
}
