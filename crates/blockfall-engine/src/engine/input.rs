use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Player command delivered to the session on a tick.
///
/// "No key this tick" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::IsVariant)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    /// Rotate clockwise.
    Rotate,
    /// Move down one row, locking the piece if it cannot move.
    SoftDrop,
    /// End the session immediately.
    Quit,
}

/// Non-blocking source of player input.
///
/// Implementations must return immediately; at most one event is consumed
/// per tick.
pub trait InputSource {
    fn poll_input(&mut self) -> Option<InputEvent>;
}

impl<I> InputSource for &mut I
where
    I: InputSource + ?Sized,
{
    fn poll_input(&mut self) -> Option<InputEvent> {
        (**self).poll_input()
    }
}

/// Input source replaying a fixed sequence, one event per poll.
///
/// `None` entries stand for ticks without input.
///
/// # Example
///
/// ```
/// use blockfall_engine::{InputEvent, InputSource, ScriptedInput};
///
/// let mut input = ScriptedInput::from_iter([Some(InputEvent::Rotate), None]);
/// assert_eq!(input.poll_input(), Some(InputEvent::Rotate));
/// assert_eq!(input.poll_input(), None);
/// assert!(input.is_exhausted());
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    events: VecDeque<Option<InputEvent>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Option<InputEvent>) {
        self.events.push_back(event);
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<Option<InputEvent>> for ScriptedInput {
    fn from_iter<T: IntoIterator<Item = Option<InputEvent>>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_input(&mut self) -> Option<InputEvent> {
        self.events.pop_front().flatten()
    }
}
