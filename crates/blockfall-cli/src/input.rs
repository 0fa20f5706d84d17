use std::collections::VecDeque;

use blockfall_engine::{InputEvent, InputSource};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Maps a key to the game command it stands for. Letters match in either
/// case.
///
/// | Command    | Keys              |
/// |------------|-------------------|
/// | Move left  | `←`, `a`, `h`     |
/// | Move right | `→`, `d`, `l`     |
/// | Rotate     | `↑`, `w`, `k`     |
/// | Soft drop  | `↓`, `s`, `j`     |
/// | Quit       | `q`, `Esc`, `^C`  |
pub fn input_event_for_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(InputEvent::Quit);
    }
    let event = match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'h' | 'A' | 'H') => InputEvent::MoveLeft,
        KeyCode::Right | KeyCode::Char('d' | 'l' | 'D' | 'L') => InputEvent::MoveRight,
        KeyCode::Up | KeyCode::Char('w' | 'k' | 'W' | 'K') => InputEvent::Rotate,
        KeyCode::Down | KeyCode::Char('s' | 'j' | 'S' | 'J') => InputEvent::SoftDrop,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => InputEvent::Quit,
        _ => return None,
    };
    Some(event)
}

/// Whether the key event is a press (or auto-repeat), not a release.
pub fn is_key_press(key: &KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

/// Buffers mapped key presses between ticks.
///
/// The session takes one event per tick, so a burst of presses is spread
/// over the following ticks. Quit jumps the queue.
#[derive(Debug, Default)]
pub struct KeyQueue {
    pending: VecDeque<InputEvent>,
}

impl KeyQueue {
    /// Presses held back at most; older ones win when the queue is full.
    const CAPACITY: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the command for `key`; returns whether the key was mapped.
    pub fn push_key(&mut self, key: &KeyEvent) -> bool {
        let Some(event) = input_event_for_key(key) else {
            return false;
        };
        self.push(event);
        true
    }

    pub fn push(&mut self, event: InputEvent) {
        if event.is_quit() {
            self.pending.clear();
            self.pending.push_back(event);
        } else if self.pending.len() < Self::CAPACITY {
            self.pending.push_back(event);
        }
    }
}

impl InputSource for KeyQueue {
    fn poll_input(&mut self) -> Option<InputEvent> {
        self.pending.pop_front()
    }
}
