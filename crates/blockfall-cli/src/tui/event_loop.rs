use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Fixed-rate tick scheduler multiplexed with terminal input.
///
/// Ticks are scheduled on a fixed grid so that a slow frame does not shift
/// later ticks. If the loop falls more than one interval behind, the missed
/// ticks are dropped instead of being replayed in a burst. A frame is drawn
/// after every tick or terminal event.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    next_tick_at: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            next_tick_at: Instant::now(),
            dirty: true,
        }
    }

    /// Blocks until the next tick is due, a frame needs drawing, or a
    /// terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if now >= self.next_tick_at {
                self.next_tick_at = next_deadline(self.next_tick_at, self.tick_interval, now);
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if event::poll(self.next_tick_at.saturating_duration_since(now))? {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }
}

/// Deadline of the tick following the one scheduled at `scheduled`, fired at
/// `now`.
fn next_deadline(scheduled: Instant, interval: Duration, now: Instant) -> Instant {
    let next = scheduled + interval;
    if next > now { next } else { now + interval }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(16);

    #[test]
    fn test_next_deadline_keeps_grid() {
        let start = Instant::now();
        // Fired a little late: the next tick stays on the same grid
        let fired = start + Duration::from_millis(3);
        assert_eq!(next_deadline(start, INTERVAL, fired), start + INTERVAL);
    }

    #[test]
    fn test_next_deadline_skips_missed_ticks() {
        let start = Instant::now();
        let fired = start + Duration::from_millis(100);
        assert_eq!(next_deadline(start, INTERVAL, fired), fired + INTERVAL);
    }

    #[test]
    fn test_first_event_is_tick() {
        let mut events = EventLoop::new(INTERVAL);
        assert!(events.next().unwrap().is_tick());
        assert!(events.next().unwrap().is_render());
    }
}
