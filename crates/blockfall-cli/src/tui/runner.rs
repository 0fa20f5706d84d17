use std::time::Duration;

use anyhow::Context as _;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// Terminal runtime: owns the event loop and drives an [`App`] inside
/// ratatui's managed terminal.
#[derive(Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    /// Creates a runtime ticking `tick_rate` times per second.
    ///
    /// Fails if the tick interval is not a representable duration.
    pub fn new(tick_rate: f64) -> anyhow::Result<Self> {
        let interval = Duration::try_from_secs_f64(1.0 / tick_rate)
            .with_context(|| format!("unsupported tick rate {tick_rate}"))?;
        Ok(Self {
            events: EventLoop::new(interval),
        })
    }

    /// Runs `app` until it asks to exit.
    ///
    /// The terminal is put into raw mode on an alternate screen for the
    /// duration of the call and restored afterwards, also on error.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&event),
                }
            }
            Ok(())
        })
    }
}
