use std::time::Duration;

use anyhow::{Context as _, ensure};
use blockfall_engine::{Board, GameSession, SessionConfig, SessionState, TickResult};

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

const DEFAULT_DROP_INTERVAL_US: u64 = 500_000;
const DEFAULT_TICK_RATE: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub(crate) struct PlayArg {
    /// Board width in cells
    #[clap(long, default_value_t = Board::DEFAULT_WIDTH)]
    pub(crate) width: usize,
    /// Board height in cells
    #[clap(long, default_value_t = Board::DEFAULT_HEIGHT)]
    pub(crate) height: usize,
    /// Gravity interval at level 1, in microseconds
    #[clap(long, default_value_t = DEFAULT_DROP_INTERVAL_US)]
    pub(crate) drop_interval_us: u64,
    /// Game ticks per second
    #[clap(long, default_value_t = DEFAULT_TICK_RATE)]
    pub(crate) tick_rate: f64,
    /// Seed for the piece sequence (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<u64>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            width: Board::DEFAULT_WIDTH,
            height: Board::DEFAULT_HEIGHT,
            drop_interval_us: DEFAULT_DROP_INTERVAL_US,
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
        }
    }
}

impl PlayArg {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            width: self.width,
            height: self.height,
            base_drop_interval: Duration::from_micros(self.drop_interval_us),
            seed: self.seed,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    ensure!(
        arg.tick_rate.is_finite() && arg.tick_rate > 0.0,
        "tick rate must be a positive number, got {}",
        arg.tick_rate
    );
    let tui = Tui::new(arg.tick_rate)?;
    let session = GameSession::with_config(&arg.session_config())
        .context("invalid game configuration")?;
    let seed = session.seed();

    let mut app = PlayApp::new(session);
    tui.run(&mut app).context("terminal session failed")?;

    println!("{}", summary(app.result()));
    eprintln!("seed: {seed}");
    Ok(())
}

/// One-line report printed after the terminal is restored.
fn summary(result: &TickResult) -> String {
    let TickResult {
        score,
        level,
        lines_cleared,
        ..
    } = result;
    let prefix = match result.state {
        SessionState::GameOver => "Game over! ",
        SessionState::Quit => "Quit. ",
        SessionState::Playing => "",
    };
    format!("{prefix}Score: {score} Level: {level} Lines: {lines_cleared}")
}
