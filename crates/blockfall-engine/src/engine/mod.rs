//! Game rules on top of the core data structures.
//!
//! - [`GameSession`] - one game: falling piece, gravity, locking, game over
//! - [`GameStats`] - score, level and line-clear counts
//! - [`PieceGenerator`] - seeded uniform piece sequence
//! - [`Clock`], [`DropTimer`] - time source and gravity scheduling
//! - [`InputEvent`], [`InputSource`] - player commands
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the first piece spawns at the top center
//! 2. Every tick, hand the session at most one [`InputEvent`] and the time
//! 3. Gravity moves the piece down once per drop interval
//! 4. A piece that cannot move down locks; complete rows are cleared
//! 5. The next piece spawns; if it does not fit, the game is over
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{GameSession, InputEvent, ManualClock, ScriptedInput};
//!
//! let mut session = GameSession::new(10, 20, Duration::from_millis(500)).unwrap();
//! let clock = ManualClock::new();
//! let mut input: ScriptedInput = [Some(InputEvent::Rotate), None, Some(InputEvent::Quit)]
//!     .into_iter()
//!     .collect();
//!
//! let mut result = session.snapshot();
//! while !result.game_over {
//!     result = session.tick_with(&mut input, &clock);
//!     clock.advance(Duration::from_millis(16));
//! }
//! println!("Score: {}", result.score);
//! ```

pub use self::{clock::*, game_stats::*, input::*, piece_generator::*, session::*};

mod clock;
mod game_stats;
mod input;
mod piece_generator;
mod session;
