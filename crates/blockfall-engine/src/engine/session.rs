use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    PieceCollisionError, SessionConfigError,
    core::{board::Board, piece::Piece},
};

use super::{
    clock::{Clock, DropTimer},
    game_stats::GameStats,
    input::{InputEvent, InputSource},
    piece_generator::PieceGenerator,
};

/// Parameters for a new [`GameSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    /// Gravity interval at level 1.
    pub base_drop_interval: Duration,
    /// Seed for the piece generator; random when `None`.
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub const DEFAULT_BASE_DROP_INTERVAL: Duration = Duration::from_micros(500_000);
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: Board::DEFAULT_WIDTH,
            height: Board::DEFAULT_HEIGHT,
            base_drop_interval: Self::DEFAULT_BASE_DROP_INTERVAL,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    /// A freshly spawned piece did not fit.
    GameOver,
    /// The player asked to stop.
    Quit,
}

impl SessionState {
    /// Whether the session has reached a terminal state.
    #[must_use]
    pub fn is_finished(self) -> bool {
        !self.is_playing()
    }
}

/// Observable state after a tick.
///
/// This is everything a renderer needs: the locked cells, the piece in play
/// and the status-line figures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TickResult {
    pub board: Board,
    /// The falling piece; `None` once the session has ended.
    pub active_piece: Option<Piece>,
    pub score: u64,
    pub level: u64,
    /// Total lines cleared since the session started.
    pub lines_cleared: u64,
    /// Lines cleared during this tick alone.
    pub cleared_this_tick: usize,
    pub state: SessionState,
    pub game_over: bool,
}

/// A single game from the first spawn to game over (or quit).
///
/// The session owns the board, the falling piece and the scoring state, and
/// advances them one tick at a time:
///
/// 1. The optional input event is applied. Rejected moves and rotations are
///    ignored; a rejected soft drop locks the piece at once; quit ends the
///    session.
/// 2. If the drop interval has elapsed since the last automatic drop, the
///    piece moves down one row, or locks when it cannot.
///
/// Locking writes the piece into the board, clears complete rows, updates
/// score, level and drop interval, then spawns the next piece. If that piece
/// does not fit, the session is over and later ticks change nothing.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{GameSession, InputEvent, ManualClock};
///
/// let mut session = GameSession::new(10, 20, Duration::from_millis(500)).unwrap();
/// let clock = ManualClock::new();
///
/// let result = session.tick(Some(InputEvent::MoveLeft), &clock);
/// assert!(!result.game_over);
///
/// clock.advance(Duration::from_millis(500));
/// let result = session.tick(None, &clock);
/// assert_eq!(result.active_piece.unwrap().position().y(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    falling_piece: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    state: SessionState,
    base_drop_interval: Duration,
    drop_interval: Duration,
    drop_timer: DropTimer,
}

impl GameSession {
    /// Creates a session on an empty `width` × `height` board with a random
    /// piece sequence.
    pub fn new(
        width: usize,
        height: usize,
        base_drop_interval: Duration,
    ) -> Result<Self, SessionConfigError> {
        Self::with_config(&SessionConfig {
            width,
            height,
            base_drop_interval,
            seed: None,
        })
    }

    pub fn with_config(config: &SessionConfig) -> Result<Self, SessionConfigError> {
        let board = Board::new(config.width, config.height)?;
        if config.base_drop_interval.as_micros() == 0 {
            return Err(SessionConfigError::ZeroDropInterval);
        }
        let mut generator = config
            .seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
        let falling_piece = Piece::spawn(generator.next_kind(), board.width());
        let state = if board.can_place(&falling_piece) {
            SessionState::Playing
        } else {
            SessionState::GameOver
        };

        Ok(Self {
            board,
            falling_piece,
            generator,
            stats: GameStats::new(),
            state,
            base_drop_interval: config.base_drop_interval,
            drop_interval: config.base_drop_interval,
            drop_timer: DropTimer::new(),
        })
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The most recently spawned piece, whether or not the session is still
    /// running.
    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    /// The piece in play, or `None` once the session has ended.
    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.state.is_playing().then_some(&self.falling_piece)
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> u64 {
        self.stats.level()
    }

    #[must_use]
    pub fn total_cleared_lines(&self) -> u64 {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    /// Current gravity interval: the base interval divided by the level.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    #[must_use]
    pub fn base_drop_interval(&self) -> Duration {
        self.base_drop_interval
    }

    /// Seed of the piece sequence, for replaying the session.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Time left before gravity next moves the piece.
    #[must_use]
    pub fn time_to_next_drop(&self, now: Duration) -> Duration {
        self.drop_timer.time_to_next_drop(now, self.drop_interval)
    }

    /// Runs one tick with the time read from `clock`.
    pub fn tick<C>(&mut self, input: Option<InputEvent>, clock: &C) -> TickResult
    where
        C: Clock + ?Sized,
    {
        self.tick_at(input, clock.now())
    }

    /// Runs one tick, taking at most one event from `input`.
    ///
    /// The source is not polled once the session has ended.
    pub fn tick_with<I, C>(&mut self, input: &mut I, clock: &C) -> TickResult
    where
        I: InputSource + ?Sized,
        C: Clock + ?Sized,
    {
        let event = if self.state.is_playing() {
            input.poll_input()
        } else {
            None
        };
        self.tick(event, clock)
    }

    /// Runs one tick at time `now`.
    pub fn tick_at(&mut self, input: Option<InputEvent>, now: Duration) -> TickResult {
        if self.state.is_finished() {
            return self.snapshot();
        }

        self.drop_timer.observe(now);
        let mut cleared = 0;
        if let Some(event) = input {
            cleared += self.apply_input(event);
        }
        if self.state.is_playing() && self.drop_timer.is_due(now, self.drop_interval) {
            self.drop_timer.reset(now);
            cleared += self.drop_or_lock();
        }

        TickResult {
            cleared_this_tick: cleared,
            ..self.snapshot()
        }
    }

    /// Applies a single input event and returns the number of lines it
    /// cleared.
    ///
    /// Has no effect once the session has ended.
    pub fn apply_input(&mut self, event: InputEvent) -> usize {
        if self.state.is_finished() {
            return 0;
        }
        match event {
            InputEvent::MoveLeft => _ = self.try_move_left(),
            InputEvent::MoveRight => _ = self.try_move_right(),
            InputEvent::Rotate => _ = self.try_rotate(),
            InputEvent::SoftDrop => return self.drop_or_lock(),
            InputEvent::Quit => self.state = SessionState::Quit,
        }
        0
    }

    /// Current state without advancing the session.
    #[must_use]
    pub fn snapshot(&self) -> TickResult {
        TickResult {
            board: self.board.clone(),
            active_piece: self.active_piece().copied(),
            score: self.stats.score(),
            level: self.stats.level(),
            lines_cleared: self.stats.total_cleared_lines(),
            cleared_this_tick: 0,
            state: self.state,
            game_over: self.state.is_finished(),
        }
    }

    fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.falling_piece.try_move_left(&self.board)
    }

    fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.falling_piece.try_move_right(&self.board)
    }

    fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        self.falling_piece.try_rotate(&self.board)
    }

    /// Moves the piece down one row, or locks it if it is resting.
    fn drop_or_lock(&mut self) -> usize {
        if self.falling_piece.try_move_down(&self.board).is_ok() {
            return 0;
        }
        self.lock_and_spawn()
    }

    fn lock_and_spawn(&mut self) -> usize {
        self.board.lock(&self.falling_piece);
        let cleared_lines = self.board.clear_completed_rows();
        self.stats.complete_piece_drop(cleared_lines);
        if cleared_lines > 0 {
            self.drop_interval = drop_interval_for(self.base_drop_interval, self.stats.level());
        }

        self.falling_piece = Piece::spawn(self.generator.next_kind(), self.board.width());
        if !self.board.can_place(&self.falling_piece) {
            self.state = SessionState::GameOver;
        }
        cleared_lines
    }
}

/// `base / level` in whole microseconds, never less than one microsecond.
#[must_use]
pub fn drop_interval_for(base: Duration, level: u64) -> Duration {
    let base_micros = u64::try_from(base.as_micros()).unwrap_or(u64::MAX);
    Duration::from_micros((base_micros / level.max(1)).max(1))
}
