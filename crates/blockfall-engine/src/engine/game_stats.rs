use serde::{Deserialize, Serialize};

/// Points per cleared line at level 1.
const POINTS_PER_LINE: u64 = 100;

/// Lines needed to advance one level.
const LINES_PER_LEVEL: u64 = 10;

/// Score, level and line-clear bookkeeping for a session.
///
/// - **Score**: `lines * 100 * level` per lock, using the level in effect
///   *before* the lock's lines are counted
/// - **Level**: `total_cleared_lines / 10 + 1`, never decreases
/// - **Line clear distribution**: how many locks cleared 0, 1, 2, 3 or 4 lines
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: u64,
    level: u64,
    completed_pieces: u64,
    total_cleared_lines: u64,
    line_cleared_counter: [u64; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> u64 {
        self.level
    }

    /// Number of pieces locked into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> u64 {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> u64 {
        self.total_cleared_lines
    }

    /// Locks by number of lines cleared: `[0]` none, `[1]` singles … `[4]` four-line clears.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[u64; 5] {
        &self.line_cleared_counter
    }

    /// Records one locked piece that cleared `cleared_lines` rows.
    ///
    /// Returns the points awarded.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> u64 {
        self.completed_pieces += 1;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        if cleared_lines == 0 {
            return 0;
        }

        let lines = cleared_lines as u64;
        self.total_cleared_lines += lines;
        let points = lines * POINTS_PER_LINE * self.level;
        self.score += points;
        self.level = level_for_lines(self.total_cleared_lines);
        points
    }
}

/// Level reached after clearing `total_cleared_lines` lines.
#[must_use]
pub const fn level_for_lines(total_cleared_lines: u64) -> u64 {
    total_cleared_lines / LINES_PER_LEVEL + 1
}
