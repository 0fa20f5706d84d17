use std::{
    cell::Cell,
    time::{Duration, Instant},
};

/// Monotonic time source.
///
/// The session only ever asks for "now" as an offset from an arbitrary
/// origin, so tests can drive it with [`ManualClock`].
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// clock.advance(Duration::from_millis(16));
/// assert_eq!(clock.now(), Duration::from_millis(16));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C> Clock for &C
where
    C: Clock + ?Sized,
{
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Gravity scheduler: tracks when the last automatic drop happened.
///
/// The timer anchors itself on the first time it observes, so a session
/// created long before its first tick does not drop immediately.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DropTimer {
    last_drop_at: Option<Duration>,
}

impl DropTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self { last_drop_at: None }
    }

    /// Anchors the timer at `now` if it has not observed any time yet.
    pub fn observe(&mut self, now: Duration) {
        self.last_drop_at.get_or_insert(now);
    }

    /// Time elapsed since the last drop (zero before the first observation).
    #[must_use]
    pub fn elapsed_since_drop(&self, now: Duration) -> Duration {
        self.last_drop_at
            .map_or(Duration::ZERO, |last| now.saturating_sub(last))
    }

    /// Time left until the next drop is due.
    #[must_use]
    pub fn time_to_next_drop(&self, now: Duration, interval: Duration) -> Duration {
        interval.saturating_sub(self.elapsed_since_drop(now))
    }

    #[must_use]
    pub fn is_due(&self, now: Duration, interval: Duration) -> bool {
        self.last_drop_at.is_some() && self.elapsed_since_drop(now) >= interval
    }

    pub fn reset(&mut self, now: Duration) {
        self.last_drop_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(5 * MS);
        clock.advance(5 * MS);
        assert_eq!(clock.now(), 10 * MS);
        clock.set(3 * MS);
        assert_eq!(clock.now(), 3 * MS);
    }

    #[test]
    fn test_clock_through_reference() {
        fn read<C: Clock>(clock: C) -> Duration {
            clock.now()
        }
        let clock = ManualClock::new();
        clock.advance(7 * MS);
        assert_eq!(read(&clock), 7 * MS);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_drop_timer_not_due_before_anchor() {
        let timer = DropTimer::new();
        assert!(!timer.is_due(1000 * MS, 500 * MS));
        assert_eq!(timer.elapsed_since_drop(1000 * MS), Duration::ZERO);
    }

    #[test]
    fn test_drop_timer_due_after_interval() {
        let mut timer = DropTimer::new();
        timer.observe(100 * MS);
        // A second observation keeps the first anchor
        timer.observe(200 * MS);
        assert!(!timer.is_due(599 * MS, 500 * MS));
        assert!(timer.is_due(600 * MS, 500 * MS));
        assert_eq!(timer.time_to_next_drop(400 * MS, 500 * MS), 200 * MS);
        assert_eq!(timer.time_to_next_drop(700 * MS, 500 * MS), Duration::ZERO);

        timer.reset(600 * MS);
        assert!(!timer.is_due(600 * MS, 500 * MS));
        assert_eq!(timer.elapsed_since_drop(650 * MS), 50 * MS);
    }

    #[test]
    fn test_drop_timer_tolerates_time_before_anchor() {
        let mut timer = DropTimer::new();
        timer.reset(100 * MS);
        assert_eq!(timer.elapsed_since_drop(50 * MS), Duration::ZERO);
    }
}
