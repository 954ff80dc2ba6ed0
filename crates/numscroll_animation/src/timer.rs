//! Fixed-period repeat timer driven by an external clock

/// A periodic timer that fires every `period_ms` after it was started
///
/// The timer never reads a clock itself; callers pass the current time in
/// milliseconds to [`RepeatTimer::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatTimer {
    period_ms: u64,
    next_fire_ms: u64,
    fired: u64,
    cancelled: bool,
}

impl RepeatTimer {
    /// Start a timer at `now_ms`; the first fire is one period later
    ///
    /// A zero period is bumped to 1ms so the timer always makes progress.
    pub fn start(period_ms: u64, now_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_fire_ms: now_ms.saturating_add(period_ms),
            fired: 0,
            cancelled: false,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Time of the next fire
    pub fn next_fire_ms(&self) -> u64 {
        self.next_fire_ms
    }

    /// Total fires so far
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop the timer; later polls report no fires
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Number of periods that elapsed up to `now_ms` since the last poll
    ///
    /// Late polls catch up, so the fire count only depends on elapsed time
    /// and not on how often the timer is polled.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        if self.cancelled || now_ms < self.next_fire_ms {
            return 0;
        }
        let due = (now_ms - self.next_fire_ms) / self.period_ms + 1;
        self.next_fire_ms = self
            .next_fire_ms
            .saturating_add(due.saturating_mul(self.period_ms));
        self.fired += due;
        u32::try_from(due).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_each_period() {
        let mut timer = RepeatTimer::start(100, 1_000);
        assert_eq!(timer.poll(1_050), 0);
        assert_eq!(timer.poll(1_100), 1);
        assert_eq!(timer.poll(1_150), 0);
        assert_eq!(timer.poll(1_200), 1);
        assert_eq!(timer.fired(), 2);
    }

    #[test]
    fn test_late_poll_catches_up() {
        let mut timer = RepeatTimer::start(100, 0);
        assert_eq!(timer.poll(350), 3);
        assert_eq!(timer.next_fire_ms(), 400);
        assert_eq!(timer.poll(399), 0);
        assert_eq!(timer.poll(400), 1);
    }

    #[test]
    fn test_cancelled_timer_is_silent() {
        let mut timer = RepeatTimer::start(50, 0);
        assert_eq!(timer.poll(50), 1);
        timer.cancel();
        assert_eq!(timer.poll(10_000), 0);
        assert!(timer.is_cancelled());
    }

    #[test]
    fn test_zero_period_is_bumped() {
        let mut timer = RepeatTimer::start(0, 10);
        assert_eq!(timer.period_ms(), 1);
        assert_eq!(timer.poll(13), 3);
    }
}
