use std::time::Duration;

/// Turns variable frame deltas into discrete ticks at a fixed cadence.
/// Time left over after a tick carries into the next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalScheduler {
    interval: Duration,
    accumulated: Duration,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks that became due during `delta`.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulated += delta;
        let mut ticks = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            ticks += 1;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[800], 1)]
    #[case(&[799], 0)]
    #[case(&[400, 400], 1)]
    #[case(&[16; 100], 2)]
    #[case(&[2400], 3)]
    #[case(&[700, 700, 700, 700], 3)]
    fn test_ticks_match_elapsed_time(#[case] frames: &[u64], #[case] expected: u32) {
        let mut scheduler = IntervalScheduler::new(Duration::from_millis(800));
        let ticks: u32 = frames
            .iter()
            .map(|ms| scheduler.advance(Duration::from_millis(*ms)))
            .sum();
        assert_eq!(ticks, expected);
    }

    #[test]
    fn test_zero_interval_never_ticks() {
        let mut scheduler = IntervalScheduler::new(Duration::ZERO);
        assert_eq!(scheduler.advance(Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_reset_drops_partial_progress() {
        let mut scheduler = IntervalScheduler::new(Duration::from_millis(800));
        scheduler.advance(Duration::from_millis(700));
        scheduler.reset();
        assert_eq!(scheduler.advance(Duration::from_millis(700)), 0);
    }
}
