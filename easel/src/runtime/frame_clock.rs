use std::time::Duration;

/// Ticks are allowed to fire this many milliseconds early so coarse timers
/// never make the loop skip a step.
pub const TICK_TOLERANCE_MS: i64 = 10;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrameClock {
    /// `None` until the first tick, which is due immediately.
    last_tick: Option<u64>,
    tick_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(now_ms: u64) -> Self {
        Self {
            last_tick: Some(now_ms),
            tick_count: 0,
        }
    }

    pub fn tick_period_ms(steps_per_second: f64) -> i64 {
        (1000.0 / steps_per_second).floor() as i64
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn remaining_ms(&self, now_ms: u64, steps_per_second: f64) -> i64 {
        let Some(last_tick) = self.last_tick else {
            return i64::MIN;
        };
        let ms_passed = now_ms.saturating_sub(last_tick) as i64;
        Self::tick_period_ms(steps_per_second) - ms_passed
    }

    /// Returns true when this iteration counts as a tick, in which case the
    /// clock restarts from `now_ms`.
    pub fn poll(&mut self, now_ms: u64, steps_per_second: f64) -> bool {
        if self.remaining_ms(now_ms, steps_per_second) < TICK_TOLERANCE_MS {
            self.last_tick = Some(now_ms);
            self.tick_count += 1;
            true
        } else {
            false
        }
    }

    /// How long the loop may idle before the next tick becomes due.
    pub fn time_until_due(&self, now_ms: u64, steps_per_second: f64) -> Duration {
        let wait = self
            .remaining_ms(now_ms, steps_per_second)
            .saturating_sub(TICK_TOLERANCE_MS - 1);
        Duration::from_millis(wait.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_is_floored() {
        assert_eq!(FrameClock::tick_period_ms(30.0), 33);
        assert_eq!(FrameClock::tick_period_ms(60.0), 16);
        assert_eq!(FrameClock::tick_period_ms(7.0), 142);
        assert_eq!(FrameClock::tick_period_ms(0.5), 2000);
    }

    #[test]
    fn ticks_within_tolerance_of_period() {
        let mut clock = FrameClock::with_start(1000);

        // 33ms period: 33 - 23 = 10 is not under the tolerance.
        assert!(!clock.poll(1023, 30.0));
        assert_eq!(clock.last_tick(), Some(1000));

        // 33 - 24 = 9 fires early.
        assert!(clock.poll(1024, 30.0));
        assert_eq!(clock.last_tick(), Some(1024));
        assert_eq!(clock.tick_count(), 1);
    }

    #[test]
    fn first_poll_ticks_at_once() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.last_tick(), None);
        assert_eq!(clock.time_until_due(0, 1.0), Duration::ZERO);
        assert!(clock.poll(0, 1.0));

        // Then the period applies from that tick.
        assert!(!clock.poll(500, 1.0));
        assert_eq!(clock.time_until_due(500, 1.0), Duration::from_millis(491));
    }

    #[test]
    fn fast_rates_tick_every_iteration() {
        // Periods at or below the tolerance always fire.
        let mut clock = FrameClock::with_start(500);
        assert!(clock.poll(500, 200.0));
        assert!(clock.poll(500, 200.0));
        assert_eq!(clock.tick_count(), 2);
    }

    #[test]
    fn applies_rate_changes_immediately() {
        let mut clock = FrameClock::with_start(0);
        assert!(clock.poll(30, 30.0));

        // 10/s has a 100ms period.
        assert!(!clock.poll(100, 10.0));
        assert!(clock.poll(121, 10.0));
    }

    #[test]
    fn time_until_due_counts_down_to_tolerance() {
        let clock = FrameClock::with_start(0);
        assert_eq!(clock.time_until_due(0, 30.0), Duration::from_millis(24));
        assert_eq!(clock.time_until_due(23, 30.0), Duration::from_millis(1));
        assert_eq!(clock.time_until_due(24, 30.0), Duration::ZERO);
        assert_eq!(clock.time_until_due(90, 30.0), Duration::ZERO);
    }
}
