//! Round countdown

use std::time::Duration;

/// Elapsed time of the current round against a fixed total duration
#[derive(Debug, Clone, PartialEq)]
pub struct RoundClock {
    elapsed: Duration,
    total: Duration,
}

impl RoundClock {
    pub fn new(total: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            total,
        }
    }

    /// Add one frame's worth of real time
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Exact time left, never negative
    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.elapsed)
    }

    /// Whole seconds left for display: total minus elapsed seconds (floored)
    pub fn remaining_secs(&self) -> u64 {
        self.total.as_secs().saturating_sub(self.elapsed.as_secs())
    }

    /// The round ends the frame the displayed countdown reaches zero
    pub fn is_expired(&self) -> bool {
        self.remaining_secs() == 0
    }

    /// `MM:SS` countdown text
    pub fn format_remaining(&self) -> String {
        let secs = self.remaining_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_clock() {
        let clock = RoundClock::new(Duration::from_secs(180));
        assert_eq!(clock.remaining_secs(), 180);
        assert!(!clock.is_expired());
        assert_eq!(clock.format_remaining(), "03:00");
    }

    #[test]
    fn test_partial_second_does_not_tick_display() {
        let mut clock = RoundClock::new(Duration::from_secs(180));
        clock.advance(Duration::from_millis(999));
        assert_eq!(clock.remaining_secs(), 180);
        clock.advance(Duration::from_millis(1));
        assert_eq!(clock.remaining_secs(), 179);
        assert_eq!(clock.format_remaining(), "02:59");
    }

    #[test]
    fn test_expires_at_total_and_saturates() {
        let mut clock = RoundClock::new(Duration::from_secs(2));
        clock.advance(Duration::from_millis(1999));
        assert!(!clock.is_expired());
        clock.advance(Duration::from_millis(1));
        assert!(clock.is_expired());
        assert_eq!(clock.remaining(), Duration::ZERO);

        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.remaining_secs(), 0);
        assert_eq!(clock.format_remaining(), "00:00");
    }
}
