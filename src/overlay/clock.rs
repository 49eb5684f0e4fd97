use std::time::{Duration, Instant};

/// Measures the time between consecutive render ticks.
#[derive(Debug)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Milliseconds since the previous call. The first tick reports zero.
    pub fn tick(&mut self) -> i64 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> i64 {
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        elapsed.as_millis().min(i64::MAX as u128) as i64
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero_then_measures_gap() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_at(start), 0);
        assert_eq!(clock.tick_at(start + Duration::from_millis(16)), 16);
        assert_eq!(clock.tick_at(start + Duration::from_millis(50)), 34);
    }

    #[test]
    fn going_backwards_saturates() {
        let start = Instant::now() + Duration::from_millis(100);
        let mut clock = FrameClock::new();
        clock.tick_at(start);
        assert_eq!(clock.tick_at(start - Duration::from_millis(10)), 0);
    }
}
