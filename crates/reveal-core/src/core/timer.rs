/// Repeating interval timer advanced by variable frame deltas.
/// Ensures timed steps fire at a consistent rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    /// Seconds between fires.
    interval: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl IntervalTicker {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fires due.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        // Cap to prevent a catch-up burst after a backgrounded tab (max 10 fires)
        self.accumulator = self.accumulator.min(self.interval * 10.0);
        let fires = (self.accumulator / self.interval) as u32;
        self.accumulator -= fires as f32 * self.interval;
        fires
    }

    /// Discard accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// One-shot delay. Fires exactly once when the configured time elapses.
#[derive(Debug, Clone)]
pub struct Delay {
    remaining: f32,
    fired: bool,
}

impl Delay {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining: secs,
            fired: false,
        }
    }

    /// Advance by `dt` seconds. Returns true on the tick the delay expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.fired = true;
            return true;
        }
        false
    }

    /// Whether the delay has already fired.
    pub fn is_done(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_fire_exact() {
        let mut ticker = IntervalTicker::new(1.0);
        assert_eq!(ticker.tick(1.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ticker = IntervalTicker::new(1.0);
        assert_eq!(ticker.tick(0.6), 0);
        assert_eq!(ticker.tick(0.6), 1);
    }

    #[test]
    fn caps_catch_up_fires() {
        let mut ticker = IntervalTicker::new(0.1);
        // 60 intervals worth of time, but capped at 10
        assert_eq!(ticker.tick(6.0), 10);
    }

    #[test]
    fn reset_discards_progress() {
        let mut ticker = IntervalTicker::new(1.0);
        ticker.tick(0.9);
        ticker.reset();
        assert_eq!(ticker.tick(0.9), 0);
    }

    #[test]
    fn delay_fires_once() {
        let mut delay = Delay::new(0.3);
        assert!(!delay.tick(0.2));
        assert!(delay.tick(0.2));
        assert!(delay.is_done());
        assert!(!delay.tick(1.0));
    }
}
