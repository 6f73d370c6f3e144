use crate::config::StaminaSettings;

use super::clock::Clock;
use super::timer::Timer;

/// Depleting / regenerating resource pool.
///
/// Time-based rather than frame-based so drain and recharge speeds stay the
/// same across refresh rates. All quantities are milliseconds of capacity:
/// `max` is the pool size, `drain` and `rate` are multipliers against the
/// frame delta, and `delay` is the quiet period after a drain before the pool
/// starts refilling.
///
/// Built for wall grabbing, but the pool has no idea what spends it; any
/// mechanic can own one.
#[derive(Debug, Clone)]
pub struct Stamina {
    settings: StaminaSettings,
    current: f64,
    recharge: Timer,
}

impl Stamina {
    /// Start full.
    pub fn new(settings: StaminaSettings) -> Self {
        let current = settings.max;
        Self {
            settings,
            current,
            recharge: Timer::new(),
        }
    }

    /// Per-frame regeneration. Refills `rate * delta` once the post-drain
    /// delay has expired.
    pub fn listen(&mut self, clock: &Clock) {
        if self.current >= self.settings.max {
            return;
        }
        if !self.recharge.done(clock) {
            return;
        }
        self.current =
            (self.current + self.settings.rate * clock.delta).min(self.settings.max);
    }

    /// Spend stamina. `None` drains `drain * delta` (a sustained hold);
    /// `Some` spends a fixed cost. Either way the recharge delay re-arms.
    pub fn drain(&mut self, clock: &Clock, amount: Option<f64>) {
        let cost = amount.unwrap_or(self.settings.drain * clock.delta);
        self.current = (self.current - cost).max(0.0);
        if self.settings.delay > 0.0 {
            self.recharge.set(clock, self.settings.delay);
        }
    }

    /// Instantly restore to max and cancel any pending delay.
    pub fn refill(&mut self) {
        self.current = self.settings.max;
        self.recharge.clear();
    }

    /// True when more than `amount` remains.
    pub fn has(&self, amount: f64) -> bool {
        self.current > amount
    }

    pub fn depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn full(&self) -> bool {
        self.current >= self.settings.max
    }

    /// Fill fraction in 0..1 for gauges.
    pub fn percent(&self) -> f64 {
        if self.settings.max <= 0.0 {
            return 1.0;
        }
        self.current / self.settings.max
    }

    pub fn current(&self) -> f64 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FrameSettings;

    fn clock() -> Clock {
        let mut c = Clock::new(&FrameSettings::default());
        c.update(0.0);
        c
    }

    fn pool() -> Stamina {
        Stamina::new(StaminaSettings {
            max: 1000.0,
            drain: 1.0,
            delay: 500.0,
            rate: 2.0,
        })
    }

    #[test]
    fn starts_full() {
        let s = pool();
        assert!(s.full());
        assert_eq!(s.percent(), 1.0);
    }

    #[test]
    fn timed_drain_tracks_delta() {
        let mut c = clock();
        let mut s = pool();
        c.advance(100.0);
        s.drain(&c, None);
        assert_eq!(s.current(), 900.0);
        assert!(!s.full());
    }

    #[test]
    fn fixed_drain_clamps_at_zero() {
        let c = clock();
        let mut s = pool();
        s.drain(&c, Some(5_000.0));
        assert!(s.depleted());
        assert!(!s.has(0.0));
    }

    #[test]
    fn no_regen_until_delay_passes() {
        let mut c = clock();
        let mut s = pool();
        s.drain(&c, Some(400.0));
        c.advance(100.0);
        s.listen(&c);
        assert_eq!(s.current(), 600.0);

        // Past the delay, refills at rate * delta.
        c.advance(500.0);
        c.advance(100.0);
        s.listen(&c);
        assert_eq!(s.current(), 800.0);
    }

    #[test]
    fn regen_stops_at_max() {
        let mut c = clock();
        let mut s = pool();
        s.drain(&c, Some(100.0));
        c.advance(600.0);
        c.advance(1_000.0);
        s.listen(&c);
        assert!(s.full());
        assert_eq!(s.current(), 1000.0);
    }

    #[test]
    fn draining_again_restarts_the_delay() {
        let mut c = clock();
        let mut s = pool();
        s.drain(&c, Some(200.0));
        c.advance(400.0);
        s.drain(&c, Some(200.0));
        c.advance(400.0);
        s.listen(&c);
        // Second drain re-armed the delay, so still no regen.
        assert_eq!(s.current(), 600.0);
    }

    #[test]
    fn refill_restores_and_cancels_delay() {
        let mut c = clock();
        let mut s = pool();
        s.drain(&c, Some(700.0));
        s.refill();
        assert!(s.full());
        c.advance(1.0);
        s.listen(&c);
        assert_eq!(s.current(), 1000.0);
    }
}
