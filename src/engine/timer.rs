use serde::{Deserialize, Serialize};

use super::clock::Clock;

/// One-shot / repeating countdown driven by the shared [`Clock`].
///
/// Timers never poll a time source of their own. Every query takes the clock
/// as an argument, so a paused clock freezes every timer in the simulation at
/// once. Designed for the short windows mechanics lean on: coyote grace, dash
/// cooldowns, stamina recharge delays.
///
/// A cleared timer (`expires_at == 0`) is inert: neither `active` nor `done`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timer {
    /// Start timestamp, ms.
    start: f64,
    /// Armed duration, ms.
    duration: f64,
    /// Expiry timestamp, ms. Zero means cleared.
    expires_at: f64,
    /// Remaining ms captured at pause time.
    remaining: f64,
    paused: bool,
    /// Repeat interval, ms. Zero disables `ping`.
    interval: f64,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) for `ms`. Non-positive durations clear instead.
    pub fn set(&mut self, clock: &Clock, ms: f64) -> &mut Self {
        if ms <= 0.0 {
            return self.clear();
        }
        self.start = clock.now;
        self.duration = ms;
        self.expires_at = self.start + ms;
        self.remaining = 0.0;
        self.paused = false;
        self
    }

    /// Deactivate and forget all state except the repeat interval.
    pub fn clear(&mut self) -> &mut Self {
        let interval = self.interval;
        *self = Self::default();
        self.interval = interval;
        self
    }

    /// True while armed and counting down.
    pub fn active(&self, clock: &Clock) -> bool {
        !self.paused && self.expires_at > 0.0 && clock.now < self.expires_at
    }

    /// True once armed and expired. Paused timers are never done.
    pub fn done(&self, clock: &Clock) -> bool {
        !self.paused && self.expires_at > 0.0 && clock.now >= self.expires_at
    }

    /// Remaining ms, or zero when inactive.
    pub fn left(&self, clock: &Clock) -> f64 {
        if self.active(clock) {
            self.expires_at - clock.now
        } else {
            0.0
        }
    }

    /// Elapsed ms since arming, clamped to the duration.
    pub fn elapsed(&self, clock: &Clock) -> f64 {
        if self.expires_at == 0.0 {
            return 0.0;
        }
        if self.paused {
            return self.duration - self.remaining;
        }
        (clock.now - self.start).clamp(0.0, self.duration)
    }

    /// Progress in 0..1.
    pub fn ratio(&self, clock: &Clock) -> f64 {
        if self.duration > 0.0 {
            self.elapsed(clock) / self.duration
        } else {
            0.0
        }
    }

    /// Capture remaining time and stop counting.
    pub fn pause(&mut self, clock: &Clock) -> &mut Self {
        if !self.paused && self.expires_at > 0.0 {
            self.remaining = (self.expires_at - clock.now).max(0.0);
            self.paused = true;
        }
        self
    }

    /// Recompute the expiry from the captured remainder and keep counting.
    pub fn resume(&mut self, clock: &Clock) -> &mut Self {
        if self.paused {
            if self.remaining > 0.0 {
                self.start = clock.now - (self.duration - self.remaining);
                self.expires_at = clock.now + self.remaining;
            } else {
                self.expires_at = 0.0;
                self.duration = 0.0;
            }
            self.remaining = 0.0;
            self.paused = false;
        }
        self
    }

    /// Set the repeat interval (zero disables). Re-arms immediately when the
    /// timer already expired.
    pub fn repeat(&mut self, clock: &Clock, ms: f64) -> &mut Self {
        self.interval = ms;
        if self.interval > 0.0 && self.done(clock) {
            self.rearm(clock);
        }
        self
    }

    /// True exactly once per interval boundary; re-arms on hit.
    pub fn ping(&mut self, clock: &Clock) -> bool {
        if self.interval > 0.0 && self.done(clock) {
            self.rearm(clock);
            return true;
        }
        false
    }

    fn rearm(&mut self, clock: &Clock) {
        self.start = clock.now;
        self.duration = self.interval;
        self.expires_at = self.start + self.interval;
    }

    /// Add `ms` of remaining time. Restarts an expired timer; adds to the
    /// captured remainder of a paused one.
    pub fn extend(&mut self, clock: &Clock, ms: f64) -> &mut Self {
        if ms <= 0.0 {
            return self;
        }
        if self.paused {
            self.remaining += ms;
        } else if self.active(clock) {
            self.expires_at += ms;
            self.duration += ms;
        } else if self.done(clock) {
            self.set(clock, ms);
        }
        self
    }

    /// Remove `ms` of remaining time, clamped so the timer expires now at
    /// the earliest.
    pub fn reduce(&mut self, clock: &Clock, ms: f64) -> &mut Self {
        if ms <= 0.0 {
            return self;
        }
        if self.paused {
            self.remaining = (self.remaining - ms).max(0.0);
        } else if self.active(clock) {
            self.expires_at -= ms;
            self.duration = (self.duration - ms).max(0.0);
            if self.expires_at <= clock.now {
                self.expires_at = clock.now;
            }
        }
        self
    }

    /// Slide the whole timing window forward by `ms`.
    pub fn shift(&mut self, ms: f64) -> &mut Self {
        if ms <= 0.0 || self.expires_at == 0.0 {
            return self;
        }
        self.start += ms;
        self.expires_at += ms;
        self
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

    #[test]
    fn set_then_expire() {
        let mut c = clock();
        let mut t = Timer::new();
        t.set(&c, 100.0);
        assert!(t.active(&c));
        assert!(!t.done(&c));
        assert_eq!(t.left(&c), 100.0);
        c.advance(100.0);
        assert!(!t.active(&c));
        assert!(t.done(&c));
        assert_eq!(t.left(&c), 0.0);
    }

    #[test]
    fn non_positive_duration_clears() {
        let c = clock();
        let mut t = Timer::new();
        t.set(&c, 100.0);
        t.set(&c, 0.0);
        assert!(!t.active(&c));
        assert!(!t.done(&c));
    }

    #[test]
    fn cleared_timer_is_inert() {
        let mut c = clock();
        let t = Timer::new();
        assert!(!t.active(&c));
        assert!(!t.done(&c));
        c.advance(1_000.0);
        assert!(!t.done(&c));
        assert_eq!(t.elapsed(&c), 0.0);
        assert_eq!(t.ratio(&c), 0.0);
    }

    #[test]
    fn pause_resume_without_drift() {
        let mut c = clock();
        let mut t = Timer::new();
        t.set(&c, 200.0);
        c.advance(50.0);
        t.pause(&c);
        c.advance(10_000.0);
        assert!(!t.active(&c));
        assert!(!t.done(&c));
        assert_eq!(t.elapsed(&c), 50.0);
        t.resume(&c);
        assert_eq!(t.left(&c), 150.0);
        c.advance(150.0);
        assert!(t.done(&c));
    }

    #[test]
    fn elapsed_and_ratio_clamp_to_duration() {
        let mut c = clock();
        let mut t = Timer::new();
        t.set(&c, 100.0);
        c.advance(250.0);
        assert_eq!(t.elapsed(&c), 100.0);
        assert_eq!(t.ratio(&c), 1.0);
    }

    #[test]
    fn extend_active_paused_and_done() {
        let mut c = clock();
        let mut t = Timer::new();
        t.set(&c, 100.0);
        t.extend(&c, 50.0);
        assert_eq!(t.left(&c), 150.0);

        t.pause(&c);
        t.extend(&c, 25.0);
        t.resume(&c);
        assert_eq!(t.left(&c), 175.0);

        c.advance(175.0);
        assert!(t.done(&c));
        t.extend(&c, 60.0);
        assert!(t.active(&c));
        assert_eq!(t.left(&c), 60.0);
    }

    #[test]
    fn reduce_clamps_at_now() {
        let mut c = clock();
        let mut t = Timer::new();
        t.set(&c, 100.0);
        t.reduce(&c, 40.0);
        assert_eq!(t.left(&c), 60.0);
        t.reduce(&c, 500.0);
        assert_eq!(t.left(&c), 0.0);
        assert!(t.done(&c));
    }

    #[test]
    fn ping_fires_once_per_boundary() {
        let mut c = clock();
        let mut t = Timer::new();
        t.set(&c, 50.0);
        t.repeat(&c, 50.0);
        assert!(!t.ping(&c));
        c.advance(50.0);
        assert!(t.ping(&c));
        assert!(!t.ping(&c));
        c.advance(50.0);
        assert!(t.ping(&c));
    }

    #[test]
    fn shift_slides_the_window() {
        let mut c = clock();
        let mut t = Timer::new();
        t.set(&c, 100.0);
        c.advance(90.0);
        t.shift(50.0);
        assert!(t.active(&c));
        assert_eq!(t.left(&c), 60.0);
    }

    #[test]
    fn restored_timer_reads_the_same() {
        let mut c = clock();
        c.advance(40.0);
        let mut t = Timer::new();
        t.set(&c, 100.0);
        c.advance(30.0);
        t.pause(&c);

        let saved = ron::to_string(&t).expect("serialize");
        let mut back: Timer = ron::from_str(&saved).expect("deserialize");
        assert_eq!(back.active(&c), t.active(&c));
        assert_eq!(back.done(&c), t.done(&c));
        assert_eq!(back.left(&c), t.left(&c));

        t.resume(&c);
        back.resume(&c);
        c.advance(50.0);
        assert_eq!(back.active(&c), t.active(&c));
        assert_eq!(back.left(&c), t.left(&c));
        c.advance(50.0);
        assert_eq!(back.done(&c), t.done(&c));
    }
}
