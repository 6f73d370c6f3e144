use crate::config::FrameSettings;

/// Shared simulation clock.
///
/// Updated exactly once per frame by the frame pump; every timer, mechanic,
/// and history query reads this instance, never a private time source. That
/// single-source rule is what lets [`pause`](Clock::pause) freeze the whole
/// simulation: timers compare against `now`, and `now` simply stops moving.
///
/// All values are milliseconds. `scale` is the frame delta normalized to the
/// target frame step and clamped, so per-frame motion values stay stable
/// across refresh rates.
#[derive(Debug, Clone)]
pub struct Clock {
    /// Current frame timestamp.
    pub now: f64,
    /// Previous frame timestamp.
    pub prev: f64,
    /// Elapsed ms between the last two updates.
    pub delta: f64,
    /// Normalized time-scale factor: `delta / step`, clamped.
    pub scale: f64,
    step: f64,
    throttle: f64,
    clamp: f64,
    /// Subtracted from raw timestamps so paused spans never reach `now`.
    offset: f64,
    pause_started: Option<f64>,
}

impl Clock {
    pub fn new(settings: &FrameSettings) -> Self {
        Self {
            now: 0.0,
            prev: 0.0,
            delta: 0.0,
            scale: 1.0,
            step: 1000.0 / settings.goal.max(1.0),
            throttle: settings.throttle,
            clamp: settings.clamp,
            offset: 0.0,
            pause_started: None,
        }
    }

    /// The ideal frame step in ms (1000 / goal fps).
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Feed a raw monotonic timestamp (ms). No-op while paused.
    pub fn update(&mut self, raw_now: f64) {
        if self.pause_started.is_some() {
            return;
        }
        let now = raw_now - self.offset;
        self.prev = self.now;
        self.now = now;
        self.delta = (self.now - self.prev).max(0.0);
        self.scale = (self.delta / self.step).clamp(self.throttle, self.clamp);
    }

    /// Advance by a fixed delta, for test drivers and fixed-step pumps.
    pub fn advance(&mut self, ms: f64) {
        let next = self.now + self.offset + ms;
        self.update(next);
    }

    /// Freeze the clock at the current moment.
    pub fn pause(&mut self, raw_now: f64) {
        if self.pause_started.is_none() {
            self.pause_started = Some(raw_now);
        }
    }

    /// Unfreeze; the paused span is folded into the offset so `now`
    /// continues from where it stopped.
    pub fn resume(&mut self, raw_now: f64) {
        if let Some(started) = self.pause_started.take() {
            self.offset += raw_now - started;
        }
    }

    pub fn paused(&self) -> bool {
        self.pause_started.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> Clock {
        Clock::new(&FrameSettings::default())
    }

    #[test]
    fn delta_and_scale_track_updates() {
        let mut c = clock();
        c.update(0.0);
        c.update(1000.0 / 60.0);
        assert!((c.delta - 1000.0 / 60.0).abs() < 1e-9);
        assert!((c.scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scale_is_clamped_both_ways() {
        let mut c = clock();
        c.update(0.0);
        c.update(1.0); // tiny delta
        assert_eq!(c.scale, 0.5);
        c.update(10_000.0); // huge stall
        assert_eq!(c.scale, 5.0);
    }

    #[test]
    fn pause_freezes_now_and_resume_continues() {
        let mut c = clock();
        c.update(0.0);
        c.update(100.0);
        c.pause(100.0);
        c.update(5_000.0);
        assert_eq!(c.now, 100.0);
        c.resume(5_100.0);
        c.update(5_116.0);
        assert_eq!(c.now, 116.0);
        assert_eq!(c.delta, 16.0);
    }

    #[test]
    fn advance_steps_by_exact_delta() {
        let mut c = clock();
        c.update(0.0);
        c.advance(250.0);
        assert_eq!(c.now, 250.0);
        assert_eq!(c.delta, 250.0);
    }
}
