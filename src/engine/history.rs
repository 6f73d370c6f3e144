use std::collections::VecDeque;

use super::clock::Clock;
use super::input::{Action, InputSnapshot, InputSurface};

/// Current hold state for a single action.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldState {
    pub down: bool,
    /// Timestamp of the press that started the current hold.
    pub began_at: f64,
    /// Hold length so far, or final length once released. Zero on the press
    /// frame itself, which is what edge detection keys off.
    pub duration: f64,
    pub ended_at: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Press,
    Release,
}

/// One press or release, timestamped.
#[derive(Debug, Clone, Copy)]
pub struct HistoryEvent {
    pub action: Action,
    pub kind: EventKind,
    pub time: f64,
    /// Hold length; only meaningful on releases.
    pub duration: f64,
}

/// Timestamped press / release log plus per-action hold tracking.
///
/// Sampled once per frame from the frozen input snapshot. The event ring is
/// the raw material for double-taps and combos; the hold states answer the
/// per-frame questions mechanics actually ask: `edge` (pressed this frame),
/// `held` (down at least N ms), `released` (let go this frame).
#[derive(Debug)]
pub struct History {
    states: [HoldState; 5],
    touched: [bool; 5],
    events: VecDeque<HistoryEvent>,
    max_events: usize,
}

impl History {
    pub fn new(max_events: usize) -> Self {
        Self {
            states: [HoldState::default(); 5],
            touched: [false; 5],
            events: VecDeque::with_capacity(max_events.min(256)),
            max_events: max_events.max(1),
        }
    }

    /// Drop all recorded state.
    pub fn reset(&mut self) {
        self.states = [HoldState::default(); 5];
        self.touched = [false; 5];
        self.events.clear();
    }

    /// Per-frame sample. Detects edges against the previous frame and keeps
    /// hold durations current.
    pub fn sample(&mut self, snapshot: &InputSnapshot, clock: &Clock) {
        let now = clock.now;
        for action in Action::ALL {
            let idx = action.index();
            let is_down = snapshot.pressed(action);
            let state = &mut self.states[idx];

            if is_down {
                if !state.down {
                    state.down = true;
                    state.began_at = now;
                    state.duration = 0.0;
                    state.ended_at = 0.0;
                    self.push(HistoryEvent {
                        action,
                        kind: EventKind::Press,
                        time: now,
                        duration: 0.0,
                    });
                } else {
                    state.duration = now - state.began_at;
                }
                self.touched[idx] = true;
            } else if state.down {
                state.down = false;
                state.duration = now - state.began_at;
                state.ended_at = now;
                let duration = state.duration;
                self.push(HistoryEvent {
                    action,
                    kind: EventKind::Release,
                    time: now,
                    duration,
                });
            }
        }
    }

    fn push(&mut self, event: HistoryEvent) {
        if self.events.len() == self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Hold info for an action, if it has ever been pressed.
    pub fn hold(&self, action: Action) -> Option<&HoldState> {
        let idx = action.index();
        self.touched[idx].then(|| &self.states[idx])
    }

    /// True only on the first sampled frame of a fresh press.
    pub fn edge(&self, action: Action) -> bool {
        let s = &self.states[action.index()];
        s.down && s.duration == 0.0
    }

    /// True while down for at least `min_ms`.
    pub fn held(&self, action: Action, min_ms: f64) -> bool {
        let s = &self.states[action.index()];
        s.down && s.duration >= min_ms
    }

    /// True on the frame the action was let go: its most recent event is a
    /// release stamped with the current time.
    pub fn released(&self, action: Action, clock: &Clock) -> bool {
        self.events
            .iter()
            .rev()
            .find(|e| e.action == action)
            .map(|e| e.kind == EventKind::Release && clock.now - e.time <= 0.0)
            .unwrap_or(false)
    }

    /// Recent events, oldest first, optionally filtered by action, kind, and
    /// a trailing window in ms (zero means all of history).
    pub fn recent(
        &self,
        action: Option<Action>,
        kind: Option<EventKind>,
        window: f64,
        clock: &Clock,
    ) -> impl Iterator<Item = &HistoryEvent> {
        let cutoff = clock.now - window;
        self.events.iter().filter(move |e| {
            action.map_or(true, |a| e.action == a)
                && kind.map_or(true, |k| e.kind == k)
                && (window <= 0.0 || e.time >= cutoff)
        })
    }

    /// Count presses of `action` within the trailing window.
    pub fn presses(&self, action: Action, window: f64, clock: &Clock) -> usize {
        self.recent(Some(action), Some(EventKind::Press), window, clock)
            .count()
    }

    pub fn events(&self) -> impl DoubleEndedIterator<Item = &HistoryEvent> {
        self.events.iter()
    }
}
