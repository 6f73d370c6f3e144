use log::debug;

use crate::config::ComboSettings;

use super::clock::Clock;
use super::history::{EventKind, History};
use super::input::Action;

/// Named gestures the combo matcher can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComboName {
    DashLeft,
    DashRight,
    DashUp,
    DashDown,
}

impl ComboName {
    const ALL: [ComboName; 4] = [
        ComboName::DashLeft,
        ComboName::DashRight,
        ComboName::DashUp,
        ComboName::DashDown,
    ];
}

/// An ordered press sequence that must complete inside `window` ms.
#[derive(Debug, Clone)]
pub struct ComboRule {
    pub name: ComboName,
    pub sequence: Vec<Action>,
    pub window: f64,
}

/// Watches the input history for press sequences matching the configured
/// rules. Matching is subsequence-based: the rule's presses must appear in
/// order inside the window, with other presses allowed in between. A short
/// per-combo cooldown keeps a single gesture from firing on consecutive
/// frames while its presses are still inside the window.
#[derive(Debug)]
pub struct Combos {
    rules: Vec<ComboRule>,
    cooldown: f64,
    last_fired: [f64; 4],
}

impl Combos {
    /// Double-tap dash gestures in all four directions.
    pub fn new(settings: &ComboSettings) -> Self {
        let rules = ComboName::ALL
            .iter()
            .map(|&name| {
                let tap = match name {
                    ComboName::DashLeft => Action::Left,
                    ComboName::DashRight => Action::Right,
                    ComboName::DashUp => Action::Up,
                    ComboName::DashDown => Action::Down,
                };
                ComboRule {
                    name,
                    sequence: vec![tap, tap],
                    window: settings.window,
                }
            })
            .collect();
        Self {
            rules,
            cooldown: settings.cooldown,
            last_fired: [f64::NEG_INFINITY; 4],
        }
    }

    pub fn with_rules(rules: Vec<ComboRule>, settings: &ComboSettings) -> Self {
        Self {
            rules,
            cooldown: settings.cooldown,
            last_fired: [f64::NEG_INFINITY; 4],
        }
    }

    /// Per-frame pass over the history. Returns every combo that completed
    /// this frame and is off cooldown.
    pub fn scan(&mut self, history: &History, clock: &Clock) -> Vec<ComboName> {
        let mut fired = Vec::new();
        if history.events().next().is_none() {
            return fired;
        }
        for i in 0..self.rules.len() {
            let rule = &self.rules[i];
            if rule.sequence.is_empty() {
                continue;
            }
            if !Self::matched(rule, history, clock) {
                continue;
            }
            let slot = rule.name as usize;
            if clock.now - self.last_fired[slot] < self.cooldown {
                continue;
            }
            self.last_fired[slot] = clock.now;
            debug!("combo matched: {:?}", rule.name);
            fired.push(rule.name);
        }
        fired
    }

    fn matched(rule: &ComboRule, history: &History, clock: &Clock) -> bool {
        let cutoff = if rule.window > 0.0 {
            clock.now - rule.window
        } else {
            0.0
        };
        let mut si = 0;
        for event in history.events() {
            if event.time < cutoff || event.kind != EventKind::Press {
                continue;
            }
            if event.action == rule.sequence[si] {
                si += 1;
                if si == rule.sequence.len() {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FrameSettings;
    use crate::engine::input::InputSnapshot;

    fn rig() -> (Clock, History, Combos) {
        let mut clock = Clock::new(&FrameSettings::default());
        clock.update(0.0);
        let history = History::new(256);
        let combos = Combos::new(&ComboSettings {
            cooldown: 30.0,
            window: 200.0,
        });
        (clock, history, combos)
    }

    fn tap(history: &mut History, clock: &mut Clock, action: Action, gap: f64) {
        let mut snap = InputSnapshot::default();
        snap.press(action);
        clock.advance(gap);
        history.sample(&snap, clock);
        snap.release(action);
        clock.advance(16.0);
        history.sample(&snap, clock);
    }

    #[test]
    fn double_tap_inside_window_fires() {
        let (mut clock, mut history, mut combos) = rig();
        tap(&mut history, &mut clock, Action::Right, 16.0);
        tap(&mut history, &mut clock, Action::Right, 50.0);
        assert_eq!(combos.scan(&history, &clock), vec![ComboName::DashRight]);
    }

    #[test]
    fn taps_too_far_apart_do_not_fire() {
        let (mut clock, mut history, mut combos) = rig();
        tap(&mut history, &mut clock, Action::Left, 16.0);
        tap(&mut history, &mut clock, Action::Left, 400.0);
        assert!(combos.scan(&history, &clock).is_empty());
    }

    #[test]
    fn cooldown_blocks_immediate_refire() {
        let (mut clock, mut history, mut combos) = rig();
        tap(&mut history, &mut clock, Action::Up, 16.0);
        tap(&mut history, &mut clock, Action::Up, 50.0);
        assert_eq!(combos.scan(&history, &clock).len(), 1);

        // Same presses are still inside the window on the next frame.
        clock.advance(16.0);
        assert!(combos.scan(&history, &clock).is_empty());
    }

    #[test]
    fn interleaved_presses_still_match_in_order() {
        let (mut clock, mut history, mut combos) = rig();
        tap(&mut history, &mut clock, Action::Down, 16.0);
        tap(&mut history, &mut clock, Action::Jump, 20.0);
        tap(&mut history, &mut clock, Action::Down, 20.0);
        let fired = combos.scan(&history, &clock);
        assert!(fired.contains(&ComboName::DashDown));
    }

    #[test]
    fn single_tap_is_not_a_combo() {
        let (mut clock, mut history, mut combos) = rig();
        tap(&mut history, &mut clock, Action::Right, 16.0);
        assert!(combos.scan(&history, &clock).is_empty());
    }
}
