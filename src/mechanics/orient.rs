use crate::config::OrientSettings;
use crate::engine::{Action, Timer};

use super::{BodyView, MechanicId, TickCtx};

/// Facing control with flip debouncing.
///
/// An edge toward the current facing commits immediately. An edge in the
/// opposite direction only becomes a flip once that direction has been held
/// past the debounce threshold, and only inside a short grace window after
/// the edge. Tapping both directions in the same few frames therefore never
/// produces single-frame facing flicker.
#[derive(Debug)]
pub struct Orient {
    settings: OrientSettings,
    pending: Option<Action>,
    window: Timer,
}

impl Orient {
    pub fn new(settings: OrientSettings) -> Self {
        Self {
            settings,
            pending: None,
            window: Timer::new(),
        }
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.window.clear();
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView) {
        if !ctx.suspensions.allows(MechanicId::Orient, ctx.clock.now) {
            return;
        }

        for action in [Action::Left, Action::Right] {
            if !ctx.history.edge(action) {
                continue;
            }
            if self.flips(body, action) {
                // Opposite direction: queue it behind the debounce.
                self.pending = Some(action);
                self.window
                    .set(ctx.clock, self.settings.debounce + self.settings.flip_grace);
            } else {
                self.commit(body, action);
                self.pending = None;
                self.window.clear();
            }
        }

        if let Some(action) = self.pending {
            if !ctx.history.held(action, 0.0) || self.window.done(ctx.clock) {
                // Let go, or the grace window lapsed.
                self.pending = None;
                self.window.clear();
            } else if ctx.history.held(action, self.settings.debounce) {
                self.commit(body, action);
                self.pending = None;
                self.window.clear();
            }
        }

        body.orientation.y = 0.0;
    }

    fn flips(&self, body: &BodyView, action: Action) -> bool {
        match action {
            Action::Left => body.orientation.facing_right(),
            Action::Right => body.orientation.facing_left(),
            _ => false,
        }
    }

    fn commit(&self, body: &mut BodyView, action: Action) {
        match action {
            Action::Left => body.orientation.x = crate::components::Orientation::LEFT,
            Action::Right => body.orientation.x = crate::components::Orientation::RIGHT,
            _ => {}
        }
    }
}
