use crate::config::MoveSettings;
use crate::engine::Action;
use crate::mechanics::{BodyView, MechanicId, TickCtx};

/// Instant small impulse on a fresh directional press, so movement responds
/// on the edge frame while the acceleration ramp is still spinning up.
#[derive(Debug)]
pub struct Nudge {
    settings: MoveSettings,
}

impl Nudge {
    pub fn new(settings: MoveSettings) -> Self {
        Self { settings }
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView) {
        if !ctx.suspensions.allows(MechanicId::Nudge, ctx.clock.now) {
            return;
        }
        if ctx.history.edge(Action::Left) {
            body.vel.x = -self.settings.base;
        } else if ctx.history.edge(Action::Right) {
            body.vel.x = self.settings.base;
        }
    }
}
