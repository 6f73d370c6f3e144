use crate::config::MoveSettings;
use crate::engine::Action;
use crate::mechanics::{BodyView, MechanicId, TickCtx};

/// Attenuates velocity when a directional hold shorter than the tap
/// threshold is released, for fine positioning taps.
#[derive(Debug)]
pub struct MicroTap {
    settings: MoveSettings,
}

impl MicroTap {
    pub fn new(settings: MoveSettings) -> Self {
        Self { settings }
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView) {
        if !ctx.suspensions.allows(MechanicId::MicroTap, ctx.clock.now) {
            return;
        }

        if ctx.history.released(Action::Left, ctx.clock)
            && self.tapped(ctx, Action::Left)
            && body.vel.x < 0.0
        {
            body.vel.x *= self.settings.micro;
        }
        if ctx.history.released(Action::Right, ctx.clock)
            && self.tapped(ctx, Action::Right)
            && body.vel.x > 0.0
        {
            body.vel.x *= self.settings.micro;
        }
    }

    fn tapped(&self, ctx: &TickCtx, action: Action) -> bool {
        ctx.history
            .hold(action)
            .map_or(false, |h| h.duration < self.settings.tap)
    }
}
