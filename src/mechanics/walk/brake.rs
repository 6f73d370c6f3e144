use crate::config::MoveSettings;
use crate::engine::Action;
use crate::mechanics::{BodyView, MechanicId, TickCtx};

/// Immediate deceleration when the opposite direction is pressed while
/// still moving the old way.
#[derive(Debug)]
pub struct Brake {
    settings: MoveSettings,
}

impl Brake {
    pub fn new(settings: MoveSettings) -> Self {
        Self { settings }
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView) {
        if !ctx.suspensions.allows(MechanicId::Brake, ctx.clock.now) {
            return;
        }
        if ctx.history.edge(Action::Left) && body.vel.x > 0.0 {
            body.vel.x *= self.settings.multiplier;
        }
        if ctx.history.edge(Action::Right) && body.vel.x < 0.0 {
            body.vel.x *= self.settings.multiplier;
        }
    }
}
