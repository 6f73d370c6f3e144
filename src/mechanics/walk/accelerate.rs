use crate::config::MoveSettings;
use crate::engine::Action;
use crate::mechanics::{BodyView, MechanicId, TickCtx};

use super::exclusive_hold;

/// Linear ramp from base speed toward walk speed over the acceleration
/// window while one direction is held exclusively. Never slows the body:
/// the target only wins when it exceeds the current magnitude.
#[derive(Debug)]
pub struct Accelerate {
    settings: MoveSettings,
}

impl Accelerate {
    pub fn new(settings: MoveSettings) -> Self {
        Self { settings }
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView) {
        if !ctx.suspensions.allows(MechanicId::Accelerate, ctx.clock.now) {
            return;
        }

        for (action, sign) in [(Action::Left, -1.0f32), (Action::Right, 1.0)] {
            let Some(duration) = exclusive_hold(ctx.history, action) else {
                continue;
            };
            if duration <= 0.0 {
                continue;
            }
            let ratio = (duration.min(self.settings.accel) / self.settings.accel) as f32;
            let target =
                self.settings.base + (self.settings.speed - self.settings.base) * ratio;
            body.vel.x = sign * body.vel.x.abs().max(target);
        }
    }
}
