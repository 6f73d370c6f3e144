use crate::config::ClimbSettings;
use crate::engine::Action;
use crate::mechanics::{BodyView, MechanicId, TickCtx};

use super::WallGrab;

/// Ascend a grabbed wall while holding Up, easing toward the climb speed.
#[derive(Debug)]
pub struct WallClimb {
    settings: ClimbSettings,
}

impl WallClimb {
    pub fn new(settings: ClimbSettings) -> Self {
        Self { settings }
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView, grab: &WallGrab) {
        if !ctx.suspensions.allows(MechanicId::WallClimb, ctx.clock.now) {
            return;
        }
        if !self.doing(ctx, body, grab) {
            return;
        }

        let target = -self.settings.speed.abs();
        if self.settings.accel <= 0.0 {
            body.vel.y = target;
        } else {
            let diff = target - body.vel.y;
            body.vel.y += diff * self.settings.accel * ctx.clock.scale as f32;
        }

        if body.vel.y < -self.settings.max.abs() {
            body.vel.y = -self.settings.max.abs();
        }
    }

    /// Active grab plus an Up hold.
    pub fn doing(&self, ctx: &TickCtx, body: &BodyView, grab: &WallGrab) -> bool {
        grab.doing(&*body.contact, ctx.history) && ctx.history.held(Action::Up, 0.0)
    }
}
