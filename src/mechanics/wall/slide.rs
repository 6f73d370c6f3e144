use crate::config::SlideSettings;
use crate::mechanics::{BodyView, MechanicId, TickCtx};

use super::WallGrab;

/// Controlled descent once a grab's stamina is spent: attenuated gravity
/// clamped to a slide maximum.
#[derive(Debug)]
pub struct WallSlide {
    settings: SlideSettings,
}

impl WallSlide {
    pub fn new(settings: SlideSettings) -> Self {
        Self { settings }
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView, grab: &WallGrab) {
        if !ctx.suspensions.allows(MechanicId::WallSlide, ctx.clock.now) {
            return;
        }
        if !self.doing(ctx, body, grab) {
            return;
        }

        let inc = ctx.gravity.force * self.settings.factor * ctx.clock.scale as f32;
        if body.vel.y < self.settings.max {
            body.vel.y += inc;
            if body.vel.y > self.settings.max {
                body.vel.y = self.settings.max;
            }
        } else if body.vel.y > self.settings.max {
            body.vel.y = self.settings.max;
        }
    }

    /// Grab held, grip exhausted, and not ascending.
    pub fn doing(&self, ctx: &TickCtx, body: &BodyView, grab: &WallGrab) -> bool {
        grab.doing(&*body.contact, ctx.history) && !grab.gripping() && body.vel.y >= 0.0
    }
}
