use crate::config::FallSettings;

use super::{BodyView, MechanicId, TickCtx};

/// Gravity application and terminal-velocity clamping.
///
/// While grounded, vertical velocity is rewritten to the base gravity term
/// every frame instead of being left at zero. Walking off a ledge therefore
/// starts the descent immediately rather than floating for a frame.
#[derive(Debug)]
pub struct Fall {
    settings: FallSettings,
}

impl Fall {
    pub fn new(settings: FallSettings) -> Self {
        Self { settings }
    }

    /// `suppressed` is true while the wall group owns vertical motion
    /// (an active climb, slide, or stamina-backed grip).
    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView, suppressed: bool) {
        if !ctx.suspensions.allows(MechanicId::Fall, ctx.clock.now) {
            return;
        }
        if suppressed {
            return;
        }

        let force = ctx.gravity.force * ctx.clock.scale as f32;

        if body.contact.bottom {
            body.vel.y = force;
        } else if body.vel.y < self.settings.terminal {
            body.vel.y += force;
        }

        if body.vel.y >= self.settings.terminal {
            body.vel.y = self.settings.terminal;
        }
    }
}
