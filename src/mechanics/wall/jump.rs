use crate::components::Contact;
use crate::config::WallJumpSettings;
use crate::engine::{Action, Timer};
use crate::mechanics::{BodyView, MechanicId, TickCtx, WALLJUMP_LOCKS};

/// Kick away from a touched wall: lateral impulse opposite the contact side
/// plus a vertical impulse, then a short locked window during which the
/// overlapping locomotion mechanics stay suspended so they cannot cancel
/// the kick.
#[derive(Debug)]
pub struct WallJump {
    settings: WallJumpSettings,
    impulse: Timer,
}

impl WallJump {
    pub fn new(settings: WallJumpSettings) -> Self {
        Self {
            settings,
            impulse: Timer::new(),
        }
    }

    pub fn reset(&mut self) {
        self.impulse.clear();
    }

    pub fn listen(&mut self, ctx: &mut TickCtx, body: &mut BodyView) {
        if !ctx.suspensions.allows(MechanicId::WallJump, ctx.clock.now) {
            return;
        }
        if self.can(&*body.contact) && ctx.history.edge(Action::Jump) {
            self.kick(ctx, body);
        }
    }

    /// Airborne beside a wall, with wall jumping configured on.
    pub fn can(&self, contact: &Contact) -> bool {
        self.settings.power != 0.0 && !contact.bottom && contact.walled()
    }

    fn kick(&mut self, ctx: &mut TickCtx, body: &mut BodyView) {
        // Left contact wins if both sides somehow report.
        if body.contact.left {
            body.vel.x = self.settings.lateral;
        } else if body.contact.right {
            body.vel.x = -self.settings.lateral;
        }
        body.vel.y = -self.settings.power;

        self.impulse.set(ctx.clock, self.settings.time);
        ctx.suspensions
            .suspend_all(WALLJUMP_LOCKS, ctx.clock.now + self.settings.time);
    }
}
