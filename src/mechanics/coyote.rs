use crate::config::CoyoteSettings;
use crate::engine::{Action, Timer};

use super::jump::Jump;
use super::{BodyView, MechanicId, TickCtx};

/// Late-jump forgiveness.
///
/// The freefall timer arms on the frame ground contact is lost; while it
/// runs, a jump edge that the ordinary jump mechanic would refuse is granted
/// by delegating to [`Jump::launch`] directly. One grant per airtime.
#[derive(Debug)]
pub struct Coyote {
    settings: CoyoteSettings,
    freefall: Timer,
    was_on_ground: bool,
}

impl Coyote {
    pub fn new(settings: CoyoteSettings) -> Self {
        Self {
            settings,
            freefall: Timer::new(),
            was_on_ground: false,
        }
    }

    pub fn reset(&mut self) {
        self.freefall.clear();
        self.was_on_ground = false;
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView, jump: &mut Jump) {
        if !ctx.suspensions.allows(MechanicId::Coyote, ctx.clock.now) {
            return;
        }

        // Track the ground edge and arm the grace window.
        if body.contact.bottom {
            self.was_on_ground = true;
            self.freefall.clear();
        } else if self.was_on_ground {
            self.was_on_ground = false;
            self.freefall.set(ctx.clock, self.settings.time);
        }

        if self.can(ctx, body, jump) && ctx.history.edge(Action::Jump) {
            self.grant(body, jump);
        }
    }

    fn can(&self, ctx: &TickCtx, body: &BodyView, jump: &Jump) -> bool {
        if !self.freefall.active(ctx.clock) {
            return false;
        }
        if body.contact.bottom {
            return false;
        }
        // Defer to the ordinary jump when it would accept anyway.
        if jump.can(&*body.contact) {
            return false;
        }
        jump.count() == 0
    }

    fn grant(&mut self, body: &mut BodyView, jump: &mut Jump) {
        self.was_on_ground = false;
        self.freefall.clear();
        if jump.count() == 0 {
            jump.launch(body);
        }
    }
}
