use crate::components::Contact;
use crate::config::GroundJumpSettings;
use crate::engine::Action;

use super::{BodyView, MechanicId, TickCtx};

/// Ground and air jumps, counted against a configured maximum.
#[derive(Debug)]
pub struct Jump {
    settings: GroundJumpSettings,
    count: u32,
}

impl Jump {
    pub fn new(settings: GroundJumpSettings) -> Self {
        Self { settings, count: 0 }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView) {
        if !ctx.suspensions.allows(MechanicId::Jump, ctx.clock.now) {
            return;
        }
        if body.contact.bottom {
            self.count = 0;
        }
        if self.can(&*body.contact) && ctx.history.edge(Action::Jump) {
            self.launch(body);
        }
    }

    /// Eligible while grounded or still under the air-jump allowance.
    /// A body that walked off a ledge without jumping is falling, not
    /// jumping; that airtime belongs to the coyote window.
    pub fn can(&self, contact: &Contact) -> bool {
        self.settings.max > 0
            && !self.falling(contact)
            && (contact.bottom || self.count < self.settings.max)
    }

    fn falling(&self, contact: &Contact) -> bool {
        self.count == 0 && !contact.bottom
    }

    /// Consume a jump and apply the upward impulse.
    pub fn launch(&mut self, body: &mut BodyView) {
        self.count += 1;
        body.vel.y = -self.settings.power;
    }
}
