use crate::components::Contact;
use crate::config::GrabSettings;
use crate::engine::{Action, History, Stamina};
use crate::mechanics::{BodyView, MechanicId, TickCtx};

/// The base wall state: holding into a touched wall while airborne.
///
/// Grabbing spends stamina every frame. While stamina lasts the grip pins
/// the body (vertical velocity zeroed, or downward motion only clamped while
/// climbing); once it runs out the grab persists as a state but stops
/// holding, which is what hands control to WallSlide. Touching ground
/// refills the pool instantly.
#[derive(Debug)]
pub struct WallGrab {
    stamina: Stamina,
    grabbing: bool,
}

impl WallGrab {
    pub fn new(settings: &GrabSettings) -> Self {
        Self {
            stamina: Stamina::new(settings.stamina.clone()),
            grabbing: false,
        }
    }

    pub fn reset(&mut self) {
        self.stamina.refill();
        self.grabbing = false;
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView) {
        if !ctx.suspensions.allows(MechanicId::WallGrab, ctx.clock.now) {
            return;
        }

        if body.contact.bottom {
            self.stamina.refill();
        } else if !self.grabbing {
            self.stamina.listen(ctx.clock);
        }

        if self.can(&*body.contact, ctx.history) {
            self.hold(ctx, body);
        } else if self.grabbing {
            self.grabbing = false;
        }
    }

    /// Actively in the grab state this frame.
    pub fn doing(&self, contact: &Contact, history: &History) -> bool {
        self.grabbing && self.can(contact, history)
    }

    /// Grabbing with stamina still behind the grip.
    pub fn gripping(&self) -> bool {
        self.grabbing && self.stamina.has(0.0)
    }

    pub fn stamina(&self) -> &Stamina {
        &self.stamina
    }

    /// Airborne and pressing into a touched wall. Stamina is deliberately
    /// not part of eligibility: an exhausted grab stays engaged so the
    /// slide can take over the descent.
    fn can(&self, contact: &Contact, history: &History) -> bool {
        if contact.bottom {
            return false;
        }
        let into_left = contact.left && history.held(Action::Left, 0.0);
        let into_right = contact.right && history.held(Action::Right, 0.0);
        into_left || into_right
    }

    fn hold(&mut self, ctx: &TickCtx, body: &mut BodyView) {
        if !self.grabbing {
            self.grabbing = true;
            // First grab frame kills all vertical momentum.
            if self.stamina.has(0.0) {
                body.vel.y = 0.0;
            }
        }

        self.stamina.drain(ctx.clock, None);

        if self.stamina.has(0.0) {
            // While a climb is driving upward motion, only forbid falling;
            // otherwise the grip holds the body still.
            let climbing = ctx.history.held(Action::Up, 0.0);
            if climbing {
                if body.vel.y > 0.0 {
                    body.vel.y = 0.0;
                }
            } else {
                body.vel.y = 0.0;
            }
        }
        // Depleted: WallSlide takes over the descent.
    }
}
