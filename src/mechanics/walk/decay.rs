use crate::engine::Action;
use crate::mechanics::{BodyView, MechanicId, TickCtx};

/// Friction when no direction is held, with a snap to exactly zero once the
/// residue drops below the friction force, so idle bodies never drift.
#[derive(Debug, Default)]
pub struct Decay;

impl Decay {
    pub fn new() -> Self {
        Self
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView) {
        if !ctx.suspensions.allows(MechanicId::Decay, ctx.clock.now) {
            return;
        }

        let left = ctx.history.held(Action::Left, 0.0);
        let right = ctx.history.held(Action::Right, 0.0);
        if left || right {
            return;
        }

        body.vel.x *= ctx.friction.force;
        if body.vel.x.abs() < ctx.friction.force {
            body.vel.x = 0.0;
        }
    }
}
