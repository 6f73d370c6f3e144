use crate::config::MoveSettings;
use crate::engine::Action;
use crate::mechanics::{BodyView, MechanicId, TickCtx};

use super::exclusive_hold;

/// Snaps to run speed once a direction has been held exclusively past the
/// run-hold threshold. Runs after Accelerate so it overwrites the ramp.
#[derive(Debug)]
pub struct Sprint {
    settings: MoveSettings,
}

impl Sprint {
    pub fn new(settings: MoveSettings) -> Self {
        Self { settings }
    }

    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView) {
        if !ctx.suspensions.allows(MechanicId::Sprint, ctx.clock.now) {
            return;
        }
        if exclusive_hold(ctx.history, Action::Left)
            .map_or(false, |d| d >= self.settings.run_hold)
        {
            body.vel.x = -self.settings.run;
        } else if exclusive_hold(ctx.history, Action::Right)
            .map_or(false, |d| d >= self.settings.run_hold)
        {
            body.vel.x = self.settings.run;
        }
    }
}
