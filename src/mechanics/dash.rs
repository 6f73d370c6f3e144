use log::debug;

use crate::components::Contact;
use crate::config::DashSettings;
use crate::engine::{ComboName, Timer};

use super::{BodyView, TickCtx, DASH_LOCKS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashDirection {
    Left,
    Right,
    Up,
    Down,
}

impl From<ComboName> for DashDirection {
    fn from(name: ComboName) -> Self {
        match name {
            ComboName::DashLeft => DashDirection::Left,
            ComboName::DashRight => DashDirection::Right,
            ComboName::DashUp => DashDirection::Up,
            ComboName::DashDown => DashDirection::Down,
        }
    }
}

/// Burst movement driven by combo triggers rather than polled input.
///
/// A dash is three timers: `impulse` (the burst itself), `hover` (a
/// post-burst dead stop), and `cool` (minimum gap between dashes). While
/// impulse and hover run, every overlapping locomotion mechanic is suspended
/// through the registry and restored automatically when the window lapses.
#[derive(Debug)]
pub struct Dash {
    settings: DashSettings,
    uses: u32,
    impulse: Timer,
    hover: Timer,
    cool: Timer,
}

impl Dash {
    pub fn new(settings: DashSettings) -> Self {
        Self {
            settings,
            uses: 0,
            impulse: Timer::new(),
            hover: Timer::new(),
            cool: Timer::new(),
        }
    }

    pub fn reset(&mut self) {
        self.uses = 0;
        self.impulse.clear();
        self.hover.clear();
        self.cool.clear();
    }

    /// Per-frame housekeeping: use-count restoration and the hover dead
    /// stop. The dash itself starts in [`trigger`](Dash::trigger).
    pub fn listen(&mut self, ctx: &TickCtx, body: &mut BodyView, grabbing_wall: bool) {
        if (self.settings.reset.ground && body.contact.bottom)
            || (self.settings.reset.wall && grabbing_wall)
        {
            self.uses = 0;
        }

        if self.impulse.active(ctx.clock) {
            return;
        }

        // Burst over: hold position for the hover window.
        if self.impulse.done(ctx.clock) && self.hover.active(ctx.clock) {
            if body.vel.x != 0.0 || body.vel.y != 0.0 {
                body.vel.x = 0.0;
                body.vel.y = 0.0;
            }
        }

        if self.hover.done(ctx.clock) {
            self.hover.clear();
        }
    }

    /// Combo-event entry point.
    pub fn trigger(&mut self, ctx: &mut TickCtx, body: &mut BodyView, dir: DashDirection) {
        if !self.can(ctx, &*body.contact) {
            return;
        }
        self.launch(ctx, body, dir);
    }

    pub fn can(&self, ctx: &TickCtx, contact: &Contact) -> bool {
        if self.impulse.active(ctx.clock) || self.cool.active(ctx.clock) {
            return false;
        }
        if self.uses >= self.settings.limit {
            return false;
        }
        // Permission keyed on where the body is right now.
        if contact.bottom {
            self.settings.can.ground
        } else if contact.walled() {
            self.settings.can.wall
        } else {
            self.settings.can.air
        }
    }

    /// Active burst or hover lockout.
    pub fn active(&self, ctx: &TickCtx) -> bool {
        self.impulse.active(ctx.clock) || self.hover.active(ctx.clock)
    }

    fn launch(&mut self, ctx: &mut TickCtx, body: &mut BodyView, dir: DashDirection) {
        let times = &self.settings.times;
        self.uses += 1;
        self.impulse.set(ctx.clock, times.duration);
        self.hover.set(ctx.clock, times.duration + times.hover);
        self.cool.set(ctx.clock, times.cooldown);

        body.vel.x = 0.0;
        body.vel.y = 0.0;
        match dir {
            DashDirection::Left => body.vel.x = -self.settings.power.x,
            DashDirection::Right => body.vel.x = self.settings.power.x,
            DashDirection::Up => body.vel.y = -self.settings.power.y,
            DashDirection::Down => body.vel.y = self.settings.power.y,
        }

        ctx.suspensions
            .suspend_all(DASH_LOCKS, ctx.clock.now + times.duration + times.hover);
        debug!("dash {:?} (use {}/{})", dir, self.uses, self.settings.limit);
    }
}
