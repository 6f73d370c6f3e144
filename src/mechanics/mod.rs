//! The movement mechanic pipeline: many small, order-sensitive state
//! machines sharing one body. Each exposes `can` (eligibility), a one-shot
//! or continuous effect, and `listen` (the per-frame entry point), and each
//! can be taken offline through the [`Suspensions`] registry without being
//! torn down.

mod collide;
mod coyote;
mod dash;
mod fall;
mod jump;
mod orient;
mod suspend;
mod walk;
mod wall;

pub use collide::{Collide, SolidRect};
pub use coyote::Coyote;
pub use dash::{Dash, DashDirection};
pub use fall::Fall;
pub use jump::Jump;
pub use orient::Orient;
pub use suspend::Suspensions;
pub use walk::{Accelerate, Brake, Decay, MicroTap, Nudge, Sprint};
pub use wall::{WallClimb, WallGrab, WallJump, WallSlide};

use glam::Vec3;

use crate::components::{Contact, Orientation};
use crate::config::{PhysicsSettings, PlayerSettings};
use crate::engine::{Clock, History};
use crate::physics::{Friction, Gravity};

/// Stable identity of each mechanic, used by the suspension registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MechanicId {
    Nudge,
    Brake,
    Accelerate,
    Sprint,
    MicroTap,
    Decay,
    Fall,
    Jump,
    Coyote,
    Dash,
    Orient,
    WallGrab,
    WallClimb,
    WallSlide,
    WallJump,
    Collide,
}

/// Everything a dash locks out for its impulse-plus-hover window.
pub const DASH_LOCKS: &[MechanicId] = &[
    MechanicId::Nudge,
    MechanicId::Brake,
    MechanicId::Accelerate,
    MechanicId::Sprint,
    MechanicId::MicroTap,
    MechanicId::Decay,
    MechanicId::Fall,
    MechanicId::Jump,
    MechanicId::Coyote,
    MechanicId::Orient,
    MechanicId::WallGrab,
    MechanicId::WallClimb,
    MechanicId::WallSlide,
    MechanicId::WallJump,
];

/// Locked while a wall jump's impulse window runs, so locomotion cannot
/// cancel the kick.
pub const WALLJUMP_LOCKS: &[MechanicId] = &[
    MechanicId::Nudge,
    MechanicId::Brake,
    MechanicId::Accelerate,
    MechanicId::Sprint,
    MechanicId::MicroTap,
    MechanicId::Decay,
    MechanicId::Fall,
    MechanicId::Jump,
    MechanicId::Coyote,
    MechanicId::Orient,
    MechanicId::WallSlide,
];

/// Per-frame read context handed to every mechanic.
pub struct TickCtx<'a> {
    pub clock: &'a Clock,
    pub history: &'a History,
    pub gravity: Gravity,
    pub friction: Friction,
    pub suspensions: &'a mut Suspensions,
}

/// Mutable view of one body's physics bundle for the duration of its tick.
/// Borrowed out of the arena once, so the pipeline works on plain references
/// instead of re-querying per mechanic.
pub struct BodyView<'a> {
    pub pos: &'a mut Vec3,
    pub size: Vec3,
    pub vel: &'a mut Vec3,
    pub contact: &'a mut Contact,
    pub orientation: &'a mut Orientation,
}

/// The full mechanic set bound to one body, ticked in a fixed order.
pub struct Mechanics {
    pub nudge: Nudge,
    pub brake: Brake,
    pub accelerate: Accelerate,
    pub sprint: Sprint,
    pub microtap: MicroTap,
    pub decay: Decay,
    pub fall: Fall,
    pub jump: Jump,
    pub coyote: Coyote,
    pub dash: Dash,
    pub orient: Orient,
    pub wall_grab: WallGrab,
    pub wall_climb: WallClimb,
    pub wall_slide: WallSlide,
    pub wall_jump: WallJump,
    pub collide: Collide,
}

impl Mechanics {
    /// Resolve every mechanic's settings once, at bind time.
    pub fn bind(player: &PlayerSettings, physics: &PhysicsSettings) -> Self {
        Self {
            nudge: Nudge::new(player.movement.clone()),
            brake: Brake::new(player.movement.clone()),
            accelerate: Accelerate::new(player.movement.clone()),
            sprint: Sprint::new(player.movement.clone()),
            microtap: MicroTap::new(player.movement.clone()),
            decay: Decay::new(),
            fall: Fall::new(player.jumps.fall.clone()),
            jump: Jump::new(player.jumps.ground.clone()),
            coyote: Coyote::new(player.jumps.coyote.clone()),
            dash: Dash::new(player.dash.clone()),
            orient: Orient::new(player.orient.clone()),
            wall_grab: WallGrab::new(&player.wall.grab),
            wall_climb: WallClimb::new(player.wall.climb.clone()),
            wall_slide: WallSlide::new(player.wall.slide.clone()),
            wall_jump: WallJump::new(player.jumps.wall.clone()),
            collide: Collide::new(physics.broad_phase),
        }
    }

    /// Reinitialize counters and timers in place, for respawn.
    pub fn reset(&mut self) {
        self.jump.reset();
        self.coyote.reset();
        self.dash.reset();
        self.orient.reset();
        self.wall_grab.reset();
        self.wall_jump.reset();
    }

    /// One frame of the pipeline, then axis-separated integration.
    ///
    /// Order matters and is part of the contract: the wall group first (it
    /// may claim vertical motion), gravity, then the walk stages (each
    /// writing only `velocity.x`), then the jump family, dash housekeeping,
    /// and facing. Mechanics read the contact flags the previous integration
    /// produced; integration resets them and rewrites them axis by axis.
    pub fn tick(&mut self, ctx: &mut TickCtx, body: &mut BodyView, solids: &[SolidRect]) {
        self.wall_grab.listen(ctx, body);
        self.wall_climb.listen(ctx, body, &self.wall_grab);
        self.wall_slide.listen(ctx, body, &self.wall_grab);
        self.wall_jump.listen(ctx, body);

        let wall_owns_y = self.wall_grab.gripping()
            || self.wall_climb.doing(ctx, body, &self.wall_grab)
            || self.wall_slide.doing(ctx, body, &self.wall_grab);
        self.fall.listen(ctx, body, wall_owns_y);

        self.nudge.listen(ctx, body);
        self.brake.listen(ctx, body);
        self.accelerate.listen(ctx, body);
        self.sprint.listen(ctx, body);
        self.microtap.listen(ctx, body);
        self.decay.listen(ctx, body);

        self.coyote.listen(ctx, body, &mut self.jump);
        self.jump.listen(ctx, body);

        let grabbing = self.wall_grab.doing(&*body.contact, ctx.history);
        self.dash.listen(ctx, body, grabbing);
        self.orient.listen(ctx, body);

        self.integrate(ctx, body, solids);
    }

    /// Move one axis at a time, resolving contacts after each, so a body
    /// slides along a surface while being stopped perpendicular to it.
    /// Depth integrates but never collides.
    fn integrate(&self, ctx: &TickCtx, body: &mut BodyView, solids: &[SolidRect]) {
        body.contact.reset();
        let scale = ctx.clock.scale as f32;

        let vx = body.vel.x;
        body.pos.x += vx * scale;
        self.collide
            .listen(ctx, body, Vec3::new(vx, 0.0, 0.0), solids);

        let vy = body.vel.y;
        body.pos.y += vy * scale;
        self.collide
            .listen(ctx, body, Vec3::new(0.0, vy, 0.0), solids);

        body.pos.z += body.vel.z * scale;
    }
}
