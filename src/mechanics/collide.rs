use glam::Vec3;

use crate::physics::{near, overlaps, resolve};

use super::{BodyView, MechanicId, TickCtx};

/// Position/size snapshot of a solid, collected before the body is borrowed
/// mutably so the scan never aliases the arena.
#[derive(Debug, Clone, Copy)]
pub struct SolidRect {
    pub pos: Vec3,
    pub size: Vec3,
}

/// Per-axis collision resolution against the room's solid set: broad-phase
/// distance rejection, exact overlap, then boundary snapping.
#[derive(Debug)]
pub struct Collide {
    broad_phase: f32,
}

impl Collide {
    pub fn new(broad_phase: f32) -> Self {
        Self { broad_phase }
    }

    /// Resolve the body against every solid for the axis carried in
    /// `axis_vel`. Called once per axis, right after that axis integrates.
    pub fn listen(
        &self,
        ctx: &TickCtx,
        body: &mut BodyView,
        axis_vel: Vec3,
        solids: &[SolidRect],
    ) {
        if !ctx.suspensions.allows(MechanicId::Collide, ctx.clock.now) {
            return;
        }
        for solid in solids {
            if !near(*body.pos, body.size, solid.pos, solid.size, self.broad_phase) {
                continue;
            }
            if !overlaps(*body.pos, body.size, solid.pos, solid.size) {
                continue;
            }
            resolve(axis_vel, body.pos, body.size, body.vel, body.contact, solid.pos);
        }
    }
}
