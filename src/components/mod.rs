mod physics;
mod render;

pub use physics::{Contact, Orientation, Position, Size, Solid, Velocity};
pub use render::{Color, Hidden, Opacity};

/// Marker for the player-controlled body.
pub struct PlayerTag;

/// Marker for standable platforms.
pub struct Platform;

/// Marker for grabbable walls.
pub struct Wall;

/// Marker for the room exit.
pub struct Door;

/// Marker for moving hazards.
pub struct Projectile;

/// Horizontal patrol extent for a hazard; the body reverses its velocity at
/// either edge.
pub struct Patrol {
    pub min: f32,
    pub max: f32,
}
