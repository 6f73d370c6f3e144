use glam::Vec3;

/// World-space position of a body's top-left corner, in room units.
pub struct Position(pub Vec3);

/// Axis-aligned extents of a body. `x` is width, `y` is height.
pub struct Size(pub Vec3);

/// Linear velocity in room units per scaled frame.
pub struct Velocity(pub Vec3);

/// Marker for immovable bodies the resolver may snap others against.
pub struct Solid;

/// Which sides of a body touched a solid during the last resolution pass.
///
/// Reset at the top of every frame; mechanics read last frame's flags until
/// the integration phase rewrites them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Contact {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Touching a wall on either side.
    pub fn walled(&self) -> bool {
        self.left || self.right
    }
}

/// Facing direction in degrees. `x` is the horizontal heading: 90 faces
/// right, 270 faces left. `y` is the vertical tilt used while climbing.
pub struct Orientation {
    pub x: f32,
    pub y: f32,
}

impl Orientation {
    pub const RIGHT: f32 = 90.0;
    pub const LEFT: f32 = 270.0;

    pub fn facing_right(&self) -> bool {
        self.x == Self::RIGHT
    }

    pub fn facing_left(&self) -> bool {
        self.x == Self::LEFT
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            x: Self::RIGHT,
            y: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_reset_clears_all_sides() {
        let mut c = Contact {
            top: true,
            right: true,
            bottom: true,
            left: true,
        };
        assert!(c.walled());
        c.reset();
        assert_eq!(c, Contact::default());
        assert!(!c.walled());
    }

    #[test]
    fn orientation_defaults_to_facing_right() {
        let o = Orientation::default();
        assert!(o.facing_right());
        assert!(!o.facing_left());
    }
}
