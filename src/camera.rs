use glam::Vec3;

/// Viewport that trails the player with proportional easing.
///
/// Each frame the camera moves a fixed fraction of the remaining distance to
/// the target, scaled by the frame's time factor, then clamps so the view
/// never shows space outside the room.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Top-left corner of the view in world units.
    pub pos: Vec3,
    /// View extent in world units.
    pub view: Vec3,
    ease: f32,
}

impl Camera {
    pub fn new(view: Vec3) -> Self {
        Self {
            pos: Vec3::ZERO,
            view,
            ease: 0.08,
        }
    }

    /// Ease toward centering `target`, then clamp to the room rectangle
    /// given by `room_origin` and `room_size`.
    pub fn follow(&mut self, target: Vec3, room_origin: Vec3, room_size: Vec3, scale: f32) {
        let desired = target - self.view * 0.5;
        self.pos += (desired - self.pos) * self.ease * scale;
        self.clamp(room_origin, room_size);
    }

    /// Drop straight onto the target without easing, for spawn and respawn.
    pub fn snap(&mut self, target: Vec3, room_origin: Vec3, room_size: Vec3) {
        self.pos = target - self.view * 0.5;
        self.clamp(room_origin, room_size);
    }

    fn clamp(&mut self, room_origin: Vec3, room_size: Vec3) {
        let max = room_origin + room_size - self.view;
        self.pos.x = if max.x <= room_origin.x {
            room_origin.x
        } else {
            self.pos.x.clamp(room_origin.x, max.x)
        };
        self.pos.y = if max.y <= room_origin.y {
            room_origin.y
        } else {
            self.pos.y.clamp(room_origin.y, max.y)
        };
        self.pos.z = 0.0;
    }

    /// World position translated into view-relative coordinates.
    pub fn project(&self, world: Vec3) -> Vec3 {
        world - self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn follow_converges_on_the_target() {
        let mut cam = Camera::new(vec3(10.0, 10.0, 0.0));
        let room = (vec3(-100.0, -100.0, 0.0), vec3(200.0, 200.0, 0.0));
        let target = vec3(30.0, 20.0, 0.0);
        for _ in 0..500 {
            cam.follow(target, room.0, room.1, 1.0);
        }
        let centered = target - cam.view * 0.5;
        assert!((cam.pos - centered).length() < 0.01);
    }

    #[test]
    fn view_never_leaves_the_room() {
        let mut cam = Camera::new(vec3(10.0, 10.0, 0.0));
        let origin = vec3(0.0, 0.0, 0.0);
        let size = vec3(40.0, 30.0, 0.0);
        // Target far outside the room corner.
        for _ in 0..200 {
            cam.follow(vec3(-500.0, -500.0, 0.0), origin, size, 1.0);
        }
        assert_eq!(cam.pos.x, 0.0);
        assert_eq!(cam.pos.y, 0.0);
        for _ in 0..200 {
            cam.follow(vec3(500.0, 500.0, 0.0), origin, size, 1.0);
        }
        assert_eq!(cam.pos.x, 30.0);
        assert_eq!(cam.pos.y, 20.0);
    }

    #[test]
    fn room_smaller_than_the_view_pins_to_origin() {
        let mut cam = Camera::new(vec3(100.0, 100.0, 0.0));
        let origin = vec3(5.0, 5.0, 0.0);
        let size = vec3(10.0, 10.0, 0.0);
        cam.follow(vec3(10.0, 10.0, 0.0), origin, size, 1.0);
        assert_eq!(cam.pos.x, 5.0);
        assert_eq!(cam.pos.y, 5.0);
    }
}
