use glam::Vec3;

use crate::components::Contact;

/// Snap an overlapping body out of a solid along one axis and mark the
/// contact side. `axis_vel` carries only the axis being resolved; the sign
/// decides which face was hit.
///
/// Side snaps are expressed in the moving body's own extents, including on
/// the left and top faces. Landing leaves vertical velocity untouched so the
/// fall mechanic's grounded branch keeps it pinned, and a head bump nudges
/// the body downward by one unit rather than zeroing it.
pub fn resolve(
    axis_vel: Vec3,
    pos: &mut Vec3,
    size: Vec3,
    vel: &mut Vec3,
    contact: &mut Contact,
    solid_pos: Vec3,
) {
    // Moving right into a solid's left face.
    if axis_vel.x > 0.0 {
        pos.x = solid_pos.x - size.x;
        contact.right = true;
        vel.x = 0.0;
    }

    // Moving left into a solid's right face.
    if axis_vel.x < 0.0 {
        pos.x = solid_pos.x + size.x;
        contact.left = true;
        vel.x = 0.0;
    }

    // Falling onto a solid's top face.
    if axis_vel.y > 0.0 {
        pos.y = solid_pos.y - size.y;
        contact.bottom = true;
    }

    // Rising into a solid's underside.
    if axis_vel.y < 0.0 {
        pos.y = solid_pos.y + size.y;
        contact.top = true;
        vel.y += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    const SIZE: Vec3 = Vec3::new(1.0, 2.0, 0.0);

    fn body(x: f32, y: f32) -> (Vec3, Vec3, Contact) {
        (vec3(x, y, 0.0), Vec3::ZERO, Contact::default())
    }

    #[test]
    fn rightward_hit_snaps_and_stops() {
        let (mut pos, mut vel, mut contact) = body(9.5, 0.0);
        vel.x = 3.0;
        resolve(
            vec3(3.0, 0.0, 0.0),
            &mut pos,
            SIZE,
            &mut vel,
            &mut contact,
            vec3(10.0, 0.0, 0.0),
        );
        assert_eq!(pos.x, 9.0);
        assert_eq!(vel.x, 0.0);
        assert!(contact.right);
    }

    #[test]
    fn leftward_hit_snaps_by_own_width() {
        let (mut pos, mut vel, mut contact) = body(10.2, 0.0);
        vel.x = -3.0;
        resolve(
            vec3(-3.0, 0.0, 0.0),
            &mut pos,
            SIZE,
            &mut vel,
            &mut contact,
            vec3(10.0, 0.0, 0.0),
        );
        assert_eq!(pos.x, 11.0);
        assert_eq!(vel.x, 0.0);
        assert!(contact.left);
    }

    #[test]
    fn landing_keeps_vertical_velocity() {
        let (mut pos, mut vel, mut contact) = body(0.0, 19.0);
        vel.y = 4.0;
        resolve(
            vec3(0.0, 4.0, 0.0),
            &mut pos,
            SIZE,
            &mut vel,
            &mut contact,
            vec3(0.0, 20.0, 0.0),
        );
        assert_eq!(pos.y, 18.0);
        assert_eq!(vel.y, 4.0);
        assert!(contact.bottom);
    }

    #[test]
    fn head_bump_nudges_downward() {
        let (mut pos, mut vel, mut contact) = body(0.0, 9.5);
        vel.y = -6.0;
        resolve(
            vec3(0.0, -6.0, 0.0),
            &mut pos,
            SIZE,
            &mut vel,
            &mut contact,
            vec3(0.0, 10.0, 0.0),
        );
        assert_eq!(pos.y, 12.0);
        assert_eq!(vel.y, -5.0);
        assert!(contact.top);
    }

    #[test]
    fn zero_axis_velocity_resolves_nothing() {
        let (mut pos, mut vel, mut contact) = body(5.0, 5.0);
        let before = pos;
        resolve(
            Vec3::ZERO,
            &mut pos,
            SIZE,
            &mut vel,
            &mut contact,
            vec3(5.0, 5.0, 0.0),
        );
        assert_eq!(pos, before);
        assert_eq!(contact, Contact::default());
    }
}
