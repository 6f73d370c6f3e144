use glam::Vec3;

/// Strict AABB overlap on the X/Y plane. Touching edges do not count, so a
/// body resting exactly on a floor reports no overlap and the resolver is
/// only ever handed genuine penetrations.
pub fn overlaps(a_pos: Vec3, a_size: Vec3, b_pos: Vec3, b_size: Vec3) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && b_pos.x < a_pos.x + a_size.x
        && a_pos.y < b_pos.y + b_size.y
        && b_pos.y < a_pos.y + a_size.y
}

/// Broad-phase proximity test: center distance within the summed half
/// extents scaled by `multiplier`, per axis. Degenerate bodies with a
/// non-positive extent never pass.
pub fn near(a_pos: Vec3, a_size: Vec3, b_pos: Vec3, b_size: Vec3, multiplier: f32) -> bool {
    if a_size.x <= 0.0 || a_size.y <= 0.0 || b_size.x <= 0.0 || b_size.y <= 0.0 {
        return false;
    }
    let a_center = a_pos + a_size * 0.5;
    let b_center = b_pos + b_size * 0.5;
    let reach = (a_size + b_size) * 0.5 * multiplier;
    (a_center.x - b_center.x).abs() <= reach.x && (a_center.y - b_center.y).abs() <= reach.y
}
