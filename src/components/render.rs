use glam::Vec3;

/// RGB in 0..1, the way the draw pass hands it to the sink.
pub struct Color(pub Vec3);

/// Alpha in 0..1.
pub struct Opacity(pub f32);

/// Marker that excludes a body from the draw pass without despawning it.
pub struct Hidden;
