use crate::config::PhysicsSettings;

/// Downward pull, normalized from the 0..100 setting to room units.
#[derive(Debug, Clone, Copy)]
pub struct Gravity {
    pub base: f32,
    pub force: f32,
}

impl Gravity {
    pub fn new(settings: &PhysicsSettings) -> Self {
        let base = settings.gravity / 100.0;
        Self { base, force: base }
    }

    pub fn reset(&mut self) {
        self.force = self.base;
    }
}

/// Ground drag, normalized the same way.
#[derive(Debug, Clone, Copy)]
pub struct Friction {
    pub base: f32,
    pub force: f32,
}

impl Friction {
    pub fn new(settings: &PhysicsSettings) -> Self {
        let base = settings.friction / 100.0;
        Self { base, force: base }
    }

    pub fn reset(&mut self) {
        self.force = self.base;
    }
}
