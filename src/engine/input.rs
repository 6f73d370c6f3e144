/// Logical input actions the simulation understands.
///
/// Device plumbing stays outside the crate; a host maps its keys, pads, or
/// scripted sequences onto these and hands the result to the frame pump
/// through [`InputSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Jump,
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            Action::Left => 0,
            Action::Right => 1,
            Action::Up => 2,
            Action::Down => 3,
            Action::Jump => 4,
        }
    }
}

/// The only question the simulation ever asks an input device.
pub trait InputSurface {
    /// Is `action` held down right now?
    fn pressed(&self, action: Action) -> bool;
}

/// A frozen copy of the surface for one frame.
///
/// The pump captures this once per frame so every mechanic sees the same
/// input state regardless of tick order. Also handy as a hand-rolled surface
/// in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    down: [bool; 5],
}

impl InputSnapshot {
    pub fn capture(surface: &dyn InputSurface) -> Self {
        let mut down = [false; 5];
        for action in Action::ALL {
            down[action.index()] = surface.pressed(action);
        }
        Self { down }
    }

    pub fn press(&mut self, action: Action) -> &mut Self {
        self.down[action.index()] = true;
        self
    }

    pub fn release(&mut self, action: Action) -> &mut Self {
        self.down[action.index()] = false;
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.down = [false; 5];
        self
    }
}

impl InputSurface for InputSnapshot {
    fn pressed(&self, action: Action) -> bool {
        self.down[action.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_captures_surface_state() {
        let mut src = InputSnapshot::default();
        src.press(Action::Left).press(Action::Jump);
        let snap = InputSnapshot::capture(&src);
        assert!(snap.pressed(Action::Left));
        assert!(snap.pressed(Action::Jump));
        assert!(!snap.pressed(Action::Right));
    }

    #[test]
    fn press_release_round_trip() {
        let mut s = InputSnapshot::default();
        s.press(Action::Up);
        assert!(s.pressed(Action::Up));
        s.release(Action::Up);
        assert!(!s.pressed(Action::Up));
    }
}
