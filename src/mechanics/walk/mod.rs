//! Horizontal locomotion, split into single-purpose stages that run in a
//! fixed order each frame: Nudge, Brake, Accelerate, Sprint, MicroTap,
//! Decay. Every stage writes only `velocity.x`; position in the pipeline is
//! what arbitrates between them.

mod accelerate;
mod brake;
mod decay;
mod microtap;
mod nudge;
mod sprint;

pub use accelerate::Accelerate;
pub use brake::Brake;
pub use decay::Decay;
pub use microtap::MicroTap;
pub use nudge::Nudge;
pub use sprint::Sprint;

use crate::engine::{Action, History};

/// Exclusive-direction hold duration: the time `action` has been held while
/// its opposite is up, or `None` when not exclusively held.
fn exclusive_hold(history: &History, action: Action) -> Option<f64> {
    let opposite = match action {
        Action::Left => Action::Right,
        Action::Right => Action::Left,
        _ => return None,
    };
    let hold = history.hold(action)?;
    if !hold.down {
        return None;
    }
    if history.hold(opposite).map_or(false, |o| o.down) {
        return None;
    }
    Some(hold.duration)
}
