//! Wall interaction. Grab is the base state (airborne, pressing into a
//! touched wall, stamina available); Climb and Slide both require an active
//! grab and split on whether the grip still has stamina behind it. WallJump
//! stands alone: it needs only wall contact, not a grab.

mod climb;
mod grab;
mod jump;
mod slide;

pub use climb::WallClimb;
pub use grab::WallGrab;
pub use jump::WallJump;
pub use slide::WallSlide;
