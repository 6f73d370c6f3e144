mod collision;
mod forces;
mod resolve;

pub use collision::{near, overlaps};
pub use forces::{Friction, Gravity};
pub use resolve::resolve;
