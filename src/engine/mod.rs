mod clock;
mod combo;
mod history;
mod hooks;
mod input;
mod stamina;
mod timer;

pub use clock::Clock;
pub use combo::{ComboName, ComboRule, Combos};
pub use history::{EventKind, History, HistoryEvent, HoldState};
pub use hooks::{Callback, Event, EventData, Hooks, SuspendFor};
pub use input::{Action, InputSnapshot, InputSurface};
pub use stamina::Stamina;
pub use timer::Timer;
