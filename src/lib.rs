//! Per-frame simulation core for a 2D platformer.
//!
//! The crate owns time (one [`engine::Clock`] per simulation), input history,
//! an event dispatcher, AABB collision with axis-separated resolution, and an
//! ordered pipeline of movement mechanics (walk, jump, coyote, dash, the
//! wall group). The host owns the window, the real input device, and pixels:
//! it feeds timestamps and an [`engine::InputSurface`] into
//! [`sim::Simulation::frame`] and hands a [`render::RenderSink`] to
//! [`render::draw`].

pub mod camera;
pub mod components;
pub mod config;
pub mod engine;
pub mod mechanics;
pub mod physics;
pub mod render;
pub mod scene;
pub mod sim;

pub use config::Settings;
pub use sim::{Room, SimCtx, SimError, Simulation};
