use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load or parse a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Top-level settings tree.
///
/// Every field carries a serde default equal to the engine's hard-coded
/// tuning, so a partial RON file overrides only what it names. Each mechanic
/// clones the slice of this tree it needs exactly once at bind time; there
/// are no fallback lookups in the per-frame path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub frames: FrameSettings,
    pub physics: PhysicsSettings,
    pub player: PlayerSettings,
    pub controls: ControlSettings,
    pub screen: ScreenSettings,
}

impl Settings {
    /// Load settings from a RON file, merged over defaults field-by-field.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }
}

/// Frame pacing: target rate and the clamp range for the per-frame
/// time-scale factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Target frames per second.
    pub goal: f64,
    /// Lower clamp on the time-scale factor.
    pub throttle: f64,
    /// Upper clamp on the time-scale factor (guards against huge deltas
    /// after a stall).
    pub clamp: f64,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            goal: 60.0,
            throttle: 0.5,
            clamp: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Gravity strength, divided by 100 to get the per-frame force.
    pub gravity: f32,
    /// Friction strength, divided by 100 to get the velocity multiplier.
    pub friction: f32,
    /// Broad-phase rejection multiplier on summed half-extents.
    pub broad_phase: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 80.0,
            friction: 65.0,
            broad_phase: 1.5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    #[serde(rename = "move")]
    pub movement: MoveSettings,
    pub orient: OrientSettings,
    pub jumps: JumpSettings,
    pub dash: DashSettings,
    pub wall: WallSettings,
}

/// Horizontal locomotion tuning shared by the walk-stage pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveSettings {
    /// Instant impulse applied on a direction edge.
    pub base: f32,
    /// Top walking speed the acceleration ramp approaches.
    pub speed: f32,
    /// Sprint speed once `run_hold` has elapsed.
    pub run: f32,
    /// Hold duration (ms) over which speed ramps from base to max.
    pub accel: f64,
    /// Exclusive hold duration (ms) before sprint engages.
    pub run_hold: f64,
    /// Velocity multiplier applied on an opposite-direction edge.
    pub multiplier: f32,
    /// Holds shorter than this (ms) count as micro taps.
    pub tap: f64,
    /// Velocity multiplier applied on a micro-tap release.
    pub micro: f32,
}

impl Default for MoveSettings {
    fn default() -> Self {
        Self {
            base: 1.0,
            speed: 10.0,
            run: 16.0,
            accel: 100.0,
            run_hold: 100.0,
            multiplier: 0.4,
            tap: 120.0,
            micro: 0.3,
        }
    }
}

/// Facing-flip debounce tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientSettings {
    /// The new direction must be held this long (ms) before a flip commits.
    pub debounce: f64,
    /// Extra window (ms) after the debounce during which the flip may still
    /// commit before the pending press is discarded.
    pub flip_grace: f64,
}

impl Default for OrientSettings {
    fn default() -> Self {
        Self {
            debounce: 40.0,
            flip_grace: 30.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpSettings {
    pub ground: GroundJumpSettings,
    pub coyote: CoyoteSettings,
    pub fall: FallSettings,
    pub wall: WallJumpSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundJumpSettings {
    /// Upward impulse magnitude.
    pub power: f32,
    /// Maximum jumps per airtime (2 = double jump).
    pub max: u32,
}

impl Default for GroundJumpSettings {
    fn default() -> Self {
        Self { power: 16.0, max: 2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoyoteSettings {
    /// Grace window (ms) after walking off an edge.
    pub time: f64,
}

impl Default for CoyoteSettings {
    fn default() -> Self {
        Self { time: 300.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallSettings {
    /// Terminal downward velocity.
    pub terminal: f32,
}

impl Default for FallSettings {
    fn default() -> Self {
        Self { terminal: 16.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallJumpSettings {
    /// Vertical impulse magnitude. Zero disables the mechanic.
    pub power: f32,
    /// Horizontal impulse away from the wall.
    pub lateral: f32,
    /// Locked-impulse window (ms) during which locomotion is suspended.
    pub time: f64,
}

impl Default for WallJumpSettings {
    fn default() -> Self {
        Self {
            power: 18.0,
            lateral: 18.0,
            time: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashSettings {
    /// Uses allowed before grounding/walling resets the counter.
    pub limit: u32,
    pub times: DashTimes,
    pub can: DashPermissions,
    pub power: DashPower,
    pub reset: DashReset,
}

impl Default for DashSettings {
    fn default() -> Self {
        Self {
            limit: 3,
            times: DashTimes::default(),
            can: DashPermissions::default(),
            power: DashPower::default(),
            reset: DashReset::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashTimes {
    /// Impulse duration (ms).
    pub duration: f64,
    /// Cooldown (ms) before the next dash.
    pub cooldown: f64,
    /// Zero-gravity hover (ms) appended after the impulse.
    pub hover: f64,
}

impl Default for DashTimes {
    fn default() -> Self {
        Self {
            duration: 80.0,
            cooldown: 250.0,
            hover: 250.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashPermissions {
    pub air: bool,
    pub ground: bool,
    pub wall: bool,
}

impl Default for DashPermissions {
    fn default() -> Self {
        Self {
            air: true,
            ground: false,
            wall: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashPower {
    pub x: f32,
    pub y: f32,
}

impl Default for DashPower {
    fn default() -> Self {
        Self { x: 75.0, y: 75.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashReset {
    pub ground: bool,
    pub wall: bool,
}

impl Default for DashReset {
    fn default() -> Self {
        Self {
            ground: true,
            wall: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WallSettings {
    pub grab: GrabSettings,
    pub slide: SlideSettings,
    pub climb: ClimbSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabSettings {
    pub stamina: StaminaSettings,
}

/// Depletable grip resource. All values are milliseconds or per-millisecond
/// rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaSettings {
    /// Total capacity (ms of grip at drain rate 1).
    pub max: f64,
    /// Depletion multiplier (1 = realtime).
    pub drain: f64,
    /// Delay (ms) after a drain before recharge begins.
    pub delay: f64,
    /// Recharge per elapsed millisecond.
    pub rate: f64,
}

impl Default for StaminaSettings {
    fn default() -> Self {
        Self {
            max: 2000.0,
            drain: 1.0,
            delay: 500.0,
            rate: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideSettings {
    /// Fraction of gravity applied while sliding.
    pub factor: f32,
    /// Maximum slide descent speed.
    pub max: f32,
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self {
            factor: 0.5,
            max: 6.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbSettings {
    /// Target ascent speed.
    pub speed: f32,
    /// Smoothing toward the target per scaled frame (<= 0 sets instantly).
    pub accel: f32,
    /// Maximum ascent speed.
    pub max: f32,
}

impl Default for ClimbSettings {
    fn default() -> Self {
        Self {
            speed: 10.0,
            accel: 0.25,
            max: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub history: HistorySettings,
    pub combos: ComboSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Ring capacity for press/release events.
    pub max: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max: 256 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboSettings {
    /// Minimum gap (ms) between two fires of the same combo.
    pub cooldown: f64,
    /// Window (ms) inside which a double-tap sequence must complete.
    pub window: f64,
}

impl Default for ComboSettings {
    fn default() -> Self {
        Self {
            cooldown: 30.0,
            window: 200.0,
        }
    }
}

/// Demo presentation: window size in pixels and how many pixels one world
/// unit spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    pub width: u32,
    pub height: u32,
    pub unit: f32,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            unit: 24.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_tuning() {
        let s = Settings::default();
        assert_eq!(s.frames.goal, 60.0);
        assert_eq!(s.physics.gravity, 80.0);
        assert_eq!(s.player.jumps.ground.power, 16.0);
        assert_eq!(s.player.jumps.ground.max, 2);
        assert_eq!(s.player.dash.times.hover, 250.0);
        assert_eq!(s.player.wall.grab.stamina.max, 2000.0);
        assert_eq!(s.controls.history.max, 256);
    }

    #[test]
    fn partial_ron_overrides_only_named_fields() {
        let s: Settings =
            ron::from_str("(player: (jumps: (ground: (power: 22.0))))").expect("parse");
        assert_eq!(s.player.jumps.ground.power, 22.0);
        // Unnamed siblings keep their defaults.
        assert_eq!(s.player.jumps.ground.max, 2);
        assert_eq!(s.player.jumps.coyote.time, 300.0);
        assert_eq!(s.physics.friction, 65.0);
    }

    #[test]
    fn settings_round_trip() {
        let s = Settings::default();
        let text = ron::to_string(&s).expect("serialize");
        let back: Settings = ron::from_str(&text).expect("parse");
        assert_eq!(back.player.dash.power.x, s.player.dash.power.x);
        assert_eq!(back.player.movement.run_hold, s.player.movement.run_hold);
    }
}
