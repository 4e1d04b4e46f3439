//! Mathfall - a falling-digits arithmetic arcade game
//!
//! Core modules:
//! - `sim`: Deterministic game logic (lanes, spawning, round state machine)
//! - `render`: Draw-intent production (plus the Canvas-2D rasterizer on wasm)
//! - `announce`: Spoken-feedback capability used by the state machine
//! - `control`: Remote start/stop channel messages
//! - `game`: The `Game` capability interface and its one concrete implementation

pub mod announce;
pub mod control;
pub mod game;
pub mod render;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use game::{Game, MathfallGame};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Side of a digit's square hit box, and its glyph size in canvas units
    pub const DIGIT_SIZE: f32 = 132.0;
    /// Horizontal gap between lanes
    pub const LANE_PADDING: f32 = 20.0;

    /// Seconds of accumulated play time between spawn attempts
    pub const SPAWN_INTERVAL: f32 = 0.7;
    /// Horizontal tolerance when checking a lane for a blocking digit
    pub const STACK_TOLERANCE: f32 = 5.0;
    /// A digit closer to the top than this blocks its lane from spawning
    pub const STACK_CLEARANCE: f32 = DIGIT_SIZE * 1.5;

    /// Minimum fall speed, units/second
    pub const FALL_SPEED_BASE: f32 = 80.0;
    /// Uniform random speed spread added on top of the base
    pub const FALL_SPEED_SPREAD: f32 = 40.0;
    /// Digits past the bottom edge by this margin are culled
    pub const CULL_MARGIN: f32 = 50.0;

    /// Problems never sum past this
    pub const MAX_SUM: u8 = 10;
    /// Rounds per session until an operator says otherwise
    pub const DEFAULT_MAX_ROUNDS: u32 = 10;

    /// How long the correct/wrong feedback screens hold, in seconds
    pub const FEEDBACK_CORRECT_SECS: f32 = 1.5;
    pub const FEEDBACK_WRONG_SECS: f32 = 0.5;
}
