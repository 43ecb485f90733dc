//! Gapwing - a one-button gate-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, obstacle field, game lifecycle)
//! - `renderer`: Draw list for a frame, issued through the `Renderer` trait
//! - `platform`: Collaborator contracts (audio, drawing, assets, input)
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use sim::{Cue, Game, GamePhase};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f32 = 500.0;
    pub const WORLD_HEIGHT: f32 = 700.0;
    pub const GROUND_HEIGHT: f32 = 150.0;

    /// Downward acceleration applied every tick
    pub const GRAVITY: f32 = 0.25;
    /// Velocity set by a flap (negative is up)
    pub const FLAP_VELOCITY: f32 = -4.6;

    /// Player collision box
    pub const PLAYER_X: f32 = WORLD_WIDTH / 2.0 - 25.0;
    pub const PLAYER_START_Y: f32 = 150.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 35.0;

    /// Tilt while rising (-25 degrees)
    pub const UP_TILT: f32 = -25.0 * std::f32::consts::PI / 180.0;
    /// Radians of nose-down tilt per unit of falling velocity
    pub const ROTATION_GAIN: f32 = 0.1;
    pub const MAX_DOWN_TILT: f32 = std::f32::consts::FRAC_PI_2;

    /// Obstacle defaults
    pub const OBSTACLE_SPEED: f32 = 2.0;
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const GAP_HEIGHT: f32 = 150.0;
    pub const GAP_MARGIN: f32 = 40.0;
    pub const SPAWN_INTERVAL_FRAMES: u64 = 100;

    /// Cosmetic scroll speed of the backdrop
    pub const BACKGROUND_SPEED: f32 = 0.5;
}
