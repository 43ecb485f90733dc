//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, no wall-clock time
//! - Seeded RNG only
//! - Obstacles kept in spawn order (which is also x order)
//! - No rendering or platform dependencies; sound is requested through [`AudioCue`]

pub mod autopilot;
pub mod collision;
pub mod obstacles;
pub mod player;
pub mod scroller;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Rect, hits_gated_column};
pub use obstacles::{FieldReport, Obstacle, ObstacleField};
pub use player::PlayerBody;
pub use scroller::Scroller;
pub use state::{AudioCue, Cue, GamePhase, GameSession};
pub use tick::Game;
