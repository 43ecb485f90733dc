//! The player body: gravity, flap impulse, cosmetic tilt and screen clamps

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{AudioCue, Cue};
use crate::tuning::Tuning;

/// Vertical kinematics of the player. Horizontal position is fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    /// Cosmetic tilt in radians, derived from velocity every tick
    pub rotation: f32,
    start_y: f32,
    gravity: f32,
    flap_velocity: f32,
    up_tilt: f32,
    rotation_gain: f32,
    max_down_tilt: f32,
    max_y: f32,
}

impl PlayerBody {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_x,
            y: tuning.player_start_y,
            width: tuning.player_width,
            height: tuning.player_height,
            velocity: 0.0,
            rotation: 0.0,
            start_y: tuning.player_start_y,
            gravity: tuning.gravity,
            flap_velocity: tuning.flap_velocity,
            up_tilt: tuning.up_tilt,
            rotation_gain: tuning.rotation_gain,
            max_down_tilt: tuning.max_down_tilt,
            max_y: tuning.player_max_y(),
        }
    }

    /// Collision box at the current position
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Lowest allowed top edge (player resting on the ground)
    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    /// Replace velocity with the upward flap impulse
    pub fn apply_impulse(&mut self, audio: &mut impl AudioCue) {
        self.velocity = self.flap_velocity;
        audio.play(Cue::Flap);
    }

    /// Integrate one tick: gravity, then position, then tilt, then clamps.
    ///
    /// Returns true when the body hit the ground while `active`. The ground
    /// clamp keeps velocity; the ceiling clamp zeroes it.
    pub fn tick(&mut self, active: bool, audio: &mut impl AudioCue) -> bool {
        self.velocity += self.gravity;
        self.y += self.velocity;

        self.rotation = if self.velocity <= 0.0 {
            self.up_tilt
        } else {
            (self.velocity * self.rotation_gain).min(self.max_down_tilt)
        };

        if self.y <= 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }

        if self.y >= self.max_y {
            self.y = self.max_y;
            if active {
                audio.play(Cue::Hit);
                return true;
            }
        }
        false
    }

    pub fn reset(&mut self) {
        self.y = self.start_y;
        self.velocity = 0.0;
        self.rotation = 0.0;
    }
}
