//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults reproduce the
//! classic feel; hosts may override any subset from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning blob is rejected
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A value was infinite or NaN
    NonFinite { field: &'static str, value: f32 },
    /// A value that must be strictly positive was not
    NonPositive { field: &'static str, value: f32 },
    /// A value that must not be negative was
    Negative { field: &'static str, value: f32 },
    /// The flap impulse does not point upward
    FlapNotUpward { value: f32 },
    /// The spawn interval was zero
    ZeroSpawnInterval,
    /// The gap plus both margins does not fit above the ground
    GapDoesNotFit { needed: f32, available: f32 },
    /// The player box does not fit between the ceiling and the ground
    PlayerDoesNotFit { height: f32, available: f32 },
    /// The player box lies outside the world horizontally
    PlayerOffscreen { x: f32 },
    /// The start height is above the ceiling or below the ground
    PlayerStartOutOfBounds { y: f32, max: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid tuning json: {err}"),
            Self::NonFinite { field, value } => write!(f, "{field} must be finite, got {value}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be greater than zero, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::FlapNotUpward { value } => {
                write!(f, "flap_velocity must be negative (upward), got {value}")
            }
            Self::ZeroSpawnInterval => write!(f, "spawn_interval_frames must be at least 1"),
            Self::GapDoesNotFit { needed, available } => write!(
                f,
                "gap with margins needs {needed} units but only {available} are above the ground"
            ),
            Self::PlayerDoesNotFit { height, available } => write!(
                f,
                "player height {height} does not fit in the {available} units above the ground"
            ),
            Self::PlayerOffscreen { x } => write!(f, "player x {x} is outside the world"),
            Self::PlayerStartOutOfBounds { y, max } => {
                write!(f, "player_start_y {y} must lie between 0 and {max}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Gameplay constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_width: f32,
    pub world_height: f32,
    pub ground_height: f32,

    pub gravity: f32,
    pub flap_velocity: f32,

    pub player_x: f32,
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,

    pub up_tilt: f32,
    pub rotation_gain: f32,
    pub max_down_tilt: f32,

    pub obstacle_speed: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub gap_margin: f32,
    pub spawn_interval_frames: u64,

    pub background_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,

            player_x: PLAYER_X,
            player_start_y: PLAYER_START_Y,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            up_tilt: UP_TILT,
            rotation_gain: ROTATION_GAIN,
            max_down_tilt: MAX_DOWN_TILT,

            obstacle_speed: OBSTACLE_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            gap_margin: GAP_MARGIN,
            spawn_interval_frames: SPAWN_INTERVAL_FRAMES,

            background_speed: BACKGROUND_SPEED,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning blob. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Y coordinate of the top of the ground strip
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.world_height - self.ground_height
    }

    /// Lowest allowed top edge for the player box
    #[inline]
    pub fn player_max_y(&self) -> f32 {
        self.floor_y() - self.player_height
    }

    /// Inclusive range a freshly spawned gap top is drawn from
    pub fn gap_top_range(&self) -> (f32, f32) {
        (
            self.gap_margin,
            self.floor_y() - self.gap_height - self.gap_margin,
        )
    }

    /// Check that the constants describe a playable world.
    ///
    /// A tuning that passes always yields a non-empty, finite gap range and a
    /// non-zero spawn interval.
    pub fn validate(&self) -> Result<(), TuningError> {
        let all = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("ground_height", self.ground_height),
            ("gravity", self.gravity),
            ("flap_velocity", self.flap_velocity),
            ("player_x", self.player_x),
            ("player_start_y", self.player_start_y),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("up_tilt", self.up_tilt),
            ("rotation_gain", self.rotation_gain),
            ("max_down_tilt", self.max_down_tilt),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("gap_margin", self.gap_margin),
            ("background_speed", self.background_speed),
        ];
        for (field, value) in all {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { field, value });
            }
        }

        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("gravity", self.gravity),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("ground_height", self.ground_height),
            ("gap_margin", self.gap_margin),
            ("rotation_gain", self.rotation_gain),
            ("max_down_tilt", self.max_down_tilt),
            ("background_speed", self.background_speed),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }

        if self.flap_velocity >= 0.0 {
            return Err(TuningError::FlapNotUpward {
                value: self.flap_velocity,
            });
        }
        if self.spawn_interval_frames == 0 {
            return Err(TuningError::ZeroSpawnInterval);
        }

        let available = self.floor_y();
        let needed = self.gap_height + 2.0 * self.gap_margin;
        if !needed.is_finite() || needed > available {
            return Err(TuningError::GapDoesNotFit { needed, available });
        }
        if self.player_height > available {
            return Err(TuningError::PlayerDoesNotFit {
                height: self.player_height,
                available,
            });
        }
        if self.player_x < 0.0 || self.player_x + self.player_width > self.world_width {
            return Err(TuningError::PlayerOffscreen { x: self.player_x });
        }
        let max = self.player_max_y();
        if self.player_start_y < 0.0 || self.player_start_y > max {
            return Err(TuningError::PlayerStartOutOfBounds {
                y: self.player_start_y,
                max,
            });
        }
        Ok(())
    }
}
