//! Cosmetic horizontal scrolling for the backdrop and ground strip

use serde::{Deserialize, Serialize};

/// A wrapping offset. Has no effect on gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scroller {
    pub x: f32,
    speed: f32,
    wrap: f32,
}

impl Scroller {
    pub fn new(speed: f32, wrap: f32) -> Self {
        Self { x: 0.0, speed, wrap }
    }

    /// Move left by `speed`, wrapping so `x` stays in `(-wrap, 0]`
    pub fn tick(&mut self) {
        self.x = (self.x - self.speed) % self.wrap;
    }
}
