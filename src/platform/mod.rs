//! Platform abstraction layer
//!
//! Contracts between the simulation and its collaborators:
//! - Drawing (`Renderer`): numeric geometry only, the core owns no pixels
//! - Sound (`AudioCue`, defined next to the simulation that emits cues)
//! - Sprite loading (`assets`)
//! - Input events (`input`)
//!
//! The browser implementations live in `web` (wasm32 only).

pub mod assets;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

pub use crate::sim::{AudioCue, Cue};
pub use assets::{AssetLoader, LoadBarrier, SpriteId};
pub use input::{Activation, HostCommand, command_for_key};

/// Text styles used by the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Large running score
    Score,
    /// Game-over captions
    Caption,
}

impl TextStyle {
    /// CSS font shorthand
    pub fn font(&self) -> &'static str {
        match self {
            TextStyle::Score => "35px Arial",
            TextStyle::Caption => "20px Arial",
        }
    }
}

/// Drawing collaborator. Coordinates are world units, y grows down.
pub trait Renderer {
    /// Fill the whole surface
    fn clear(&mut self, color: &str);

    fn draw_sprite(&mut self, id: SpriteId, x: f32, y: f32, w: f32, h: f32);

    /// Draw into the rect mirrored vertically (the sprite's bottom at `y`)
    fn draw_flipped_sprite(&mut self, id: SpriteId, x: f32, y: f32, w: f32, h: f32);

    /// Draw centred on `center`, rotated clockwise by `radians`
    fn draw_rotated_sprite(&mut self, id: SpriteId, center: Vec2, w: f32, h: f32, radians: f32);

    /// Draw outlined text centred on `x` with its baseline at `y`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
}
