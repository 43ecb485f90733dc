//! Axis-aligned collision tests
//!
//! Everything in the world is a box: the player, and each obstacle's solid
//! column with a vertical gap cut out of it. Screen coordinates, y grows down.

use glam::Vec2;

/// An axis-aligned box (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap of the horizontal extents (touching edges do not count)
    pub fn overlaps_span(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }
}

/// Check whether a box collides with a gated column.
///
/// The column spans `[column_left, column_right)` horizontally and is solid
/// everywhere except the gap `[gap_top, gap_top + gap_height]`.
pub fn hits_gated_column(
    body: &Rect,
    column_left: f32,
    column_right: f32,
    gap_top: f32,
    gap_height: f32,
) -> bool {
    body.overlaps_span(column_left, column_right)
        && (body.top() < gap_top || body.bottom() > gap_top + gap_height)
}
