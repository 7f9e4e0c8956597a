//! Axis-aligned collision tests
//!
//! Every entity in the play area is a rectangle in screen space (origin at
//! the top-left corner, y growing downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A positioned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
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

    /// Horizontal centre
    pub fn center_x(&self) -> f32 {
        self.min.x + self.size.x / 2.0
    }
}

/// True unless the rectangles are strictly separated on some axis.
///
/// Touching edges count as a hit.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    !(a.top() > b.bottom() || a.right() < b.left() || a.bottom() < b.top() || a.left() > b.right())
}
