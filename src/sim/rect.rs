//! Axis-aligned rectangle geometry
//!
//! Every entity, score gate and play field is a `Rect` in world units:
//! - left/top: upper-left corner (y grows downward)
//! - width/height: extents, never negative

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on a point
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Move the rectangle so its right edge sits at `right`
    #[inline]
    pub fn set_right(&mut self, right: f32) {
        self.left = right - self.width;
    }

    /// Move the rectangle so its bottom edge sits at `bottom`
    #[inline]
    pub fn set_bottom(&mut self, bottom: f32) {
        self.top = bottom - self.height;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.left += delta.x;
        self.top += delta.y;
    }

    /// Inclusive overlap test: rectangles that share an edge intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right()
            && other.left <= self.right()
            && self.top <= other.bottom()
            && other.top <= self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right() <= self.right()
            && other.top >= self.top
            && other.bottom() <= self.bottom()
    }

    /// Copy of this rectangle pushed fully inside `bounds`.
    ///
    /// Far edges are pulled in first, then near edges, so a rectangle wider
    /// (or taller) than `bounds` ends up pinned to the left (or top) edge.
    pub fn clamp_into(&self, bounds: &Rect) -> Rect {
        let mut r = *self;
        if r.right() > bounds.right() {
            r.set_right(bounds.right());
        }
        if r.left < bounds.left {
            r.left = bounds.left;
        }
        if r.bottom() > bounds.bottom() {
            r.set_bottom(bounds.bottom());
        }
        if r.top < bounds.top {
            r.top = bounds.top;
        }
        r
    }

    /// Only the horizontal part of `clamp_into`
    pub fn clamp_x_into(&self, bounds: &Rect) -> Rect {
        let clamped = self.clamp_into(bounds);
        Rect {
            top: self.top,
            ..clamped
        }
    }

    /// True when both extents are finite and non-negative
    pub fn is_well_formed(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Free-function form of [`Rect::intersects`]
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Free-function form of [`Rect::clamp_into`]
#[inline]
pub fn clamp_into(r: &Rect, bounds: &Rect) -> Rect {
    r.clamp_into(bounds)
}
