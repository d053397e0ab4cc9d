// geom.rs - Points, sizes and axis-aligned rectangles
//
// All runtime geometry is f32 in viewport pixels.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, top-left origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of `size` centred on `c`
    pub fn centered(c: Point, size: Size) -> Self {
        Self::new(c.x - size.width * 0.5, c.y - size.height * 0.5, size.width, size.height)
    }

    #[inline]
    pub fn left(&self) -> f32 { self.x }
    #[inline]
    pub fn right(&self) -> f32 { self.x + self.width }
    #[inline]
    pub fn top(&self) -> f32 { self.y }
    #[inline]
    pub fn bottom(&self) -> f32 { self.y + self.height }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn scaled(&self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.width * s, self.height * s)
    }

    /// Grow by `pad` on every side
    pub fn expanded(&self, pad: f32) -> Self {
        Self::new(self.x - pad, self.y - pad, self.width + pad * 2.0, self.height + pad * 2.0)
    }

    /// Strict overlap on both axes (touching edges do not count)
    pub fn overlaps(&self, o: &Rect) -> bool {
        self.right() > o.left() && self.left() < o.right()
            && self.bottom() > o.top() && self.top() < o.bottom()
    }

    /// True if this rect lies fully inside `0..w` x `0..h`
    pub fn inside(&self, w: f32, h: f32) -> bool {
        self.left() >= 0.0 && self.top() >= 0.0 && self.right() <= w && self.bottom() <= h
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }
