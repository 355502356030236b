//! Integer geometry primitives.
//!
//! Every spatial query in the editor goes through [`BoundingBox`]: shapes are hit-tested and
//! intersected by their axis-aligned boxes, never by their true outlines.

use serde::{Deserialize, Serialize};

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate this point in place, stopping at the edge of the coordinate range.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Return a translated copy of this point.
    pub fn translated(mut self, dx: i32, dy: i32) -> Self {
        self.translate(dx, dy);
        self
    }

    /// Convert to a kurbo point for path building.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned bounding box with inclusive edges.
///
/// The constructor normalizes its inputs, so `left <= right` and `top <= bottom` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl BoundingBox {
    /// Create a box from its four edges.
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
            top: top.min(bottom),
            bottom: top.max(bottom),
        }
    }

    /// Create a box spanning two arbitrary corners, whatever their relative position.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x, b.x, a.y, b.y)
    }

    /// Box with a corner at `corner` extending `width` by `height`, or `None` if the far edges
    /// fall outside the `i32` range.
    pub fn checked_extent(corner: Point, width: i32, height: i32) -> Option<Self> {
        let (left, right) = checked_span(corner.x, width)?;
        let (top, bottom) = checked_span(corner.y, height)?;
        Some(Self::new(left, right, top, bottom))
    }

    /// Box reaching `radius` on each side of `center`, or `None` outside the `i32` range.
    pub fn checked_around(center: Point, radius: i32) -> Option<Self> {
        let (left, right) = checked_spread(center.x, radius)?;
        let (top, bottom) = checked_spread(center.y, radius)?;
        Some(Self::new(left, right, top, bottom))
    }

    /// Like [`checked_extent`](Self::checked_extent), but far edges clamp to the `i32` range.
    pub fn saturating_extent(corner: Point, width: i32, height: i32) -> Self {
        Self::new(
            corner.x,
            corner.x.saturating_add(width),
            corner.y,
            corner.y.saturating_add(height),
        )
    }

    /// Like [`checked_around`](Self::checked_around), but edges clamp to the `i32` range.
    pub fn saturating_around(center: Point, radius: i32) -> Self {
        Self::new(
            center.x.saturating_sub(radius),
            center.x.saturating_add(radius),
            center.y.saturating_sub(radius),
            center.y.saturating_add(radius),
        )
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Center of the box, rounded toward the top-left.
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2,
            self.top + self.height() / 2,
        )
    }

    /// Check whether the boxes overlap on both axes. Touching edges count as overlap.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Check whether a point lies within the box, edges included.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Shrink a delta so that translating by it keeps every edge inside the `i32` range.
    pub fn clamp_delta(&self, dx: i32, dy: i32) -> (i32, i32) {
        (
            clamp_axis(self.left, self.right, dx),
            clamp_axis(self.top, self.bottom, dy),
        )
    }

    /// Translate all four edges by the same amount, clamped by [`clamp_delta`](Self::clamp_delta)
    /// so the size never changes.
    pub(crate) fn translate(&mut self, dx: i32, dy: i32) {
        let (dx, dy) = self.clamp_delta(dx, dy);
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Return a translated copy of this box.
    pub fn translated(mut self, dx: i32, dy: i32) -> Self {
        self.translate(dx, dy);
        self
    }

    /// Convert to a kurbo rect for path building.
    pub fn to_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            self.left as f64,
            self.top as f64,
            self.right as f64,
            self.bottom as f64,
        )
    }
}

/// Edges `start` and `start + length`, or `None` if the far edge leaves the `i32` range.
pub fn checked_span(start: i32, length: i32) -> Option<(i32, i32)> {
    start.checked_add(length).map(|end| (start, end))
}

/// Edges `center - radius` and `center + radius`, or `None` outside the `i32` range.
pub fn checked_spread(center: i32, radius: i32) -> Option<(i32, i32)> {
    Some((center.checked_sub(radius)?, center.checked_add(radius)?))
}

fn clamp_axis(low: i32, high: i32, delta: i32) -> i32 {
    let min = i64::from(i32::MIN) - i64::from(low);
    let max = i64::from(i32::MAX) - i64::from(high);
    // min <= 0 <= max because low <= high, and the result lies between delta and 0
    i64::from(delta).clamp(min, max) as i32
}

/// Intersection test that tolerates absent boxes: a missing box never intersects anything.
pub fn intersects(a: Option<&BoundingBox>, b: Option<&BoundingBox>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.intersects(b),
        _ => false,
    }
}
