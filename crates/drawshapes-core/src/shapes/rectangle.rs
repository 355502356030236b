//! Rectangle shape.

use super::{Color, ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::{BoundingBox, Point};
use kurbo::{BezPath, Shape as KurboShape};
use std::fmt;
use uuid::Uuid;

/// A rectangle anchored at its top-left corner.
///
/// Rectangles have no scale policy: scaling one reports an unsupported operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    anchor: Point,
    width: i32,
    height: i32,
    color: Color,
    selected: bool,
    bounds: BoundingBox,
}

impl Rectangle {
    /// Create a new unselected rectangle.
    pub fn new(color: Color, anchor: Point, width: i32, height: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            width,
            height,
            color,
            selected: false,
            bounds: Self::bounds_for(anchor, width, height),
        }
    }

    fn bounds_for(anchor: Point, width: i32, height: i32) -> BoundingBox {
        BoundingBox::saturating_extent(anchor, width, height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn anchor(&self) -> Point {
        self.anchor
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        let (dx, dy) = self.bounds.clamp_delta(dx, dy);
        self.anchor.translate(dx, dy);
        self.bounds.translate(dx, dy);
    }

    fn set_anchor_point(&mut self, anchor: Point) {
        self.anchor = anchor;
        self.bounds = Self::bounds_for(anchor, self.width, self.height);
    }

    fn to_path(&self) -> BezPath {
        self.bounds.to_rect().to_path(0.1)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            ShapeKind::Rectangle.keyword(),
            self.anchor.x,
            self.anchor.y,
            self.width,
            self.height,
            self.color,
            self.selected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ScaleDirection, ShapeError};

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Color::Red, Point::new(424, 311), 100, 200);
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 200);
        assert_eq!(rect.bounding_box(), BoundingBox::new(424, 524, 311, 511));
    }

    #[test]
    fn test_scale_falls_back_to_unsupported() {
        let mut rect = Rectangle::new(Color::Red, Point::new(0, 0), 10, 20);
        assert!(matches!(
            rect.scale(ScaleDirection::Down),
            Err(ShapeError::UnsupportedOperation { operation: "scale_down", .. })
        ));
        assert_eq!(rect.width(), 10);
    }

    #[test]
    fn test_set_anchor_point() {
        let mut rect = Rectangle::new(Color::Black, Point::new(0, 0), 10, 20);
        rect.set_anchor_point(Point::new(-5, 5));
        assert_eq!(rect.bounding_box(), BoundingBox::new(-5, 5, 5, 25));
    }

    #[test]
    fn test_display() {
        let rect = Rectangle::new(Color::Yellow, Point::new(424, 311), 100, 200);
        assert_eq!(rect.to_string(), "RECTANGLE 424 311 100 200 YELLOW false");
    }
}
