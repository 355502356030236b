//! Square shape.

use super::{Color, ScaleDirection, ScalePolicy, ShapeError, ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::{BoundingBox, Point};
use kurbo::{BezPath, Shape as KurboShape};
use std::fmt;
use uuid::Uuid;

/// A square anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    pub(crate) id: ShapeId,
    anchor: Point,
    side: i32,
    color: Color,
    selected: bool,
    bounds: BoundingBox,
}

impl Square {
    /// Squares grow by a quarter and shrink by a fifth; the corner stays put.
    pub const SCALE: ScalePolicy = ScalePolicy { up: 1.25, down: 0.80 };

    /// Create a new unselected square.
    pub fn new(color: Color, anchor: Point, side: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            side,
            color,
            selected: false,
            bounds: Self::bounds_for(anchor, side),
        }
    }

    fn bounds_for(anchor: Point, side: i32) -> BoundingBox {
        BoundingBox::saturating_extent(anchor, side, side)
    }

    /// Side length.
    pub fn side(&self) -> i32 {
        self.side
    }
}

impl ShapeTrait for Square {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Square
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
        self.bounds = Self::bounds_for(anchor, self.side);
    }

    fn to_path(&self) -> BezPath {
        self.bounds.to_rect().to_path(0.1)
    }

    fn scale(&mut self, direction: ScaleDirection) -> Result<(), ShapeError> {
        let side = Self::SCALE.apply(self.side, direction);
        self.bounds = BoundingBox::checked_extent(self.anchor, side, side).ok_or(
            ShapeError::OutOfRange {
                operation: direction.operation(),
                shape: ShapeKind::Square,
            },
        )?;
        self.side = side;
        Ok(())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            ShapeKind::Square.keyword(),
            self.anchor.x,
            self.anchor.y,
            self.side,
            self.color,
            self.selected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_creation() {
        let square = Square::new(Color::Red, Point::new(185, 110), 100);
        assert_eq!(square.anchor(), Point::new(185, 110));
        assert_eq!(square.side(), 100);
        assert!(!square.is_selected());
        assert_eq!(square.bounding_box(), BoundingBox::new(185, 285, 110, 210));
    }

    #[test]
    fn test_scale_keeps_corner() {
        let mut square = Square::new(Color::Red, Point::new(10, 20), 100);
        square.scale(ScaleDirection::Up).unwrap();
        assert_eq!(square.side(), 125);
        assert_eq!(square.bounding_box(), BoundingBox::new(10, 135, 20, 145));

        square.scale(ScaleDirection::Down).unwrap();
        assert_eq!(square.side(), 100);
        assert_eq!(square.bounding_box(), BoundingBox::new(10, 110, 20, 120));
    }

    #[test]
    fn test_scale_truncates() {
        let mut square = Square::new(Color::Red, Point::new(0, 0), 7);
        square.scale(ScaleDirection::Up).unwrap();
        assert_eq!(square.side(), 8);
        square.scale(ScaleDirection::Down).unwrap();
        assert_eq!(square.side(), 6);
    }

    #[test]
    fn test_scale_past_range_is_rejected() {
        let anchor = Point::new(i32::MAX - 110, 0);
        let mut square = Square::new(Color::Red, anchor, 100);
        let err = square.scale(ScaleDirection::Up).unwrap_err();
        assert_eq!(
            err,
            ShapeError::OutOfRange {
                operation: "scale_up",
                shape: ShapeKind::Square
            }
        );
        assert_eq!(square.side(), 100);
        assert_eq!(square.bounding_box().right(), i32::MAX - 10);

        square.scale(ScaleDirection::Down).unwrap();
        assert_eq!(square.side(), 80);
    }

    #[test]
    fn test_translate_stops_at_range_edge() {
        let mut square = Square::new(Color::Red, Point::new(i32::MAX - 15, 0), 10);
        square.translate(20, 0);
        assert_eq!(square.anchor(), Point::new(i32::MAX - 10, 0));
        assert_eq!(square.bounding_box().right(), i32::MAX);
        assert_eq!(square.bounding_box().width(), 10);
    }

    #[test]
    fn test_set_anchor_point() {
        let mut square = Square::new(Color::Cyan, Point::new(0, 0), 40);
        square.set_anchor_point(Point::new(100, 200));
        assert_eq!(square.side(), 40);
        assert_eq!(square.color(), Color::Cyan);
        assert_eq!(square.bounding_box(), BoundingBox::new(100, 140, 200, 240));
    }

    #[test]
    fn test_display() {
        let mut square = Square::new(Color::Red, Point::new(185, 110), 100);
        assert_eq!(square.to_string(), "SQUARE 185 110 100 RED false");
        square.set_selected(true);
        assert_eq!(square.to_string(), "SQUARE 185 110 100 RED true");
    }
}
