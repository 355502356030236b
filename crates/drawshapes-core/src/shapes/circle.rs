//! Circle shape.

use super::{Color, ScaleDirection, ScalePolicy, ShapeError, ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::{BoundingBox, Point};
use kurbo::{BezPath, Circle as KurboCircle, Shape as KurboShape};
use std::fmt;
use uuid::Uuid;

/// A circle anchored at its center.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub(crate) id: ShapeId,
    center: Point,
    diameter: i32,
    color: Color,
    selected: bool,
    bounds: BoundingBox,
}

impl Circle {
    /// Circles grow by a quarter and shrink by a quarter; the center stays put.
    pub const SCALE: ScalePolicy = ScalePolicy { up: 1.25, down: 0.75 };

    /// Create a new unselected circle.
    pub fn new(color: Color, center: Point, diameter: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            diameter,
            color,
            selected: false,
            bounds: Self::bounds_for(center, diameter),
        }
    }

    /// The box spans `diameter / 2` on each side of the center, so odd diameters lose a pixel.
    fn bounds_for(center: Point, diameter: i32) -> BoundingBox {
        BoundingBox::saturating_around(center, diameter / 2)
    }

    pub fn diameter(&self) -> i32 {
        self.diameter
    }

    pub fn center(&self) -> Point {
        self.center
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn anchor(&self) -> Point {
        self.center
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
        self.center.translate(dx, dy);
        self.bounds.translate(dx, dy);
    }

    fn set_anchor_point(&mut self, anchor: Point) {
        self.center = anchor;
        self.bounds = Self::bounds_for(anchor, self.diameter);
    }

    fn to_path(&self) -> BezPath {
        KurboCircle::new(self.center.to_kurbo(), self.diameter as f64 / 2.0).to_path(0.1)
    }

    fn scale(&mut self, direction: ScaleDirection) -> Result<(), ShapeError> {
        let diameter = Self::SCALE.apply(self.diameter, direction);
        self.bounds = BoundingBox::checked_around(self.center, diameter / 2).ok_or(
            ShapeError::OutOfRange {
                operation: direction.operation(),
                shape: ShapeKind::Circle,
            },
        )?;
        self.diameter = diameter;
        Ok(())
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            ShapeKind::Circle.keyword(),
            self.center.x,
            self.center.y,
            self.diameter,
            self.color,
            self.selected
        )
    }
}
