//! Shape definitions for the editor.

mod circle;
mod color;
mod rectangle;
mod square;

pub use circle::Circle;
pub use color::Color;
pub use rectangle::Rectangle;
pub use square::Square;

use crate::geometry::{BoundingBox, Point};
use kurbo::BezPath;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
///
/// Ids are runtime handles only; they survive [`Shape::copy`] but are not written to scene files.
pub type ShapeId = Uuid;

/// Shape-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Unsupported color: {0}")]
    UnsupportedColor(String),
    #[error("Operation `{operation}` is not supported for {shape}")]
    UnsupportedOperation {
        operation: &'static str,
        shape: ShapeKind,
    },
    #[error("Operation `{operation}` would take the {shape} outside the coordinate range")]
    OutOfRange {
        operation: &'static str,
        shape: ShapeKind,
    },
}

/// The closed set of shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Square,
    Circle,
    Rectangle,
}

impl ShapeKind {
    /// Leading keyword of this variant's scene file record.
    pub fn keyword(self) -> &'static str {
        match self {
            ShapeKind::Square => "SQUARE",
            ShapeKind::Circle => "CIRCLE",
            ShapeKind::Rectangle => "RECTANGLE",
        }
    }

    /// Look up a variant by its record keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "SQUARE" => Some(ShapeKind::Square),
            "CIRCLE" => Some(ShapeKind::Circle),
            "RECTANGLE" => Some(ShapeKind::Rectangle),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Square => f.write_str("square"),
            ShapeKind::Circle => f.write_str("circle"),
            ShapeKind::Rectangle => f.write_str("rectangle"),
        }
    }
}

/// Direction of a scale step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDirection {
    Up,
    Down,
}

impl ScaleDirection {
    fn operation(self) -> &'static str {
        match self {
            ScaleDirection::Up => "scale_up",
            ScaleDirection::Down => "scale_down",
        }
    }
}

/// Growth and shrink factors of one shape variant.
///
/// Factors are not uniform across variants, and up/down are not inverses of each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePolicy {
    pub up: f64,
    pub down: f64,
}

impl ScalePolicy {
    /// Scale a length, truncating toward zero.
    pub fn apply(&self, length: i32, direction: ScaleDirection) -> i32 {
        let factor = match direction {
            ScaleDirection::Up => self.up,
            ScaleDirection::Down => self.down,
        };
        (length as f64 * factor) as i32
    }
}

/// A backend-neutral description of how to paint one item.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    /// Outline of the item in canvas coordinates.
    pub path: BezPath,
    /// Fill color, if the item is filled.
    pub fill: Option<peniko::Color>,
    /// Stroke color, if the item is outlined.
    pub stroke: Option<peniko::Color>,
}

/// Anything that can take part in bounding-box spatial queries.
pub trait Bounded {
    fn bounding_box(&self) -> BoundingBox;

    /// Identity of the value when it is a shape, so queries can skip the shape itself.
    fn shape_id(&self) -> Option<ShapeId> {
        None
    }
}

/// Common trait for all shape variants.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the variant tag.
    fn kind(&self) -> ShapeKind;

    /// Get the anchor point (corner or center, depending on the variant).
    fn anchor(&self) -> Point;

    /// Get the bounding box, always consistent with the current geometry.
    fn bounding_box(&self) -> BoundingBox;

    fn color(&self) -> Color;

    fn set_color(&mut self, color: Color);

    fn is_selected(&self) -> bool;

    fn set_selected(&mut self, selected: bool);

    /// Translate the anchor and bounding box by the same delta.
    fn translate(&mut self, dx: i32, dy: i32);

    /// Relocate the shape. Size and color are unchanged.
    fn set_anchor_point(&mut self, anchor: Point);

    /// Get the true outline for rendering.
    fn to_path(&self) -> BezPath;

    /// Grow or shrink the shape.
    ///
    /// Variants without a scale policy keep this default and report the operation as unsupported.
    fn scale(&mut self, direction: ScaleDirection) -> Result<(), ShapeError> {
        Err(ShapeError::UnsupportedOperation {
            operation: direction.operation(),
            shape: self.kind(),
        })
    }
}

/// Enum wrapper for all shape variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Square(Square),
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Shape {
    /// Create a square anchored at its top-left corner.
    pub fn square(color: Color, anchor: Point, side: i32) -> Self {
        Shape::Square(Square::new(color, anchor, side))
    }

    /// Create a circle anchored at its center.
    pub fn circle(color: Color, center: Point, diameter: i32) -> Self {
        Shape::Circle(Circle::new(color, center, diameter))
    }

    /// Create a rectangle anchored at its top-left corner.
    pub fn rectangle(color: Color, anchor: Point, width: i32, height: i32) -> Self {
        Shape::Rectangle(Rectangle::new(color, anchor, width, height))
    }

    fn inner(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Square(s) => s,
            Shape::Circle(s) => s,
            Shape::Rectangle(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Square(s) => s,
            Shape::Circle(s) => s,
            Shape::Rectangle(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.inner().id()
    }

    pub fn kind(&self) -> ShapeKind {
        self.inner().kind()
    }

    pub fn anchor(&self) -> Point {
        self.inner().anchor()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.inner().bounding_box()
    }

    pub fn color(&self) -> Color {
        self.inner().color()
    }

    pub fn set_color(&mut self, color: Color) {
        self.inner_mut().set_color(color);
    }

    pub fn is_selected(&self) -> bool {
        self.inner().is_selected()
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.inner_mut().set_selected(selected);
    }

    /// Move the shape by a delta.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.inner_mut().translate(dx, dy);
    }

    pub fn set_anchor_point(&mut self, anchor: Point) {
        self.inner_mut().set_anchor_point(anchor);
    }

    /// Grow the shape by its variant's factor.
    pub fn scale_up(&mut self) -> Result<(), ShapeError> {
        self.inner_mut().scale(ScaleDirection::Up)
    }

    /// Shrink the shape by its variant's factor.
    pub fn scale_down(&mut self) -> Result<(), ShapeError> {
        self.inner_mut().scale(ScaleDirection::Down)
    }

    /// Check whether this shape's bounding box overlaps another shape's.
    ///
    /// A shape never intersects itself or an absent shape. The test is box-based, so two circles
    /// whose boxes touch at a corner intersect even when their outlines do not.
    pub fn intersects(&self, other: Option<&Shape>) -> bool {
        match other {
            Some(other) if other.id() != self.id() => {
                self.bounding_box().intersects(&other.bounding_box())
            }
            _ => false,
        }
    }

    /// Check whether a point lies inside the bounding box.
    pub fn contains(&self, point: Point) -> bool {
        self.bounding_box().contains(point)
    }

    /// Produce an independent copy with identical variant, geometry, color, selection and id.
    pub fn copy(&self) -> Shape {
        self.clone()
    }

    /// Recolor with a random palette color.
    pub fn animate(&mut self) {
        self.animate_with(&mut rand::rng());
    }

    /// Recolor with a palette color drawn from the given random source.
    pub fn animate_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.set_color(Color::random(rng));
    }

    pub fn to_path(&self) -> BezPath {
        self.inner().to_path()
    }

    /// Describe how to paint this shape. Selected shapes are drawn darker.
    pub fn draw_command(&self) -> DrawCommand {
        let fill = if self.is_selected() {
            self.color().darker()
        } else {
            self.color().to_peniko()
        };
        DrawCommand {
            path: self.to_path(),
            fill: Some(fill),
            stroke: None,
        }
    }
}

impl Bounded for Shape {
    fn bounding_box(&self) -> BoundingBox {
        Shape::bounding_box(self)
    }

    fn shape_id(&self) -> Option<ShapeId> {
        Some(self.id())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Square(s) => s.fmt(f),
            Shape::Circle(s) => s.fmt(f),
            Shape::Rectangle(s) => s.fmt(f),
        }
    }
}

impl From<Square> for Shape {
    fn from(square: Square) -> Self {
        Shape::Square(square)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Rectangle> for Shape {
    fn from(rectangle: Rectangle) -> Self {
        Shape::Rectangle(rectangle)
    }
}
