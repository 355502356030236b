//! Marquee selection.

use crate::geometry::{BoundingBox, Point};
use crate::shapes::{Bounded, DrawCommand};
use kurbo::Shape as KurboShape;

/// The rectangle swept by a drag-select gesture. Never part of the persisted scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRectangle {
    bounds: BoundingBox,
}

impl SelectionRectangle {
    /// Create the rectangle spanned by the drag origin and the current pointer position,
    /// normalized for every drag direction.
    pub fn from_drag(origin: Point, current: Point) -> Self {
        Self {
            bounds: BoundingBox::from_corners(origin, current),
        }
    }

    /// Outline drawn while the gesture is active.
    pub fn draw_command(&self) -> DrawCommand {
        DrawCommand {
            path: self.bounds.to_rect().to_path(0.1),
            fill: None,
            stroke: Some(peniko::Color::from_rgba8(0, 0, 0, 255)),
        }
    }
}

impl Bounded for SelectionRectangle {
    fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }
}

/// State of the marquee gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Where the gesture started.
        origin: Point,
        /// Rectangle from the last pointer update, if the pointer has moved yet.
        rect: Option<SelectionRectangle>,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// The current selection rectangle, if a drag is in progress and has moved.
    pub fn rect(&self) -> Option<&SelectionRectangle> {
        match self {
            DragState::Dragging { rect, .. } => rect.as_ref(),
            DragState::Idle => None,
        }
    }
}
