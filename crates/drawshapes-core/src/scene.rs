//! The scene: an ordered collection of shapes.
//!
//! Sequence order is the z-order: the first shape is the back-most, the last one the front-most.
//! There is no separate layer index.
//!
//! A scene is a plain owned value. Every mutation goes through `&mut Scene`, so structural edits
//! (add, remove, reorder, reload) and periodic effect steps can never interleave without the
//! caller serializing them.

use crate::geometry::Point;
use crate::selection::{DragState, SelectionRectangle};
use crate::shapes::{Bounded, DrawCommand, ScaleDirection, Shape, ShapeError, ShapeId};
use std::fmt;

/// An ordered, mutable collection of shapes plus the transient marquee state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Shapes in z-order (back to front).
    shapes: Vec<Shape>,
    /// Marquee gesture state. Not copied into snapshots.
    drag: DragState,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from shapes already in z-order.
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            drag: DragState::Idle,
        }
    }

    /// Add a shape in front of every other shape.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Remove every listed shape, keeping the relative order of the rest.
    /// Returns the number of shapes removed.
    pub fn remove_shapes(&mut self, ids: &[ShapeId]) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| !ids.contains(&s.id()));
        before - self.shapes.len()
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Shape> {
        self.shapes.iter_mut()
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Position of a shape in the z-order.
    pub fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Find shapes whose bounding box contains a point, in z-order (back to front).
    pub fn select_at(&self, point: Point) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.contains(point))
            .map(Shape::id)
            .collect()
    }

    /// Find shapes whose bounding box intersects the target's, in z-order.
    /// A shape is never reported as intersecting itself.
    pub fn select_intersecting<B: Bounded + ?Sized>(&self, target: &B) -> Vec<ShapeId> {
        let bounds = target.bounding_box();
        let skip = target.shape_id();
        self.shapes
            .iter()
            .filter(|s| Some(s.id()) != skip && s.bounding_box().intersects(&bounds))
            .map(Shape::id)
            .collect()
    }

    /// Mark the listed shapes as selected. Other shapes keep their state.
    pub fn mark_selected(&mut self, ids: &[ShapeId]) {
        for shape in self.shapes.iter_mut().filter(|s| ids.contains(&s.id())) {
            shape.set_selected(true);
        }
    }

    /// Deselect every shape.
    pub fn clear_selection(&mut self) {
        for shape in &mut self.shapes {
            shape.set_selected(false);
        }
    }

    /// IDs of the selected shapes, in z-order.
    pub fn selected_ids(&self) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.is_selected())
            .map(Shape::id)
            .collect()
    }

    /// Begin a marquee gesture at a point.
    pub fn start_drag(&mut self, origin: Point) {
        log::debug!("Marquee started at ({}, {})", origin.x, origin.y);
        self.drag = DragState::Dragging { origin, rect: None };
    }

    /// Update the marquee to reach a new pointer position and reselect.
    ///
    /// All selections are cleared first; then every shape intersecting the rectangle from the
    /// drag origin to `current` is selected, whichever direction the drag goes.
    pub fn update_select_rect(&mut self, current: Point) {
        let DragState::Dragging { origin, .. } = self.drag else {
            log::warn!("Ignoring marquee update at ({}, {}) with no drag in progress", current.x, current.y);
            return;
        };
        self.clear_selection();
        let rect = SelectionRectangle::from_drag(origin, current);
        let hits = self.select_intersecting(&rect);
        self.mark_selected(&hits);
        self.drag = DragState::Dragging {
            origin,
            rect: Some(rect),
        };
    }

    /// End the marquee gesture. The selection is kept.
    pub fn stop_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// The marquee rectangle while a drag is in progress.
    pub fn selection_rect(&self) -> Option<&SelectionRectangle> {
        self.drag.rect()
    }

    /// Translate every selected shape.
    ///
    /// Each shape stops at the edge of the `i32` coordinate range instead of wrapping.
    pub fn move_selected(&mut self, dx: i32, dy: i32) {
        for shape in self.shapes.iter_mut().filter(|s| s.is_selected()) {
            shape.move_by(dx, dy);
        }
    }

    /// Scale every selected shape in one direction.
    ///
    /// Shapes that support scaling are all scaled; the first failure, if any, is returned after.
    pub fn scale_selected(&mut self, direction: ScaleDirection) -> Result<(), ShapeError> {
        let mut first_error = None;
        for shape in self.shapes.iter_mut().filter(|s| s.is_selected()) {
            let result = match direction {
                ScaleDirection::Up => shape.scale_up(),
                ScaleDirection::Down => shape.scale_down(),
            };
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Move one selected shape one layer toward the front.
    ///
    /// Scans from the second-to-last position backward and swaps the first selected shape found
    /// with its neighbour in front. At most one swap per call; the front-most shape is never
    /// a candidate. Returns true if a swap happened.
    pub fn bring_forward(&mut self) -> bool {
        if self.shapes.len() < 2 {
            return false;
        }
        for i in (0..self.shapes.len() - 1).rev() {
            if self.shapes[i].is_selected() {
                self.shapes.swap(i, i + 1);
                return true;
            }
        }
        false
    }

    /// Move one selected shape one layer toward the back.
    ///
    /// Scans from the second position forward and swaps the first selected shape found with its
    /// neighbour behind. At most one swap per call. Returns true if a swap happened.
    pub fn send_backward(&mut self) -> bool {
        for i in 1..self.shapes.len() {
            if self.shapes[i].is_selected() {
                self.shapes.swap(i - 1, i);
                return true;
            }
        }
        false
    }

    /// Deep-copy the shapes into a new, idle scene.
    pub fn copy(&self) -> Scene {
        Scene::from_shapes(self.shapes.iter().map(Shape::copy).collect())
    }

    /// Replace this scene's shapes with a deep copy of another scene's shapes.
    pub fn reload(&mut self, other: &Scene) {
        self.shapes = other.shapes.iter().map(Shape::copy).collect();
    }

    /// Take over another scene's shapes without copying.
    pub(crate) fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// Consume the scene, keeping only its shapes in z-order.
    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }

    /// Paint list in z-order, followed by the marquee outline while dragging.
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        let mut commands: Vec<DrawCommand> = self.shapes.iter().map(Shape::draw_command).collect();
        if let Some(rect) = self.selection_rect() {
            commands.push(rect.draw_command());
        }
        commands
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shape in &self.shapes {
            writeln!(f, "{shape}")?;
        }
        Ok(())
    }
}
