//! Editor: turns primitive input events into scene and history operations.
//!
//! Every command that changes the scene records a snapshot first, so it can be undone.
//! Undo, redo and the layering commands do not record snapshots.

use crate::codec::{self, CodecError};
use crate::config::EditorConfig;
use crate::effects::{EffectKind, EffectScheduler, EffectTask, EffectTiming};
use crate::geometry::Point;
use crate::history::{History, HistoryError};
use crate::scene::Scene;
use crate::shapes::{Color, ScaleDirection, Shape, ShapeError, ShapeKind};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Editor errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Key bindings as (key, description), in help order.
pub const KEY_BINDINGS: &[(char, &str)] = &[
    ('w', "Move selected shapes up"),
    ('a', "Move selected shapes left"),
    ('s', "Move selected shapes down"),
    ('d', "Move selected shapes right"),
    ('u', "Scale selected shapes up"),
    ('l', "Scale selected shapes down"),
    ('z', "Undo"),
    ('y', "Redo"),
    ('v', "Pulse selected shapes"),
    ('c', "Make selected shapes dance"),
    ('f', "Bring a selected shape forward"),
    ('b', "Send a selected shape backward"),
    ('x', "Delete selected shapes"),
];

/// The interactive editing session.
#[derive(Debug)]
pub struct Editor {
    scene: Scene,
    history: History,
    effects: EffectScheduler,
    config: EditorConfig,
    tool: ShapeKind,
    color: Color,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            scene: Scene::new(),
            history: History::with_policy(config.undo_limit, config.redo_policy),
            effects: EffectScheduler::new(),
            tool: config.default_tool,
            color: config.default_color,
            config,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn effects(&self) -> &EffectScheduler {
        &self.effects
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> ShapeKind {
        self.tool
    }

    /// Choose the shape placed by the next left click.
    pub fn set_tool(&mut self, tool: ShapeKind) {
        log::debug!("Tool: {}", tool);
        self.tool = tool;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Choose the color of newly placed shapes.
    pub fn set_color(&mut self, color: Color) {
        log::debug!("Color: {}", color);
        self.color = color;
    }

    fn snapshot(&mut self) {
        self.history.push(self.scene.copy());
    }

    /// Build the current tool's shape at a point.
    fn new_shape(&self, at: Point) -> Shape {
        let c = &self.config;
        match self.tool {
            ShapeKind::Square => Shape::square(self.color, at, c.square_side),
            ShapeKind::Circle => Shape::circle(self.color, at, c.circle_diameter),
            ShapeKind::Rectangle => {
                Shape::rectangle(self.color, at, c.rectangle_width, c.rectangle_height)
            }
        }
    }

    /// Handle a click. Returns true if a redraw is needed.
    ///
    /// Left places a new shape. Right selects every shape under the point, or clears the whole
    /// selection when nothing is there. Middle is ignored.
    pub fn click(&mut self, at: Point, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => {
                self.snapshot();
                let shape = self.new_shape(at);
                log::debug!("Placed {} at ({}, {})", shape.kind(), at.x, at.y);
                self.scene.add_shape(shape);
                true
            }
            MouseButton::Right => {
                let hits = self.scene.select_at(at);
                if hits.is_empty() {
                    self.scene.clear_selection();
                } else {
                    self.scene.mark_selected(&hits);
                }
                log::debug!("Selected {} shapes", hits.len());
                true
            }
            MouseButton::Middle => false,
        }
    }

    /// Begin a marquee gesture.
    pub fn press(&mut self, at: Point) {
        self.scene.start_drag(at);
    }

    /// Pointer moved with the button held.
    pub fn drag(&mut self, to: Point) -> bool {
        self.scene.update_select_rect(to);
        self.scene.is_dragging()
    }

    /// End a marquee gesture. The selection it made is kept.
    pub fn release(&mut self, _at: Point) -> bool {
        let was_dragging = self.scene.is_dragging();
        self.scene.stop_drag();
        was_dragging
    }

    /// Handle a key command. Returns true if a redraw is needed.
    ///
    /// Unknown keys are ignored. Undo and redo with nothing to restore are logged and ignored.
    pub fn key(&mut self, key: char) -> Result<bool, EditorError> {
        let distance = self.config.move_distance;
        match key {
            'w' => self.move_selected(0, -distance),
            'a' => self.move_selected(-distance, 0),
            's' => self.move_selected(0, distance),
            'd' => self.move_selected(distance, 0),
            'u' => self.scale_selected(ScaleDirection::Up)?,
            'l' => self.scale_selected(ScaleDirection::Down)?,
            'z' => return Ok(self.undo()),
            'y' => return Ok(self.redo()),
            'v' => self.start_effect(EffectKind::Pulse, self.config.pulse),
            'c' => self.start_effect(EffectKind::Dance, self.config.dance),
            'f' => return Ok(self.scene.bring_forward()),
            'b' => return Ok(self.scene.send_backward()),
            'x' => self.delete_selected(),
            other => {
                log::debug!("Ignoring key {:?}", other);
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn move_selected(&mut self, dx: i32, dy: i32) {
        self.snapshot();
        self.scene.move_selected(dx, dy);
    }

    fn scale_selected(&mut self, direction: ScaleDirection) -> Result<(), ShapeError> {
        self.snapshot();
        self.scene.scale_selected(direction)
    }

    fn delete_selected(&mut self) {
        self.snapshot();
        let selected = self.scene.selected_ids();
        let removed = self.scene.remove_shapes(&selected);
        log::debug!("Deleted {} shapes", removed);
    }

    fn start_effect(&mut self, kind: EffectKind, timing: EffectTiming) {
        self.snapshot();
        let targets = self.scene.selected_ids();
        self.effects.start(EffectTask::new(kind, targets, timing));
    }

    /// Restore the previous snapshot. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        Self::report(self.history.undo(&mut self.scene))
    }

    /// Reapply an undone snapshot. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        Self::report(self.history.redo(&mut self.scene))
    }

    fn report(result: Result<(), HistoryError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{}", e);
                false
            }
        }
    }

    /// Step due effects. Returns true if a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.effects.poll(now, &mut self.scene)
    }

    /// When the next effect step is due, if any effect is running.
    pub fn next_tick(&self, now: Instant) -> Option<Instant> {
        self.effects.next_due(now)
    }

    /// Replace the scene with parsed text.
    ///
    /// A snapshot is recorded only if the text parses; on error neither the scene nor the
    /// history changes.
    pub fn load(&mut self, text: &str) -> Result<usize, EditorError> {
        let scene: Scene = text.parse()?;
        Ok(self.replace_scene(scene))
    }

    /// Replace the scene with an already parsed one, recording a snapshot first.
    ///
    /// Returns the number of shapes now in the scene.
    pub fn replace_scene(&mut self, scene: Scene) -> usize {
        let shapes = scene.into_shapes();
        let count = shapes.len();
        self.snapshot();
        self.scene.replace_shapes(shapes);
        log::info!("Loaded {} shapes", count);
        count
    }

    /// Serialize the scene. The scene itself is left as is.
    pub fn save(&self) -> String {
        let text = codec::serialize(&self.scene);
        log::info!("Saved {} shapes", self.scene.len());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use std::time::Duration;

    fn editor_with_two_squares() -> Editor {
        let mut editor = Editor::default();
        editor.click(Point::new(0, 0), MouseButton::Left);
        editor.click(Point::new(200, 0), MouseButton::Left);
        editor
    }

    #[test]
    fn test_left_click_places_tool_shape() {
        let mut editor = Editor::default();
        assert!(editor.click(Point::new(10, 20), MouseButton::Left));
        let square = &editor.scene().shapes()[0];
        assert_eq!(square.kind(), ShapeKind::Square);
        assert_eq!(square.bounding_box(), BoundingBox::new(10, 110, 20, 120));
        assert_eq!(square.color(), Color::Red);

        editor.set_tool(ShapeKind::Circle);
        editor.set_color(Color::Blue);
        editor.click(Point::new(300, 300), MouseButton::Left);
        let circle = &editor.scene().shapes()[1];
        assert_eq!(circle.kind(), ShapeKind::Circle);
        assert_eq!(circle.bounding_box(), BoundingBox::new(250, 350, 250, 350));
        assert_eq!(circle.color(), Color::Blue);

        editor.set_tool(ShapeKind::Rectangle);
        editor.click(Point::new(0, 0), MouseButton::Left);
        let rect = &editor.scene().shapes()[2];
        assert_eq!(rect.bounding_box(), BoundingBox::new(0, 100, 0, 200));

        assert_eq!(editor.history().undo_len(), 3);
    }

    #[test]
    fn test_middle_click_is_ignored() {
        let mut editor = Editor::default();
        assert!(!editor.click(Point::new(0, 0), MouseButton::Middle));
        assert!(editor.scene().is_empty());
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_right_click_selects_or_clears() {
        let mut editor = editor_with_two_squares();
        editor.click(Point::new(50, 50), MouseButton::Right);
        editor.click(Point::new(250, 50), MouseButton::Right);
        assert_eq!(editor.scene().selected_ids().len(), 2);

        editor.click(Point::new(150, 500), MouseButton::Right);
        assert!(editor.scene().selected_ids().is_empty());
        assert_eq!(editor.history().undo_len(), 2);
    }

    #[test]
    fn test_marquee_gesture() {
        let mut editor = editor_with_two_squares();
        editor.press(Point::new(250, 250));
        assert!(editor.drag(Point::new(150, 50)));
        assert_eq!(editor.scene().selected_ids().len(), 1);
        assert!(editor.scene().selection_rect().is_some());

        assert!(editor.release(Point::new(150, 50)));
        assert!(editor.scene().selection_rect().is_none());
        assert_eq!(editor.scene().selected_ids().len(), 1);
        assert!(!editor.release(Point::new(0, 0)));
    }

    #[test]
    fn test_move_keys() {
        let mut editor = editor_with_two_squares();
        editor.click(Point::new(10, 10), MouseButton::Right);

        assert!(editor.key('d').unwrap());
        assert!(editor.key('s').unwrap());
        assert_eq!(editor.scene().shapes()[0].anchor(), Point::new(25, 25));
        assert_eq!(editor.scene().shapes()[1].anchor(), Point::new(200, 0));

        editor.key('a').unwrap();
        editor.key('w').unwrap();
        assert_eq!(editor.scene().shapes()[0].anchor(), Point::new(0, 0));
    }

    #[test]
    fn test_undo_redo_keys() {
        let mut editor = editor_with_two_squares();
        assert!(editor.key('z').unwrap());
        assert_eq!(editor.scene().len(), 1);
        assert!(editor.key('y').unwrap());
        assert_eq!(editor.scene().len(), 2);

        // Exhausted redo is ignored, not an error
        assert!(!editor.key('y').unwrap());
        editor.key('z').unwrap();
        editor.key('z').unwrap();
        assert!(!editor.key('z').unwrap());
        assert!(editor.scene().is_empty());
    }

    #[test]
    fn test_scale_keys() {
        let mut editor = editor_with_two_squares();
        editor.click(Point::new(10, 10), MouseButton::Right);
        editor.key('u').unwrap();
        assert_eq!(editor.scene().shapes()[0].bounding_box().width(), 125);
        editor.key('l').unwrap();
        assert_eq!(editor.scene().shapes()[0].bounding_box().width(), 100);
    }

    #[test]
    fn test_scaling_rectangle_reports_error() {
        let mut editor = Editor::default();
        editor.set_tool(ShapeKind::Rectangle);
        editor.click(Point::new(0, 0), MouseButton::Left);
        editor.click(Point::new(10, 10), MouseButton::Right);

        let err = editor.key('u').unwrap_err();
        assert_eq!(
            err,
            EditorError::Shape(ShapeError::UnsupportedOperation {
                operation: "scale_up",
                shape: ShapeKind::Rectangle,
            })
        );
        assert_eq!(editor.scene().shapes()[0].bounding_box().width(), 100);
    }

    #[test]
    fn test_layering_keys_do_not_snapshot() {
        let mut editor = editor_with_two_squares();
        let back = editor.scene().shapes()[0].id();
        editor.click(Point::new(10, 10), MouseButton::Right);
        let depth = editor.history().undo_len();

        assert!(editor.key('f').unwrap());
        assert_eq!(editor.scene().position(back), Some(1));
        assert!(!editor.key('f').unwrap());
        assert!(editor.key('b').unwrap());
        assert_eq!(editor.scene().position(back), Some(0));
        assert_eq!(editor.history().undo_len(), depth);
    }

    #[test]
    fn test_delete_key() {
        let mut editor = editor_with_two_squares();
        editor.click(Point::new(210, 10), MouseButton::Right);
        assert!(editor.key('x').unwrap());
        assert_eq!(editor.scene().len(), 1);
        editor.key('z').unwrap();
        assert_eq!(editor.scene().len(), 2);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut editor = editor_with_two_squares();
        let depth = editor.history().undo_len();
        assert!(!editor.key('q').unwrap());
        assert_eq!(editor.history().undo_len(), depth);
    }

    #[test]
    fn test_effects_run_until_budget_is_spent() {
        let config = EditorConfig {
            pulse: EffectTiming {
                total_ms: 40,
                interval_ms: 10,
            },
            ..EditorConfig::default()
        };
        let mut editor = Editor::new(config);
        editor.click(Point::new(0, 0), MouseButton::Left);
        editor.click(Point::new(10, 10), MouseButton::Right);
        editor.key('v').unwrap();
        assert!(!editor.effects().is_idle());

        let t0 = Instant::now();
        let mut steps = 0;
        let mut now = t0;
        while let Some(due) = editor.next_tick(now) {
            now = due.max(now);
            if editor.tick(now) {
                steps += 1;
            }
            now += Duration::from_millis(10);
        }
        assert_eq!(steps, 4);
        assert!(editor.effects().is_idle());
        // Two ups and two downs
        assert_eq!(editor.scene().shapes()[0].bounding_box().width(), 100);
    }

    #[test]
    fn test_effect_without_selection_does_nothing() {
        let mut editor = editor_with_two_squares();
        editor.key('c').unwrap();
        assert!(editor.effects().is_idle());
    }

    #[test]
    fn test_load_and_save() {
        let mut editor = editor_with_two_squares();
        let count = editor
            .load("CIRCLE 50 50 20 GREEN true\nRECTANGLE 0 0 1 2 BLACK false\n")
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(editor.scene().shapes()[0].kind(), ShapeKind::Circle);

        let saved = editor.save();
        assert_eq!(saved, "CIRCLE 50 50 20 GREEN true\nRECTANGLE 0 0 1 2 BLACK false\n");
        assert_eq!(editor.scene().len(), 2);

        editor.key('z').unwrap();
        assert_eq!(editor.scene().shapes()[0].kind(), ShapeKind::Square);
    }

    #[test]
    fn test_failed_load_changes_nothing() {
        let mut editor = editor_with_two_squares();
        let before = editor.save();
        let depth = editor.history().undo_len();

        let err = editor.load("SQUARE 1 2 3 RED maybe").unwrap_err();
        assert!(matches!(err, EditorError::Codec(_)));
        assert_eq!(editor.save(), before);
        assert_eq!(editor.history().undo_len(), depth);
    }

    #[test]
    fn test_replace_scene_is_undoable() {
        let mut editor = editor_with_two_squares();
        let scene: Scene = "CIRCLE 5 5 10 CYAN false".parse().unwrap();
        assert_eq!(editor.replace_scene(scene), 1);
        assert_eq!(editor.scene().shapes()[0].kind(), ShapeKind::Circle);

        assert!(editor.undo());
        assert_eq!(editor.scene().len(), 2);
    }

    #[test]
    fn test_load_out_of_range_record_changes_nothing() {
        let mut editor = editor_with_two_squares();
        let before = editor.save();

        let err = editor.load("SQUARE 2147483647 0 10 RED false").unwrap_err();
        assert!(matches!(
            err,
            EditorError::Codec(CodecError::MalformedRecord {
                fault: crate::codec::RecordFault::OutOfRange { field: "side", .. },
                ..
            })
        ));
        assert_eq!(editor.save(), before);
    }

    #[test]
    fn test_key_bindings_cover_every_command() {
        let mut editor = Editor::default();
        for &(key, _) in KEY_BINDINGS {
            assert!(editor.key(key).is_ok(), "key {key}");
        }
    }
}
